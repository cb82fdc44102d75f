use crate::routes::errors::ApiError;
use quill_api::users::{NewUserData, UserData};
use quill_models::{
    db_conn::DbConn,
    follows::{Follow, NewFollow},
    users::{NewUser, User},
    Error,
};
use rocket_contrib::json::Json;
use validator::Validate;

#[post("/users", format = "json", data = "<data>")]
pub fn create(conn: DbConn, data: Json<NewUserData>) -> Result<Json<UserData>, ApiError> {
    data.validate().map_err(|_| Error::InvalidValue)?;
    let user = NewUser::new_local(
        &*conn,
        data.username.clone(),
        data.display_name.clone().unwrap_or_default(),
        data.summary.as_deref().unwrap_or(""),
        data.email.clone(),
        &data.password,
    )?;
    tracing::info!("registered user {}", user.username);
    Ok(Json(user.to_data()))
}

#[get("/users/<id>")]
pub fn details(id: i32, conn: DbConn, _user: User) -> Result<Json<UserData>, ApiError> {
    let user = User::get(&*conn, id)?;
    Ok(Json(user.to_data()))
}

/// Follows `id` and returns the updated list of followed user ids.
#[post("/users/<id>/follow")]
pub fn follow(id: i32, conn: DbConn, user: User) -> Result<Json<Vec<i32>>, ApiError> {
    Follow::insert(
        &*conn,
        NewFollow {
            follower_id: user.id,
            following_id: id,
        },
    )?;
    Ok(Json(Follow::followed_ids(&*conn, user.id)?))
}

#[post("/users/<id>/unfollow")]
pub fn unfollow(id: i32, conn: DbConn, user: User) -> Result<Json<Vec<i32>>, ApiError> {
    Follow::delete(&*conn, user.id, id)?;
    Ok(Json(Follow::followed_ids(&*conn, user.id)?))
}
