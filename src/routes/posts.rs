use crate::routes::errors::ApiError;
use quill_api::posts::{NewPostData, PostData, PostDetails};
use quill_models::{
    db_conn::DbConn,
    posts::{NewPost, Post},
    safe_string::SafeString,
    users::User,
    Error,
};
use rocket_contrib::json::Json;
use validator::Validate;

#[get("/posts")]
pub fn list(conn: DbConn, _user: User) -> Result<Json<Vec<PostData>>, ApiError> {
    let posts = Post::recents(&*conn)?
        .into_iter()
        .map(|p| p.to_data(&*conn))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(posts))
}

#[get("/posts/<id>")]
pub fn details(id: i32, conn: DbConn, _user: User) -> Result<Json<PostDetails>, ApiError> {
    let post = Post::get(&*conn, id)?;
    Ok(Json(post.to_details(&*conn)?))
}

#[post("/posts", format = "json", data = "<data>")]
pub fn create(
    conn: DbConn,
    data: Json<NewPostData>,
    user: User,
) -> Result<Json<PostData>, ApiError> {
    data.validate().map_err(|_| Error::InvalidValue)?;
    let post = Post::insert(
        &*conn,
        NewPost {
            author_id: user.id,
            title: data.title.clone(),
            content: SafeString::new(&data.content),
            creation_date: data.creation_date,
        },
    )?;
    tracing::info!("{} published \"{}\"", user.username, post.title);
    Ok(Json(post.to_data(&*conn)?))
}
