use crate::routes::errors::ApiError;
use quill_api::users::{LoginData, UserData};
use quill_models::{
    db_conn::DbConn,
    users::{User, AUTH_COOKIE},
};
use rocket::http::{Cookie, Cookies};
use rocket_contrib::json::{Json, JsonValue};

#[post("/login", format = "json", data = "<data>")]
pub fn create(
    conn: DbConn,
    data: Json<LoginData>,
    mut cookies: Cookies<'_>,
) -> Result<Json<UserData>, ApiError> {
    let user = User::login(&*conn, &data.username_or_email, &data.password)?;
    cookies.add_private(Cookie::new(AUTH_COOKIE, user.id.to_string()));
    tracing::info!("{} logged in", user.username);
    Ok(Json(user.to_data()))
}

#[post("/logout")]
pub fn delete(mut cookies: Cookies<'_>) -> JsonValue {
    if let Some(cookie) = cookies.get_private(AUTH_COOKIE) {
        cookies.remove_private(cookie);
    }
    json!({ "message": "Logged out" })
}
