use crate::routes::errors::ApiError;
use quill_api::posts::PostData;
use quill_models::{db_conn::DbConn, posts::Post, users::User};
use rocket_contrib::json::Json;

/// The home feed: posts from followed authors, most recent first.
#[get("/timeline")]
pub fn feed(conn: DbConn, user: User) -> Result<Json<Vec<PostData>>, ApiError> {
    let posts = Post::from_followed(&*conn, &user)?
        .into_iter()
        .map(|p| p.to_data(&*conn))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(posts))
}
