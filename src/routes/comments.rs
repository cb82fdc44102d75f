use crate::routes::errors::ApiError;
use quill_api::comments::{CommentData, NewCommentData};
use quill_models::{
    comments::{Comment, NewComment},
    db_conn::DbConn,
    safe_string::SafeString,
    users::User,
    Error,
};
use rocket_contrib::json::Json;
use validator::Validate;

#[post("/comments", format = "json", data = "<data>")]
pub fn create(
    conn: DbConn,
    data: Json<NewCommentData>,
    user: User,
) -> Result<Json<CommentData>, ApiError> {
    data.validate().map_err(|_| Error::InvalidValue)?;
    let comment = Comment::insert(
        &*conn,
        NewComment {
            content: SafeString::new(&data.content),
            post_id: data.post_id,
            author_id: user.id,
        },
    )?;
    Ok(Json(comment.to_data(&*conn)?))
}
