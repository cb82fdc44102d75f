use crate::users::UserData;
use chrono::NaiveDateTime;
use validator::Validate;

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct NewCommentData {
    pub post_id: i32,
    #[validate(length(min = 1, message = "Comment content may not be empty"))]
    pub content: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommentData {
    pub id: i32,
    pub post_id: i32,
    pub content: String,
    pub creation_date: NaiveDateTime,
    pub author: UserData,
}
