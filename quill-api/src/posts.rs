use crate::{comments::CommentData, users::UserData};
use chrono::NaiveDateTime;
use validator::Validate;

#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct NewPostData {
    #[validate(length(min = 1, max = 120, message = "Title must be between 1 and 120 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "Post content may not be empty"))]
    pub content: String,
    /// Mostly useful for imports; left unset, the server stamps the post.
    pub creation_date: Option<NaiveDateTime>,
}

/// A post as it appears in lists and in the home feed: author identity
/// attached, comments not loaded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostData {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub creation_date: NaiveDateTime,
    pub author: UserData,
}

/// A single fetched post, with its comment thread in creation order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostDetails {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub creation_date: NaiveDateTime,
    pub author: UserData,
    pub comments: Vec<CommentData>,
}
