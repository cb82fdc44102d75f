pub mod comments;
pub mod errors;
pub mod posts;
pub mod session;
pub mod timelines;
pub mod users;
