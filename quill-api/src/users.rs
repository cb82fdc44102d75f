use validator::{Validate, ValidationError};

/// Payload for account registration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct NewUserData {
    #[validate(
        length(min = 1, max = 60, message = "Username must be between 1 and 60 characters"),
        custom = "validate_username"
    )]
    pub username: String,
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password should be at least 8 characters long"))]
    pub password: String,
    pub summary: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginData {
    pub username_or_email: String,
    pub password: String,
}

/// The public identity of a user, as attached to posts, comments and
/// profile responses. Never carries credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub summary: String,
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.contains(&['<', '>', '&', '@', '\'', '"', ' ', '\t'][..]) {
        Err(ValidationError::new("username_illegal_char"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_reserved_characters() {
        assert!(validate_username("jan").is_ok());
        assert!(validate_username("jan@example.com").is_err());
        assert!(validate_username("a b").is_err());
    }
}
