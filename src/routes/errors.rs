use quill_models::Error;
use rocket::{
    http::Status,
    response::{self, status, Responder},
    Request,
};
use rocket_contrib::json::JsonValue;

/// Maps model errors onto JSON API responses.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> ApiError {
        ApiError(err)
    }
}

impl<'r> Responder<'r> for ApiError {
    fn respond_to(self, req: &Request<'_>) -> response::Result<'r> {
        let (status, message) = match self.0 {
            Error::NotFound => (Status::NotFound, "Not found"),
            Error::Conflict => (Status::Conflict, "Already exists"),
            Error::Unauthorized => (Status::Unauthorized, "You are not authorized to do this"),
            Error::InvalidValue => (Status::BadRequest, "Invalid payload"),
            ref err => {
                tracing::error!("internal error: {:?}", err);
                (Status::InternalServerError, "Internal server error")
            }
        };
        status::Custom(status, json!({ "error": message })).respond_to(req)
    }
}

#[catch(400)]
pub fn bad_request() -> JsonValue {
    json!({ "error": "Invalid payload" })
}

#[catch(401)]
pub fn unauthorized() -> JsonValue {
    json!({ "error": "You need to be logged in" })
}

#[catch(404)]
pub fn not_found() -> JsonValue {
    json!({ "error": "Not found" })
}

#[catch(422)]
pub fn unprocessable_entity() -> JsonValue {
    json!({ "error": "Invalid payload" })
}

#[catch(500)]
pub fn server_error() -> JsonValue {
    json!({ "error": "Internal server error" })
}
