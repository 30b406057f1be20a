use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use studio::{ErrorResponse, StudioError};

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        let status = match &err {
            StudioError::SplashActive => StatusCode::CONFLICT,
            StudioError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StudioError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            StudioError::MissingApiKey | StudioError::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}
