use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// The query title matched no normalized movie name
    #[error("Movie '{0}' not found in the dataset")]
    MovieNotFound(String),

    /// The title resolved to a movie that has no ratings, so it has no
    /// column in the similarity table
    #[error("Movie '{0}' has no ratings to compare against")]
    Unrated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data load error: {0}")]
    DataLoad(#[from] csv::Error),

    /// A row parsed but holds a value the engine cannot use
    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MovieNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unrated(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::DataLoad(_) | AppError::MalformedData(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_carries_query() {
        let err = AppError::MovieNotFound("Nonexistent Title".to_string());
        assert_eq!(
            err.to_string(),
            "Movie 'Nonexistent Title' not found in the dataset"
        );
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MovieNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Unrated("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::MalformedData("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
