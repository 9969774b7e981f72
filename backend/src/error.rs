use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::ErrorResponse;

use crate::classifier::InferenceError;
use crate::storage::upload_store::UploadError;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Rejected(UploadError),
    #[error("Failed to process the image")]
    ImageProcessing(String),
    #[error("Failed to process the image or make prediction")]
    Prediction(String),
}

impl PredictError {
    fn details(&self) -> Option<String> {
        match self {
            PredictError::Rejected(_) => None,
            PredictError::ImageProcessing(details) | PredictError::Prediction(details) => {
                Some(details.clone())
            }
        }
    }
}

impl From<UploadError> for PredictError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(e) => PredictError::Prediction(e.to_string()),
            other => PredictError::Rejected(other),
        }
    }
}

impl From<InferenceError> for PredictError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Preprocessing(details) => PredictError::ImageProcessing(details),
            other => PredictError::Prediction(other.to_string()),
        }
    }
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictError::Rejected(UploadError::FileTooLarge) => StatusCode::PAYLOAD_TOO_LARGE,
            PredictError::Rejected(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: Some(self.to_string()),
            details: self.details(),
        })
    }
}
