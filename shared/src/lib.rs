pub mod submission;
pub mod theme;

use serde::{Deserialize, Serialize};

/// Endpoint the upload form posts to.
pub const PREDICT_ENDPOINT: &str = "/predict";

/// Multipart field carrying the uploaded image.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_class: Option<usize>,
    pub predicted_label: String,
    pub cause: String,
    pub prevention: String,
    pub uploaded_file_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
