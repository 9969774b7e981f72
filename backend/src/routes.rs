use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use log::{error, info};
use shared::{PREDICT_ENDPOINT, PredictionResponse, UPLOAD_FIELD};
use std::path::Path;

use crate::classifier::Model;
use crate::error::PredictError;
use crate::storage::upload_store::{UPLOAD_URL_PREFIX, UploadError, UploadStore};

pub fn configure_routes(cfg: &mut web::ServiceConfig, upload_dir: &Path, frontend_dir: &Path) {
    cfg.service(web::resource(PREDICT_ENDPOINT).route(web::post().to(predict)))
        .service(Files::new(UPLOAD_URL_PREFIX, upload_dir))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

struct Upload {
    filename: String,
    data: Vec<u8>,
}

/// Pulls the first `file` part carrying a filename out of the multipart body.
/// Other parts are skipped.
async fn read_upload(payload: &mut Multipart, max_bytes: usize) -> Result<Upload, UploadError> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => {
                error!("Malformed multipart body: {}", e);
                return Err(UploadError::MissingFile);
            }
        };

        let filename = match field.content_disposition() {
            Some(cd) if cd.get_name() == Some(UPLOAD_FIELD) => cd.get_filename().map(str::to_owned),
            _ => None,
        };
        let Some(filename) = filename else {
            continue;
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| {
                error!("Upload stream interrupted: {}", e);
                UploadError::MissingFile
            })?;
            if data.len() + chunk.len() > max_bytes {
                return Err(UploadError::FileTooLarge);
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(Upload { filename, data });
    }

    Err(UploadError::MissingFile)
}

async fn predict(
    model: web::Data<Model>,
    uploads: web::Data<UploadStore>,
    mut payload: Multipart,
) -> Result<HttpResponse, PredictError> {
    let result = handle_predict(&model, &uploads, &mut payload).await;
    match result {
        Ok(prediction) => {
            info!("Prediction: {}", prediction.predicted_label);
            Ok(HttpResponse::Ok().json(prediction))
        }
        Err(e) => {
            match &e {
                PredictError::Rejected(reason) => error!("Upload rejected: {}", reason),
                other => error!("Prediction error: {:?}", other),
            }
            Err(e)
        }
    }
}

async fn handle_predict(
    model: &Model,
    uploads: &UploadStore,
    payload: &mut Multipart,
) -> Result<PredictionResponse, PredictError> {
    let upload = read_upload(payload, uploads.max_bytes()).await?;

    if upload.filename.is_empty() {
        return Err(UploadError::EmptyFilename.into());
    }
    if !UploadStore::allowed_file(&upload.filename) {
        return Err(UploadError::DisallowedType.into());
    }

    let model = model.clone();
    let uploads = uploads.clone();

    // Decoding, resizing and inference are CPU bound.
    web::block(move || -> Result<PredictionResponse, PredictError> {
        let stored = uploads.save(&upload.filename, &upload.data)?;
        let diagnosis = model.inference(&upload.data)?;

        Ok(PredictionResponse {
            predicted_class: Some(diagnosis.class_index),
            predicted_label: diagnosis.label.to_string(),
            cause: diagnosis.cause.to_string(),
            prevention: diagnosis.prevention.to_string(),
            uploaded_file_url: stored.url,
        })
    })
    .await
    .map_err(|e| PredictError::Prediction(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Classifier, ImageTensor, InferenceError};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::Value;
    use std::path::PathBuf;
    use std::sync::Arc;
    use uuid::Uuid;

    const BOUNDARY: &str = "----leafboundary";

    struct FixedScores(Vec<f32>);

    impl Classifier for FixedScores {
        fn predict(&self, _input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
            Ok(self.0.clone())
        }
    }

    fn early_blight() -> Model {
        let mut scores = vec![0.01; 11];
        scores[1] = 0.9;
        Model::new(Arc::new(FixedScores(scores)))
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("predict-route-{}", Uuid::new_v4().simple()))
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(8, 8);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn multipart(name: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    async fn post_predict(
        model: Model,
        max_bytes: usize,
        body: Vec<u8>,
    ) -> (StatusCode, Value, PathBuf) {
        let dir = temp_dir();
        let uploads = UploadStore::new(dir.join("uploads"), max_bytes);
        uploads.ensure_dir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(model))
                .app_data(web::Data::new(uploads.clone()))
                .configure(|cfg| configure_routes(cfg, uploads.dir(), &dir.join("dist"))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(PREDICT_ENDPOINT)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let json: Value = test::read_body_json(resp).await;
        (status, json, dir)
    }

    #[actix_web::test]
    async fn successful_prediction_stores_upload_and_reports_guidance() {
        let dir = temp_dir();
        let uploads = UploadStore::new(dir.join("uploads"), 1 << 20);
        uploads.ensure_dir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(early_blight()))
                .app_data(web::Data::new(uploads.clone()))
                .configure(|cfg| configure_routes(cfg, uploads.dir(), &dir.join("dist"))),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/predict")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart("file", Some("my leaf.png"), &png_bytes()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["predicted_class"], 1);
        assert_eq!(body["predicted_label"], "Early_blight");
        assert_eq!(body["cause"], "Caused by the fungus Alternaria solani.");
        assert_eq!(
            body["prevention"],
            "Remove infected plant debris, use resistant varieties, and apply fungicides."
        );

        let url = body["uploaded_file_url"].as_str().unwrap().to_string();
        assert!(url.starts_with("/static/uploads/"), "{url}");
        assert!(url.ends_with("_my_leaf.png"), "{url}");

        let stored = test::TestRequest::get().uri(&url).to_request();
        let resp = test::call_service(&app, stored).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let served = test::read_body(resp).await;
        assert_eq!(served.as_ref(), png_bytes().as_slice());

        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn missing_file_part_is_rejected() {
        let body = multipart("image", Some("a.png"), b"x");
        let (status, body, dir) = post_predict(early_blight(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "No file uploaded" }));
        std::fs::remove_dir_all(dir).ok();

        // A plain text field named `file` is not a file upload.
        let body = multipart("file", None, b"x");
        let (status, body, dir) = post_predict(early_blight(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file uploaded");
        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn empty_filename_is_rejected() {
        let body = multipart("file", Some(""), b"");
        let (status, body, dir) = post_predict(early_blight(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No file selected");
        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn disallowed_extension_is_rejected_before_storing() {
        let body = multipart("file", Some("notes.txt"), b"hello");
        let (status, body, dir) = post_predict(early_blight(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File type not allowed");
        assert_eq!(std::fs::read_dir(dir.join("uploads")).unwrap().count(), 0);
        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn oversized_upload_is_rejected() {
        let body = multipart("file", Some("big.png"), &[0u8; 64]);
        let (status, body, dir) = post_predict(early_blight(), 16, body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "File too large");
        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn undecodable_image_reports_processing_failure() {
        let body = multipart("file", Some("leaf.png"), b"not a png");
        let (status, body, dir) = post_predict(early_blight(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process the image");
        assert!(body["details"].is_string());
        std::fs::remove_dir_all(dir).ok();
    }

    #[actix_web::test]
    async fn missing_model_reports_prediction_failure() {
        let body = multipart("file", Some("leaf.jpg"), &png_bytes());
        let (status, body, dir) = post_predict(Model::unavailable(), 1 << 20, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process the image or make prediction");
        assert_eq!(body["details"], "Model is not loaded");
        std::fs::remove_dir_all(dir).ok();
    }
}
