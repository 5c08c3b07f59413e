/// HTTP client for the OCR backend
///
/// Three calls, each a single outbound request with the same response
/// handling: non-2xx becomes `ApiError::Status`, the body then goes
/// through `decode_body`.

use std::path::PathBuf;

use image::ImageFormat;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info};

use super::decode::{decode_as, decode_body};
use super::error::{ApiError, UploadError};
use super::types::{Recognition, SaveRecordRequest};
use crate::state::data::{ConfigData, IdentityRecord, Side};

/// Fixed address of the OCR backend
pub const BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for OcrClient {
    fn default() -> Self {
        Self::new(BACKEND_URL)
    }
}

impl OcrClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /recognize-text/{F|B}/{threshold}` with the image as the
    /// multipart field `image`.
    pub async fn recognize_text(
        &self,
        side: Side,
        threshold: u8,
        file_name: String,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<Recognition, ApiError> {
        let url = format!(
            "{}/recognize-text/{}/{}",
            self.base_url,
            side.api_code(),
            threshold
        );
        let hint = format!(
            "Failed to process image. Is the backend server running at {}?",
            self.base_url
        );
        let transport = |source: reqwest::Error| ApiError::Transport {
            hint: hint.clone(),
            source,
        };

        info!("📤 Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(transport)?;
        let form = Form::new().part("image", part);

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let text = read_body(response, &hint).await?;
        match side {
            Side::Front => decode_as(&text).map(Recognition::Front),
            Side::Back => decode_as(&text).map(Recognition::Back),
        }
    }

    /// `POST /save` with the finalized record.
    pub async fn save_record(&self, record: &IdentityRecord) -> Result<Value, ApiError> {
        let url = format!("{}/save", self.base_url);
        let base_url = self.base_url.clone();

        let response = self
            .http
            .post(&url)
            .json(&SaveRecordRequest::from(record))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                hint: format!("Failed to reach the backend at {}: {}", base_url, source),
                source,
            })?;

        let hint = format!("Failed to reach the backend at {}", self.base_url);
        let text = read_body(response, &hint).await?;
        debug!("💾 Record saved");
        decode_body(&text)
    }

    /// `POST /save-config` with the three paths.
    pub async fn save_config(&self, config: &ConfigData) -> Result<Value, ApiError> {
        let url = format!("{}/save-config", self.base_url);
        let hint = "Failed to save config on the backend.";

        let response = self
            .http
            .post(&url)
            .json(config)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                hint: hint.to_string(),
                source,
            })?;

        let text = read_body(response, hint).await?;
        debug!("⚙️  Configuration sent to backend");
        decode_body(&text)
    }
}

/// Check the status and read the body text.
async fn read_body(response: reqwest::Response, hint: &str) -> Result<String, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response.".to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response.text().await.map_err(|source| ApiError::Transport {
        hint: hint.to_string(),
        source,
    })
}

/// Read a picked image from disk, check it is PNG or JPEG, and send it
/// for recognition.
pub async fn upload_image(
    client: OcrClient,
    path: PathBuf,
    side: Side,
    threshold: u8,
) -> Result<Recognition, UploadError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| UploadError::Read {
            path: path.clone(),
            source,
        })?;

    let mime = match image::guess_format(&bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        _ => return Err(UploadError::Unsupported { path }),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(client
        .recognize_text(side, threshold, file_name, mime, bytes)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub;
    use axum::body::Bytes;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    /// Smallest byte prefix `image::guess_format` recognises as PNG
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\0";

    #[tokio::test]
    async fn test_front_upload_hits_side_and_threshold_path() {
        let router = Router::new().route(
            "/recognize-text/:side/:threshold",
            post(|Path((side, threshold)): Path<(String, u16)>, body: Bytes| async move {
                let multipart = String::from_utf8_lossy(&body);
                assert!(multipart.contains("name=\"image\""));
                assert!(multipart.contains("filename=\"card.png\""));
                Json(json!({
                    "image": "AAAA",
                    "face": "BBBB",
                    "name": format!("{side}/{threshold}"),
                    "address": "Cairo",
                    "ID": "29801011234567",
                    "DOB": "1998-01-01",
                }))
            }),
        );
        let client = stub::spawn(router).await;

        let result = client
            .recognize_text(Side::Front, 110, "card.png".into(), "image/png", PNG_MAGIC.to_vec())
            .await
            .unwrap();

        let Recognition::Front(front) = result else {
            panic!("expected a front recognition");
        };
        assert_eq!(front.name, "F/110");
        assert_eq!(front.id, "29801011234567");
        assert_eq!(front.face, "BBBB");
    }

    #[tokio::test]
    async fn test_back_upload_accepts_double_encoded_body() {
        let router = Router::new().route(
            "/recognize-text/:side/:threshold",
            post(|| async {
                let inner = json!({
                    "image": "AAAA",
                    "profession": "Engineer",
                    "gender": "Male",
                    "marital_status": "Single",
                    "religion": "Muslim",
                    "enddate": "2029-05-01",
                })
                .to_string();
                serde_json::to_string(&inner).unwrap()
            }),
        );
        let client = stub::spawn(router).await;

        let result = client
            .recognize_text(Side::Back, 0, "back.jpg".into(), "image/jpeg", vec![0xFF, 0xD8, 0xFF])
            .await
            .unwrap();

        let Recognition::Back(back) = result else {
            panic!("expected a back recognition");
        };
        assert_eq!(back.profession, "Engineer");
        assert_eq!(back.husband_name, None);
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let router = Router::new().route(
            "/recognize-text/:side/:threshold",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "server error") }),
        );
        let client = stub::spawn(router).await;

        let err = client
            .recognize_text(Side::Front, 255, "card.png".into(), "image/png", PNG_MAGIC.to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(err.to_string(), "API Error: 500 - server error");
    }

    #[tokio::test]
    async fn test_unparsable_body_is_invalid_response() {
        let router = Router::new().route("/save", post(|| async { "<html>nope</html>" }));
        let client = stub::spawn(router).await;

        let err = client.save_record(&IdentityRecord::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse));
    }

    #[tokio::test]
    async fn test_unreachable_backend_gives_hint() {
        let client = stub::unreachable().await;

        let err = client
            .recognize_text(Side::Front, 110, "card.png".into(), "image/png", PNG_MAGIC.to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert!(err.to_string().contains("Is the backend server running at"));

        let err = client.save_config(&ConfigData::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to save config on the backend.");
    }

    #[tokio::test]
    async fn test_save_record_posts_backend_keys() {
        let router = Router::new().route(
            "/save",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["NationalID"], "29801011234567");
                assert_eq!(body["Profision"], "Engineer");
                assert_eq!(body["MartialStat"], "Single");
                assert_eq!(body["Husband_name"], "");
                Json(json!({ "message": "Data saved successfully" }))
            }),
        );
        let client = stub::spawn(router).await;

        let record = IdentityRecord {
            id_number: "29801011234567".into(),
            profession: "Engineer".into(),
            marital_status: "Single".into(),
            ..IdentityRecord::default()
        };
        let reply = client.save_record(&record).await.unwrap();
        assert_eq!(reply["message"], "Data saved successfully");
    }

    #[tokio::test]
    async fn test_save_config_posts_camel_case() {
        let router = Router::new().route(
            "/save-config",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(
                    body,
                    json!({ "savePath": "/out", "backPath": "/b", "frontPath": "/f" })
                );
                Json(json!({ "message": "ok" }))
            }),
        );
        let client = stub::spawn(router).await;

        let config = ConfigData {
            save_path: "/out".into(),
            back_path: "/b".into(),
            front_path: "/f".into(),
        };
        client.save_config(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_image_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "just text").unwrap();

        let err = upload_image(stub::unreachable().await, path, Side::Front, 110)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_upload_image_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = upload_image(stub::unreachable().await, path, Side::Back, 110)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Read { .. }));
    }

    #[tokio::test]
    async fn test_upload_image_sends_png() {
        let router = Router::new().route(
            "/recognize-text/:side/:threshold",
            post(|body: Bytes| async move {
                let multipart = String::from_utf8_lossy(&body);
                assert!(multipart.contains("image/png"));
                assert!(multipart.contains("filename=\"scan.png\""));
                Json(json!({ "image": "AAAA", "profession": "Doctor" }))
            }),
        );
        let client = stub::spawn(router).await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let result = upload_image(client, path, Side::Back, 42).await.unwrap();
        assert!(matches!(result, Recognition::Back(ref back) if back.profession == "Doctor"));
    }
}
