use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::ScanError;
use crate::types::{ScanMode, ScanResponseWire, ScanResult};

/// API client for the image-classification backend
pub struct ScanApi {
    client: Client,
    base_url: String,
}

impl ScanApi {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Post a captured JPEG plus the scan mode and get the classified item
    pub async fn scan(&self, image: Vec<u8>, mode: ScanMode) -> Result<ScanResult, ScanError> {
        let url = format!("{}/scan", self.base_url);

        let file = Part::bytes(image)
            .file_name("capture.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| ScanError::Network(e.to_string()))?;
        let form = Form::new().part("file", file).text("mode", mode.as_str());

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ScanError::ServerError {
                status: status.as_u16(),
                message: text,
            });
        }

        let wire: ScanResponseWire = response.json().await?;
        Ok(wire.into())
    }
}
