/// HTTP client for the classification endpoint
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{error, info, warn};

use super::response::{PredictResponse, Prediction};
use super::{validate, InferenceError};
use crate::config::Config;
use crate::state::data::SelectedImage;

/// Name of the multipart field the server reads
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    threshold: Option<f32>,
}

impl InferenceClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            threshold: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, InferenceError> {
        let client = Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))?;
        Ok(client.with_threshold(config.confidence_threshold))
    }

    /// Minimum confidence the server should report
    pub fn with_threshold(mut self, threshold: Option<f32>) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the image and decode the answer
    ///
    /// Unsupported extensions fail before the file is read or any request
    /// is made. One attempt only.
    pub async fn predict(&self, image: &SelectedImage) -> Result<Prediction, InferenceError> {
        validate(image)?;

        let bytes = tokio::fs::read(&image.location).await?;
        info!(
            path = %image.location.display(),
            bytes = bytes.len(),
            endpoint = %self.endpoint,
            "Sending image for prediction"
        );

        let part = Part::bytes(bytes)
            .file_name(image.upload_name())
            .mime_str(&image.mime_type())?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let mut request = self.http.post(&self.endpoint).multipart(form);
        if let Some(threshold) = self.threshold {
            request = request.query(&[("threshold", threshold)]);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Prediction request failed");
            e
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let reason = PredictResponse::from_slice(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            warn!(status = status.as_u16(), %reason, "Server rejected prediction");
            return Err(InferenceError::Status(status.as_u16()));
        }

        let prediction = PredictResponse::from_slice(&body)?.into_prediction();
        info!(
            predictions = prediction.bundle.predictions.len(),
            has_recommendation = prediction.bundle.recommendation.is_some(),
            has_details = prediction.bundle.details.is_some(),
            "Prediction received"
        );

        Ok(prediction)
    }
}
