/// Response schema of the `/predict` endpoint
///
/// Every field is optional. The server sends `predictions`,
/// `recommendation` and `flower_details` when flowers were found, a lone
/// `message` when none were, and `error` with a 4xx status.
use serde::Deserialize;

use crate::state::data::{PredictionItem, ResultBundle};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictResponse {
    pub predictions: Option<Vec<WirePrediction>>,
    pub recommendation: Option<String>,
    pub flower_details: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WirePrediction {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
}

/// A decoded response, ready for the view state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prediction {
    pub bundle: ResultBundle,
    /// Informational text to show instead of results
    pub notice: Option<String>,
}

impl PredictResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Fold into a bundle; `message` only matters when `predictions` is absent
    pub fn into_prediction(self) -> Prediction {
        let notice = match &self.predictions {
            None => self.message,
            Some(_) => None,
        };

        let predictions = self
            .predictions
            .unwrap_or_default()
            .into_iter()
            .map(|p| PredictionItem {
                label: p.label,
                confidence: p.confidence,
            })
            .collect();

        Prediction {
            bundle: ResultBundle {
                predictions,
                recommendation: self.recommendation,
                details: self.flower_details,
            },
            notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_response() {
        let body = br#"{
            "predictions": [{"class": "Rose", "confidence": 0.97}],
            "recommendation": "Water twice weekly",
            "flower_details": "Rosa spp., native to Asia"
        }"#;

        let prediction = PredictResponse::from_slice(body).unwrap().into_prediction();

        assert_eq!(prediction.notice, None);
        assert_eq!(prediction.bundle.predictions.len(), 1);
        assert_eq!(prediction.bundle.predictions[0].label, "Rose");
        assert_eq!(prediction.bundle.recommendation.as_deref(), Some("Water twice weekly"));
        assert_eq!(prediction.bundle.details.as_deref(), Some("Rosa spp., native to Asia"));
    }

    #[test]
    fn test_absent_fields_stay_unset() {
        let body = br#"{"predictions": [{"class": "Tulip", "confidence": 0.91}]}"#;
        let prediction = PredictResponse::from_slice(body).unwrap().into_prediction();

        assert_eq!(prediction.bundle.recommendation, None);
        assert_eq!(prediction.bundle.details, None);
    }

    #[test]
    fn test_message_without_predictions_is_notice() {
        let body = br#"{"message": "No flower detected"}"#;
        let prediction = PredictResponse::from_slice(body).unwrap().into_prediction();

        assert_eq!(prediction.notice.as_deref(), Some("No flower detected"));
        assert!(prediction.bundle.is_empty());
    }

    #[test]
    fn test_message_ignored_when_predictions_present() {
        let body = br#"{"predictions": [], "message": "ignored"}"#;
        let prediction = PredictResponse::from_slice(body).unwrap().into_prediction();

        assert_eq!(prediction.notice, None);
        assert!(prediction.bundle.predictions.is_empty());
    }

    #[test]
    fn test_null_fields_read_as_absent() {
        let body = br#"{"predictions": null, "recommendation": null, "message": "Nada"}"#;
        let prediction = PredictResponse::from_slice(body).unwrap().into_prediction();

        assert_eq!(prediction.notice.as_deref(), Some("Nada"));
        assert!(prediction.bundle.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let body = br#"{"model": "yolo11", "predictions": [{"class": "Daisy", "confidence": 0.8}]}"#;
        assert!(PredictResponse::from_slice(body).is_ok());
    }

    #[test]
    fn test_malformed_prediction_is_error() {
        let body = br#"{"predictions": [{"class": "Daisy"}]}"#;
        assert!(PredictResponse::from_slice(body).is_err());
    }
}
