/// The single in-memory UI state and its transitions
///
/// Nothing outside this type mutates the panel, the selected image or the
/// results. Every change goes through `set_panel`, `set_image`,
/// `clear_results` or `set_results`.
use tracing::{debug, info};

use super::data::{ResultBundle, SelectedImage};
use crate::acquire::AcquireError;
use crate::inference::Prediction;
use crate::ui::alert::Alert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Welcome,
    Main,
}

/// Identifies which selected image a prediction request was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageToken(u64);

#[derive(Debug, Default)]
pub struct ViewState {
    panel: Panel,
    image: Option<SelectedImage>,
    results: ResultBundle,
    /// Bumped on every new image
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn results(&self) -> &ResultBundle {
        &self.results
    }

    /// Token for the current image, if any
    pub fn current_token(&self) -> Option<ImageToken> {
        self.image.as_ref().map(|_| ImageToken(self.generation))
    }

    /// Move to the main panel; there is no way back to the welcome panel
    pub fn set_panel(&mut self, panel: Panel) {
        if panel == Panel::Main && self.panel != Panel::Main {
            info!("Leaving welcome panel");
            self.panel = Panel::Main;
        }
    }

    /// Replace the image and drop results computed for the previous one
    pub fn set_image(&mut self, image: SelectedImage) -> ImageToken {
        self.generation += 1;
        self.image = Some(image);
        self.results = ResultBundle::default();
        ImageToken(self.generation)
    }

    pub fn clear_results(&mut self) {
        self.results = ResultBundle::default();
    }

    /// Store results for `token`; a token from a replaced image is ignored
    pub fn set_results(&mut self, token: ImageToken, bundle: ResultBundle) -> bool {
        if self.current_token() != Some(token) {
            debug!(?token, current = self.generation, "Discarding stale results");
            return false;
        }

        self.results = bundle;
        true
    }

    /// Fold a finished acquisition into the state
    ///
    /// A new image replaces the old one and its results. A failed capture
    /// clears the results but keeps the image. Denial and cancellation only
    /// produce an alert.
    pub fn apply_acquisition(&mut self, outcome: Result<SelectedImage, AcquireError>) -> Option<Alert> {
        match outcome {
            Ok(image) => {
                self.set_image(image);
                None
            }
            Err(e @ (AcquireError::PermissionDenied | AcquireError::Cancelled(_))) => {
                Some(e.alert())
            }
            Err(e @ AcquireError::Failed(_)) => {
                self.clear_results();
                Some(e.alert())
            }
        }
    }

    /// Fold a finished prediction into the state
    ///
    /// Returns the alert to show, if any. Answers for an image that is no
    /// longer selected are dropped without an alert.
    pub fn apply_prediction(
        &mut self,
        token: ImageToken,
        outcome: Result<Prediction, Alert>,
    ) -> Option<Alert> {
        if self.current_token() != Some(token) {
            debug!(?token, "Dropping answer for a replaced image");
            return None;
        }

        match outcome {
            Ok(prediction) => {
                self.set_results(token, prediction.bundle);
                prediction.notice.map(|text| Alert::info("Resultado", text))
            }
            Err(alert) => Some(alert),
        }
    }
}
