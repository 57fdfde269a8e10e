use iced::{Element, Task, Theme};
use tracing::{info, warn};

mod acquire;
mod config;
mod inference;
mod state;
mod ui;

use acquire::camera::{self, PhotoStore};
use acquire::{library, AcquireError};
use config::Config;
use inference::{InferenceClient, Prediction};
use state::data::SelectedImage;
use state::{ImageToken, Panel, ViewState};
use ui::alert::{self, Alert};

/// Main application state
struct Flora {
    /// Everything the window shows
    state: ViewState,
    /// Client for the classification endpoint
    client: InferenceClient,
    config: Config,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User left the welcome panel
    Start,
    /// User clicked "Seleccionar Imagen"
    PickImage,
    /// User clicked "Tomar Foto"
    TakePhoto,
    /// Library pick or camera capture finished
    Acquired(Result<SelectedImage, AcquireError>),
    /// User clicked "Obtener Predicción"
    Predict,
    /// Server answered (or failed) for the image identified by the token
    Predicted(ImageToken, Result<Prediction, Alert>),
    /// An alert was dismissed
    AlertClosed,
}

impl Flora {
    fn new(config: Config, client: InferenceClient) -> (Self, Task<Message>) {
        info!(endpoint = client.endpoint(), "Flora initialized");

        (
            Flora {
                state: ViewState::new(),
                client,
                config,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Start => {
                self.state.set_panel(Panel::Main);
                Task::none()
            }
            Message::PickImage => Task::perform(library::pick_from_library(), Message::Acquired),
            Message::TakePhoto => {
                let device = acquire::default_camera(&self.config);
                let store = PhotoStore::new(self.config.photo_dir());
                Task::perform(camera::capture_from_camera(device, store), Message::Acquired)
            }
            Message::Acquired(outcome) => {
                if let Err(e) = &outcome {
                    warn!(error = %e, "Acquisition did not produce an image");
                }
                let alert = self.state.apply_acquisition(outcome);
                show_alert(alert)
            }
            Message::Predict => {
                let (Some(image), Some(token)) = (self.state.image(), self.state.current_token())
                else {
                    return show_alert(Some(inference::InferenceError::NoImage.alert()));
                };

                if let Err(e) = inference::validate(image) {
                    warn!(error = %e, "Refusing to send image");
                    return show_alert(Some(e.alert()));
                }

                let client = self.client.clone();
                let image = image.clone();
                Task::perform(
                    async move {
                        client.predict(&image).await.map_err(|e| {
                            warn!(error = %e, "Prediction failed");
                            e.alert()
                        })
                    },
                    move |outcome| Message::Predicted(token, outcome),
                )
            }
            Message::Predicted(token, outcome) => {
                let alert = self.state.apply_prediction(token, outcome);
                show_alert(alert)
            }
            Message::AlertClosed => Task::none(),
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::panels::view(&self.state)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn show_alert(pending: Option<Alert>) -> Task<Message> {
    match pending {
        Some(message) => Task::perform(alert::show(message), |_| Message::AlertClosed),
        None => Task::none(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=flora=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,flora=info")),
        )
        .with_target(true)
        .init();

    let config = Config::load();
    let client = InferenceClient::from_config(&config)?;

    iced::application("Flora", Flora::update, Flora::view)
        .theme(Flora::theme)
        .centered()
        .run_with(move || Flora::new(config, client))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::data::{PredictionItem, ResultBundle};

    fn flora() -> Flora {
        let config = Config::default();
        let client = InferenceClient::from_config(&config).unwrap();
        Flora::new(config, client).0
    }

    #[test]
    fn test_predict_with_unsupported_image_leaves_state_alone() {
        let mut app = flora();
        let _ = app.update(Message::Start);
        let token = app.state.set_image(SelectedImage::from_path("photo.gif"));
        let bundle = ResultBundle {
            predictions: vec![PredictionItem {
                label: "Rose".to_string(),
                confidence: 0.97,
            }],
            ..Default::default()
        };
        app.state.set_results(token, bundle.clone());

        let _ = app.update(Message::Predict);

        assert_eq!(app.state.panel(), Panel::Main);
        assert_eq!(app.state.image().unwrap().extension, "gif");
        assert_eq!(app.state.current_token(), Some(token));
        assert_eq!(app.state.results(), &bundle);
    }

    #[test]
    fn test_predict_without_image_leaves_state_alone() {
        let mut app = flora();
        let _ = app.update(Message::Predict);

        assert!(app.state.image().is_none());
        assert!(app.state.results().is_empty());
    }
}
