/// Rendering of the view state
///
/// `visible_panels` decides what is on screen; `view` turns that decision
/// into widgets. Nothing here mutates state.
use iced::alignment::Horizontal;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, Column, Image};
use iced::{Alignment, Color, Element, Length};

use super::style;
use crate::state::data::ResultBundle;
use crate::state::{Panel, ViewState};
use crate::Message;

const APP_NAME: &str = "Flora";

/// Which parts of the window are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSet {
    pub welcome: bool,
    pub controls: bool,
    pub preview: bool,
    pub predict_button: bool,
    pub predictions: bool,
    pub recommendation: bool,
    pub details: bool,
}

pub fn visible_panels(state: &ViewState) -> PanelSet {
    if state.panel() == Panel::Welcome {
        return PanelSet {
            welcome: true,
            ..PanelSet::default()
        };
    }

    let has_image = state.image().is_some();
    let results = state.results();

    PanelSet {
        welcome: false,
        controls: true,
        preview: has_image,
        predict_button: has_image,
        predictions: !results.predictions.is_empty(),
        recommendation: non_empty(&results.recommendation).is_some(),
        details: non_empty(&results.details).is_some(),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

pub fn view(state: &ViewState) -> Element<'_, Message> {
    let panels = visible_panels(state);

    let content: Element<Message> = if panels.welcome {
        welcome()
    } else {
        main_panel(state, panels)
    };

    container(scrollable(
        container(content)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(20),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .center_y(Length::Fill)
    .style(style::page)
    .into()
}

fn welcome<'a>() -> Element<'a, Message> {
    column![
        text("Bienvenido a").size(28).color(style::ACCENT),
        text(APP_NAME).size(72).color(style::ACCENT),
        text("Descubre qué flores están en tu imagen con nuestra aplicación de predicción basada en IA.")
            .size(20)
            .color(style::MUTED)
            .width(Length::Fill)
            .align_x(Horizontal::Center),
        button(text("Comenzar").size(18))
            .padding([12, 30])
            .style(style::start_button)
            .on_press(Message::Start),
    ]
    .spacing(48)
    .padding(20)
    .max_width(600)
    .align_x(Alignment::Center)
    .into()
}

fn main_panel(state: &ViewState, panels: PanelSet) -> Element<'_, Message> {
    let mut content = Column::new()
        .spacing(20)
        .max_width(600)
        .align_x(Alignment::Center)
        .push(text(APP_NAME).size(40).color(style::ACCENT));

    if panels.controls {
        content = content.push(
            row![
                button("Seleccionar Imagen").on_press(Message::PickImage),
                button("Tomar Foto").on_press(Message::TakePhoto),
            ]
            .spacing(40),
        );
    }

    if let Some(image) = state.image().filter(|_| panels.preview) {
        content = content.push(
            Image::new(Handle::from_path(&image.location))
                .width(280)
                .height(280),
        );
    }

    if panels.predict_button {
        content = content.push(button("Obtener Predicción").on_press(Message::Predict));
    }

    let results = state.results();

    if panels.predictions {
        content = content.push(predictions_card(results));
    }

    if let Some(recommendation) = non_empty(&results.recommendation).filter(|_| panels.recommendation) {
        content = content.push(card(
            "Recomendación de cuidado:",
            text(recommendation).size(16).align_x(Horizontal::Center).into(),
            style::RECOMMENDATION,
        ));
    }

    if let Some(details) = non_empty(&results.details).filter(|_| panels.details) {
        content = content.push(card(
            "Detalles de las flores:",
            text(details).size(16).align_x(Horizontal::Center).into(),
            style::DETAILS,
        ));
    }

    content.into()
}

fn predictions_card(results: &ResultBundle) -> Element<'_, Message> {
    let lines = results
        .predictions
        .iter()
        .fold(Column::<Message>::new().align_x(Alignment::Center), |col, item| {
            col.push(text(item.display_line()).size(16))
        });

    card(
        "Las flores presentes en la imagen son:",
        lines.into(),
        style::PREDICTIONS,
    )
}

fn card<'a>(title: &'a str, body: Element<'a, Message>, fill: Color) -> Element<'a, Message> {
    container(
        column![text(title).size(18), body]
            .spacing(10)
            .align_x(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(move |_theme| style::card(fill))
    .into()
}
