/// User interface module
///
/// - Panel rendering (panels.rs)
/// - Palette and widget styles (style.rs)
/// - Native alerts (alert.rs)

pub mod alert;
pub mod panels;
pub mod style;
