/// State management module
///
/// This module handles all application state:
/// - Shared data structures (data.rs)
/// - The view state and its transitions (view.rs)

pub mod data;
pub mod view;

pub use view::{ImageToken, Panel, ViewState};
