//! Core library for the weather widget.
//!
//! This crate defines:
//! - The city query, weather result and UI state models
//! - The backend client that calls `/api/weather`
//! - The page region contracts and the `WeatherWidget` controller
//! - Host configuration stored on disk
//!
//! It is used by `weather-widget`, but any host that can implement the
//! region traits can embed the controller.

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod view;
pub mod widget;

pub use backend::{HttpBackend, WeatherBackend};
pub use config::Config;
pub use error::WidgetError;
pub use model::{Query, UiState, WeatherReport, WeatherResult};
pub use view::WidgetRegions;
pub use widget::{FetchOutcome, WeatherWidget};
