//! Contracts for the page regions the widget drives.
//!
//! Handles take `&self` like DOM nodes do; implementations keep their own
//! interior state.

use std::sync::Arc;

use crate::WeatherReport;

/// Text field holding the city to look up.
pub trait CityInput: Send + Sync {
    fn value(&self) -> String;
}

/// The control that starts a fetch.
pub trait TriggerControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
}

/// A panel whose only state is shown or hidden.
pub trait Region: Send + Sync {
    fn set_visible(&self, visible: bool);
}

pub trait ErrorPanel: Region {
    fn set_message(&self, message: &str);
}

pub trait ResultPanel: Region {
    fn show_report(&self, report: &WeatherReport);
}

/// The five handles a [`WeatherWidget`](crate::WeatherWidget) is bound to.
#[derive(Clone)]
pub struct WidgetRegions {
    pub input: Arc<dyn CityInput>,
    pub trigger: Arc<dyn TriggerControl>,
    pub loading: Arc<dyn Region>,
    pub error: Arc<dyn ErrorPanel>,
    pub result: Arc<dyn ResultPanel>,
}
