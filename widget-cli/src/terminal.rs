//! Terminal stand-ins for the page regions.
//!
//! A terminal cannot un-print, so hiding a panel only flips its flag; showing
//! one writes it out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use weather_widget_core::{
    WeatherReport, WidgetRegions,
    view::{CityInput, ErrorPanel, Region, ResultPanel, TriggerControl},
};

#[derive(Debug, Default)]
pub struct TerminalInput {
    value: Mutex<String>,
}

impl TerminalInput {
    pub fn set(&self, value: &str) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = value.to_owned();
    }
}

impl CityInput for TerminalInput {
    fn value(&self) -> String {
        self.value.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[derive(Debug)]
pub struct TerminalTrigger {
    enabled: AtomicBool,
}

impl TerminalTrigger {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl TriggerControl for TerminalTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct LoadingIndicator {
    visible: AtomicBool,
}

impl Region for LoadingIndicator {
    fn set_visible(&self, visible: bool) {
        let was_visible = self.visible.swap(visible, Ordering::AcqRel);
        if visible && !was_visible {
            eprintln!("Loading weather...");
        }
    }
}

#[derive(Debug, Default)]
pub struct TerminalErrorPanel {
    visible: AtomicBool,
    message: Mutex<String>,
}

impl Region for TerminalErrorPanel {
    fn set_visible(&self, visible: bool) {
        if visible {
            let message = self.message.lock().unwrap_or_else(PoisonError::into_inner);
            eprintln!("✗ {message}");
        }
        self.visible.store(visible, Ordering::Release);
    }
}

impl ErrorPanel for TerminalErrorPanel {
    fn set_message(&self, message: &str) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = message.to_owned();
    }
}

#[derive(Debug, Default)]
pub struct TerminalResultPanel {
    visible: AtomicBool,
    report: Mutex<Option<WeatherReport>>,
}

impl Region for TerminalResultPanel {
    fn set_visible(&self, visible: bool) {
        if visible {
            let report = self.report.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(report) = report.as_ref() {
                println!("{}", render_report(report));
            }
        }
        self.visible.store(visible, Ordering::Release);
    }
}

impl ResultPanel for TerminalResultPanel {
    fn show_report(&self, report: &WeatherReport) {
        *self.report.lock().unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
    }
}

pub fn render_report(report: &WeatherReport) -> String {
    let mut out = format!(
        "{}\n  Temperature: {} °C\n  Feels like:  {} °C\n  Conditions:  {}\n  Humidity:    {} %\n  Wind:        {} m/s",
        report.city,
        report.temperature,
        report.feels_like,
        report.description,
        report.humidity,
        report.wind,
    );
    if let Some(at) = report.observed_at {
        let local = at.with_timezone(&Local);
        out.push_str(&format!("\n  Observed:    {}", local.format("%Y-%m-%d %H:%M")));
    }
    out
}

/// The five regions of the terminal page.
#[derive(Debug)]
pub struct TerminalPage {
    pub input: Arc<TerminalInput>,
    pub trigger: Arc<TerminalTrigger>,
    loading: Arc<LoadingIndicator>,
    error: Arc<TerminalErrorPanel>,
    result: Arc<TerminalResultPanel>,
}

impl TerminalPage {
    pub fn new(initial_city: &str) -> Self {
        let input = TerminalInput::default();
        input.set(initial_city);

        Self {
            input: Arc::new(input),
            trigger: Arc::new(TerminalTrigger { enabled: AtomicBool::new(true) }),
            loading: Arc::default(),
            error: Arc::default(),
            result: Arc::default(),
        }
    }

    pub fn regions(&self) -> WidgetRegions {
        WidgetRegions {
            input: self.input.clone(),
            trigger: self.trigger.clone(),
            loading: self.loading.clone(),
            error: self.error.clone(),
            result: self.result.clone(),
        }
    }
}
