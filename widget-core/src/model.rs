use chrono::{DateTime, Utc};

use crate::error::WidgetError;

/// A city lookup built from one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    city: String,
}

impl Query {
    /// Trim raw input text. Fails with [`WidgetError::Validation`] when nothing is left.
    pub fn parse(raw: &str) -> Result<Self, WidgetError> {
        let city = raw.trim();
        if city.is_empty() {
            return Err(WidgetError::Validation);
        }

        Ok(Self { city: city.to_owned() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Current conditions as forwarded by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResult {
    pub location_name: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: String,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Present when the upstream payload carries a `dt` timestamp.
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherResult {
    pub fn report(&self) -> WeatherReport {
        WeatherReport {
            city: format!("{}, {}", self.location_name, self.country),
            temperature: to_fixed_1(self.temperature),
            feels_like: to_fixed_1(self.feels_like),
            description: self.condition.clone(),
            humidity: self.humidity.to_string(),
            wind: to_fixed_1(self.wind_speed),
            observed_at: self.observed_at,
        }
    }
}

/// One decimal place, with exact ties rounded away from zero: 18.25 gives
/// "18.3", while 0.15 (stored just below .15) gives "0.1".
fn to_fixed_1(value: f64) -> String {
    let exact = format!("{:.40}", value.abs());
    let Some((whole, frac)) = exact.split_once('.') else {
        return format!("{value:.1}");
    };
    let (tenth, rest) = frac.split_at(1);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{value:.1}");
    }

    // Representable ties end in .25 or .75, so bumping the tenth never carries.
    let tenth = char::from(tenth.as_bytes()[0] + 1);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{whole}.{tenth}")
}

/// Text for each node of the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Which of the mutually exclusive views the widget is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(WeatherResult),
    Error(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}
