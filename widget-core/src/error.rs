use thiserror::Error;

pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name.";
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Could not connect to the weather service. Please try again later.";
/// Stands in for the status text when a status code has no reason phrase.
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

/// Every way a single fetch can fail. `Display` is the text shown in the error panel.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Input was empty after trimming; never reaches the network.
    #[error("{}", EMPTY_CITY_MESSAGE)]
    Validation,

    /// The backend answered with a failure status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request did not complete (DNS, refused connection, reset, ...).
    #[error("{}", CONNECT_FAILURE_MESSAGE)]
    Transport(#[source] reqwest::Error),

    /// A success response whose body is not weather data.
    #[error("{}", CONNECT_FAILURE_MESSAGE)]
    MalformedResponse(String),
}

impl WidgetError {
    pub fn status(&self) -> Option<u16> {
        match self {
            WidgetError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
