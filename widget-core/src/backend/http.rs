use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::{Query, WeatherResult, WidgetError};

use super::{WeatherBackend, server_message};

/// Talks to the weather proxy at `{origin}/api/weather`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    origin: String,
    http: Client,
}

impl HttpBackend {
    /// No timeout is configured; the transport's defaults apply.
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_owned();
        Self { origin, http: Client::new() }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `{origin}/api/weather?city=<city>` with the city percent-encoded.
    pub fn endpoint_url(&self, city: &str) -> String {
        format!("{}/api/weather?city={}", self.origin, urlencoding::encode(city))
    }

    /// Asks the backend's `/health` route whether it is up.
    pub async fn health(&self) -> Result<bool, WidgetError> {
        let url = format!("{}/health", self.origin);

        let res = self.http.get(&url).send().await.map_err(|err| {
            error!(%url, error = %err, "health request could not complete");
            WidgetError::Transport(err)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(WidgetError::Transport)?;

        if !status.is_success() {
            return Err(WidgetError::Server {
                status: status.as_u16(),
                message: server_message(status, &body),
            });
        }

        let parsed: HealthBody = serde_json::from_str(&body)
            .map_err(|err| WidgetError::MalformedResponse(err.to_string()))?;

        Ok(parsed.status == "healthy")
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn current_weather(&self, query: &Query) -> Result<WeatherResult, WidgetError> {
        let url = self.endpoint_url(query.city());
        debug!(%url, "requesting current weather");

        let res = self.http.get(&url).send().await.map_err(|err| {
            error!(%url, error = %err, "weather request could not complete");
            WidgetError::Transport(err)
        })?;

        let status = res.status();
        let body = res.text().await;

        if !status.is_success() {
            // An unreadable error body degrades to the status-line message.
            let body = body.unwrap_or_default();
            let message = server_message(status, &body);
            warn!(status = status.as_u16(), %message, "weather backend returned an error");
            return Err(WidgetError::Server { status: status.as_u16(), message });
        }

        let body = body.map_err(|err| {
            error!(error = %err, "failed to read weather response body");
            WidgetError::Transport(err)
        })?;

        decode_weather(&body).inspect_err(|err| {
            if let WidgetError::MalformedResponse(detail) = err {
                error!(%detail, "weather response could not be decoded");
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

#[derive(Debug, Deserialize)]
struct WireSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WireWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct WireWeather {
    name: String,
    sys: WireSys,
    main: WireMain,
    weather: Vec<WireCondition>,
    wind: WireWind,
    dt: Option<i64>,
}

fn decode_weather(body: &str) -> Result<WeatherResult, WidgetError> {
    let parsed: WireWeather = serde_json::from_str(body)
        .map_err(|err| WidgetError::MalformedResponse(err.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| WidgetError::MalformedResponse("`weather` list is empty".to_owned()))?;

    Ok(WeatherResult {
        location_name: parsed.name,
        country: parsed.sys.country,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        condition,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        observed_at: parsed.dt.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    })
}
