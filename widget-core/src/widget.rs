use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::{
    Query, UiState, WeatherReport, WeatherResult, WidgetError, backend::WeatherBackend,
    view::WidgetRegions,
};

/// What a single trigger ended in.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A fetch was already in flight; nothing changed.
    Ignored,
    Rendered(WeatherReport),
    Failed(WidgetError),
}

/// Controller tying the city input to the loading, error and result regions.
///
/// At most one fetch runs at a time. A trigger that arrives while one is in
/// flight is ignored, even if the caller bypassed the disabled control.
pub struct WeatherWidget<B> {
    regions: WidgetRegions,
    backend: B,
    state: Mutex<UiState>,
    in_flight: AtomicBool,
}

impl<B: WeatherBackend> WeatherWidget<B> {
    /// Binds the widget and puts the regions into the idle layout.
    pub fn new(regions: WidgetRegions, backend: B) -> Self {
        regions.loading.set_visible(false);
        regions.error.set_visible(false);
        regions.result.set_visible(false);
        regions.trigger.set_enabled(true);

        Self {
            regions,
            backend,
            state: Mutex::new(UiState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> UiState {
        self.lock_state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Reads the input and runs one fetch to a terminal state.
    pub async fn fetch_weather(&self) -> FetchOutcome {
        let Some(_guard) = LoadingGuard::acquire(self) else {
            debug!("fetch already in flight, ignoring trigger");
            return FetchOutcome::Ignored;
        };

        let query = match Query::parse(&self.regions.input.value()) {
            Ok(query) => query,
            Err(err) => return self.show_error(err),
        };

        self.enter_loading();
        debug!(city = query.city(), "fetching weather");

        match self.backend.current_weather(&query).await {
            Ok(result) => self.show_result(result),
            Err(err) => self.show_error(err),
        }
    }

    fn enter_loading(&self) {
        self.regions.trigger.set_enabled(false);
        self.regions.error.set_visible(false);
        self.regions.result.set_visible(false);
        self.regions.loading.set_visible(true);
        *self.lock_state() = UiState::Loading;
    }

    fn show_result(&self, result: WeatherResult) -> FetchOutcome {
        let report = result.report();

        self.regions.loading.set_visible(false);
        self.regions.error.set_visible(false);
        self.regions.result.show_report(&report);
        self.regions.result.set_visible(true);
        *self.lock_state() = UiState::Result(result);

        FetchOutcome::Rendered(report)
    }

    fn show_error(&self, err: WidgetError) -> FetchOutcome {
        let message = err.to_string();
        debug!(%message, "showing error");

        self.regions.loading.set_visible(false);
        self.regions.result.set_visible(false);
        self.regions.error.set_message(&message);
        self.regions.error.set_visible(true);
        *self.lock_state() = UiState::Error(message);

        FetchOutcome::Failed(err)
    }

    fn lock_state(&self) -> MutexGuard<'_, UiState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the in-flight flag for one fetch. Dropping it hides the loading
/// indicator and re-enables the trigger, on every exit path including unwinding.
struct LoadingGuard<'a, B> {
    widget: &'a WeatherWidget<B>,
}

impl<'a, B: WeatherBackend> LoadingGuard<'a, B> {
    fn acquire(widget: &'a WeatherWidget<B>) -> Option<Self> {
        widget
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { widget })
    }
}

impl<B> Drop for LoadingGuard<'_, B> {
    fn drop(&mut self) {
        let widget = self.widget;
        widget.regions.loading.set_visible(false);
        widget.regions.trigger.set_enabled(true);

        let mut state = widget.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.is_loading() {
            // Unwound before reaching a terminal state.
            *state = UiState::Idle;
        }
        drop(state);

        widget.in_flight.store(false, Ordering::Release);
    }
}
