//! Application state.

use qnabot_engine::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}
