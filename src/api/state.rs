use std::sync::Arc;

use crate::db::RegistrationStore;

/// Shared application state
///
/// `store` is `None` when no service-role credentials were configured; the
/// server still starts and every registration request answers 500.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Option<Arc<dyn RegistrationStore>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }
}
