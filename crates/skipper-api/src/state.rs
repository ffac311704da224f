use std::sync::Arc;

use skipper_core::auth::Authenticator;
use skipper_core::orchestrator::Orchestrator;
use skipper_core::whitelist::Whitelist;

/// Read-only state shared by every handler.
///
/// Built once at startup and never mutated afterwards, so handlers can run
/// concurrently without any synchronization. The orchestrator is behind a
/// trait object to keep the HTTP surface testable with in-memory fakes.
pub struct AppState {
    pub auth: Authenticator,
    pub whitelist: Whitelist,
    pub orchestrator: Arc<dyn Orchestrator>,
}

impl AppState {
    pub fn new(
        auth: Authenticator,
        whitelist: Whitelist,
        orchestrator: Arc<dyn Orchestrator>,
    ) -> Self {
        Self {
            auth,
            whitelist,
            orchestrator,
        }
    }
}
