use tracing::{debug, instrument};

use skipper_model::Service;

use crate::error::CoreError;
use crate::orchestrator::Orchestrator;

/// Resolves a service name to the single service carrying it.
///
/// The lookup goes through the cluster's filtered list operation and insists
/// on exactly one match. Anything else (the name is unknown, or the filter
/// matched several services) is reported as not-found; a fuzzy filter hit is
/// never silently picked as the update target.
pub struct ServiceResolver<'a> {
    orchestrator: &'a dyn Orchestrator,
}

impl<'a> ServiceResolver<'a> {
    pub fn new(orchestrator: &'a dyn Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Fetch the current spec and version token for `name`.
    ///
    /// This is a fresh read on every call: the version token it returns is
    /// only valid for a submission within the same request.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve_by_name(&self, name: &str) -> Result<Service, CoreError> {
        let mut services = self.orchestrator.list_services(Some(name)).await?;

        if services.len() != 1 {
            debug!(matches = services.len(), "name did not resolve to exactly one service");
            return Err(CoreError::ServiceNotFound(name.to_string()));
        }
        Ok(services.remove(0))
    }
}
