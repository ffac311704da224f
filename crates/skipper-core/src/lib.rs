pub mod auth;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod resolver;
pub mod whitelist;

pub mod prelude {
    pub use crate::auth::Authenticator;
    pub use crate::error::CoreError;
    pub use crate::executor::UpdateExecutor;
    pub use crate::orchestrator::{Orchestrator, OrchestratorError, UpdateOptions, UpdateOutcome};
    pub use crate::resolver::ServiceResolver;
    pub use crate::whitelist::Whitelist;
}
