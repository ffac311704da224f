mod domain;
pub use domain::{LABEL_COMMIT_HASH, LABEL_LAST_DEPLOY};
pub use domain::Labels;

mod error;
pub use error::ModelError;

mod request;
pub use request::UpdateRequest;

mod service;
pub use service::{ContainerSpec, Service, ServiceSpec, ServiceVersion, TaskTemplate};
