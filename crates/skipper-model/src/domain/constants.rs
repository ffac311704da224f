//! Well-known label keys stamped onto services during a rollout.
//!
//! These keys are written at both the service level and the container level
//! of a service spec, so that `docker service inspect` shows the deploy
//! provenance in either place. Keeping them here avoids scattering magic
//! strings across the update path.

/// Label key recording the commit hash a rollout was made from.
///
/// The value is whatever the caller supplied in the update request and is
/// recorded verbatim (it may be empty).
pub const LABEL_COMMIT_HASH: &str = "commit_hash";

/// Label key recording when the last rollout happened.
///
/// The value is an RFC3339 timestamp produced at request-handling time.
pub const LABEL_LAST_DEPLOY: &str = "last_deploy";
