pub mod constants;
pub use constants::{LABEL_COMMIT_HASH, LABEL_LAST_DEPLOY};

pub mod labels;
pub use labels::Labels;
