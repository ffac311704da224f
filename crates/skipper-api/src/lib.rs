mod error;
pub use error::ApiError;

mod http;
pub use http::HttpApi;

mod state;
pub use state::AppState;
