use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, header};
use axum::routing::{any, get};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, info, warn};

use skipper_core::executor::UpdateExecutor;
use skipper_core::resolver::ServiceResolver;
use skipper_model::{Service, UpdateRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// HTTP control surface builder.
pub struct HttpApi {
    state: Arc<AppState>,
}

impl HttpApi {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Build the axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET /services — list current service specs
    /// - POST /services/update — roll out a new image to one service
    ///
    /// The update route is mounted for every method: the method check happens
    /// inside the handler so a wrong method yields 422, not a routing 405.
    pub fn router(self) -> Router {
        Router::new()
            .route("/services", get(list_services))
            .route("/services/update", any(update_service))
            .with_state(self.state)
    }
}

fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::AUTHORIZATION)?.to_str().ok()
}

/// GET /services
///
/// One plain-text line per service. A listing failure is rendered into the
/// body (status 200) rather than failing the request; the caller still gets
/// the error text, and the serving loop is unaffected.
async fn list_services(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<String, ApiError> {
    if !state.auth.is_authorized(authorization_header(&headers)) {
        return Err(ApiError::Unauthorized);
    }

    match state.orchestrator.list_services(None).await {
        Ok(services) => Ok(services.iter().map(render_service_line).collect()),
        Err(err) => {
            error!(%err, "service listing failed");
            Ok(err.to_string())
        }
    }
}

/// POST /services/update (form fields: `name`, `image`, `commit`)
///
/// Walks the pipeline in order, short-circuiting on the first failure:
/// authenticate, validate, check the whitelist, resolve the service, submit
/// the update. Warnings from the cluster are rendered before the
/// confirmation line.
async fn update_service(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<String, ApiError> {
    if !state.auth.is_authorized(authorization_header(&headers)) {
        return Err(ApiError::Unauthorized);
    }

    let request: UpdateRequest = serde_urlencoded::from_bytes(&body).unwrap_or_default();
    if method != Method::POST || request.validate().is_err() {
        return Err(ApiError::Unprocessable);
    }

    if !state.whitelist.is_permitted(&request.name) {
        warn!(service = %request.name, "update refused: service not whitelisted");
        return Err(ApiError::Forbidden);
    }

    let service = ServiceResolver::new(state.orchestrator.as_ref())
        .resolve_by_name(&request.name)
        .await?;

    let deployed_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    let outcome = UpdateExecutor::new(state.orchestrator.as_ref())
        .apply_update(service, &request.image, &request.commit, &deployed_at)
        .await?;

    info!(
        service = %request.name,
        image = %request.image,
        warnings = outcome.warnings.len(),
        "service update submitted"
    );

    let mut response = String::new();
    for warning in &outcome.warnings {
        response.push_str(&format!("Warning: {warning}\n"));
    }
    response.push_str(&format!(
        "Updating service {} image to {}",
        request.name, request.image
    ));
    Ok(response)
}

fn render_service_line(service: &Service) -> String {
    format!(
        "id: {:?}, name: {:?}, image: {:?}, version: {}\n",
        service.id,
        service.spec.name,
        service.image(),
        service.version.index
    )
}
