use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, UnixStream};
use tracing::{debug, instrument, trace};

use skipper_core::orchestrator::{Orchestrator, OrchestratorError, UpdateOptions, UpdateOutcome};
use skipper_model::{Service, ServiceSpec};

use crate::endpoint::Endpoint;
use crate::error::{SwarmError, SwarmResult};

/// Client for the Docker Engine REST API.
///
/// Each call dials the endpoint, performs one HTTP/1 exchange and drops the
/// connection. That keeps the client free of shared mutable state, so one
/// instance can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct SwarmClient {
    endpoint: Endpoint,
}

impl SwarmClient {
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Build a client from a `DOCKER_HOST`-style value, falling back to the
    /// local engine socket when absent.
    pub fn from_host(host: Option<&str>) -> SwarmResult<Self> {
        match host {
            Some(host) => Ok(Self::new(host.parse()?)),
            None => Ok(Self::new(Endpoint::default())),
        }
    }

    /// `GET /services`, optionally scoped by an engine-side name filter.
    ///
    /// The engine's name filter is a fuzzy match; callers that need a single
    /// hit enforce that on the result.
    #[instrument(level = "debug", skip(self))]
    pub async fn list(&self, name_filter: Option<&str>) -> SwarmResult<Vec<Service>> {
        let request = self.get(&list_path(name_filter)?)?;
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(engine_error(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// `POST /services/{id}/update`, replacing the whole spec.
    ///
    /// `version` is the optimistic-concurrency token; the engine rejects the
    /// submission when it is stale.
    #[instrument(level = "debug", skip(self, spec), fields(id = %id, version))]
    pub async fn update(
        &self,
        id: &str,
        version: u64,
        spec: &ServiceSpec,
        opts: UpdateOptions,
    ) -> SwarmResult<UpdateOutcome> {
        let payload = serde_json::to_vec(spec)?;
        let request = self.post(&update_path(id, version, opts)?, payload)?;
        let (status, body) = self.send(request).await?;
        if !status.is_success() {
            return Err(engine_error(status, &body));
        }
        decode_update_response(&body)
    }

    fn get(&self, path_and_query: &str) -> SwarmResult<Request<Full<Bytes>>> {
        Ok(Request::builder()
            .method(Method::GET)
            .uri(path_and_query)
            .header(HOST, self.endpoint.host_header())
            .body(Full::new(Bytes::new()))?)
    }

    fn post(&self, path_and_query: &str, payload: Vec<u8>) -> SwarmResult<Request<Full<Bytes>>> {
        Ok(Request::builder()
            .method(Method::POST)
            .uri(path_and_query)
            .header(HOST, self.endpoint.host_header())
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(payload)))?)
    }

    async fn send(&self, request: Request<Full<Bytes>>) -> SwarmResult<(StatusCode, Bytes)> {
        trace!(uri = %request.uri(), method = %request.method(), "engine request");
        match &self.endpoint {
            Endpoint::Unix(path) => {
                let io = UnixStream::connect(path).await?;
                exchange(io, request).await
            }
            Endpoint::Tcp(addr) => {
                let io = TcpStream::connect(addr.as_str()).await?;
                exchange(io, request).await
            }
        }
    }
}

/// One HTTP/1 request/response over a freshly dialed stream.
async fn exchange<I>(io: I, request: Request<Full<Bytes>>) -> SwarmResult<(StatusCode, Bytes)>
where
    I: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(io)).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            debug!(%err, "engine connection ended with error");
        }
    });

    let response = sender.send_request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    trace!(%status, bytes = body.len(), "engine response");
    Ok((status, body))
}

fn list_path(name_filter: Option<&str>) -> SwarmResult<String> {
    match name_filter {
        None => Ok("/services".to_string()),
        Some(name) => {
            let filters = serde_json::json!({ "name": [name] }).to_string();
            let query = serde_urlencoded::to_string([("filters", filters.as_str())])?;
            Ok(format!("/services?{query}"))
        }
    }
}

fn update_path(id: &str, version: u64, opts: UpdateOptions) -> SwarmResult<String> {
    let query = serde_urlencoded::to_string([
        ("version", version.to_string()),
        ("queryRegistry", opts.query_registry.to_string()),
    ])?;
    Ok(format!("/services/{id}/update?{query}"))
}

/// Engine errors carry `{"message": "..."}`; fall back to the raw body when
/// the payload is something else (proxies, mid-handshake failures).
fn engine_error(status: StatusCode, body: &Bytes) -> SwarmError {
    #[derive(Deserialize)]
    struct EngineMessage {
        message: String,
    }

    let message = serde_json::from_slice::<EngineMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());

    SwarmError::Engine {
        status: status.as_u16(),
        message,
    }
}

fn decode_update_response(body: &Bytes) -> SwarmResult<UpdateOutcome> {
    #[derive(Default, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct UpdateResponse {
        #[serde(default)]
        warnings: Option<Vec<String>>,
    }

    // Older engines answer an empty body on success.
    if body.is_empty() {
        return Ok(UpdateOutcome::default());
    }

    let response: UpdateResponse = serde_json::from_slice(body)?;
    Ok(UpdateOutcome {
        warnings: response.warnings.unwrap_or_default(),
    })
}

#[async_trait]
impl Orchestrator for SwarmClient {
    async fn list_services(
        &self,
        name_filter: Option<&str>,
    ) -> Result<Vec<Service>, OrchestratorError> {
        self.list(name_filter).await.map_err(OrchestratorError::from)
    }

    async fn update_service(
        &self,
        id: &str,
        version: u64,
        spec: &ServiceSpec,
        opts: UpdateOptions,
    ) -> Result<UpdateOutcome, OrchestratorError> {
        self.update(id, version, spec, opts)
            .await
            .map_err(OrchestratorError::from)
    }
}
