//! HTTP client for the mini-app backend.
//!
//! `ApiClient::request` performs one exchange and normalizes the outcome:
//! a 2xx body comes back as `Body` (parsed or raw), anything else becomes
//! `RequestError`. The typed endpoint methods sit on top and are exposed
//! through the `MiniAppApi` trait so the flow and poller can be driven by
//! a scripted backend in tests.

mod body;
mod transport;

pub use body::Body;
pub use transport::{Method, TransportOptions};

use serde_json::Value;
use url::Url;

use crate::config::GenqConfig;
use crate::error::{Error, RequestError};
use crate::identity::Identity;
use crate::job::{Job, JobId};
use crate::media::{MediaKind, ResultEndpoint, SubmitRequest};
use crate::models::ModelCatalog;

/// What a submit endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    /// `{job_id}`: the job was queued and must be polled.
    Queued(JobId),
    /// `{text}`: synchronous chat answer, no polling needed.
    Immediate(String),
}

/// Backend operations used by session init, the poller and the submission flow.
#[allow(async_fn_in_trait)]
pub trait MiniAppApi {
    async fn list_models(&self) -> Result<ModelCatalog, Error>;
    async fn register(&self, identity: Identity) -> Result<Body, Error>;
    async fn submit(&self, request: &SubmitRequest) -> Result<Submitted, Error>;
    async fn fetch_job(&self, kind: MediaKind, id: &JobId) -> Result<Job, Error>;
}

/// curl-backed client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    transport: TransportOptions,
    result_endpoint: ResultEndpoint,
}

impl ApiClient {
    pub fn new(base_url: &Url) -> Self {
        Self {
            base: base_url.as_str().trim_end_matches('/').to_string(),
            transport: TransportOptions::default(),
            result_endpoint: ResultEndpoint::default(),
        }
    }

    pub fn from_config(cfg: &GenqConfig) -> anyhow::Result<Self> {
        let base = cfg.base_url()?;
        Ok(Self::new(&base)
            .with_transport(cfg.transport_options())
            .with_result_endpoint(cfg.result_endpoint))
    }

    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_result_endpoint(mut self, endpoint: ResultEndpoint) -> Self {
        self.result_endpoint = endpoint;
        self
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Performs one request. `body`, when given, is sent as JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Body, RequestError> {
        let url = self.url_for(path);
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| RequestError::Runtime(format!("encode request body: {}", e)))?;
        let opts = self.transport;
        let target = url.clone();
        let resp = tokio::task::spawn_blocking(move || {
            transport::perform(method, &target, payload.as_deref(), &opts)
        })
        .await
        .map_err(|e| RequestError::Runtime(e.to_string()))??;

        tracing::debug!(method = method.as_str(), url = %url, status = resp.status, "api response");

        let body = Body::parse(&resp.text);
        if (200..300).contains(&resp.status) {
            Ok(body)
        } else {
            Err(RequestError::Http {
                status: resp.status,
                message: body.error_message(resp.status),
            })
        }
    }

    pub async fn get(&self, path: &str) -> Result<Body, RequestError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Body, RequestError> {
        self.request(Method::Post, path, Some(body)).await
    }
}

impl MiniAppApi for ApiClient {
    async fn list_models(&self) -> Result<ModelCatalog, Error> {
        let body = self.get("/api/models").await?;
        let json = expect_json(body, "model catalog")?;
        serde_json::from_value(json)
            .map_err(|e| Error::MalformedResponse(format!("model catalog: {}", e)))
    }

    async fn register(&self, identity: Identity) -> Result<Body, Error> {
        let path = format!("/api/me?tg_id={}", identity.wire_id());
        Ok(self.get(&path).await?)
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<Submitted, Error> {
        let kind = request.kind();
        let body = self.post(kind.submit_path(), &request.payload()).await?;
        interpret_submit(body)
    }

    async fn fetch_job(&self, kind: MediaKind, id: &JobId) -> Result<Job, Error> {
        let path = kind.result_path(self.result_endpoint, id);
        let body = self.get(&path).await?;
        let json = expect_json(body, "job status")?;
        serde_json::from_value(json)
            .map_err(|e| Error::MalformedResponse(format!("job status: {}", e)))
    }
}

fn expect_json(resp: Body, what: &str) -> Result<Value, Error> {
    match resp {
        Body::Parsed(v) => Ok(v),
        Body::Raw(text) => Err(Error::MalformedResponse(format!(
            "{}: expected JSON, got {:?}",
            what,
            body::snippet(&text)
        ))),
    }
}

/// `{job_id}` means queued, `{text}` is the synchronous chat variant.
pub(crate) fn interpret_submit(body: Body) -> Result<Submitted, Error> {
    let json = expect_json(body, "submit response")?;
    if let Some(id) = json.get("job_id").filter(|v| !v.is_null()) {
        let id: JobId = serde_json::from_value(id.clone())
            .map_err(|e| Error::MalformedResponse(format!("job_id: {}", e)))?;
        return Ok(Submitted::Queued(id));
    }
    if let Some(text) = json.get("text").and_then(Value::as_str) {
        return Ok(Submitted::Immediate(text.to_string()));
    }
    Err(Error::MalformedResponse(format!(
        "submit response has neither job_id nor text: {}",
        json
    )))
}
