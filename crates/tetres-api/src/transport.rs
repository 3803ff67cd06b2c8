// Transport primitive
//
// One blocking-free HTTP exchange per call: GET, or POST with a flat form.
// The data clients only depend on the `Transport` trait; `HttpClient` is
// the reqwest-backed implementation used in production.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::Error;
use crate::form::FormData;
use crate::result::HttpResult;

const DEFAULT_USER_AGENT: &str = concat!("tetres-admin/", env!("CARGO_PKG_VERSION"));

/// Performs one HTTP request and reports what came back.
///
/// `Err` is reserved for exchanges that produced no response at all.
/// Any received response, including 4xx/5xx, is an `Ok(HttpResult)`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResult, Error>;

    async fn post_form(&self, url: &Url, form: &FormData) -> Result<HttpResult, Error>;
}

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed servers).
    DangerAcceptInvalid,
}

/// HTTP basic credentials for auth-protected admin endpoints.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: SecretString,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub basic_auth: Option<BasicAuth>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(60),
            basic_auth: None,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .cookie_store(true);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    basic_auth: Option<BasicAuth>,
}

impl HttpClient {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
            basic_auth: config.basic_auth.clone(),
        })
    }

    /// Wrap a pre-built `reqwest::Client` (tests, shared connection pools).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            basic_auth: None,
        }
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.basic_auth {
            Some(auth) => builder.basic_auth(&auth.username, Some(auth.password.expose_secret())),
            None => builder,
        }
    }

    async fn execute(&self, url: &Url, builder: reqwest::RequestBuilder) -> Result<HttpResult, Error> {
        let resp = self.apply_auth(builder).send().await.map_err(|e| {
            warn!(%url, error = %e, "request failed");
            Error::Transport(e)
        })?;

        let status = resp.status();
        debug!(%url, status = status.as_u16(), "response received");

        let body = resp.text().await.map_err(Error::Transport)?;
        Ok(HttpResult::from_response(
            url.clone(),
            status.as_u16(),
            status.canonical_reason().map(String::from),
            body,
        ))
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResult, Error> {
        debug!("GET {}", url);
        self.execute(url, self.http.get(url.clone())).await
    }

    async fn post_form(&self, url: &Url, form: &FormData) -> Result<HttpResult, Error> {
        debug!("POST {}", url);
        trace!(keys = ?form.keys().collect::<Vec<_>>(), "form data");
        self.execute(url, self.http.post(url.clone()).form(form)).await
    }
}
