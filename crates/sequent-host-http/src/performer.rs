use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use sequent_config::Action;
use sequent_executor::ActionPerformer;

use crate::error::HttpError;
use crate::policy::HttpPolicy;
use crate::request::HttpRequestSpec;

/// Configuration for the HTTP performer.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
  /// Used when an action does not set `timeout_ms`. `None` waits forever.
  pub default_timeout_ms: Option<u64>,
  /// Treat 4xx/5xx responses as failures. Off by default: any completed
  /// response counts as success.
  pub error_for_status: bool,
  pub policy: HttpPolicy,
}

/// Performs each action as a single HTTP request.
#[derive(Debug, Clone)]
pub struct HttpPerformer {
  client: Client,
  config: HttpConfig,
}

impl HttpPerformer {
  pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
    let client = Client::builder().build()?;
    Ok(Self::with_client(client, config))
  }

  /// Use an existing client, e.g. one shared with other parts of a program.
  pub fn with_client(client: Client, config: HttpConfig) -> Self {
    Self { client, config }
  }

  /// Issue the request described by `action`.
  pub async fn send(&self, action: &Action) -> Result<u16, HttpError> {
    let spec = HttpRequestSpec::from_action(action)?;
    let url = spec.parsed_url()?;
    self.config.policy.check(&url)?;
    let method = spec.parsed_method()?;

    let mut request = self.client.request(method.clone(), url.clone());

    for (key, value) in &spec.headers {
      request = request.header(key, value);
    }

    if spec.json && !spec.headers.keys().any(|k| k.eq_ignore_ascii_case("accept")) {
      request = request.header(ACCEPT, "application/json");
    }

    match &spec.body {
      None | Some(serde_json::Value::Null) => {}
      Some(serde_json::Value::String(text)) if !spec.json => request = request.body(text.clone()),
      Some(body) => request = request.json(body),
    }

    if let Some(ms) = spec.timeout_ms.or(self.config.default_timeout_ms) {
      request = request.timeout(Duration::from_millis(ms));
    }

    let response = request.send().await?;
    let status = response.status();

    // Drain the body so the exchange completes before the next action.
    let body = response.bytes().await?;
    debug!(
      method = %method,
      url = %url,
      status = status.as_u16(),
      body_len = body.len(),
      "http response received"
    );

    if self.config.error_for_status && (status.is_client_error() || status.is_server_error()) {
      return Err(HttpError::Status {
        status: status.as_u16(),
        url: url.to_string(),
      });
    }

    Ok(status.as_u16())
  }
}

#[async_trait]
impl ActionPerformer for HttpPerformer {
  type Error = HttpError;

  async fn perform(&self, component: &str, action: &Action) -> Result<(), HttpError> {
    let status = self.send(action).await?;
    debug!(component = %component, status, "http action performed");
    Ok(())
  }
}
