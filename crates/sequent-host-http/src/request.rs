use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use sequent_config::Action;

use crate::error::HttpError;

/// Request described by an action payload.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequestSpec {
  pub url: String,
  pub method: String,
  pub headers: HashMap<String, String>,
  /// Strings are sent verbatim unless `json` is set, anything else as JSON.
  pub body: Option<Value>,
  /// JSON request and response: the body is JSON-encoded and `Accept:
  /// application/json` is sent unless the headers set their own.
  pub json: bool,
  pub timeout_ms: Option<u64>,
}

/// Wire form of the payload. `json` is either a flag or the body itself.
#[derive(Deserialize)]
struct RawRequest {
  #[serde(alias = "uri")]
  url: String,
  #[serde(default = "default_method")]
  method: String,
  #[serde(default)]
  headers: Map<String, Value>,
  #[serde(default)]
  body: Option<Value>,
  #[serde(default)]
  json: Option<Value>,
  #[serde(default, alias = "timeout")]
  timeout_ms: Option<u64>,
}

fn default_method() -> String {
  "GET".to_string()
}

impl HttpRequestSpec {
  /// Read the request out of an action payload.
  pub fn from_action(action: &Action) -> Result<Self, HttpError> {
    let raw: RawRequest = serde_json::from_value(action.clone().into_value()).map_err(|e| {
      HttpError::InvalidAction {
        field: "action".to_string(),
        message: e.to_string(),
      }
    })?;

    if raw.url.is_empty() {
      return Err(HttpError::InvalidAction {
        field: "url".to_string(),
        message: "url is empty".to_string(),
      });
    }

    let headers = header_values(raw.headers)?;

    let (body, json) = match raw.json {
      None | Some(Value::Null) => (raw.body, false),
      Some(Value::Bool(flag)) => (raw.body, flag),
      Some(body) => (Some(body), true),
    };

    Ok(Self {
      url: raw.url,
      method: raw.method,
      headers,
      body,
      json,
      timeout_ms: raw.timeout_ms,
    })
  }

  pub fn parsed_url(&self) -> Result<Url, HttpError> {
    Url::parse(&self.url).map_err(|source| HttpError::InvalidUrl {
      url: self.url.clone(),
      source,
    })
  }

  pub fn parsed_method(&self) -> Result<Method, HttpError> {
    parse_method(&self.method)
  }
}

fn parse_method(method: &str) -> Result<Method, HttpError> {
  match method.to_uppercase().as_str() {
    "GET" => Ok(Method::GET),
    "POST" => Ok(Method::POST),
    "PUT" => Ok(Method::PUT),
    "DELETE" => Ok(Method::DELETE),
    "PATCH" => Ok(Method::PATCH),
    "HEAD" => Ok(Method::HEAD),
    "OPTIONS" => Ok(Method::OPTIONS),
    _ => Err(HttpError::InvalidAction {
      field: "method".to_string(),
      message: format!("unsupported HTTP method: {}", method),
    }),
  }
}

/// Scalars are stringified, `null` drops the header.
fn header_values(raw: Map<String, Value>) -> Result<HashMap<String, String>, HttpError> {
  let mut headers = HashMap::with_capacity(raw.len());
  for (key, value) in raw {
    let value = match value {
      Value::Null => continue,
      Value::String(text) => text,
      Value::Number(number) => number.to_string(),
      Value::Bool(flag) => flag.to_string(),
      Value::Array(_) | Value::Object(_) => {
        return Err(HttpError::InvalidAction {
          field: "headers".to_string(),
          message: format!("header {} must be a string, number or boolean", key),
        });
      }
    };
    headers.insert(key, value);
  }
  Ok(headers)
}
