use thiserror::Error;

/// Errors that can occur while performing an HTTP action.
#[derive(Debug, Error)]
pub enum HttpError {
  /// The action payload does not describe a request.
  #[error("invalid action '{field}': {message}")]
  InvalidAction { field: String, message: String },

  #[error("invalid url '{url}': {source}")]
  InvalidUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("unsupported url scheme: {scheme}")]
  UnsupportedScheme { scheme: String },

  #[error("host not allowed: {host}")]
  HostNotAllowed { host: String },

  /// Transport failure: connect, timeout, body read.
  #[error("http error: {0}")]
  Request(#[from] reqwest::Error),

  /// Only raised when error statuses are configured to fail the action.
  #[error("{url} responded with status {status}")]
  Status { status: u16, url: String },
}
