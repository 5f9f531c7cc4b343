use url::Url;

use crate::error::HttpError;

/// Which hosts actions may reach.
#[derive(Debug, Clone, Default)]
pub struct HttpPolicy {
  /// Hosts that may be contacted, compared case-insensitively.
  /// Empty allows every host.
  pub allowed_hosts: Vec<String>,
}

impl HttpPolicy {
  pub fn allow_all() -> Self {
    Self::default()
  }

  pub fn allow_hosts<I, S>(hosts: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      allowed_hosts: hosts.into_iter().map(Into::into).collect(),
    }
  }

  /// Check that `url` may be requested.
  pub fn check(&self, url: &Url) -> Result<(), HttpError> {
    match url.scheme() {
      "http" | "https" => {}
      other => {
        return Err(HttpError::UnsupportedScheme {
          scheme: other.to_string(),
        });
      }
    }

    if self.allowed_hosts.is_empty() {
      return Ok(());
    }

    let host = url.host_str().unwrap_or_default();
    if self
      .allowed_hosts
      .iter()
      .any(|allowed| allowed.eq_ignore_ascii_case(host))
    {
      Ok(())
    } else {
      Err(HttpError::HostNotAllowed {
        host: host.to_string(),
      })
    }
  }
}
