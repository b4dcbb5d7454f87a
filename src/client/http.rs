//! Executes requests over HTTP with `reqwest`.

use crate::{ApiRequest, Transport, Verb};
use reqwest::{Client, Method, Url};
use serde_json::Value;

impl From<Verb> for Method {
  fn from(verb: Verb) -> Method {
    match verb {
      Verb::Get => Method::GET,
      Verb::Post => Method::POST,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
  #[error("invalid request uri `{uri}`: {source}")]
  Uri { uri: String, source: url::ParseError },

  #[error(transparent)]
  Http(#[from] reqwest::Error),

  #[error("response is not JSON: {0}")]
  Decode(#[from] serde_json::Error),
}

/// Wrapper over [`reqwest::Client`] with fixed base URL.
///
/// Request URIs are resolved against the base URL, so `/users/5` on
/// `http://host/api` becomes `http://host/api/users/5`. POST bodies are sent as
/// JSON and responses are decoded as JSON, an empty body being `null`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  base_url: Url,
  client: Client,
}

impl ReqwestTransport {
  /// `None` when `base_url` cannot be a base (`mailto:`, `data:`, ...).
  pub fn new(mut base_url: Url, client: Client) -> Option<Self> {
    if base_url.cannot_be_a_base() {
      return None;
    }
    if !base_url.path().ends_with('/') {
      let path = format!("{}/", base_url.path());
      base_url.set_path(&path);
    }
    Some(ReqwestTransport { base_url, client })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  pub fn url_for(&self, uri: &str) -> Result<Url, TransportError> {
    self
      .base_url
      .join(uri.trim_start_matches('/'))
      .map_err(|source| TransportError::Uri { uri: uri.to_owned(), source })
  }
}

impl Transport for ReqwestTransport {
  type Response = Value;
  type Err = TransportError;

  async fn request(&self, req: ApiRequest) -> Result<Value, TransportError> {
    let mut builder = self.client.request(req.method.into(), self.url_for(&req.uri)?);
    if let Some(body) = &req.body {
      builder = builder.json(body);
    }
    let bytes = builder.send().await?.error_for_status()?.bytes().await?;
    if bytes.is_empty() {
      return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
  }
}
