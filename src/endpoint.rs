//! A single callable endpoint and the request it produces.

use crate::params::normalize_params;
use crate::path::{PathError, compile};
use crate::{Params, Transport, Verb};
use serde::Serialize;

/// Request handed to a [`Transport`].
///
/// `body` is `None` for `GET` and carries the leftover parameters for `POST`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
  pub uri: String,
  pub method: Verb,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<Params>,
}

/// Errors of calling an endpoint.
#[derive(Debug, thiserror::Error)]
pub enum CallError<E> {
  #[error("no endpoint named `{0}`")]
  UnknownEndpoint(String),

  #[error(transparent)]
  Path(#[from] PathError),

  #[error("request failed: {0}")]
  Transport(#[source] E),
}

/// An HTTP verb bound to a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
  verb: Verb,
  template: String,
}

impl Endpoint {
  pub fn new(verb: Verb, template: impl Into<String>) -> Self {
    Self { verb, template: template.into() }
  }

  pub fn verb(&self) -> Verb {
    self.verb
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  /// Shapes `params` into the request this endpoint would send.
  pub fn prepare(&self, params: &Params) -> Result<ApiRequest, PathError> {
    let params = normalize_params(params);
    let (uri, leftover) = compile(&self.template, &params)?;
    let body = match self.verb {
      Verb::Get => None,
      Verb::Post => Some(leftover),
    };
    Ok(ApiRequest { uri, method: self.verb, body })
  }

  /// Prepares the request and hands it to `transport`.
  pub async fn call<T: Transport>(
    &self,
    transport: &T,
    params: &Params,
  ) -> Result<T::Response, CallError<T::Err>> {
    let req = self.prepare(params)?;
    transport.request(req).await.map_err(CallError::Transport)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api;
  use crate::test::{RecordingTransport, params};
  use serde_json::json;

  #[test]
  fn get_has_no_body() {
    let req = api::get("/users/:id").prepare(&params(json!({ "id": 5, "q": "x" }))).unwrap();
    assert_eq!(req, ApiRequest { uri: "/users/5".into(), method: Verb::Get, body: None });
    assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "uri": "/users/5", "method": "GET" }));
  }

  #[test]
  fn post_sends_leftover_as_body() {
    let req = api::post("/items").prepare(&params(json!({ "name": "x", "spaceId": "abc" }))).unwrap();
    assert_eq!(req.uri, "/items");
    assert_eq!(req.method, Verb::Post);
    assert_eq!(req.body, Some(params(json!({ "name": "x", "space_id": "abc" }))));
  }

  #[test]
  fn post_body_is_present_even_when_empty() {
    let req = api::post("/users/:id/ping").prepare(&params(json!({ "id": 1 }))).unwrap();
    assert_eq!(req.body, Some(Params::new()));
    assert_eq!(
      serde_json::to_value(&req).unwrap(),
      json!({ "uri": "/users/1/ping", "method": "POST", "body": {} })
    );
  }

  #[test]
  fn renamed_space_id_feeds_the_template() {
    let req = api::get("/spaces/:space_id/docs").prepare(&params(json!({ "spaceId": 7 }))).unwrap();
    assert_eq!(req.uri, "/spaces/7/docs");
  }

  #[tokio::test]
  async fn call_passes_request_to_transport() {
    let transport = RecordingTransport::default();
    let input = params(json!({ "name": "x", "spaceId": "abc" }));
    let echoed = api::post("/items").call(&transport, &input).await.unwrap();
    assert_eq!(transport.requests(), [echoed]);
    assert_eq!(input, params(json!({ "name": "x", "spaceId": "abc" })));
  }

  #[tokio::test]
  async fn path_errors_skip_the_transport() {
    let transport = RecordingTransport::default();
    let err = api::get("/users/:id").call(&transport, &Params::new()).await.unwrap_err();
    assert!(matches!(err, CallError::Path(PathError::MissingParam { .. })));
    assert!(transport.requests().is_empty());
  }
}
