//! Simple tracing combinator.

use crate::{ApiRequest, Transport};
use core::fmt::Debug;

/// Wraps a transport into a span per request and can optionally trace
/// requests, responses and errors.
#[derive(Debug, Clone, Copy)]
pub struct TracedTransport<T>(pub TraceConfig, pub T);

impl<T> TracedTransport<T> {
  pub fn new(transport: T) -> Self {
    Self(TraceConfig::default(), transport)
  }
}

/// Parameters to [`TracedTransport`]. By default only logs errors.
#[derive(Debug, Clone, Copy)]
pub struct TraceConfig {
  /// Enable `debug!("Request: {req:?}")`, default: `false`.
  pub request: bool,
  /// Enable `debug!("Response: {res:?}")`, default: `false`.
  pub response: bool,
  /// Enable `error!("{err:?}")`, default: `true`.
  pub error: bool,
}

impl Default for TraceConfig {
  fn default() -> Self {
    Self { request: false, response: false, error: true }
  }
}

impl TraceConfig {
  /// Everything on.
  pub fn verbose() -> Self {
    Self { request: true, response: true, error: true }
  }
}

impl<T> Transport for TracedTransport<T>
where
  T: Transport + Sync,
  T::Response: Debug,
  T::Err: Debug,
{
  type Response = T::Response;
  type Err = T::Err;

  #[rustfmt::skip]
  #[tracing::instrument(name = "api.request", skip_all, fields(method = %req.method, uri = %req.uri))]
  async fn request(&self, req: ApiRequest) -> Result<T::Response, T::Err> {
    let when = &self.0;
    if when.request { tracing::debug!("Request: {req:?}") }
    self.1.request(req).await
      .inspect(|r| if when.response { tracing::debug!("Response: {r:?}") })
      .inspect_err(|e| if when.error { tracing::error!("{e:?}") })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test::{Down, FailingTransport, RecordingTransport, params};
  use crate::{CallError, api};
  use serde_json::json;

  #[tokio::test]
  async fn passes_requests_and_errors_through() {
    let traced = TracedTransport(TraceConfig::verbose(), RecordingTransport::default());
    let input = params(json!({ "id": 1, "spaceId": "s" }));
    let echoed = api::post("/users/:id").call(&traced, &input).await.unwrap();
    assert_eq!(echoed.uri, "/users/1");
    assert_eq!(traced.1.requests(), [echoed]);

    let err = api::get("/").call(&TracedTransport::new(FailingTransport), &input).await.unwrap_err();
    assert!(matches!(err, CallError::Transport(Down)));
  }
}
