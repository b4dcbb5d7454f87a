use crate::{ApiRequest, Params, Transport};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Mutex;

pub fn params(value: Value) -> Params {
  match value {
    Value::Object(map) => map,
    other => panic!("expected an object, got {other}"),
  }
}

/// Transport that remembers every request and answers with it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
  sent: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
  pub fn requests(&self) -> Vec<ApiRequest> {
    self.sent.lock().unwrap().clone()
  }
}

impl Transport for RecordingTransport {
  type Response = ApiRequest;
  type Err = Infallible;

  async fn request(&self, req: ApiRequest) -> Result<ApiRequest, Infallible> {
    self.sent.lock().unwrap().push(req.clone());
    Ok(req)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport is down")]
pub struct Down;

/// Transport that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingTransport;

impl Transport for FailingTransport {
  type Response = Value;
  type Err = Down;

  async fn request(&self, _req: ApiRequest) -> Result<Value, Down> {
    Err(Down)
  }
}

#[tokio::test]
async fn transport_errors_pass_through() {
  use crate::{CallError, api};
  let err = api::get("/ping").call(&FailingTransport, &Params::new()).await.unwrap_err();
  assert!(matches!(err, CallError::Transport(Down)));
  assert_eq!(err.to_string(), "request failed: transport is down");
}

#[tokio::test]
async fn shared_transports() {
  use crate::api;
  use std::sync::Arc;

  let transport = Arc::new(RecordingTransport::default());
  let boxed = Box::new(RecordingTransport::default());
  api::get("/a").call(&transport, &Params::new()).await.unwrap();
  api::get("/b").call(&boxed, &Params::new()).await.unwrap();
  api::get("/c").call(&&*boxed, &Params::new()).await.unwrap();
  assert_eq!(transport.requests().len(), 1);
  assert_eq!(boxed.requests().iter().map(|r| r.uri.as_str()).collect::<Vec<_>>(), ["/b", "/c"]);
}
