//! Typed HTTP API clients built from a declarative endpoint config.
//!
//! The **core functionality** of this crate is to turn a config such as
//!
//! ```json
//! { "GetUser": ["get", "/users/:id"], "createItem": ["post", "/items"] }
//! ```
//!
//! into an [`ApiClient`]: a fixed table of callable [`Endpoint`]s keyed by the
//! config name with its first character lower-cased (`getUser`,
//! `createItem`).
//!
//! - A **path template** is a URI pattern with `:name` placeholders, see
//!   [`path::compile`].
//! - An **endpoint** shapes a parameter map into an [`ApiRequest`]: `spaceId`
//!   is renamed to `space_id` (see [`params::normalize_params`]), the template
//!   consumes its placeholders and a `POST` sends the leftover parameters as
//!   its body. A `GET` never has a body.
//! - A **transport** executes the request (See [`Transport`]). The crate ships
//!   a `reqwest` based one behind the `client` feature and a tracing
//!   combinator, but any async function can be plugged in.
//!
//! The **extra functionality** of this crate is to import YAPI interface
//! exports ([`yapi`]) and to generate a TypeScript `apiConfig` module, response
//! types or an OpenAPI document from them ([`generate`]).
//!
//! ```
//! use apiconfig::{ApiConfig, api_config};
//!
//! let config = ApiConfig::from_json_str(r#"{ "GetUser": ["get", "/users/:id"] }"#).unwrap();
//! let client = api_config(&config).unwrap();
//!
//! let params = serde_json::json!({ "id": 5 });
//! let req = client.get("getUser").unwrap().prepare(params.as_object().unwrap()).unwrap();
//! assert_eq!(req.uri, "/users/5");
//! assert!(req.body.is_none());
//! ```

pub mod combinator;
pub mod config;
pub mod endpoint;
pub mod factory;
pub mod generate;
pub mod params;
pub mod path;
pub mod yapi;

/// Transports that execute requests over the network.
#[cfg(feature = "client")]
pub mod client;

#[cfg(test)]
mod test;

pub use config::{ApiConfig, ConfigError, EndpointSpec, Verb};
pub use endpoint::{ApiRequest, CallError, Endpoint};
pub use factory::{ApiClient, BoundClient, api_config, lower_first};
pub use params::Params;

use core::future::Future;

/// Shorthand constructors for a single endpoint without a config map.
///
/// ```
/// let get_user = apiconfig::api::get("/users/:id");
/// let params = serde_json::json!({ "id": "a b" });
/// let req = get_user.prepare(params.as_object().unwrap()).unwrap();
/// assert_eq!(req.uri, "/users/a%20b");
/// ```
pub mod api {
  use crate::{Endpoint, Verb};

  /// Endpoint issuing `GET` on `path`.
  pub fn get(path: impl Into<String>) -> Endpoint {
    Endpoint::new(Verb::Get, path)
  }

  /// Endpoint issuing `POST` on `path`, leftover parameters become the body.
  pub fn post(path: impl Into<String>) -> Endpoint {
    Endpoint::new(Verb::Post, path)
  }
}

/// The request function endpoints delegate to.
///
/// Whatever the transport resolves or fails with is passed through by
/// [`Endpoint::call`] unchanged, apart from wrapping the error into
/// [`CallError::Transport`]. Retries, auth and timeouts all live here.
pub trait Transport {
  type Response;
  type Err;

  fn request(
    &self,
    req: ApiRequest,
  ) -> impl Future<Output = Result<Self::Response, Self::Err>> + Send;
}

impl<T> Transport for &T
where
  T: Transport + Sync,
{
  type Response = T::Response;
  type Err = T::Err;

  async fn request(&self, req: ApiRequest) -> Result<T::Response, T::Err> {
    (**self).request(req).await
  }
}

impl<T> Transport for std::sync::Arc<T>
where
  T: Transport + Send + Sync,
{
  type Response = T::Response;
  type Err = T::Err;

  async fn request(&self, req: ApiRequest) -> Result<T::Response, T::Err> {
    self.as_ref().request(req).await
  }
}

impl<T> Transport for Box<T>
where
  T: Transport + Send + Sync,
{
  type Response = T::Response;
  type Err = T::Err;

  async fn request(&self, req: ApiRequest) -> Result<T::Response, T::Err> {
    self.as_ref().request(req).await
  }
}
