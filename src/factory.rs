//! Building a client out of an [`ApiConfig`].

use crate::{ApiConfig, CallError, ConfigError, Endpoint, Params, Transport, Verb};
use indexmap::IndexMap;
use indexmap::map::Entry;

/// Lower-cases the first character of `s`, leaving the rest untouched.
///
/// ```
/// assert_eq!(apiconfig::lower_first("GetUser"), "getUser");
/// assert_eq!(apiconfig::lower_first("ÉtatCivil"), "étatCivil");
/// assert_eq!(apiconfig::lower_first(""), "");
/// ```
pub fn lower_first(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_lowercase().chain(chars).collect(),
  }
}

/// Builds a client, failing on the first entry with an unsupported verb.
pub fn api_config(config: &ApiConfig) -> Result<ApiClient, ConfigError> {
  ApiClient::from_config(config)
}

/// Immutable table of endpoints keyed by their lower-first names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiClient {
  endpoints: IndexMap<String, Endpoint>,
}

impl ApiClient {
  /// Every entry must use `get` or `post`, and no two names may collapse
  /// into the same key.
  pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
    Self::build(config, |name, verb| {
      Err(ConfigError::UnsupportedVerb { name: name.to_owned(), verb: verb.to_owned() })
    })
  }

  /// Like [`ApiClient::from_config`] but entries with unsupported verbs are
  /// skipped with a warning instead. Check [`ApiClient::contains`] before
  /// relying on an endpoint.
  pub fn from_config_lenient(config: &ApiConfig) -> Result<Self, ConfigError> {
    Self::build(config, |name, verb| {
      tracing::warn!(endpoint = name, verb, "skipping endpoint with unsupported verb");
      Ok(())
    })
  }

  fn build(
    config: &ApiConfig,
    on_unsupported: impl Fn(&str, &str) -> Result<(), ConfigError>,
  ) -> Result<Self, ConfigError> {
    let mut endpoints: IndexMap<String, Endpoint> = IndexMap::with_capacity(config.len());
    for (name, spec) in config.iter() {
      let Some(verb) = spec.parsed_verb() else {
        on_unsupported(name, spec.verb())?;
        continue;
      };
      match endpoints.entry(lower_first(name)) {
        Entry::Occupied(entry) => {
          let key: &String = entry.key();
          let first = config
            .iter()
            .map(|(n, _)| n)
            .find(|n| lower_first(n) == *key)
            .unwrap_or(key.as_str());
          return Err(ConfigError::DuplicateName {
            key: key.clone(),
            first: first.to_owned(),
            second: name.to_owned(),
          });
        }
        Entry::Vacant(entry) => {
          entry.insert(Endpoint::new(verb, spec.path()));
        }
      }
    }
    tracing::debug!(endpoints = endpoints.len(), "built api client");
    Ok(Self { endpoints })
  }

  pub fn get(&self, key: &str) -> Option<&Endpoint> {
    self.endpoints.get(key)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.endpoints.contains_key(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.endpoints.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
    self.endpoints.iter().map(|(key, endpoint)| (key.as_str(), endpoint))
  }

  pub fn len(&self) -> usize {
    self.endpoints.len()
  }

  pub fn is_empty(&self) -> bool {
    self.endpoints.is_empty()
  }

  /// Calls the endpoint registered under `key`.
  pub async fn call<T: Transport>(
    &self,
    key: &str,
    transport: &T,
    params: &Params,
  ) -> Result<T::Response, CallError<T::Err>> {
    let endpoint = self.get(key).ok_or_else(|| CallError::UnknownEndpoint(key.to_owned()))?;
    endpoint.call(transport, params).await
  }

  /// Pairs the endpoint table with the transport it is going to use.
  pub fn bind<T: Transport>(self, transport: T) -> BoundClient<T> {
    BoundClient { client: self, transport }
  }
}

impl FromIterator<(String, Endpoint)> for ApiClient {
  fn from_iter<I: IntoIterator<Item = (String, Endpoint)>>(iter: I) -> Self {
    Self { endpoints: iter.into_iter().collect() }
  }
}

/// [`ApiClient`] with a fixed transport, so calls only need a name and
/// parameters.
#[derive(Debug, Clone)]
pub struct BoundClient<T> {
  client: ApiClient,
  transport: T,
}

impl<T: Transport> BoundClient<T> {
  pub fn client(&self) -> &ApiClient {
    &self.client
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub async fn call(&self, key: &str, params: &Params) -> Result<T::Response, CallError<T::Err>> {
    self.client.call(key, &self.transport, params).await
  }

  /// Endpoints of the client that use `verb`.
  pub fn with_verb(&self, verb: Verb) -> impl Iterator<Item = &str> {
    self.client.iter().filter(move |(_, e)| e.verb() == verb).map(|(key, _)| key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test::{RecordingTransport, params};
  use crate::{ApiRequest, EndpointSpec};
  use serde_json::json;

  #[test]
  fn keys_are_lower_first() {
    let config = ApiConfig::new()
      .with("GetUser", "get", "/users/:id")
      .with("createItem", "post", "/items")
      .with("URLList", "GET", "/urls");
    let client = api_config(&config).unwrap();
    assert_eq!(client.keys().collect::<Vec<_>>(), ["getUser", "createItem", "uRLList"]);
    assert_eq!(client.get("getUser"), Some(&Endpoint::new(Verb::Get, "/users/:id")));
    assert_eq!(client.get("createItem").map(Endpoint::verb), Some(Verb::Post));
    assert!(!client.contains("GetUser"));
  }

  #[test]
  fn unsupported_verb_fails_fast() {
    let config =
      ApiConfig::new().with("getUser", "get", "/users/:id").with("ping", "delete", "/ping");
    match api_config(&config) {
      Err(ConfigError::UnsupportedVerb { name, verb }) => {
        assert_eq!(name, "ping");
        assert_eq!(verb, "delete");
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn lenient_build_drops_unsupported_verbs() {
    let config: ApiConfig = [
      ("ping", EndpointSpec::new("delete", "/ping")),
      ("getUser", EndpointSpec::new("get", "/users/:id")),
      ("put", EndpointSpec::new("", "/x")),
    ]
    .into_iter()
    .collect();
    let client = ApiClient::from_config_lenient(&config).unwrap();
    assert_eq!(client.len(), 1);
    assert!(!client.contains("ping"));
    assert!(client.contains("getUser"));
  }

  #[test]
  fn colliding_names_are_rejected() {
    let config = ApiConfig::new().with("GetUser", "get", "/a").with("getUser", "post", "/b");
    match ApiClient::from_config_lenient(&config) {
      Err(ConfigError::DuplicateName { key, first, second }) => {
        assert_eq!(key, "getUser");
        assert_eq!(first, "GetUser");
        assert_eq!(second, "getUser");
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn empty_config_builds_empty_client() {
    let client = api_config(&ApiConfig::new()).unwrap();
    assert!(client.is_empty());
  }

  #[tokio::test]
  async fn get_user_example() {
    let client = api_config(&ApiConfig::new().with("getUser", "get", "/users/:id")).unwrap();
    let transport = RecordingTransport::default();
    client.call("getUser", &transport, &params(json!({ "id": 5 }))).await.unwrap();
    let sent = transport.requests();
    assert_eq!(sent, [ApiRequest { uri: "/users/5".into(), method: Verb::Get, body: None }]);
    assert_eq!(
      serde_json::to_value(&sent[0]).unwrap(),
      json!({ "uri": "/users/5", "method": "GET" })
    );
  }

  #[tokio::test]
  async fn create_item_example() {
    let client = api_config(&ApiConfig::new().with("createItem", "post", "/items"))
      .unwrap()
      .bind(RecordingTransport::default());
    let input = params(json!({ "name": "x", "spaceId": "abc" }));
    client.call("createItem", &input).await.unwrap();
    assert_eq!(
      serde_json::to_value(client.transport().requests()).unwrap(),
      json!([{ "uri": "/items", "body": { "name": "x", "space_id": "abc" }, "method": "POST" }])
    );
    // the caller keeps its own parameters
    assert!(input.contains_key("spaceId"));
  }

  #[tokio::test]
  async fn unknown_endpoint() {
    let client = ApiClient::default().bind(RecordingTransport::default());
    let err = client.call("ping", &Params::new()).await.unwrap_err();
    assert!(matches!(err, CallError::UnknownEndpoint(name) if name == "ping"));
  }

  #[test]
  fn bound_client_lists_verbs() {
    let client = api_config(
      &ApiConfig::new().with("a", "get", "/a").with("b", "post", "/b").with("c", "get", "/c"),
    )
    .unwrap()
    .bind(RecordingTransport::default());
    assert_eq!(client.with_verb(Verb::Get).collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(client.with_verb(Verb::Post).collect::<Vec<_>>(), ["b"]);
  }
}
