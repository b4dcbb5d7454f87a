//! Endpoint config: `name -> [verb, path template]`.

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// HTTP methods an endpoint can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
  Get,
  Post,
}

impl Verb {
  pub fn as_str(&self) -> &'static str {
    match self {
      Verb::Get => "GET",
      Verb::Post => "POST",
    }
  }
}

impl Display for Verb {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Error of parsing a verb that is neither `get` nor `post`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP verb")]
pub struct UnsupportedVerb;

impl FromStr for Verb {
  type Err = UnsupportedVerb;

  /// Case-insensitive, `"get"` and `"GET"` are the same verb.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.eq_ignore_ascii_case("get") {
      Ok(Verb::Get)
    } else if s.eq_ignore_ascii_case("post") {
      Ok(Verb::Post)
    } else {
      Err(UnsupportedVerb)
    }
  }
}

/// A single config entry, serialized as `["get", "/users/:id"]`.
///
/// The verb stays a raw string here so that building a client can report
/// which entry carries an unsupported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec(pub String, pub String);

impl EndpointSpec {
  pub fn new(verb: impl Into<String>, path: impl Into<String>) -> Self {
    Self(verb.into(), path.into())
  }

  pub fn verb(&self) -> &str {
    &self.0
  }

  pub fn path(&self) -> &str {
    &self.1
  }

  /// Parsed verb, `None` when unsupported.
  pub fn parsed_verb(&self) -> Option<Verb> {
    self.0.parse().ok()
  }
}

/// Ordered mapping of endpoint names to their specs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiConfig(pub IndexMap<String, EndpointSpec>);

impl ApiConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(s)?)
  }

  #[cfg(feature = "yaml")]
  pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(s)?)
  }

  /// Adds an entry, replacing (in place) an entry of the same name.
  pub fn insert(&mut self, name: impl Into<String>, spec: EndpointSpec) -> &mut Self {
    self.0.insert(name.into(), spec);
    self
  }

  pub fn with(mut self, name: impl Into<String>, verb: &str, path: &str) -> Self {
    self.insert(name, EndpointSpec::new(verb, path));
    self
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &EndpointSpec)> {
    self.0.iter().map(|(name, spec)| (name.as_str(), spec))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Entries whose verb is not supported, as `(name, verb)`.
  pub fn unsupported(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .iter()
      .filter(|(_, spec)| spec.parsed_verb().is_none())
      .map(|(name, spec)| (name, spec.verb()))
  }

  /// Drops entries with unsupported verbs and returns their names.
  pub fn retain_supported(&mut self) -> Vec<String> {
    let dropped = self.unsupported().map(|(name, _)| name.to_owned()).collect();
    self.0.retain(|_, spec| spec.parsed_verb().is_some());
    dropped
  }
}

impl<N: Into<String>> FromIterator<(N, EndpointSpec)> for ApiConfig {
  fn from_iter<I: IntoIterator<Item = (N, EndpointSpec)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(name, spec)| (name.into(), spec)).collect())
  }
}

/// Errors of loading a config or building a client from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("endpoint `{name}` uses unsupported verb `{verb}`, expected `get` or `post`")]
  UnsupportedVerb { name: String, verb: String },

  #[error("endpoints `{first}` and `{second}` both map to `{key}`")]
  DuplicateName { key: String, first: String, second: String },

  #[error("invalid JSON config: {0}")]
  Json(#[from] serde_json::Error),

  #[cfg(feature = "yaml")]
  #[error("invalid YAML config: {0}")]
  Yaml(#[from] serde_yaml::Error),
}
