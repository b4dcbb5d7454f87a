//! YAPI interface exports.
//!
//! YAPI exports its interfaces as a JSON list of groups (categories), each
//! holding the interfaces that belong to it:
//!
//! ```json
//! [{ "index": 0, "name": "User", "desc": "users", "list": [
//!   { "title": "getUser", "method": "GET", "path": "/users/:id" }
//! ]}]
//! ```
//!
//! Every group becomes one [`ApiConfig`], keyed by the interface titles.
//! Response schemas are kept for [`generate::types`](crate::generate::types),
//! other fields (request bodies, ids, timestamps) are ignored.

use crate::{ApiConfig, ConfigError, EndpointSpec, lower_first};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YapiItem {
  pub title: String,
  pub method: String,
  pub path: String,
  /// `json` when `res_body` holds a JSON schema.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub res_body_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub res_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YapiGroup {
  #[serde(default)]
  pub index: i64,
  pub name: String,
  #[serde(default)]
  pub desc: Option<String>,
  #[serde(default)]
  pub list: Vec<YapiItem>,
}

impl YapiGroup {
  /// Name of the exported binding for this group.
  pub fn export_name(&self) -> String {
    lower_first(&self.name)
  }

  /// Interfaces as a config. Verbs are lower-cased; when two interfaces share
  /// a title the later one wins.
  pub fn to_config(&self) -> ApiConfig {
    self
      .list
      .iter()
      .map(|item| {
        (item.title.clone(), EndpointSpec::new(item.method.to_lowercase(), item.path.clone()))
      })
      .collect()
  }
}

/// Parses a YAPI export.
pub fn parse_export(json: &str) -> Result<Vec<YapiGroup>, ConfigError> {
  Ok(serde_json::from_str(json)?)
}
