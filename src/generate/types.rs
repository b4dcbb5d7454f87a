//! TypeScript response types from YAPI response schemas.
//!
//! YAPI keeps the response body of an interface as a JSON schema string
//! (`res_body`, with `res_body_type` set to `json`). Every such interface
//! becomes `export type <Group><Title> = ...`:
//!
//! ```
//! use apiconfig::generate::types::gen_ts_types;
//! use apiconfig::yapi::parse_export;
//!
//! let groups = parse_export(r#"[{ "name": "User", "list": [{
//!   "title": "GetUser", "method": "GET", "path": "/users/:id",
//!   "res_body_type": "json",
//!   "res_body": "{\"type\":\"object\",\"properties\":{\"id\":{\"type\":\"integer\"}}}"
//! }]}]"#).unwrap();
//! assert_eq!(gen_ts_types(&groups), "\
//! export type UserGetUser = {
//!   id: number
//! }
//! ");
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use super::ts::{is_binding, property};
use crate::yapi::{YapiGroup, YapiItem};

/// The part of a JSON schema that maps onto TypeScript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseSchema {
  #[serde(rename = "type", default)]
  pub kind: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub items: Option<Box<ResponseSchema>>,
  #[serde(default)]
  pub properties: IndexMap<String, ResponseSchema>,
}

impl ResponseSchema {
  /// TypeScript type of the schema, `unknown` for anything it can't express.
  pub fn to_ts(&self) -> String {
    let mut out = String::new();
    self.write_ts(&mut out, 0);
    out
  }

  fn write_ts(&self, out: &mut String, depth: usize) {
    match self.kind.as_deref() {
      Some("object") if self.properties.is_empty() => out.push_str("{}"),
      Some("object") => {
        out.push_str("{\n");
        for (key, value) in &self.properties {
          if let Some(docs) = value.description.as_deref().map(str::trim).filter(|d| !d.is_empty())
          {
            indent(out, depth + 1);
            out.push_str(&format!("/** {} */\n", docs.replace("*/", "*\\/").replace('\n', " ")));
          }
          indent(out, depth + 1);
          out.push_str(&property(key));
          out.push_str(": ");
          value.write_ts(out, depth + 1);
          out.push('\n');
        }
        indent(out, depth);
        out.push('}');
      }
      Some("array") => {
        match &self.items {
          Some(items) => items.write_ts(out, depth),
          None => out.push_str("unknown"),
        }
        out.push_str("[]");
      }
      Some("string") => out.push_str("string"),
      Some("integer" | "number") => out.push_str("number"),
      Some("boolean") => out.push_str("boolean"),
      _ => out.push_str("unknown"),
    }
  }
}

fn indent(out: &mut String, depth: usize) {
  for _ in 0..depth {
    out.push_str("  ");
  }
}

/// `^\w+$`
fn is_word(s: &str) -> bool {
  !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn response_schema(item: &YapiItem) -> Option<&str> {
  item
    .res_body_type
    .as_deref()
    .filter(|kind| kind.eq_ignore_ascii_case("json"))
    .and(item.res_body.as_deref())
    .filter(|body| !body.trim().is_empty())
}

/// Response types collected from YAPI groups, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TsTypes {
  types: IndexMap<String, String>,
}

impl TsTypes {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a type for every interface of `group` that has a JSON response
  /// schema. Interfaces are skipped when the title is not a word, the type
  /// name is not a binding or is already declared, or the schema doesn't
  /// parse.
  pub fn add_group(&mut self, group: &YapiGroup) -> &mut Self {
    for item in &group.list {
      let Some(body) = response_schema(item) else {
        continue;
      };
      if !is_word(&item.title) {
        tracing::debug!(group = %group.name, title = %item.title, "skipping untyped title");
        continue;
      }
      let name = format!("{}{}", group.name, item.title);
      if !is_binding(&name) {
        tracing::warn!(%name, "skipping response type, not a valid type name");
        continue;
      }
      if self.types.contains_key(&name) {
        tracing::warn!(%name, "skipping response type, already declared");
        continue;
      }
      match serde_json::from_str::<ResponseSchema>(body) {
        Ok(schema) => {
          self.types.insert(name, schema.to_ts());
        }
        Err(err) => tracing::warn!(%name, %err, "skipping response type, invalid schema"),
      }
    }
    self
  }

  /// Declared type names.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.types.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }

  pub fn render(&self) -> String {
    self
      .types
      .iter()
      .map(|(name, ty)| format!("export type {name} = {ty}\n"))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

/// Renders the response types of all `groups`.
pub fn gen_ts_types<'a>(groups: impl IntoIterator<Item = &'a YapiGroup>) -> String {
  let mut types = TsTypes::new();
  for group in groups {
    types.add_group(group);
  }
  types.render()
}
