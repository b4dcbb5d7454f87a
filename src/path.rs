//! Path template compiler.
//!
//! A template is a URI path with `:name` placeholders, `name` being
//! `[A-Za-z0-9_]+`. A trailing `?` (`/files/:name?`) makes the placeholder
//! optional: when its parameter is missing or `null` the placeholder is
//! dropped together with the `/` right before it. A `:` not followed by a
//! name character is kept literally.
//!
//! ```
//! use apiconfig::path::compile;
//! use serde_json::json;
//!
//! let params = json!({ "id": 5, "verbose": true });
//! let (uri, rest) = compile("/users/:id", params.as_object().unwrap()).unwrap();
//! assert_eq!(uri, "/users/5");
//! assert_eq!(serde_json::Value::Object(rest), json!({ "verbose": true }));
//! ```

use crate::Params;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;
use std::borrow::Cow;

/// Characters escaped in a substituted path segment.
const SEGMENT: &AsciiSet = &CONTROLS
  .add(b' ')
  .add(b'"')
  .add(b'#')
  .add(b'%')
  .add(b'/')
  .add(b'<')
  .add(b'>')
  .add(b'?')
  .add(b'`')
  .add(b'{')
  .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
  #[error("missing value for `:{name}` in `{template}`")]
  MissingParam { name: String, template: String },

  #[error("value of `:{name}` must be a string, a number or a boolean")]
  InvalidValue { name: String },
}

/// Piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
  Literal(&'a str),
  Param { name: &'a str, optional: bool },
}

/// Iterator over the [`Token`]s of a template.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
  rest: &'a str,
}

/// Splits `template` into literals and placeholders.
pub fn tokenize(template: &str) -> Tokens<'_> {
  Tokens { rest: template }
}

fn is_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

fn starts_param(s: &str) -> bool {
  s.strip_prefix(':').is_some_and(|name| name.starts_with(is_name_char))
}

impl<'a> Iterator for Tokens<'a> {
  type Item = Token<'a>;

  fn next(&mut self) -> Option<Token<'a>> {
    let rest = self.rest;
    if rest.is_empty() {
      return None;
    }
    if starts_param(rest) {
      let after = &rest[1..];
      let len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
      let (name, tail) = after.split_at(len);
      let (optional, tail) = match tail.strip_prefix('?') {
        Some(tail) => (true, tail),
        None => (false, tail),
      };
      self.rest = tail;
      return Some(Token::Param { name, optional });
    }
    let end = rest
      .char_indices()
      .skip(1)
      .find(|&(i, _)| starts_param(&rest[i..]))
      .map_or(rest.len(), |(i, _)| i);
    let (literal, tail) = rest.split_at(end);
    self.rest = tail;
    Some(Token::Literal(literal))
  }
}

/// Placeholder names of `template` in order of appearance, without repeats.
pub fn placeholders(template: &str) -> Vec<(&str, bool)> {
  let mut out: Vec<(&str, bool)> = Vec::new();
  for token in tokenize(template) {
    if let Token::Param { name, optional } = token {
      if !out.iter().any(|(n, _)| *n == name) {
        out.push((name, optional));
      }
    }
  }
  out
}

fn segment<'v>(name: &str, value: &'v Value) -> Result<Cow<'v, str>, PathError> {
  match value {
    Value::String(s) => Ok(Cow::Borrowed(s)),
    Value::Number(n) => Ok(Cow::Owned(n.to_string())),
    Value::Bool(b) => Ok(Cow::Owned(b.to_string())),
    Value::Null | Value::Array(_) | Value::Object(_) => {
      Err(PathError::InvalidValue { name: name.to_owned() })
    }
  }
}

/// Substitutes the placeholders of `template` from `params`.
///
/// Returns the resolved URI and the parameters no placeholder consumed, in
/// their original order.
pub fn compile(template: &str, params: &Params) -> Result<(String, Params), PathError> {
  let mut uri = String::with_capacity(template.len());
  let mut consumed: Vec<&str> = Vec::new();
  for token in tokenize(template) {
    match token {
      Token::Literal(literal) => uri.push_str(literal),
      Token::Param { name, optional } => {
        match params.get(name).filter(|v| !v.is_null()) {
          Some(value) => uri.extend(utf8_percent_encode(&segment(name, value)?, SEGMENT)),
          None if optional => {
            if uri.ends_with('/') {
              uri.pop();
            }
          }
          None => {
            return Err(PathError::MissingParam {
              name: name.to_owned(),
              template: template.to_owned(),
            });
          }
        }
        consumed.push(name);
      }
    }
  }
  let leftover = params
    .iter()
    .filter(|(key, _)| !consumed.contains(&key.as_str()))
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect();
  Ok((uri, leftover))
}

/// Rewrites `:name` placeholders into OpenAPI's `{name}` form.
pub fn to_openapi_path(template: &str) -> String {
  tokenize(template)
    .map(|token| match token {
      Token::Literal(literal) => Cow::Borrowed(literal),
      Token::Param { name, .. } => Cow::Owned(format!("{{{name}}}")),
    })
    .collect()
}
