//! Generators of client modules and API descriptions from configs.

#[cfg(feature = "openapi")]
pub mod openapi;
pub mod ts;
pub mod types;

/// Errors of rendering TypeScript.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
  #[error("`{name}` is not a valid TypeScript binding name")]
  InvalidName { name: String },

  #[error("`{name}` is declared twice")]
  DuplicateName { name: String },
}

/// Split docs into headers and the rest.
#[allow(dead_code)]
pub(crate) fn split_docs(docs: Option<&str>) -> (Option<String>, Option<String>) {
  docs
    .map(str::trim)
    .filter(|docs| !docs.is_empty())
    .map(|docs| {
      docs
        .split_once("\n\n")
        .map_or((Some(docs.to_owned()), None), |(h, d)| (Some(h.to_owned()), Some(d.to_owned())))
    })
    .unwrap_or((None, None))
}

#[test]
fn test_split_docs() {
  assert_eq!(split_docs(None), (None, None));
  assert_eq!(split_docs(Some("  ")), (None, None));
  assert_eq!(split_docs(Some("Users")), (Some("Users".into()), None));
  assert_eq!(
    split_docs(Some("Users\n\nEverything about users")),
    (Some("Users".into()), Some("Everything about users".into()))
  );
}
