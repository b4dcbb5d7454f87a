//! Generates a TypeScript module of `apiConfig` calls.
//!
//! ```
//! use apiconfig::ApiConfig;
//! use apiconfig::generate::ts::TsModule;
//!
//! let users = ApiConfig::new().with("GetUser", "GET", "/users/:id");
//! let code = TsModule::new("utils/api").export("User", Some("Users"), &users).unwrap().render();
//! assert_eq!(code, "\
//! import { apiConfig } from 'utils/api'
//!
//! /** Users */
//! export const user = apiConfig({
//!   GetUser: ['get', '/users/:id'],
//! })
//! ");
//! ```

use super::GenerateError;
use crate::{ApiConfig, lower_first};

struct TsExport {
  name: String,
  docs: Option<String>,
  entries: Vec<(String, String, String)>,
}

/// A module importing `apiConfig` and exporting one client per config.
pub struct TsModule {
  import_from: String,
  exports: Vec<TsExport>,
}

impl TsModule {
  pub fn new(import_from: impl Into<String>) -> Self {
    Self { import_from: import_from.into(), exports: Vec::new() }
  }

  /// Adds `export const <name> = apiConfig({...})`, `name` getting its first
  /// character lower-cased. Entry names are kept as written since
  /// `apiConfig` derives the client keys at runtime.
  ///
  /// The lower-cased name must be a usable binding and must not be exported
  /// already.
  pub fn export(
    &mut self,
    name: &str,
    docs: Option<&str>,
    config: &ApiConfig,
  ) -> Result<&mut Self, GenerateError> {
    let name = lower_first(name);
    if !is_binding(&name) {
      return Err(GenerateError::InvalidName { name });
    }
    if self.exports.iter().any(|export| export.name == name) {
      return Err(GenerateError::DuplicateName { name });
    }
    self.exports.push(TsExport {
      name,
      docs: docs.map(str::trim).filter(|d| !d.is_empty()).map(str::to_owned),
      entries: config
        .iter()
        .map(|(key, spec)| (key.to_owned(), spec.verb().to_lowercase(), spec.path().to_owned()))
        .collect(),
    });
    Ok(self)
  }

  pub fn render(&self) -> String {
    let mut out = format!("import {{ apiConfig }} from {}\n", quote(&self.import_from));
    for export in &self.exports {
      out.push('\n');
      if let Some(docs) = &export.docs {
        out.push_str(&format!("/** {} */\n", docs.replace("*/", "*\\/").replace('\n', " ")));
      }
      out.push_str(&format!("export const {} = apiConfig({{\n", export.name));
      for (key, verb, path) in &export.entries {
        out.push_str(&format!("  {}: [{}, {}],\n", property(key), quote(verb), quote(path)));
      }
      out.push_str("})\n");
    }
    out
  }
}

/// Renders a module from `(export name, config)` pairs.
pub fn gen_ts_module<'a>(
  import_from: &str,
  exports: impl IntoIterator<Item = (&'a str, &'a ApiConfig)>,
) -> Result<String, GenerateError> {
  let mut module = TsModule::new(import_from);
  for (name, config) in exports {
    module.export(name, None, config)?;
  }
  Ok(module.render())
}

pub(crate) fn quote(s: &str) -> String {
  format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

const RESERVED: &[&str] = &[
  "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
  "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
  "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
  "typeof", "var", "void", "while", "with", "let", "static", "yield", "await", "implements",
  "interface", "package", "private", "protected", "public",
];

/// Identifier that can be declared with `const` or `type`.
pub(crate) fn is_binding(s: &str) -> bool {
  is_identifier(s) && !RESERVED.contains(&s)
}

pub(crate) fn is_identifier(s: &str) -> bool {
  let mut chars = s.chars();
  chars.next().is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

pub(crate) fn property(key: &str) -> String {
  if is_identifier(key) { key.to_owned() } else { quote(key) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_all_exports_in_order() {
    let users =
      ApiConfig::new().with("GetUser", "GET", "/users/:id").with("createUser", "post", "/users");
    let items = ApiConfig::new().with("removeItem", "DELETE", "/items/:id");
    let code = gen_ts_module("utils/api", [("User", &users), ("ItemStore", &items)]).unwrap();
    assert_eq!(
      code,
      "import { apiConfig } from 'utils/api'

export const user = apiConfig({
  GetUser: ['get', '/users/:id'],
  createUser: ['post', '/users'],
})

export const itemStore = apiConfig({
  removeItem: ['delete', '/items/:id'],
})
"
    );
  }

  #[test]
  fn quotes_odd_keys_and_values() {
    let config = ApiConfig::new().with("get user", "get", "/it's").with("查询用户", "get", "/q");
    let code = TsModule::new("@/api").export("x", Some("  "), &config).unwrap().render();
    assert!(code.contains("  'get user': ['get', '/it\\'s'],\n"));
    assert!(code.contains("  查询用户: ['get', '/q'],\n"));
    assert!(!code.contains("/**"));
  }

  #[test]
  fn empty_module() {
    assert_eq!(TsModule::new("utils/api").render(), "import { apiConfig } from 'utils/api'\n");
  }

  #[test]
  fn export_names_must_be_bindings() {
    let config = ApiConfig::new().with("getUser", "get", "/users/:id");
    let mut module = TsModule::new("utils/api");
    for name in ["User Center", "2fa", "Delete", ""] {
      assert_eq!(
        module.export(name, None, &config).err(),
        Some(GenerateError::InvalidName { name: lower_first(name) })
      );
    }
    assert_eq!(module.render(), "import { apiConfig } from 'utils/api'\n");

    module.export("UserCenter", None, &config).unwrap();
    module.export("$store", None, &config).unwrap();
    assert!(module.render().contains("export const userCenter = apiConfig({\n"));
  }

  #[test]
  fn exports_must_be_unique() {
    let config = ApiConfig::new();
    let err = gen_ts_module("utils/api", [("User", &config), ("user", &config)]).unwrap_err();
    assert_eq!(err, GenerateError::DuplicateName { name: "user".into() });
    assert_eq!(err.to_string(), "`user` is declared twice");
  }
}
