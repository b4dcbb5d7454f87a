//! OpenAPI spec generator for configs.
//!
//! Every endpoint becomes an operation on its path, `:name` placeholders
//! turning into `{name}` path parameters. `POST` operations take a JSON object
//! body holding the leftover parameters.
//!
//! Use [`gen_openapi`] or [`gen_openapi_yaml`].

use aide::openapi::*;
use indexmap::IndexMap;
use schemars::json_schema;

use crate::generate::split_docs;
use crate::path::{placeholders, to_openapi_path};
use crate::{ApiClient, ApiConfig, ConfigError, Verb, lower_first};

/// Document level information.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiMeta<'a> {
  pub title: &'a str,
  pub version: &'a str,
  /// First paragraph becomes the summary, the rest the description.
  pub docs: Option<&'a str>,
}

fn schema_object(json_schema: schemars::Schema) -> SchemaObject {
  SchemaObject { json_schema, example: None, external_docs: None }
}

fn path_parameter(name: &str) -> ReferenceOr<Parameter> {
  ReferenceOr::Item(Parameter::Path {
    parameter_data: ParameterData {
      name: name.to_owned(),
      description: None,
      required: true,
      deprecated: None,
      format: ParameterSchemaOrContent::Schema(schema_object(json_schema!({ "type": "string" }))),
      example: None,
      examples: IndexMap::new(),
      explode: None,
      extensions: IndexMap::new(),
    },
    style: PathStyle::Simple,
  })
}

fn json_body() -> ReferenceOr<RequestBody> {
  ReferenceOr::Item(RequestBody {
    required: true,
    content: IndexMap::from_iter([(
      "application/json".into(),
      MediaType {
        schema: Some(schema_object(json_schema!({ "type": "object" }))),
        ..Default::default()
      },
    )]),
    ..RequestBody::default()
  })
}

fn operation(operation_id: String, tag: Option<&str>, verb: Verb, template: &str) -> Operation {
  Operation {
    operation_id: Some(operation_id),
    tags: tag.map(|t| vec![t.to_owned()]).unwrap_or_default(),
    parameters: placeholders(template).into_iter().map(|(name, _)| path_parameter(name)).collect(),
    request_body: (verb == Verb::Post).then(json_body),
    responses: Some(Responses {
      default: Some(ReferenceOr::Item(Response {
        description: "Successful response".into(),
        ..Default::default()
      })),
      ..Default::default()
    }),
    ..Operation::default()
  }
}

/// Generate OpenAPI schema for tagged groups of endpoints, untagged when the
/// tag is `None`.
///
/// Operation ids are the client keys, prefixed with `<tag>.` for tagged
/// groups. Configs are validated like [`ApiClient::from_config`]. When the
/// same verb and path show up again the first operation is kept and the
/// others are logged and skipped.
pub fn gen_openapi<'a>(
  meta: ApiMeta<'_>,
  groups: impl IntoIterator<Item = (Option<&'a str>, &'a ApiConfig)>,
) -> Result<OpenApi, ConfigError> {
  let mut paths: IndexMap<String, PathItem> = IndexMap::new();
  for (tag, config) in groups {
    let client = ApiClient::from_config(config)?;
    for (key, endpoint) in client.iter() {
      let operation_id = match tag {
        Some(tag) => format!("{}.{key}", lower_first(tag)),
        None => key.to_owned(),
      };
      let path = to_openapi_path(endpoint.template());
      let item = paths.entry(path.clone()).or_default();
      let slot = match endpoint.verb() {
        Verb::Get => &mut item.get,
        Verb::Post => &mut item.post,
      };
      if let Some(existing) = slot.as_ref() {
        tracing::warn!(
          %path,
          verb = %endpoint.verb(),
          kept = existing.operation_id.as_deref().unwrap_or_default(),
          skipped = %operation_id,
          "operation already declared"
        );
        continue;
      }
      *slot = Some(operation(operation_id, tag, endpoint.verb(), endpoint.template()));
    }
  }
  let (summary, description) = split_docs(meta.docs);
  Ok(OpenApi {
    info: Info {
      title: meta.title.into(),
      version: meta.version.into(),
      summary,
      description,
      ..Default::default()
    },
    paths: Some(Paths {
      paths: paths.into_iter().map(|(path, item)| (path, ReferenceOr::Item(item))).collect(),
      ..Default::default()
    }),
    ..Default::default()
  })
}

/// [`gen_openapi`] wrapper that produces OpenAPI spec as YAML string.
#[cfg(feature = "openapi-yaml")]
pub fn gen_openapi_yaml<'a>(
  meta: ApiMeta<'_>,
  groups: impl IntoIterator<Item = (Option<&'a str>, &'a ApiConfig)>,
) -> Result<String, ConfigError> {
  Ok(serde_yaml::to_string(&gen_openapi(meta, groups)?)?)
}
