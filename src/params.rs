//! Call-time parameters.

use serde_json::Value;

/// Parameters of a single call, string keys to arbitrary JSON values.
pub type Params = serde_json::Map<String, Value>;

/// Key callers use for the space identifier.
pub const SPACE_ID_CAMEL: &str = "spaceId";
/// Key the wire expects for the space identifier.
pub const SPACE_ID: &str = "space_id";

/// Derives the outgoing parameter set of a call.
///
/// A non-null `spaceId` is moved to `space_id`, overwriting the value of an
/// existing `space_id` in place or appended last otherwise. Without `spaceId`,
/// or with a `null` one, the parameters are copied as is. The caller's map is
/// never touched.
pub fn normalize_params(params: &Params) -> Params {
  let Some(space_id) = params.get(SPACE_ID_CAMEL).filter(|v| !v.is_null()) else {
    return params.clone();
  };
  let mut out: Params = params
    .iter()
    .filter(|(key, _)| key.as_str() != SPACE_ID_CAMEL)
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect();
  out.insert(SPACE_ID.to_owned(), space_id.clone());
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn params(v: Value) -> Params {
    v.as_object().cloned().unwrap()
  }

  #[test]
  fn space_id_is_renamed() {
    let input = params(json!({ "name": "x", "spaceId": "abc" }));
    let out = normalize_params(&input);
    assert_eq!(Value::Object(out.clone()), json!({ "name": "x", "space_id": "abc" }));
    assert!(!out.contains_key(SPACE_ID_CAMEL));
    // caller's map untouched
    assert_eq!(input.get(SPACE_ID_CAMEL), Some(&json!("abc")));
  }

  #[test]
  fn renamed_key_goes_last() {
    let input = params(json!({ "spaceId": "abc", "a": true, "b": null }));
    let out = normalize_params(&input);
    let keys: Vec<_> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "b", "space_id"]);
  }

  #[test]
  fn existing_space_id_is_overwritten_in_place() {
    let input = params(json!({ "space_id": 1, "a": true, "spaceId": 2, "b": null }));
    let out = normalize_params(&input);
    let keys: Vec<_> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, ["space_id", "a", "b"]);
    assert_eq!(out[SPACE_ID], json!(2));
  }

  #[test]
  fn no_rename_without_space_id() {
    let input = params(json!({ "id": 5 }));
    assert_eq!(normalize_params(&input), input);

    let input = params(json!({ "id": 5, "spaceId": null }));
    assert_eq!(normalize_params(&input), input);
  }

  #[test]
  fn falsy_space_id_still_renamed() {
    let input = params(json!({ "spaceId": 0 }));
    assert_eq!(Value::Object(normalize_params(&input)), json!({ "space_id": 0 }));

    let input = params(json!({ "spaceId": "" }));
    assert_eq!(Value::Object(normalize_params(&input)), json!({ "space_id": "" }));
  }
}
