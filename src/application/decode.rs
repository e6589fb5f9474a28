//! Tolerant decoding for hand-edited documents.
//!
//! A `null` member counts as absent, so the field default applies. A record
//! that still fails to decode is rebuilt member by member on top of its
//! serialized default, and any member that breaks the record is dropped.
//! List documents are decoded one record at a time; a record that cannot be
//! rebuilt is skipped instead of failing the whole list.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::documents::Document;

use super::content::LoadError;

const SOURCE: &str = "application::decode";

/// Decode a single-record document.
pub(crate) fn record<T>(document: Document, value: &Value, default: &T) -> Result<T, LoadError>
where
    T: Serialize + DeserializeOwned,
{
    let strict = match T::deserialize(value) {
        Ok(data) => return Ok(data),
        Err(source) => source,
    };
    match repair(document, value, default, "") {
        Some(data) => Ok(data),
        None => Err(LoadError::Shape {
            document,
            source: strict,
        }),
    }
}

/// Decode a list document, keeping every record that can be read.
pub(crate) fn records<T>(document: Document, value: &Value) -> Result<Vec<T>, LoadError>
where
    T: Serialize + DeserializeOwned + Default,
{
    let Some(items) = value.as_array() else {
        return Err(LoadError::Shape {
            document,
            source: <serde_json::Error as serde::de::Error>::custom("expected an array of records"),
        });
    };

    let default = T::default();
    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match T::deserialize(item) {
            Ok(record) => decoded.push(record),
            Err(err) => match repair(document, item, &default, &format!("/{index}")) {
                Some(record) => decoded.push(record),
                None => warn!(
                    target_module = SOURCE,
                    document = %document,
                    index,
                    error = %err,
                    "Skipping malformed record"
                ),
            },
        }
    }
    Ok(decoded)
}

fn repair<T>(document: Document, value: &Value, default: &T, location: &str) -> Option<T>
where
    T: Serialize + DeserializeOwned,
{
    let stripped = without_nulls(value.clone());
    if let Ok(data) = T::deserialize(&stripped) {
        return Some(data);
    }

    let Value::Object(members) = stripped else {
        return None;
    };
    let mut merged = serde_json::to_value(default).ok().filter(Value::is_object)?;
    absorb::<T>(document, &mut merged, "", &members, location);
    T::deserialize(&merged).ok()
}

/// Merge `members` into the object at `path`, keeping only those the record accepts.
fn absorb<T: DeserializeOwned>(
    document: Document,
    root: &mut Value,
    path: &str,
    members: &Map<String, Value>,
    location: &str,
) {
    for (key, member) in members {
        let pointer = format!("{path}/{}", key.replace('~', "~0").replace('/', "~1"));
        let previous = swap(root, path, key, Some(member.clone()));
        if T::deserialize(&*root).is_ok() {
            continue;
        }

        match (previous, member) {
            (Some(previous @ Value::Object(_)), Value::Object(nested)) => {
                swap(root, path, key, Some(previous));
                absorb::<T>(document, root, &pointer, nested, location);
            }
            (None, Value::Object(nested)) => {
                swap(root, path, key, Some(Value::Object(Map::new())));
                if T::deserialize(&*root).is_ok() {
                    absorb::<T>(document, root, &pointer, nested, location);
                } else {
                    swap(root, path, key, None);
                    ignored(document, location, &pointer);
                }
            }
            (previous, _) => {
                swap(root, path, key, previous);
                ignored(document, location, &pointer);
            }
        }
    }
}

/// Set or remove `key` in the object at `path`, returning the member it replaced.
fn swap(root: &mut Value, path: &str, key: &str, member: Option<Value>) -> Option<Value> {
    let object = root.pointer_mut(path)?.as_object_mut()?;
    match member {
        Some(member) => object.insert(key.to_owned(), member),
        None => object.remove(key),
    }
}

fn ignored(document: Document, location: &str, pointer: &str) {
    warn!(
        target_module = SOURCE,
        document = %document,
        field = %format!("{location}{pointer}"),
        "Ignoring malformed field"
    );
}

fn without_nulls(value: Value) -> Value {
    match value {
        Value::Object(members) => Value::Object(
            members
                .into_iter()
                .filter(|(_, member)| !member.is_null())
                .map(|(key, member)| (key, without_nulls(member)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(without_nulls).collect()),
        other => other,
    }
}
