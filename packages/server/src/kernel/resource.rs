use serde_json::Value;

use crate::common::ApiError;

/// Kind of a user-supplied field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string column.
    Text,
    /// Integer column referencing `factories.id`; resolved against the
    /// store before any mutation is applied.
    FactoryRef,
}

/// One user-supplied column of an entity.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Static metadata describing one entity type.
///
/// `fields` is both the required set for create and the recognized set for
/// update; `id` is store-assigned and never accepted on input.
#[derive(Debug, Clone, Copy)]
pub struct EntityMeta {
    /// Display name used in error messages ("Factory").
    pub name: &'static str,
    /// Table name, which doubles as the plural form in messages.
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    /// Child tables whose rows are deleted alongside a row of this entity,
    /// in the same transaction.
    pub children: &'static [&'static str],
}

/// A persisted entity row. Implementations pair a `sqlx::FromRow` struct
/// with its `EntityMeta`.
pub trait Entity:
    for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + serde::Serialize + Send + Unpin
{
    const META: EntityMeta;
}

/// A validated field value ready to be bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Id(i64),
}

/// Validate a create payload: every metadata field must be present and
/// well-typed. Unrecognized keys (including `id`) are ignored.
pub fn validate_create(
    meta: &EntityMeta,
    body: &Value,
) -> Result<Vec<(&'static str, FieldValue)>, ApiError> {
    let map = body
        .as_object()
        .filter(|map| meta.fields.iter().all(|field| map.contains_key(field.name)))
        .ok_or_else(|| ApiError::InvalidInput("Missing required fields".to_string()))?;

    let mut values = Vec::with_capacity(meta.fields.len());
    for field in meta.fields {
        values.push((field.name, coerce(field, &map[field.name])?));
    }
    Ok(values)
}

/// Validate an update payload: any subset of the metadata fields, but at
/// least one must be present. A present-but-unchanged field still counts,
/// so a no-op update is accepted.
pub fn validate_update(
    meta: &EntityMeta,
    body: &Value,
) -> Result<Vec<(&'static str, FieldValue)>, ApiError> {
    let mut values = Vec::new();
    if let Some(map) = body.as_object() {
        for field in meta.fields {
            if let Some(value) = map.get(field.name) {
                values.push((field.name, coerce(field, value)?));
            }
        }
    }

    if values.is_empty() {
        return Err(ApiError::InvalidInput(
            "No update fields provided".to_string(),
        ));
    }
    Ok(values)
}

fn coerce(field: &FieldDef, value: &Value) -> Result<FieldValue, ApiError> {
    match field.kind {
        FieldKind::Text => value
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "Field '{}' must be a non-empty string",
                    field.name
                ))
            }),
        FieldKind::FactoryRef => value.as_i64().map(FieldValue::Id).ok_or_else(|| {
            ApiError::InvalidInput(format!("Field '{}' must be an integer", field.name))
        }),
    }
}
