//! Configurable JSON field mapper.
//!
//! Each vendor names its fields differently; [`VendorFieldNames`] records the
//! vendor's spelling of every canonical field and [`JsonFieldMapper`] applies
//! it in both directions.

use crate::task::{
    domain::{StatusVocabulary, Task, TaskCategory, VendorTaskId, VendorTaskKey},
    ports::{FieldMapper, FieldMappingError},
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Vendor spelling of each canonical task field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VendorFieldNames {
    /// Task identifier field.
    pub id: String,
    /// Category label field.
    pub category: String,
    /// Status word field.
    pub status: String,
    /// Task name field.
    pub name: String,
    /// Description field.
    pub description: String,
    /// Price field.
    pub price: String,
    /// Email field.
    pub email: String,
    /// Location field.
    pub location: String,
    /// Field holding the reciprocal task id.
    pub reciprocal_id: String,
    /// Field holding the reciprocal vendor name.
    pub reciprocal_vendor: String,
}

impl Default for VendorFieldNames {
    fn default() -> Self {
        Self {
            id: "id".to_owned(),
            category: "category".to_owned(),
            status: "status".to_owned(),
            name: "name".to_owned(),
            description: "description".to_owned(),
            price: "price".to_owned(),
            email: "email".to_owned(),
            location: "location".to_owned(),
            reciprocal_id: "reciprocal_id".to_owned(),
            reciprocal_vendor: "reciprocal_vendor".to_owned(),
        }
    }
}

/// Field mapper for vendors whose records are flat JSON objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonFieldMapper {
    fields: VendorFieldNames,
    vocabulary: StatusVocabulary,
}

impl JsonFieldMapper {
    /// Creates a mapper from field names and a status vocabulary.
    #[must_use]
    pub const fn new(fields: VendorFieldNames, vocabulary: StatusVocabulary) -> Self {
        Self { fields, vocabulary }
    }

    /// Returns the status vocabulary.
    #[must_use]
    pub const fn vocabulary(&self) -> &StatusVocabulary {
        &self.vocabulary
    }

    /// Returns the vendor's field names.
    #[must_use]
    pub const fn fields(&self) -> &VendorFieldNames {
        &self.fields
    }
}

impl FieldMapper for JsonFieldMapper {
    fn to_canonical(&self, raw: &Value) -> Result<Task, FieldMappingError> {
        let record = raw.as_object().ok_or(FieldMappingError::NotAnObject)?;
        let names = &self.fields;

        let id = read_identifier(record, &names.id)?
            .ok_or_else(|| FieldMappingError::MissingField(names.id.clone()))?;
        let category = read_string(record, &names.category)?
            .map_or(TaskCategory::Priced, |label| TaskCategory::from_label(&label));
        let name = read_string(record, &names.name)?.unwrap_or_default();

        let mut task = Task::new(category, VendorTaskId::new(id)?, name);
        if let Some(word) = read_string(record, &names.status)? {
            task = task.with_status(self.vocabulary.to_canonical(&word));
        }
        if let Some(description) = read_string(record, &names.description)? {
            task = task.with_description(description);
        }
        if let Some(price) = read_unsigned(record, &names.price)? {
            task = task.with_price(price);
        }
        if let Some(email) = read_string(record, &names.email)? {
            task = task.with_email(email);
        }
        if let Some(location) = read_unsigned(record, &names.location)? {
            task = task.with_location(location);
        }
        let reciprocal_id = read_identifier(record, &names.reciprocal_id)?;
        let reciprocal_vendor = read_string(record, &names.reciprocal_vendor)?;
        if let (Some(task_id), Some(vendor)) = (reciprocal_id, reciprocal_vendor) {
            task = task.with_reciprocal(VendorTaskKey::from_parts(task_id, vendor)?);
        }
        Ok(task)
    }

    fn from_canonical(&self, task: &Task) -> Value {
        let names = &self.fields;
        let mut record = Map::new();
        record.insert(names.id.clone(), Value::from(task.id().as_str()));
        record.insert(names.category.clone(), Value::from(task.category().as_str()));
        record.insert(names.name.clone(), Value::from(task.name()));
        if let Some(status) = task.status() {
            let word = self.vocabulary.to_vendor(status).unwrap_or_else(|| {
                tracing::warn!(%status, "vendor has no word for status; writing canonical name");
                status.as_str()
            });
            record.insert(names.status.clone(), Value::from(word));
        }
        if let Some(description) = task.description() {
            record.insert(names.description.clone(), Value::from(description));
        }
        if let Some(price) = task.price() {
            record.insert(names.price.clone(), Value::from(price));
        }
        if let Some(email) = task.email() {
            record.insert(names.email.clone(), Value::from(email));
        }
        if let Some(location) = task.location() {
            record.insert(names.location.clone(), Value::from(location));
        }
        if let Some(reciprocal) = task.reciprocal() {
            record.insert(
                names.reciprocal_id.clone(),
                Value::from(reciprocal.task_id().as_str()),
            );
            record.insert(
                names.reciprocal_vendor.clone(),
                Value::from(reciprocal.vendor().as_str()),
            );
        }
        Value::Object(record)
    }
}

fn invalid(field: &str, reason: &str) -> FieldMappingError {
    FieldMappingError::InvalidField {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

fn read_string(record: &Map<String, Value>, field: &str) -> Result<Option<String>, FieldMappingError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(invalid(field, "expected a string")),
    }
}

/// Vendors disagree on whether ids are numbers or strings; accept both.
fn read_identifier(
    record: &Map<String, Value>,
    field: &str,
) -> Result<Option<String>, FieldMappingError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(_) => Err(invalid(field, "expected a string or number")),
    }
}

fn read_unsigned(record: &Map<String, Value>, field: &str) -> Result<Option<u64>, FieldMappingError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .map(Some)
            .ok_or_else(|| invalid(field, "expected a non-negative integer")),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| invalid(field, "expected a non-negative integer")),
        Some(_) => Err(invalid(field, "expected a non-negative integer")),
    }
}
