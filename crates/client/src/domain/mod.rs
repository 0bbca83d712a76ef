//! Validated CRUD over the backend entities

pub mod a001_usuario;
pub mod a002_empresa;
pub mod a003_tarea;

use crate::shared::error::ValidationError;

/// Names of the `(name, value)` pairs whose value is blank
pub(crate) fn missing_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Vec<String> {
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
}

pub(crate) fn require_fields<'a>(
    fields: impl IntoIterator<Item = (&'static str, &'a str)>,
) -> Result<(), ValidationError> {
    let missing = missing_fields(fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// Basic email check: blank is accepted, anything else needs an '@'
pub(crate) fn check_email(field: &str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if !value.is_empty() && !value.contains('@') {
        return Err(ValidationError::InvalidEmail {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
