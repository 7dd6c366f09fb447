use crate::utils::error::{OkrError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 路由路徑必須以 `/` 開頭，且除了根路徑外不可以 `/` 結尾
pub fn validate_route_path(field_name: &str, path: &str) -> Result<()> {
    validate_path(field_name, path)?;

    if !path.starts_with('/') {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Route path must start with '/'".to_string(),
        });
    }

    // `/boss` and `/boss/` cover the same routes.
    if path.len() > 1 && path.ends_with('/') {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Route path must not end with '/'".to_string(),
        });
    }

    Ok(())
}

/// Storage keys become file names, so separators are rejected.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains(['/', '\\', '\0']) || key == "." || key == ".." {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Key must not contain path separators".to_string(),
        });
    }

    Ok(())
}

pub fn validate_unique<'a>(
    field_name: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(OkrError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OkrError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
