use crate::utils::error::{RosterError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RosterError::validation(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(RosterError::validation(field_name, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(&extension.to_ascii_lowercase()) => Ok(()),
        Some(extension) => Err(RosterError::validation(
            field_name,
            format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        )),
        None => Err(RosterError::validation(
            field_name,
            "File has no extension or invalid filename",
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_max_length(field_name: &str, value: &str, max_chars: usize) -> Result<()> {
    if value.chars().count() > max_chars {
        return Err(RosterError::validation(
            field_name,
            format!("Value must be at most {} characters", max_chars),
        ));
    }
    Ok(())
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(RosterError::validation(
            field_name,
            format!("'{}' is not an email address", value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store.data_dir", "./data").is_ok());
        assert!(validate_path("store.data_dir", "  ").is_err());
        assert!(validate_path("store.data_dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("import", "persons.json", &["json", "csv"]).is_ok());
        assert!(validate_extension("import", "PERSONS.CSV", &["json", "csv"]).is_ok());
        assert!(validate_extension("import", "persons.xml", &["json", "csv"]).is_err());
        assert!(validate_extension("import", "persons", &["json", "csv"]).is_err());
        assert!(validate_extension("import", "persons.json", &["JSON"]).is_ok());
    }

    #[test]
    fn test_validate_strings() {
        assert!(validate_non_empty_string("first_name", "Ada").is_ok());
        assert!(validate_non_empty_string("first_name", " \t").is_err());
        assert!(validate_max_length("last_name", "Lovelace", 8).is_ok());
        assert!(validate_max_length("last_name", "Lovelaces", 8).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "ada@example.org").is_ok());
        assert!(validate_email("email", "ada.example.org").is_err());
        assert!(validate_email("email", "@example.org").is_err());
    }
}
