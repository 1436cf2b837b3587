use crate::domain::model::{Person, PersonId};
use crate::domain::ports::{PersonReader, Storage};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::{validate_extension, Validate};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_IMPORT_EXTENSIONS: &[&str] = &["json", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportFormat {
    Json,
    Csv,
}

/// A JSON import is either a bare array or `{ "persons": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonImport {
    List(Vec<Person>),
    Document { persons: Vec<Person> },
}

pub struct FilePersonReader<S: Storage> {
    storage: S,
    allowed_extensions: Vec<String>,
}

impl<S: Storage> FilePersonReader<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            allowed_extensions: DEFAULT_IMPORT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| ext.to_ascii_lowercase())
            .collect();
        self
    }

    fn format_for(&self, path: &str) -> Result<ImportFormat> {
        let allowed: Vec<&str> = self.allowed_extensions.iter().map(String::as_str).collect();
        validate_extension("import_path", path, &allowed)
            .map_err(|e| RosterError::import(path, e.to_string()))?;

        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ImportFormat::Json),
            Some("csv") => Ok(ImportFormat::Csv),
            Some(other) => Err(RosterError::import(
                path,
                format!("no parser for .{} files", other),
            )),
            None => Err(RosterError::import(path, "file has no extension")),
        }
    }
}

fn parse_json(path: &str, bytes: &[u8]) -> Result<Vec<Person>> {
    let parsed: JsonImport = serde_json::from_slice(bytes)
        .map_err(|e| RosterError::import(path, format!("invalid JSON: {}", e)))?;

    Ok(match parsed {
        JsonImport::List(persons) => persons,
        JsonImport::Document { persons } => persons,
    })
}

fn parse_csv(path: &str, bytes: &[u8]) -> Result<Vec<Person>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut persons = Vec::new();
    for (index, row) in reader.deserialize::<Person>().enumerate() {
        // Row 1 is the header.
        let person = row.map_err(|e| {
            RosterError::import(path, format!("invalid CSV row {}: {}", index + 2, e))
        })?;
        persons.push(person);
    }

    Ok(persons)
}

fn check_records(path: &str, persons: &[Person]) -> Result<()> {
    let mut ids: HashSet<PersonId> = HashSet::new();

    for (index, person) in persons.iter().enumerate() {
        person.validate().map_err(|e| {
            RosterError::import(path, format!("record {} is invalid: {}", index + 1, e))
        })?;

        if !ids.insert(person.id) {
            return Err(RosterError::import(
                path,
                format!("record {} repeats person id {}", index + 1, person.id),
            ));
        }
    }

    Ok(())
}

#[async_trait]
impl<S: Storage> PersonReader for FilePersonReader<S> {
    async fn read_persons(&self, path: &str) -> Result<Vec<Person>> {
        let format = self.format_for(path)?;

        let bytes = self.storage.read_file(path).await.map_err(|e| match e {
            RosterError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                RosterError::import(path, "file not found")
            }
            other => RosterError::import(path, other.to_string()),
        })?;

        let persons = match format {
            ImportFormat::Json => parse_json(path, &bytes)?,
            ImportFormat::Csv => parse_csv(path, &bytes)?,
        };
        check_records(path, &persons)?;

        tracing::debug!("Parsed {} persons from {}", persons.len(), path);
        Ok(persons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AccessLevel, Role};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn with_file(path: &str, contents: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .lock()
                .await
                .insert(path.to_string(), contents.as_bytes().to_vec());
            storage
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                RosterError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, _path: &str, _data: &[u8]) -> Result<()> {
            panic!("the import reader must never write");
        }
    }

    #[tokio::test]
    async fn test_read_json_array() {
        let storage = MockStorage::with_file(
            "import.json",
            r#"[
                {"id": 10, "first_name": "Ada", "last_name": "Lovelace",
                 "role": "instructor", "access_level": "elevated",
                 "email": "ada@example.org", "badge_expires": "2027-01-31"},
                {"id": 11, "first_name": "Alan", "last_name": "Turing",
                 "role": "trainee", "access_level": "standard"}
            ]"#,
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let persons = reader.read_persons("import.json").await.unwrap();

        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].role, Role::Instructor);
        assert_eq!(persons[0].access_level, AccessLevel::Elevated);
        assert_eq!(
            persons[0].badge_expires,
            chrono::NaiveDate::from_ymd_opt(2027, 1, 31)
        );
        assert_eq!(persons[1].email, None);
    }

    #[tokio::test]
    async fn test_read_json_document() {
        let storage = MockStorage::with_file(
            "import.json",
            r#"{"persons": [{"id": 1, "first_name": "Grace", "last_name": "Hopper",
                "role": "visitor", "access_level": "visitor"}]}"#,
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let persons = reader.read_persons("import.json").await.unwrap();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0].full_name(), "Grace Hopper");
    }

    #[tokio::test]
    async fn test_read_csv() {
        let storage = MockStorage::with_file(
            "import.csv",
            "id,first_name,last_name,role,access_level,email,badge_expires\n\
             20,Katherine,Johnson,technical_officer,elevated,kj@example.org,2026-12-01\n\
             21,Dorothy,Vaughan,instructor,standard,,\n",
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let persons = reader.read_persons("import.csv").await.unwrap();

        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].role, Role::TechnicalOfficer);
        assert_eq!(persons[1].email, None);
        assert_eq!(persons[1].badge_expires, None);
    }

    #[tokio::test]
    async fn test_missing_file_is_import_error() {
        let reader = FilePersonReader::new(MockStorage::default());

        match reader.read_persons("absent.json").await {
            Err(RosterError::ImportParseError { path, reason }) => {
                assert_eq!(path, "absent.json");
                assert_eq!(reason, "file not found");
            }
            other => panic!("expected import error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_import_error() {
        let storage = MockStorage::with_file("import.json", "[{\"id\": 1,").await;
        let reader = FilePersonReader::new(storage);

        let err = reader.read_persons("import.json").await.unwrap_err();
        assert!(matches!(err, RosterError::ImportParseError { .. }));
    }

    #[tokio::test]
    async fn test_unknown_role_in_csv_is_import_error() {
        let storage = MockStorage::with_file(
            "import.csv",
            "id,first_name,last_name,role,access_level,email,badge_expires\n\
             1,Ada,Lovelace,wizard,standard,,\n",
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let err = reader.read_persons("import.csv").await.unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[tokio::test]
    async fn test_invalid_record_fails_whole_import() {
        let storage = MockStorage::with_file(
            "import.json",
            r#"[{"id": 1, "first_name": "Ada", "last_name": "Lovelace",
                 "role": "trainee", "access_level": "standard"},
                {"id": 2, "first_name": " ", "last_name": "Nobody",
                 "role": "trainee", "access_level": "standard"}]"#,
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let err = reader.read_persons("import.json").await.unwrap_err();
        assert!(err.to_string().contains("record 2 is invalid"));
    }

    #[tokio::test]
    async fn test_repeated_id_is_rejected() {
        let storage = MockStorage::with_file(
            "import.json",
            r#"[{"id": 4, "first_name": "A", "last_name": "B", "role": "trainee", "access_level": "standard"},
                {"id": 4, "first_name": "C", "last_name": "D", "role": "trainee", "access_level": "standard"}]"#,
        )
        .await;
        let reader = FilePersonReader::new(storage);

        let err = reader.read_persons("import.json").await.unwrap_err();
        assert!(err.to_string().contains("repeats person id 4"));
    }

    #[tokio::test]
    async fn test_allow_list_is_case_insensitive() {
        let storage = MockStorage::with_file(
            "import.json",
            r#"[{"id": 1, "first_name": "Ada", "last_name": "Lovelace",
                 "role": "trainee", "access_level": "standard"}]"#,
        )
        .await;
        let reader = FilePersonReader::new(storage).with_allowed_extensions(vec!["JSON".into()]);

        let persons = reader.read_persons("import.json").await.unwrap();
        assert_eq!(persons.len(), 1);
    }

    #[tokio::test]
    async fn test_extension_outside_allow_list_is_rejected() {
        let storage = MockStorage::with_file("import.csv", "id\n").await;
        let reader = FilePersonReader::new(storage).with_allowed_extensions(vec!["json".into()]);

        let err = reader.read_persons("import.csv").await.unwrap_err();
        assert!(matches!(err, RosterError::ImportParseError { .. }));
    }
}
