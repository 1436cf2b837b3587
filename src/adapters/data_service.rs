use crate::domain::model::{Person, PersonId};
use crate::domain::ports::{DataService, Storage};
use crate::utils::error::{RosterError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tokio::sync::Mutex;

/// Rejects a batch whose ids collide with the store or with each other.
fn check_unique_ids<'a>(
    existing: impl IntoIterator<Item = &'a PersonId>,
    batch: &[Person],
) -> Result<()> {
    let mut seen: HashSet<PersonId> = existing.into_iter().copied().collect();

    for person in batch {
        if !seen.insert(person.id) {
            return Err(RosterError::persistence(format!(
                "constraint violation: person id {} already exists",
                person.id
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct InMemoryDataService {
    persons: Mutex<BTreeMap<PersonId, Person>>,
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persons(persons: impl IntoIterator<Item = Person>) -> Self {
        Self {
            persons: Mutex::new(persons.into_iter().map(|p| (p.id, p)).collect()),
        }
    }
}

#[async_trait]
impl DataService for InMemoryDataService {
    async fn get_all_persons(&self) -> Result<Vec<Person>> {
        let persons = self.persons.lock().await;
        Ok(persons.values().cloned().collect())
    }

    async fn commit(&self, batch: &[Person]) -> Result<()> {
        let mut persons = self.persons.lock().await;
        check_unique_ids(persons.keys(), batch)?;

        for person in batch {
            persons.insert(person.id, person.clone());
        }

        tracing::debug!("Committed {} persons in memory", batch.len());
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    persons: Vec<Person>,
}

/// Keeps the whole roster in one JSON document behind a [`Storage`].
pub struct JsonFileDataService<S: Storage> {
    storage: S,
    file_name: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> JsonFileDataService<S> {
    pub fn new(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<StoreDocument> {
        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(RosterError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Store {} does not exist yet, starting empty", self.file_name);
                return Ok(StoreDocument::default());
            }
            Err(e) => {
                return Err(RosterError::persistence(format!(
                    "cannot read {}: {}",
                    self.file_name, e
                )))
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            RosterError::persistence(format!("store {} is corrupt: {}", self.file_name, e))
        })
    }
}

#[async_trait]
impl<S: Storage> DataService for JsonFileDataService<S> {
    async fn get_all_persons(&self) -> Result<Vec<Person>> {
        Ok(self.load().await?.persons)
    }

    async fn commit(&self, batch: &[Person]) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.load().await?;
        check_unique_ids(document.persons.iter().map(|p| &p.id), batch)?;
        document.persons.extend(batch.iter().cloned());

        let bytes = serde_json::to_vec_pretty(&document)
            .map_err(|e| RosterError::persistence(format!("cannot serialize store: {}", e)))?;

        self.storage
            .write_file(&self.file_name, &bytes)
            .await
            .map_err(|e| {
                RosterError::persistence(format!("cannot write {}: {}", self.file_name, e))
            })?;

        tracing::info!(
            "Committed {} persons to {} ({} total)",
            batch.len(),
            self.file_name,
            document.persons.len()
        );
        Ok(())
    }
}
