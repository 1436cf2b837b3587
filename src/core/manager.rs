use crate::core::{DataService, Person, PersonId, PersonReader};
use crate::utils::error::{RosterError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;

/// Mediates between in-memory edits and the system of record.
///
/// Persons added or staged here stay pending until [`PersonManager::save`]
/// commits them. Dropping the manager discards anything still pending.
pub struct PersonManager<D: DataService, R: PersonReader> {
    data_service: Arc<D>,
    reader: R,
    pending: Vec<Person>,
}

impl<D: DataService, R: PersonReader> PersonManager<D, R> {
    pub fn new(data_service: Arc<D>, reader: R) -> Self {
        Self {
            data_service,
            reader,
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> &[Person] {
        &self.pending
    }

    pub fn discard_pending(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    async fn next_id(&self) -> Result<PersonId> {
        let persisted = self.data_service.get_all_persons().await?;

        let highest = persisted
            .iter()
            .chain(self.pending.iter())
            .map(|p| p.id)
            .max()
            .unwrap_or(PersonId(0));

        highest
            .next()
            .ok_or_else(|| RosterError::validation("id", "id space exhausted"))
    }

    /// Queues a placeholder person and hands back a copy of it.
    pub async fn add_new_person(&mut self) -> Result<Person> {
        let person = Person::placeholder(self.next_id().await?);
        tracing::debug!("Added pending person {}", person.id);

        self.pending.push(person.clone());
        Ok(person)
    }

    /// Queues an existing record, e.g. one returned by [`PersonManager::import`].
    pub fn stage(&mut self, person: Person) -> Result<()> {
        person.validate()?;

        if self.pending.iter().any(|p| p.id == person.id) {
            return Err(RosterError::validation(
                "id",
                format!("person {} is already pending", person.id),
            ));
        }

        self.pending.push(person);
        Ok(())
    }

    /// Replaces the pending entry that has the same id.
    pub fn update_pending(&mut self, person: Person) -> Result<()> {
        person.validate()?;

        let slot = self
            .pending
            .iter_mut()
            .find(|p| p.id == person.id)
            .ok_or_else(|| {
                RosterError::validation("id", format!("person {} is not pending", person.id))
            })?;

        *slot = person;
        Ok(())
    }

    /// Commits every pending person in one atomic call and returns how many
    /// were saved. Pending state is left untouched when anything fails.
    pub async fn save(&mut self) -> Result<usize> {
        if self.pending.is_empty() {
            tracing::debug!("Nothing pending, save skipped");
            return Ok(0);
        }

        for person in &self.pending {
            person.validate()?;
        }

        if let Err(e) = self.data_service.commit(&self.pending).await {
            tracing::warn!(
                "Save of {} pending persons rejected: {}",
                self.pending.len(),
                e
            );
            return Err(e);
        }

        let saved = self.pending.len();
        self.pending.clear();
        tracing::info!("Saved {} persons", saved);
        Ok(saved)
    }

    /// Reads persons from a file without persisting or staging them.
    pub async fn import(&self, path: &str) -> Result<Vec<Person>> {
        let persons = self.reader.read_persons(path).await?;
        tracing::info!("Imported {} persons from {}", persons.len(), path);
        Ok(persons)
    }

    /// Every persisted person, ordered by id.
    pub async fn accessible_persons(&self) -> Result<Vec<Person>> {
        let mut persons = self.data_service.get_all_persons().await?;
        persons.sort_by_key(|p| p.id);
        Ok(persons)
    }
}
