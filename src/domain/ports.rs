use crate::domain::model::Person;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// System of record for persons.
#[async_trait]
pub trait DataService: Send + Sync {
    /// All persisted persons, in no particular order.
    async fn get_all_persons(&self) -> Result<Vec<Person>>;

    /// Commits the batch atomically: either every person is stored or none is.
    async fn commit(&self, persons: &[Person]) -> Result<()>;
}

/// Parses person records out of an external file. Never touches a store.
#[async_trait]
pub trait PersonReader: Send + Sync {
    async fn read_persons(&self, path: &str) -> Result<Vec<Person>>;
}
