pub mod manager;

pub use crate::domain::model::{AccessLevel, Person, PersonId, Role};
pub use crate::domain::ports::{DataService, PersonReader, Storage};
pub use crate::utils::error::Result;
