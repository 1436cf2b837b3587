pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{FilePersonReader, InMemoryDataService, JsonFileDataService, LocalStorage};
pub use crate::app::PersonViewModel;
pub use crate::config::RosterConfig;
pub use crate::core::manager::PersonManager;
pub use crate::domain::model::{AccessLevel, Person, PersonId, Role};
pub use crate::domain::ports::{DataService, PersonReader, Storage};
pub use crate::utils::error::{RosterError, Result};
