// Adapters layer: concrete implementations of the domain ports.

pub mod data_service;
pub mod reader;
pub mod storage;

pub use data_service::{InMemoryDataService, JsonFileDataService};
pub use reader::FilePersonReader;
pub use storage::LocalStorage;
