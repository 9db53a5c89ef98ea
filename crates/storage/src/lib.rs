#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonCatalog, RecordError};
pub use repository::{InMemoryCatalog, StorageError, ThemeCatalog, ThemeSummary};
