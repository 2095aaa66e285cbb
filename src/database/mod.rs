pub mod manager;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod repository;
pub mod storage;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStorage;
pub use postgres::PgStorage;
pub use repository::{Entity, PropertyFilter, Repository};
pub use storage::{Storage, StorageError};
