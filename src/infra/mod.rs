//! Infrastructure layer - database, repositories, and file storage.

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use storage::{DiskStorage, FileStorage, StoredFile};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use storage::MockFileStorage;
