pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryDocumentStore, MemoryUserStore};
pub use postgres::{PgDocumentStore, PgUserStore};
pub use store::{DocumentStore, StoreError, UserStore};
