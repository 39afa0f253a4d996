// handlers/protected/mod.rs - Handlers behind the JWT guard

pub mod resource; // Generic CRUD over Movie and Review collections
