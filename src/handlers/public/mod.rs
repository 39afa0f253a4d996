// handlers/public/mod.rs - Handlers that require no authentication

pub mod auth; // POST /signup, POST /signin
pub mod system; // GET /, GET /health
