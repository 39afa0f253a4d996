// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) -> Protected (JWT guard applied by the router)

pub mod fallback;
pub mod protected;
pub mod public;

pub use fallback::{method_not_supported, route_not_found};
