// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints that do not require authentication.

pub mod signin; // POST /signin - verify credentials and get a token
pub mod signup; // POST /signup - create new account

pub use signin::signin;
pub use signup::signup;
