#![doc = "The `taskgate` library crate."]
#![doc = ""]
#![doc = "Stateless bearer-token authentication for the task management API: credential"]
#![doc = "registration and login, token issuance, and the gate that admits or rejects"]
#![doc = "requests to protected routes. The binary (`main.rs`) wires it into an HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
