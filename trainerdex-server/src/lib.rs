//! trainerdex-server: HTTP CRUD service for trainer records
//!
//! A thin pass-through from HTTP verbs to parameterized SQL over a single
//! `trainers` table. The one piece of logic in between is the validated
//! write: required fields are checked first, then name/email uniqueness
//! (excluding the record's own values on update), then the write happens.

pub mod db;
pub mod http;
pub mod models;
pub mod service;

pub use http::server::{run_server, ServerConfig};
pub use service::{TrainerError, TrainerService};
