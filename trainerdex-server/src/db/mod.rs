//! Database layer - connection pool, schema, repositories
//!
//! # Design Principles
//!
//! - Connection pool with a small cap - no Arc<Mutex<Connection>>
//! - Parameterized queries only
//! - UNIQUE constraints on the table are the real uniqueness enforcement;
//!   the count queries are a pre-check so callers get a friendly rejection

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, DEFAULT_MAX_CONNECTIONS};
pub use repos::{DbError, Trainer, TrainerRepo, TrainerStore};
