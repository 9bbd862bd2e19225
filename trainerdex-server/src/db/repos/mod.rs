//! Repository implementations for database access

pub mod trainers;

pub use trainers::{DbError, Trainer, TrainerRepo, TrainerStore};
