//! Trainer workflow - orchestration between HTTP handlers and the store

pub mod trainers;

pub use trainers::{TrainerError, TrainerService};
