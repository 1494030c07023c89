//! roster - student record manager
//!
//! Library surface for the `roster` binary. Two interchangeable storage
//! backends persist student records: a flat CSV file and an embedded SQLite
//! database whose grade column is obfuscated with a keyed byte cipher.

pub mod app;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use error::{Result, RosterError};
