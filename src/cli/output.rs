//! Output rendering: human tables and robot-mode JSON envelopes.
//!
//! The only process-wide lock in the program lives here. It serializes
//! rendering to stdout so the concurrent read demo cannot interleave
//! table rows; it never guards a store.

use chrono::{DateTime, Utc};
use console::style;
use parking_lot::Mutex;
use serde::Serialize;

use crate::error::{Result, RosterError};
use crate::model::Student;

static PRINT_LOCK: Mutex<()> = Mutex::new(());

/// Render a student table to stdout, whole table under the print lock.
pub fn print_table(students: &[Student]) {
    let _guard = PRINT_LOCK.lock();
    println!();
    println!(
        "{}",
        style(format!(
            "{:<6} | {:<20} | {:<4} | {:<7}",
            "ID", "Name", "Age", "Grade"
        ))
        .bold()
    );
    println!("{}", "-".repeat(46));
    for s in students {
        println!("{:<6} | {:<20} | {:<4} | {:<7}", s.id, s.name, s.age, s.grade);
    }
    if students.is_empty() {
        println!("(no records)");
    }
}

/// Print a one-line status message under the print lock.
pub fn print_status(message: &str) {
    let _guard = PRINT_LOCK.lock();
    println!("{message}");
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error { code: String, message: String },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| RosterError::Config(format!("serialize output: {err}")))?;
    let _guard = PRINT_LOCK.lock();
    println!("{payload}");
    Ok(())
}
