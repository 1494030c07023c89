//! roster read-demo - concurrent full-table reads
//!
//! Spawns worker threads that each open their own store handle, read every
//! record, and render the table. The only shared state is the stdout print
//! lock; the stores themselves are independent and uncoordinated, which is
//! the point of the demonstration.

use std::thread;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::{Result, RosterError};

#[derive(Args, Debug)]
pub struct ReadDemoArgs {
    /// Number of concurrent readers
    #[arg(long, default_value = "2")]
    pub readers: usize,
}

pub fn run(ctx: &AppContext, args: &ReadDemoArgs) -> Result<()> {
    if args.readers == 0 {
        return Err(RosterError::InvalidRecord(
            "at least one reader is required".to_string(),
        ));
    }

    let results: Vec<Result<usize>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..args.readers)
            .map(|reader| {
                scope.spawn(move || -> Result<usize> {
                    let store = ctx.open_store()?;
                    let students = store.list_all()?;
                    debug!(target: "read_demo", reader, count = students.len(), "read complete");
                    if !ctx.robot_mode {
                        output::print_table(&students);
                    }
                    Ok(students.len())
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(_) => Err(RosterError::Io(std::io::Error::other(
                    "reader thread panicked",
                ))),
            })
            .collect()
    });

    let mut counts = Vec::with_capacity(results.len());
    for result in results {
        counts.push(result?);
    }

    if ctx.robot_mode {
        output::emit_json(&output::robot_ok(serde_json::json!({
            "readers": args.readers,
            "rows_read": counts,
        })))?;
    }
    Ok(())
}
