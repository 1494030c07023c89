//! roster delete - remove student records by id
//!
//! Deleting an id that is not present is not an error; the command reports
//! that nothing was removed and exits successfully.

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the student to remove
    pub id: i64,
}

#[derive(Serialize)]
struct DeleteOutcome {
    id: i64,
    removed: u64,
}

pub fn run(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    let mut store = ctx.open_store()?;
    let removed = store.delete_by_id(args.id)?;
    info!(target: "delete", id = args.id, removed, "delete finished");

    if ctx.robot_mode {
        return output::emit_json(&output::robot_ok(DeleteOutcome {
            id: args.id,
            removed,
        }));
    }

    if removed > 0 {
        output::print_status(&format!("Student with id {} removed.", args.id));
    } else {
        output::print_status(&format!("No student with id {} found.", args.id));
    }
    Ok(())
}
