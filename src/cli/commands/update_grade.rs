//! roster update-grade - replace a student's grade (sqlite backend only)

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;
use crate::model::validate_grade;

#[derive(Args, Debug)]
pub struct UpdateGradeArgs {
    /// Id of the student to update
    pub id: i64,

    /// New grade (up to 7 characters)
    pub grade: String,
}

#[derive(Serialize)]
struct UpdateOutcome {
    id: i64,
    updated: bool,
}

pub fn run(ctx: &AppContext, args: &UpdateGradeArgs) -> Result<()> {
    validate_grade(&args.grade)?;
    let mut store = ctx.open_store()?;
    let updated = store.update_grade(args.id, &args.grade)?;
    info!(target: "update_grade", id = args.id, updated, "update finished");

    if ctx.robot_mode {
        return output::emit_json(&output::robot_ok(UpdateOutcome {
            id: args.id,
            updated,
        }));
    }

    if updated {
        output::print_status(&format!("Grade updated for student {}.", args.id));
    } else {
        output::print_status(&format!("No student with id {} found.", args.id));
    }
    Ok(())
}
