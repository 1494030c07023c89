//! roster list - list all student records

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {}

pub fn run(ctx: &AppContext, _args: &ListArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let students = store.list_all()?;
    debug!(target: "list", count = students.len(), backend = ?ctx.backend, "listing records");

    if ctx.robot_mode {
        output::emit_json(&output::robot_ok(&students))
    } else {
        output::print_table(&students);
        Ok(())
    }
}
