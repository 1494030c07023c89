//! roster add - insert one student record

use clap::Args;
use tracing::info;

use crate::app::AppContext;
use crate::cli::output;
use crate::error::Result;
use crate::model::Student;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student id (unique)
    pub id: i64,

    /// Student name (up to 63 characters)
    pub name: String,

    /// Student age
    pub age: i64,

    /// Grade (up to 7 characters, e.g. "A+")
    pub grade: String,
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let student = Student::new(args.id, args.name.clone(), args.age, args.grade.clone());
    let mut store = ctx.open_store()?;
    store.insert(&student)?;
    info!(target: "add", id = student.id, "student added");

    if ctx.robot_mode {
        output::emit_json(&output::robot_ok(&student))
    } else {
        output::print_status(&format!("Added student {} ({}).", student.id, student.name));
        Ok(())
    }
}
