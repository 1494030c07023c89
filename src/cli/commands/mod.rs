//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod menu;
pub mod read_demo;
pub mod update_grade;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run(ctx, args),
        Commands::Add(args) => add::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::UpdateGrade(args) => update_grade::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::ReadDemo(args) => read_demo::run(ctx, args),
        Commands::Menu(args) => menu::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the data root and storage backend
    Init(init::InitArgs),

    /// Add a student record
    Add(add::AddArgs),

    /// List all student records
    List(list::ListArgs),

    /// Replace a student's grade (sqlite backend only)
    UpdateGrade(update_grade::UpdateGradeArgs),

    /// Delete student records by id
    Delete(delete::DeleteArgs),

    /// Read the whole store from two threads concurrently
    ReadDemo(read_demo::ReadDemoArgs),

    /// Interactive numbered menu
    Menu(menu::MenuArgs),
}
