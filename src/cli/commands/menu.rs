//! roster menu - interactive numbered menu
//!
//! Thin loop over the same store operations the subcommands use. Input
//! errors and store errors are printed and the loop continues; only EOF or
//! the exit choice ends it.

use std::io::{BufRead, Write};

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::read_demo::{self, ReadDemoArgs};
use crate::cli::output;
use crate::error::{Result, RosterError};
use crate::model::Student;

#[derive(Args, Debug)]
pub struct MenuArgs {}

pub fn run(ctx: &AppContext, _args: &MenuArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    menu_loop(ctx, &mut input)
}

fn menu_loop(ctx: &AppContext, input: &mut impl BufRead) -> Result<()> {
    loop {
        print!(
            "\nStudent DB ({:?} backend)\n\
             1. Add Student\n\
             2. List Students\n\
             3. Update Grade\n\
             4. Delete Student\n\
             5. Concurrent Read Demo\n\
             6. Exit\n\
             Choose: ",
            ctx.backend
        );
        std::io::stdout().flush()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };

        let outcome = match choice.trim() {
            "1" => add(ctx, input),
            "2" => list(ctx),
            "3" => update_grade(ctx, input),
            "4" => delete(ctx, input),
            "5" => read_demo::run(ctx, &ReadDemoArgs { readers: 2 }),
            "6" => return Ok(()),
            "" => continue,
            _ => {
                output::print_status("Invalid choice.");
                continue;
            }
        };

        // Keep the loop alive on operation failures, mirroring a terminal
        // session where one bad input should not end the program.
        if let Err(err) = outcome {
            output::print_status(&format!("Error: {err}"));
        }
    }
}

fn add(ctx: &AppContext, input: &mut impl BufRead) -> Result<()> {
    let id = prompt_i64(input, "ID: ")?;
    let name = prompt(input, "Name: ")?;
    let age = prompt_i64(input, "Age: ")?;
    let grade = prompt(input, "Grade: ")?;

    let mut store = ctx.open_store()?;
    store.insert(&Student::new(id, name, age, grade))?;
    output::print_status("Added.");
    Ok(())
}

fn list(ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    output::print_table(&store.list_all()?);
    Ok(())
}

fn update_grade(ctx: &AppContext, input: &mut impl BufRead) -> Result<()> {
    let id = prompt_i64(input, "ID: ")?;
    let grade = prompt(input, "New Grade: ")?;

    let mut store = ctx.open_store()?;
    if store.update_grade(id, &grade)? {
        output::print_status("Updated.");
    } else {
        output::print_status(&format!("No student with id {id} found."));
    }
    Ok(())
}

fn delete(ctx: &AppContext, input: &mut impl BufRead) -> Result<()> {
    let id = prompt_i64(input, "ID to delete: ")?;

    let mut store = ctx.open_store()?;
    if store.delete_by_id(id)? > 0 {
        output::print_status(&format!("Student with id {id} removed."));
    } else {
        output::print_status(&format!("No student with id {id} found."));
    }
    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    match read_line(input)? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(RosterError::InvalidRecord("unexpected end of input".to_string())),
    }
}

fn prompt_i64(input: &mut impl BufRead, label: &str) -> Result<i64> {
    let raw = prompt(input, label)?;
    raw.parse()
        .map_err(|_| RosterError::InvalidRecord(format!("expected a number, got {raw:?}")))
}

/// One line of input, None on EOF.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
