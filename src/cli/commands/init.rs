//! roster init - create the data root and storage backend

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::cipher::XorCipher;
use crate::cli::output;
use crate::config::Backend;
use crate::error::Result;
use crate::model::Student;
use crate::store::{Database, StudentStore};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Seed an example record (id 1, Alice) if the store is empty
    #[arg(long)]
    pub seed: bool,
}

#[derive(Serialize)]
struct InitOutcome {
    root: String,
    backend: Backend,
    seeded: bool,
}

pub fn run(ctx: &AppContext, args: &InitArgs) -> Result<()> {
    std::fs::create_dir_all(&ctx.root)?;

    // Opening the backend creates the file or database on disk.
    let mut seeded = false;
    match ctx.backend {
        Backend::Text => {
            let mut store = ctx.open_store()?;
            if args.seed && store.list_all()?.is_empty() {
                store.insert(&seed_record())?;
                seeded = true;
            }
        }
        Backend::Sqlite => {
            let cipher = XorCipher::new(ctx.config.cipher.key.as_str())?;
            let mut db = Database::open(ctx.db_path(), cipher)?;
            if args.seed && db.is_empty()? {
                db.insert(&seed_record())?;
                seeded = true;
            }
        }
    }

    info!(target: "init", root = %ctx.root.display(), backend = ?ctx.backend, seeded, "initialized");

    if ctx.robot_mode {
        return output::emit_json(&output::robot_ok(InitOutcome {
            root: ctx.root.display().to_string(),
            backend: ctx.backend,
            seeded,
        }));
    }

    output::print_status(&format!(
        "Initialized roster root at {} ({:?} backend).",
        ctx.root.display(),
        ctx.backend
    ));
    if seeded {
        output::print_status("Seeded example record (1, Alice, 20, A+).");
    }
    Ok(())
}

fn seed_record() -> Student {
    Student::new(1, "Alice", 20, "A+")
}
