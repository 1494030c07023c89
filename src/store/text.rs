//! Flat-file record store.
//!
//! One record per line, `id,name,age,grade`, UTF-8, no header, no escaping.
//! A comma inside a name or grade corrupts that line; the scan side
//! compensates by silently dropping anything that does not parse into
//! exactly four fields. Inserts append a single line per call. Deletes
//! rewrite the whole file through a temp file and a single atomic rename,
//! so readers never observe a missing or half-written store.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::StudentStore;

pub struct TextStore {
    path: PathBuf,
}

impl TextStore {
    /// Open a store at the given path. The file itself is created lazily on
    /// first insert; a missing file reads as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn encode_line(student: &Student) -> String {
        format!(
            "{},{},{},{}",
            student.id, student.name, student.age, student.grade
        )
    }

    /// Parse one line into a record. Exactly four comma-separated fields,
    /// with id and age numeric; anything else is None.
    fn parse_line(line: &str) -> Option<Student> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return None;
        }
        let id: i64 = fields[0].trim().parse().ok()?;
        let age: i64 = fields[2].trim().parse().ok()?;
        Some(Student {
            id,
            name: fields[1].trim().to_string(),
            age,
            grade: fields[3].trim().to_string(),
        })
    }

    /// Leading id of a line, if it has one. Used by delete, which matches
    /// on id alone so it also sweeps out lines that are otherwise damaged.
    fn line_id(line: &str) -> Option<i64> {
        line.split(',').next()?.trim().parse().ok()
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(raw.lines().map(str::to_string).collect())
    }
}

impl StudentStore for TextStore {
    fn insert(&mut self, student: &Student) -> Result<()> {
        student.validate()?;

        // Uniqueness is enforced here, matching the SQLite backend's
        // primary-key semantics. Malformed lines cannot claim an id, so
        // only well-formed records count.
        for line in self.read_lines()? {
            if let Some(existing) = Self::parse_line(&line) {
                if existing.id == student.id {
                    return Err(RosterError::DuplicateId(student.id));
                }
            }
        }

        // One record per call: open in append mode, write the line, close.
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{}", Self::encode_line(student))?;

        debug!(target: "store", id = student.id, path = %self.path.display(), "appended record");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Student>> {
        let lines = self.read_lines()?;
        let students: Vec<Student> = lines
            .iter()
            .filter_map(|line| Self::parse_line(line))
            .collect();
        if students.len() < lines.len() {
            debug!(
                target: "store",
                skipped = lines.len() - students.len(),
                "dropped malformed lines during scan"
            );
        }
        Ok(students)
    }

    fn delete_by_id(&mut self, id: i64) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }

        let lines = self.read_lines()?;
        let mut removed: u64 = 0;

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut tmp = NamedTempFile::new_in(&parent)?;

        for line in &lines {
            if Self::line_id(line) == Some(id) {
                removed += 1;
                continue;
            }
            writeln!(tmp, "{line}")?;
        }

        tmp.as_file().sync_all()?;
        // Single rename over the original; there is no window where the
        // store is absent.
        tmp.persist(&self.path)
            .map_err(|err| RosterError::Io(err.error))?;

        debug!(target: "store", id, removed, "rewrote store");
        Ok(removed)
    }

    fn update_grade(&mut self, _id: i64, _new_grade: &str) -> Result<bool> {
        Err(RosterError::Unsupported(
            "update-grade requires the sqlite backend".to_string(),
        ))
    }
}
