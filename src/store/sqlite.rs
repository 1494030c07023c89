//! SQLite record store.
//!
//! Single `students` table with an integer primary key. Grades are passed
//! through the XOR cipher before they hit disk and again on the way out, so
//! the `grade_enc` column never holds plaintext.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use crate::cipher::XorCipher;
use crate::error::{Result, RosterError};
use crate::model::{Student, validate_grade};
use crate::store::StudentStore;

pub struct Database {
    conn: Connection,
    cipher: XorCipher,
}

impl Database {
    /// Open (creating if needed) the database at the given path.
    pub fn open(path: impl AsRef<Path>, cipher: XorCipher) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        Self::init_schema(&conn)?;

        Ok(Self { conn, cipher })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory(cipher: XorCipher) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn, cipher })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS students (
                 id        INTEGER PRIMARY KEY,
                 name      TEXT NOT NULL,
                 age       INTEGER NOT NULL,
                 grade_enc BLOB NOT NULL
             );",
        )?;
        Ok(())
    }

    /// True if the table holds no rows. Drives seed-if-empty in `init`.
    pub fn is_empty(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count == 0)
    }
}

impl StudentStore for Database {
    fn insert(&mut self, student: &Student) -> Result<()> {
        student.validate()?;
        let grade_enc = self.cipher.apply(student.grade.as_bytes());

        let result = self.conn.execute(
            "INSERT INTO students (id, name, age, grade_enc) VALUES (?1, ?2, ?3, ?4)",
            params![student.id, student.name, student.age, grade_enc],
        );

        match result {
            Ok(_) => {
                debug!(target: "store", id = student.id, "inserted row");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RosterError::DuplicateId(student.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_all(&self) -> Result<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, age, grade_enc FROM students ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?;

        let mut students = Vec::new();
        for row in rows {
            let (id, name, age, grade_enc) = row?;
            students.push(Student {
                id,
                name,
                age,
                grade: self.cipher.decode_str(&grade_enc)?,
            });
        }
        Ok(students)
    }

    fn delete_by_id(&mut self, id: i64) -> Result<u64> {
        // Primary-key semantics mean at most one row can match.
        let removed = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;
        debug!(target: "store", id, removed, "delete executed");
        Ok(removed as u64)
    }

    fn update_grade(&mut self, id: i64, new_grade: &str) -> Result<bool> {
        validate_grade(new_grade)?;
        let grade_enc = self.cipher.apply(new_grade.as_bytes());
        let changed = self.conn.execute(
            "UPDATE students SET grade_enc = ?1 WHERE id = ?2",
            params![grade_enc, id],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn db() -> Database {
        Database::open_in_memory(XorCipher::new("mySecretKey").unwrap()).unwrap()
    }

    #[test]
    fn test_insert_then_list_round_trips() {
        let mut db = db();
        let alice = Student::new(1, "Alice", 20, "A+");
        let bob = Student::new(2, "Bob", 19, "B");
        db.insert(&bob).unwrap();
        db.insert(&alice).unwrap();

        // Listing orders by id regardless of insertion order.
        assert_eq!(db.list_all().unwrap(), vec![alice, bob]);
    }

    #[test]
    fn test_grade_is_not_plaintext_at_rest() {
        let mut db = db();
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();

        let stored: Vec<u8> = db
            .conn()
            .query_row("SELECT grade_enc FROM students WHERE id = 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_ne!(stored, b"A+".to_vec());

        let cipher = XorCipher::new("mySecretKey").unwrap();
        assert_eq!(cipher.decode_str(&stored).unwrap(), "A+");
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let mut db = db();
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();
        assert!(matches!(
            db.insert(&Student::new(1, "Alias", 21, "C")),
            Err(RosterError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_delete_present_and_missing() {
        let mut db = db();
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();
        db.insert(&Student::new(2, "Bob", 19, "B")).unwrap();

        assert_eq!(db.delete_by_id(1).unwrap(), 1);
        assert_eq!(db.delete_by_id(1).unwrap(), 0);
        let listed = db.list_all().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Bob");
    }

    #[test]
    fn test_update_grade() {
        let mut db = db();
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();

        assert!(db.update_grade(1, "B-").unwrap());
        assert_eq!(db.list_all().unwrap()[0].grade, "B-");

        assert!(!db.update_grade(42, "F").unwrap());
    }

    #[test]
    fn test_update_grade_validates_length() {
        let mut db = db();
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();
        assert!(matches!(
            db.update_grade(1, "toolonggrade"),
            Err(RosterError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_is_empty() {
        let mut db = db();
        assert!(db.is_empty().unwrap());
        db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();
        assert!(!db.is_empty().unwrap());
    }

    #[test]
    fn test_on_disk_database_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.db");
        let cipher = XorCipher::new("mySecretKey").unwrap();

        {
            let mut db = Database::open(&path, cipher.clone()).unwrap();
            db.insert(&Student::new(1, "Alice", 20, "A+")).unwrap();
        }

        let db = Database::open(&path, cipher).unwrap();
        let listed = db.list_all().unwrap();
        assert_eq!(listed, vec![Student::new(1, "Alice", 20, "A+")]);
    }
}
