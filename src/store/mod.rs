//! Record stores
//!
//! Two backends persist `Student` records behind one trait: a flat CSV file
//! (`TextStore`) and an embedded SQLite database (`Database`).

use crate::error::Result;
use crate::model::Student;

pub mod sqlite;
pub mod text;

pub use sqlite::Database;
pub use text::TextStore;

/// Common surface of both backends.
///
/// `Send` so the concurrent read demo can move a freshly opened store into
/// a worker thread; stores are never shared between threads.
pub trait StudentStore: Send {
    /// Insert one record. Fails with `DuplicateId` if the id is taken.
    fn insert(&mut self, student: &Student) -> Result<()>;

    /// All records in storage order (insertion order for the text backend,
    /// id-ascending for SQLite).
    fn list_all(&self) -> Result<Vec<Student>>;

    /// Remove every record with the given id; returns how many were
    /// removed. A missing id is not an error, it removes zero.
    fn delete_by_id(&mut self, id: i64) -> Result<u64>;

    /// Replace the grade of the record with the given id; returns whether
    /// a record was touched. Only the SQLite backend supports this.
    fn update_grade(&mut self, id: i64, new_grade: &str) -> Result<bool>;
}
