//! Isolated test environment with temp directory.

use super::{TangoCommand, TestNote};
use tango::domain::{NewNote, NewRecord, Note};
use tango::store::{NoteRepository, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config home.
///
/// Everything lives in a temp directory that is removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the database path used by `cmd()`.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("tango.db")
    }

    /// Returns the directory used as the config home.
    pub fn config_home(&self) -> PathBuf {
        self.root.join("config")
    }

    /// Opens the environment's database directly.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Adds a note straight through the store and returns it.
    pub fn add_note(&self, note: &TestNote) -> Note {
        self.store()
            .add_notes(vec![note.to_new_note()])
            .expect("Failed to add test note")
            .remove(0)
    }

    /// Adds a batch of notes straight through the store.
    pub fn add_notes(&self, notes: Vec<NewNote>) -> Vec<Note> {
        self.store()
            .add_notes(notes)
            .expect("Failed to add test notes")
    }

    /// Records review outcomes for a note.
    pub fn review(&self, note: &Note, outcomes: &[bool]) {
        let records = outcomes
            .iter()
            .map(|&correct| NewRecord {
                note_id: note.id().clone(),
                correct,
            })
            .collect();
        self.store()
            .add_records(records)
            .expect("Failed to add test records");
    }

    /// Creates a TangoCommand configured for this test environment.
    pub fn cmd(&self) -> TangoCommand {
        self.bare_cmd().db(&self.db_path())
    }

    /// Creates a TangoCommand with the isolated config home but no `--db`.
    pub fn bare_cmd(&self) -> TangoCommand {
        TangoCommand::new().config_home(&self.config_home())
    }

    /// Writes `tango/config.toml` under the config home.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("tango");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_persists() {
        let env = TestEnv::new();
        let note = env.add_note(&TestNote::new("cat").tag("noun"));
        let read = env.store().read_note(note.id()).unwrap();
        assert_eq!(read.english(), "cat");
        assert_eq!(read.tag_names(), vec!["noun"]);
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let args = env.cmd().get_args().to_vec();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
    }
}
