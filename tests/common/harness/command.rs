//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `tango` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
/// The ambient `TANGO_DB` is always cleared so tests never touch a real
/// database.
pub struct TangoCommand {
    args: Vec<String>,
    config_home: Option<PathBuf>,
    db_env: Option<PathBuf>,
    stdin: Option<String>,
}

impl TangoCommand {
    /// Creates a new command for the `tango` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config_home: None,
            db_env: None,
            stdin: None,
        }
    }

    /// Sets the `--db` option to specify the database file.
    pub fn db(mut self, path: &Path) -> Self {
        self.args.push("--db".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points the config lookup at `dir` instead of the user's home.
    pub fn config_home(mut self, dir: &Path) -> Self {
        self.config_home = Some(dir.to_path_buf());
        self
    }

    /// Passes the database through `TANGO_DB` instead of `--db`.
    pub fn db_env(mut self, path: &Path) -> Self {
        self.db_env = Some(path.to_path_buf());
        self
    }

    /// Feeds `input` to the command's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("tango").expect("Failed to find tango binary");
        cmd.env_remove("TANGO_DB").env_remove("RUST_LOG");
        if let Some(dir) = &self.config_home {
            cmd.env("XDG_CONFIG_HOME", dir)
                .env("XDG_DATA_HOME", dir)
                .env("HOME", dir);
        }
        if let Some(path) = &self.db_env {
            cmd.env("TANGO_DB", path);
        }
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `add` command with the two required fields.
    pub fn add(self, english: &str, japanese: &str) -> Self {
        self.args(["add", "--english", english, "--japanese", japanese])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `show` command with an ID.
    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    /// Configures for the `update` command with an ID.
    pub fn update(self, id: &str) -> Self {
        self.args(["update", id])
    }

    /// Configures for the `review` command with an ID.
    pub fn review(self, id: &str) -> Self {
        self.args(["review", id])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Adds a `--tag` option.
    pub fn tag(self, tag: &str) -> Self {
        self.args(["--tag", tag])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for TangoCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        TangoCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_db() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("tango.db");
        let cmd = TangoCommand::new().db(&db);
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], db.to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = TangoCommand::new().ls().tag("noun").format_json();
        assert_eq!(cmd.get_args(), ["ls", "--tag", "noun", "--format", "json"]);
    }
}
