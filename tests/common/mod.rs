//! Common test utilities and helpers
//!
//! This module provides reusable helpers for driving the fidelius binary
//! against a scratch home directory.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

/// Test command builder for the fidelius CLI
pub struct TestCommand {
    cmd: Command,
}

impl TestCommand {
    /// Create a new test command for the fidelius binary
    pub fn new() -> Self {
        let mut cmd = Command::cargo_bin("fidelius").expect("Failed to find fidelius binary");
        cmd.env_remove("FIDELIUS_HOME").env_remove("RUST_LOG");
        Self { cmd }
    }

    /// Add arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.cmd.arg(arg.as_ref());
        }
        self
    }

    /// Add a single argument to the command
    pub fn arg<S: AsRef<str>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg.as_ref());
        self
    }

    /// Set environment variable
    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.cmd.env(key.as_ref(), val.as_ref());
        self
    }

    /// Write stdin input
    pub fn stdin<S: AsRef<str>>(mut self, input: S) -> Self {
        self.cmd.write_stdin(input.as_ref());
        self
    }

    /// Execute and expect success
    pub fn expect_success(mut self) -> TestAssertion {
        let assert = self.cmd.assert().success();
        TestAssertion { assert }
    }

    /// Execute and expect the given exit code
    pub fn expect_code(mut self, code: i32) -> TestAssertion {
        let assert = self.cmd.assert().code(code);
        TestAssertion { assert }
    }
}

impl Default for TestCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Test assertion wrapper with convenient methods
pub struct TestAssertion {
    assert: assert_cmd::assert::Assert,
}

impl TestAssertion {
    /// Assert stdout contains text
    pub fn stdout_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stdout(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert stderr contains text
    pub fn stderr_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stderr(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert stderr does not contain text
    pub fn stderr_lacks<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self
            .assert
            .stderr(predicate::str::contains(text.as_ref()).not());
        Self { assert }
    }

    /// Assert multiple stdout patterns
    pub fn stdout_contains_all<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.assert = self.assert.stdout(predicate::str::contains(pattern.as_ref()));
        }
        Self { assert: self.assert }
    }

    /// Finish the assertion
    pub fn done(self) -> assert_cmd::assert::Assert {
        self.assert
    }
}

/// A scratch fidelius home directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a command configured for this environment
    pub fn command(&self) -> TestCommand {
        TestCommand::new()
            .arg("--home")
            .arg(self.home().to_string_lossy().as_ref())
            .arg("--no-color")
    }

    /// Run a command with the given words and stdin, expecting success
    pub fn run(&self, words: &str, stdin: &str) -> TestAssertion {
        self.command()
            .args(words.split_whitespace())
            .stdin(stdin)
            .expect_success()
    }

    /// The persisted organization hierarchy
    pub fn state(&self) -> Value {
        let content = std::fs::read_to_string(self.home().join("state.json"))
            .expect("state.json should exist");
        serde_json::from_str(&content).expect("state.json should be valid JSON")
    }

    /// Keys of the users of an organization under the local strategy, in
    /// the order they are offered for selection
    pub fn user_keys(&self, org: &str) -> Vec<String> {
        let state = self.state();
        let mut keys: Vec<String> = state["local"]["orgs"][org]["users"]
            .as_object()
            .map(|users| users.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Key of the user with the given nickname
    pub fn user_key(&self, org: &str, name: &str) -> String {
        let state = self.state();
        state["local"]["orgs"][org]["users"]
            .as_object()
            .and_then(|users| {
                users
                    .iter()
                    .find(|(_, user)| user["name"] == name)
                    .map(|(key, _)| key.clone())
            })
            .unwrap_or_else(|| panic!("no user named {name}"))
    }

    /// One-based position of a user in the selection list
    pub fn user_choice(&self, org: &str, name: &str) -> usize {
        let key = self.user_key(org, name);
        self.user_keys(org)
            .iter()
            .position(|k| *k == key)
            .map(|index| index + 1)
            .unwrap_or_else(|| panic!("user {name} not listed"))
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Assertion helpers for common patterns
pub mod assertions {
    /// Assert that a path exists
    pub fn assert_path_exists<P: AsRef<std::path::Path>>(path: P) {
        assert!(
            path.as_ref().exists(),
            "Path should exist: {}",
            path.as_ref().display()
        );
    }
}
