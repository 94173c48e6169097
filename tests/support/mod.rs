#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use awscred::check::{CheckError, ValidityChecker};
use awscred::storage::StorePaths;
use tempfile::TempDir;

/// Answers checks from a fixed table; unknown profiles are valid.
#[derive(Default)]
pub struct ScriptedChecker {
    answers: HashMap<String, CheckError>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalid(mut self, profile: &str) -> Self {
        self.answers
            .insert(profile.to_string(), CheckError::InvalidCredentials);
        self
    }

    pub fn unexpected(mut self, profile: &str, message: &str) -> Self {
        self.answers.insert(
            profile.to_string(),
            CheckError::Unexpected(message.to_string()),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ValidityChecker for ScriptedChecker {
    async fn check(&self, profile_name: &str) -> Result<(), CheckError> {
        self.calls.lock().unwrap().push(profile_name.to_string());
        match self.answers.get(profile_name) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn credentials_block(name: &str, key: &str, secret: &str) -> String {
    format!("[{name}]\naws_access_key_id = {key}\naws_secret_access_key = {secret}\n")
}

/// Write a credentials and config file into `dir`.
pub fn write_store(dir: &TempDir, credentials: &str, config: &str) -> Result<StorePaths> {
    let store = StorePaths::new(dir.path().join("credentials"), dir.path().join("config"));
    std::fs::write(&store.credentials_file, credentials)?;
    std::fs::write(&store.config_file, config)?;
    Ok(store)
}

pub fn read(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}
