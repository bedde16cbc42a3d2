use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Output;

use chrono::{TimeDelta, Utc};
use tempfile::TempDir;
use tokio::process::Command;
use wiremock::MockServer;

/// An isolated HOME and session file for one test.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.dir.path().join("state").join("session.json")
    }

    /// Seed a persisted session expiring `expires_in` seconds from now.
    pub fn write_session(&self, access: &str, refresh: &str, expires_in: i64) {
        let expiry = (Utc::now() + TimeDelta::seconds(expires_in)).timestamp_millis();
        let entries = BTreeMap::from([
            ("accessToken", access.to_string()),
            ("refreshToken", refresh.to_string()),
            ("tokenExpiry", expiry.to_string()),
        ]);

        let path = self.session_file();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_json::to_string_pretty(&entries).unwrap()).unwrap();
    }

    /// The persisted key-value map, or `None` if the file does not exist.
    pub fn read_session(&self) -> Option<BTreeMap<String, String>> {
        let content = std::fs::read_to_string(self.session_file()).ok()?;
        Some(serde_json::from_str(&content).unwrap())
    }

    /// Run the CLI binary against a mock API.
    pub async fn run(&self, server: &MockServer, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_folio"))
            .args(args)
            .env("HOME", self.dir.path())
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("FOLIO_API_URL", server.uri())
            .env("FOLIO_SESSION_FILE", self.session_file())
            .env_remove("RUST_LOG")
            .output()
            .await
            .expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub async fn run_success(&self, server: &MockServer, args: &[&str]) -> String {
        let output = self.run(server, args).await;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI and expect failure, returning stderr.
    pub async fn run_failure(&self, server: &MockServer, args: &[&str]) -> String {
        let output = self.run(server, args).await;
        if output.status.success() {
            panic!("CLI command should have failed: {:?}", args);
        }
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}

pub fn grant(access: &str, refresh: &str, expires_in: u64) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "refresh_token": refresh,
        "expires_in": expires_in
    })
}

pub fn book(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "author": "Italo Calvino",
        "genre": "Fiction",
        "publicationYear": 1972,
        "createdAt": "2025-06-01T12:00:00Z",
        "updatedAt": "2025-06-01T12:00:00Z"
    })
}
