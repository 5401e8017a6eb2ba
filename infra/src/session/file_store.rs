//! File-backed session store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use tk_core::errors::ClientError;
use tk_core::services::session::{SessionStore, StoredSession};

/// Stores the session as a small JSON document `{token, user}`
///
/// Saves write a sibling temporary file and rename it over the target, so a
/// reader never sees a half-written session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "session".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn store_error(action: &str, path: &Path, err: impl std::fmt::Display) -> ClientError {
    ClientError::Store(format!("Failed to {} {}: {}", action, path.display(), err))
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, ClientError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error("read", &self.path, e)),
        };

        let session =
            serde_json::from_slice(&bytes).map_err(|e| store_error("parse", &self.path, e))?;
        Ok(Some(session))
    }

    async fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| store_error("create", parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| store_error("serialize session for", &self.path, e))?;

        let temp = self.temp_path();
        fs::write(&temp, &bytes)
            .await
            .map_err(|e| store_error("write", &temp, e))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| store_error("replace", &self.path, e))?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error("remove", &self.path, e)),
        }
    }
}
