use std::{io::ErrorKind, path::PathBuf};

use crate::{config, error::Result};

/// Keeps the PKCE code verifier on disk between the authorization redirect
/// and the callback.
#[derive(Debug, Clone)]
pub struct VerifierStore {
    path: PathBuf,
}

impl VerifierStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub async fn save(&self, verifier: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        async_fs::write(&self.path, verifier).await?;
        Ok(())
    }

    /// Returns `None` when no verifier was stored.
    pub async fn load(&self) -> Result<Option<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => {
                let verifier = content.trim();
                Ok((!verifier.is_empty()).then(|| verifier.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for VerifierStore {
    fn default() -> Self {
        let mut path = config::data_dir();
        path.push("state/code_verifier");
        Self { path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = VerifierStore::new(dir.path().join("nested/code_verifier"));

        assert_eq!(store.load().await.unwrap(), None);

        store.save("abc123").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("abc123".to_string()));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        store.clear().await.unwrap();
    }
}
