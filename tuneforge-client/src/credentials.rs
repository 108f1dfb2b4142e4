use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tokens {
    pub access_token:  String,
    pub refresh_token: String,
}

// In-memory token state, shared between the session actor (the only writer
// besides the forced sign-out path) and the http client (reader).
#[derive(Clone, Default)]
pub struct TokenCell {
    inner: Arc<RwLock<Option<Tokens>>>,
}

impl TokenCell {
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|tokens| tokens.as_ref().map(|tokens| tokens.access_token.clone()))
    }

    pub fn set(&self, tokens: Tokens) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(tokens);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().map(|tokens| tokens.is_none()).unwrap_or(true)
    }
}

// Tokens survive restarts in a small JSON file next to the user's config
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> anyhow::Result<Option<Tokens>> {
        if !self.path.exists() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(fs::read(&self.path)?.as_slice())?))
    }

    pub fn save(&self, tokens: &Tokens) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, serde_json::to_vec_pretty(tokens)?)?;

        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }

        Ok(())
    }
}
