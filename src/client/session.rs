//! Session Store
//!
//! Holds the bearer token for the current user. A [`Session`] is a cheap,
//! cloneable handle: every component that needs authentication receives one
//! explicitly instead of looking the token up globally.
//!
//! Durable sessions write through to [`SessionDb`] and keep an in-process copy
//! so reads never touch the disk.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::config::Config;
use crate::client::session_db::SessionDb;
use crate::shared::error::Result;

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

struct SessionInner {
    token: RwLock<Option<String>>,
    db: Option<SessionDb>,
}

/// Shared handle to the session token
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(None),
                db: None,
            }),
        }
    }

    /// Durable session backed by the database at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        let db = SessionDb::open(path).await?;
        let token = db.get(TOKEN_KEY).await?;
        tracing::debug!(restored = token.is_some(), "Session opened");
        Ok(Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                db: Some(db),
            }),
        })
    }

    /// Durable session at the configured location
    pub async fn open_default(config: &Config) -> Result<Self> {
        Self::open(&config.session_db_path()).await
    }

    /// Store `token`, replacing any previous one
    pub async fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        let mut guard = self.inner.token.write().await;
        if let Some(db) = &self.inner.db {
            db.set(TOKEN_KEY, &token).await?;
        }
        *guard = Some(token);
        tracing::info!("Session token stored");
        Ok(())
    }

    /// Current token, if any
    pub async fn get_token(&self) -> Option<String> {
        self.inner.token.read().await.clone()
    }

    /// Forget the token
    pub async fn clear_token(&self) -> Result<()> {
        let mut guard = self.inner.token.write().await;
        if let Some(db) = &self.inner.db {
            db.remove(TOKEN_KEY).await?;
        }
        *guard = None;
        tracing::info!("Session token cleared");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    pub fn is_durable(&self) -> bool {
        self.inner.db.is_some()
    }

    /// Close the backing database, if any
    ///
    /// Call once at shutdown; later writes through any clone fail with
    /// [`ClientError::Storage`](crate::shared::ClientError::Storage).
    pub async fn close(&self) {
        if let Some(db) = &self.inner.db {
            db.close().await;
            tracing::debug!("Session database closed");
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("durable", &self.is_durable())
            .finish_non_exhaustive()
    }
}
