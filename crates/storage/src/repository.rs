use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use trivia_core::model::{Theme, ThemeId};

use crate::json::RecordError;

/// Errors surfaced by catalog adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("theme not found: {0}")]
    NotFound(ThemeId),

    #[error("duplicate theme id: {0}")]
    Conflict(ThemeId),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid theme in {}: {source}", .path.display())]
    InvalidTheme {
        path: PathBuf,
        #[source]
        source: RecordError,
    },
}

/// Display metadata of a theme, without its question pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSummary {
    pub id: ThemeId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub question_count: usize,
}

impl ThemeSummary {
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            id: theme.id().clone(),
            name: theme.name().to_owned(),
            icon: theme.icon().to_owned(),
            description: theme.description().to_owned(),
            question_count: theme.questions().len(),
        }
    }
}

/// Read-only source of themes.
#[async_trait]
pub trait ThemeCatalog: Send + Sync {
    /// List every theme, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StorageError>;

    /// Fetch a theme by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_theme(&self, id: &ThemeId) -> Result<Arc<Theme>, StorageError>;
}

/// Simple in-memory catalog for testing and for data loaded up front.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    themes: Arc<Vec<Arc<Theme>>>,
}

impl InMemoryCatalog {
    /// Build a catalog from validated themes, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if two themes share an id.
    pub fn from_themes(themes: Vec<Theme>) -> Result<Self, StorageError> {
        let mut seen = HashSet::with_capacity(themes.len());
        for theme in &themes {
            if !seen.insert(theme.id().clone()) {
                return Err(StorageError::Conflict(theme.id().clone()));
            }
        }
        Ok(Self {
            themes: Arc::new(themes.into_iter().map(Arc::new).collect()),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[async_trait]
impl ThemeCatalog for InMemoryCatalog {
    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StorageError> {
        Ok(self
            .themes
            .iter()
            .map(|theme| ThemeSummary::from_theme(theme))
            .collect())
    }

    async fn get_theme(&self, id: &ThemeId) -> Result<Arc<Theme>, StorageError> {
        self.themes
            .iter()
            .find(|theme| theme.id() == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.clone()))
    }
}
