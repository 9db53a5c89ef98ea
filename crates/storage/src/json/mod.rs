use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use trivia_core::model::{Theme, ThemeId};

use crate::repository::{InMemoryCatalog, StorageError, ThemeCatalog, ThemeSummary};

mod mapping;

pub use mapping::RecordError;
use mapping::ThemeFile;

/// Theme catalog backed by JSON files.
///
/// Everything is read and validated up front; lookups are served from memory.
#[derive(Clone)]
pub struct JsonCatalog {
    root: PathBuf,
    inner: InMemoryCatalog,
}

impl JsonCatalog {
    /// Load themes from a single JSON file or from every `*.json` file in a
    /// directory (in file-name order).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the path cannot be read, `StorageError::Parse`
    /// for malformed JSON and `StorageError::InvalidTheme` for schema violations.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&root).await.map_err(|source| StorageError::Io {
            path: root.clone(),
            source,
        })?;

        let files = if metadata.is_dir() {
            theme_files(&root).await?
        } else {
            vec![root.clone()]
        };

        let mut themes = Vec::new();
        for file in &files {
            let contents =
                tokio::fs::read_to_string(file)
                    .await
                    .map_err(|source| StorageError::Io {
                        path: file.clone(),
                        source,
                    })?;
            let parsed = parse_themes(&contents, file)?;
            debug!("parsed {} theme(s) from {}", parsed.len(), file.display());
            themes.extend(parsed);
        }

        let inner = InMemoryCatalog::from_themes(themes)?;
        info!("loaded {} theme(s) from {}", inner.len(), root.display());
        Ok(Self { root, inner })
    }

    /// Path the catalog was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl ThemeCatalog for JsonCatalog {
    async fn list_themes(&self) -> Result<Vec<ThemeSummary>, StorageError> {
        self.inner.list_themes().await
    }

    async fn get_theme(&self, id: &ThemeId) -> Result<Arc<Theme>, StorageError> {
        self.inner.get_theme(id).await
    }
}

/// Parse and validate the contents of one theme file.
///
/// # Errors
///
/// Returns `StorageError::Parse` or `StorageError::InvalidTheme`, tagged with `path`.
pub fn parse_themes(contents: &str, path: &Path) -> Result<Vec<Theme>, StorageError> {
    let file: ThemeFile = serde_json::from_str(contents).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    file.into_records()
        .into_iter()
        .map(|record| {
            record
                .into_theme()
                .map_err(|source| StorageError::InvalidTheme {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .collect()
}

async fn theme_files(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let io_err = |source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
