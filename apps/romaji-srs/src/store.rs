//! Flat-file storage: one JSON file per bucket, plus the read-only source file.

use crate::models::{Bucket, Card, Lists, WordGroup};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct ListStore {
    data_dir: PathBuf,
}

impl ListStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn list_path(&self, bucket: Bucket) -> PathBuf {
        self.data_dir.join(format!("{}.json", bucket.name()))
    }

    pub fn ensure_dir(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })
    }

    /// Load a bucket. A missing file is an empty bucket.
    pub fn load_list(&self, bucket: Bucket) -> StoreResult<Vec<Card>> {
        let path = self.list_path(bucket);
        let cards: Vec<Card> = read_json(&path)?.unwrap_or_default();
        tracing::debug!(bucket = bucket.name(), cards = cards.len(), "loaded list");
        Ok(cards)
    }

    /// Overwrite a bucket's file.
    pub fn save_list(&self, bucket: Bucket, cards: &[Card]) -> StoreResult<()> {
        self.ensure_dir()?;
        let path = self.list_path(bucket);
        write_json(&path, cards)?;
        tracing::debug!(bucket = bucket.name(), cards = cards.len(), "saved list");
        Ok(())
    }

    pub fn load_all(&self) -> StoreResult<Lists> {
        let mut lists = Lists::new();
        for bucket in Bucket::PRIORITY {
            lists[bucket] = self.load_list(bucket)?;
        }
        Ok(lists)
    }

    /// Rewrite every bucket file, touched or not.
    pub fn save_all(&self, lists: &Lists) -> StoreResult<()> {
        for bucket in Bucket::PRIORITY {
            self.save_list(bucket, &lists[bucket])?;
        }
        Ok(())
    }
}

/// Load the source word groups. A missing file is an empty dataset.
pub fn load_input_data(path: &Path) -> StoreResult<Vec<WordGroup>> {
    let groups: Option<Vec<WordGroup>> = read_json(path)?;
    if groups.is_none() {
        tracing::warn!(path = %path.display(), "source data file not found");
    }
    Ok(groups.unwrap_or_default())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, buf).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
