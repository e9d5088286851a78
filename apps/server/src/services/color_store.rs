// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Disk-backed tag color store using cacache.

use geosym_core::palette::decode_colors;
use geosym_core::{ColorStore, TagColor, COLOR_STORE_KEY};
use std::path::PathBuf;

use crate::error::ApiError;

/// Persistent [`ColorStore`] kept in a cacache directory.
///
/// Reads and writes are synchronous: a dataset consults the store once
/// per session and the blob is a few hundred bytes.
#[derive(Debug, Clone)]
pub struct CacheColorStore {
    cache_dir: PathBuf,
}

impl CacheColorStore {
    /// Open the store, creating its directory when missing.
    pub async fn new(cache_dir: &str) -> Self {
        let path = PathBuf::from(cache_dir);

        if let Err(e) = tokio::fs::create_dir_all(&path).await {
            tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to create color store directory"
            );
        }

        Self { cache_dir: path }
    }

    /// Every persisted tag color, in stored order.
    pub fn colors(&self) -> Result<Vec<TagColor>, ApiError> {
        match self.load(COLOR_STORE_KEY)? {
            Some(blob) => Ok(decode_colors(&blob)?),
            None => Ok(Vec::new()),
        }
    }
}

impl ColorStore for CacheColorStore {
    fn load(&self, key: &str) -> geosym_core::Result<Option<String>> {
        match cacache::read_sync(&self.cache_dir, key) {
            Ok(data) => String::from_utf8(data)
                .map(Some)
                .map_err(|e| geosym_core::Error::ColorStore(e.to_string())),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(e) => Err(geosym_core::Error::ColorStore(e.to_string())),
        }
    }

    fn save(&self, key: &str, value: &str) -> geosym_core::Result<()> {
        cacache::write_sync(&self.cache_dir, key, value.as_bytes())
            .map_err(|e| geosym_core::Error::ColorStore(e.to_string()))?;
        tracing::debug!(key = %key, size = value.len(), "Stored tag colors");
        Ok(())
    }
}
