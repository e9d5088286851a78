// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag colors
//!
//! Every tag gets a color derived from a hash of its name, so re-importing the
//! same schema reproduces the same colors. Users may override colors; the
//! overrides live in an injected [`ColorStore`] as one JSON blob keyed by tag
//! name and win over the hash when a tag with the same name is loaded again.

use std::sync::{Arc, OnceLock, RwLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Store key under which the tag color blob is persisted
pub const COLOR_STORE_KEY: &str = "tagColors";

/// Color used when a row's tag has no table entry
pub const FALLBACK_COLOR: &str = "#000000";

/// Color assigned to one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagColor {
    pub tag: String,
    /// `#rrggbb`
    pub color: String,
}

impl TagColor {
    pub fn new(tag: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            color: color.into(),
        }
    }
}

/// Derive a `#rrggbb` color from a tag name
///
/// 32-bit wrapping string hash over UTF-16 code units; the low three bytes
/// become the red, green and blue channels.
pub fn hash_color(tag: &str) -> String {
    let mut hash: i32 = 0;
    for unit in tag.encode_utf16() {
        hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
    }
    let mut color = String::with_capacity(7);
    color.push('#');
    for i in 0..3 {
        let channel = (hash >> (i * 8)) & 0xff;
        color.push_str(&format!("{:02x}", channel));
    }
    color
}

/// Check that a color is a `#rrggbb` string
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Key-value persistence for user color preferences
pub trait ColorStore: Send + Sync {
    /// Read the value stored under `key`
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory [`ColorStore`], used by tests and stateless callers
#[derive(Debug, Default)]
pub struct MemoryColorStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryColorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColorStore for MemoryColorStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::ColorStore("memory store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::ColorStore("memory store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Decode a persisted color blob
pub fn decode_colors(blob: &str) -> Result<Vec<TagColor>> {
    Ok(serde_json::from_str(blob)?)
}

/// Encode colors into the persisted blob format
pub fn encode_colors(colors: &[TagColor]) -> Result<String> {
    Ok(serde_json::to_string(colors)?)
}

/// Session view of the color store
///
/// The store is read at most once, on the first lookup, and the result is
/// kept as an immutable snapshot for the lifetime of the palette.
pub struct TagPalette {
    store: Option<Arc<dyn ColorStore>>,
    snapshot: OnceLock<FxHashMap<String, String>>,
}

impl std::fmt::Debug for TagPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagPalette")
            .field("has_store", &self.store.is_some())
            .field("loaded", &self.snapshot.get().is_some())
            .finish()
    }
}

impl Default for TagPalette {
    fn default() -> Self {
        Self::detached()
    }
}

impl TagPalette {
    /// Palette backed by a persistent store
    pub fn new(store: Arc<dyn ColorStore>) -> Self {
        Self {
            store: Some(store),
            snapshot: OnceLock::new(),
        }
    }

    /// Palette without persistence; every color is hash-derived
    pub fn detached() -> Self {
        Self {
            store: None,
            snapshot: OnceLock::new(),
        }
    }

    fn overrides(&self) -> &FxHashMap<String, String> {
        self.snapshot.get_or_init(|| {
            let Some(store) = &self.store else {
                return FxHashMap::default();
            };
            let blob = match store.load(COLOR_STORE_KEY) {
                Ok(Some(blob)) => blob,
                Ok(None) => return FxHashMap::default(),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read tag color store");
                    return FxHashMap::default();
                }
            };
            match decode_colors(&blob) {
                Ok(colors) => colors.into_iter().map(|c| (c.tag, c.color)).collect(),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable tag color blob");
                    FxHashMap::default()
                }
            }
        })
    }

    /// Persisted override for a tag, if any
    pub fn stored_color(&self, tag: &str) -> Option<&str> {
        self.overrides().get(tag).map(String::as_str)
    }

    /// Color for a tag: persisted override first, hash otherwise
    pub fn color_for(&self, tag: &str) -> String {
        self.stored_color(tag)
            .map(str::to_string)
            .unwrap_or_else(|| hash_color(tag))
    }

    /// Merge `colors` into the stored overrides by tag name and write them back
    ///
    /// The merge starts from the session snapshot; the snapshot itself is not
    /// refreshed. Without a store this is a no-op.
    pub fn persist(&self, colors: &[TagColor]) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let mut merged: Vec<TagColor> = self
            .overrides()
            .iter()
            .filter(|(tag, _)| !colors.iter().any(|c| &c.tag == *tag))
            .map(|(tag, color)| TagColor::new(tag.clone(), color.clone()))
            .collect();
        merged.sort_by(|a, b| a.tag.cmp(&b.tag));
        merged.extend(colors.iter().cloned());

        store.save(COLOR_STORE_KEY, &encode_colors(&merged)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_color_is_deterministic() {
        let a = hash_color("Granite");
        assert_eq!(a, hash_color("Granite"));
        assert!(is_hex_color(&a));
        assert_ne!(a, hash_color("Schist"));
    }

    #[test]
    fn test_hash_color_known_values() {
        // Empty name hashes to zero
        assert_eq!(hash_color(""), "#000000");
        // 'A' = 65 = 0x41
        assert_eq!(hash_color("A"), "#410000");
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("a1b2c3"));
        assert!(!is_hex_color("#a1b2c"));
        assert!(!is_hex_color("#a1b2cg"));
    }

    #[test]
    fn test_detached_palette_uses_hash() {
        let palette = TagPalette::detached();
        assert_eq!(palette.color_for("Granite"), hash_color("Granite"));
        assert!(palette.persist(&[TagColor::new("Granite", "#ffffff")]).is_ok());
    }

    #[test]
    fn test_persist_and_reload() {
        let store: Arc<dyn ColorStore> = Arc::new(MemoryColorStore::new());

        let first = TagPalette::new(store.clone());
        first
            .persist(&[TagColor::new("Granite", "#123456")])
            .unwrap();

        let second = TagPalette::new(store.clone());
        assert_eq!(second.color_for("Granite"), "#123456");
        assert_eq!(second.color_for("Schist"), hash_color("Schist"));
    }

    #[test]
    fn test_snapshot_is_not_refreshed() {
        let store: Arc<dyn ColorStore> = Arc::new(MemoryColorStore::new());
        let palette = TagPalette::new(store.clone());
        assert_eq!(palette.color_for("Granite"), hash_color("Granite"));

        store
            .save(
                COLOR_STORE_KEY,
                &encode_colors(&[TagColor::new("Granite", "#abcdef")]).unwrap(),
            )
            .unwrap();
        assert_eq!(palette.color_for("Granite"), hash_color("Granite"));
    }

    #[test]
    fn test_persist_merges_by_name() {
        let store: Arc<dyn ColorStore> = Arc::new(MemoryColorStore::new());
        store
            .save(
                COLOR_STORE_KEY,
                &encode_colors(&[
                    TagColor::new("Granite", "#111111"),
                    TagColor::new("Basalt", "#222222"),
                ])
                .unwrap(),
            )
            .unwrap();

        let palette = TagPalette::new(store.clone());
        palette
            .persist(&[TagColor::new("Granite", "#333333")])
            .unwrap();

        let blob = store.load(COLOR_STORE_KEY).unwrap().unwrap();
        let colors = decode_colors(&blob).unwrap();
        assert_eq!(colors.len(), 2);
        assert!(colors.contains(&TagColor::new("Granite", "#333333")));
        assert!(colors.contains(&TagColor::new("Basalt", "#222222")));
    }

    #[test]
    fn test_corrupt_blob_is_ignored() {
        let store: Arc<dyn ColorStore> = Arc::new(MemoryColorStore::new());
        store.save(COLOR_STORE_KEY, "not json").unwrap();
        let palette = TagPalette::new(store);
        assert_eq!(palette.color_for("Granite"), hash_color("Granite"));
    }
}
