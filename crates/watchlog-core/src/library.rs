//! The user's tracked collection.
//!
//! One ordered collection backs both the watched and the watchlist views. Every
//! stored record has exactly one of `watched` / `watchlist` set; adding to one view
//! clears the other flag, and removing from a view only touches records that are in
//! it. The whole collection is rewritten to storage after each mutation (or once at
//! the end of a [`LibraryStore::batch`]).

use crate::error::LibraryError;
use crate::storage::StorageBackend;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use watchlog_models::{Content, Rating};

pub struct LibraryStore<S: StorageBackend> {
    storage: S,
    key: String,
    items: Vec<Content>,
    batch_depth: usize,
    dirty: bool,
}

impl<S: StorageBackend> LibraryStore<S> {
    /// Load the collection from `key`. Never fails: a missing slot gives an empty
    /// library, an unreadable one is set aside and also gives an empty library.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = load_items(&storage, &key);
        Self {
            storage,
            key,
            items,
            batch_depth: 0,
            dirty: false,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Upsert `content` as watched (and off the watchlist)
    pub fn add_to_watched(&mut self, mut content: Content) -> Result<(), LibraryError> {
        content.watched = true;
        content.watchlist = false;
        self.upsert(content)
    }

    /// Upsert `content` onto the watchlist (and off the watched list)
    pub fn add_to_watchlist(&mut self, mut content: Content) -> Result<(), LibraryError> {
        content.watchlist = true;
        content.watched = false;
        self.upsert(content)
    }

    /// Remove a watched record. Returns whether anything was removed.
    pub fn remove_from_watched(&mut self, id: &str) -> bool {
        self.remove_where(id, |c| c.watched)
    }

    /// Remove a watchlist record. Returns whether anything was removed.
    pub fn remove_from_watchlist(&mut self, id: &str) -> bool {
        self.remove_where(id, |c| c.watchlist)
    }

    /// Set the rating on an existing record.
    ///
    /// Out-of-range ratings are rejected before anything changes. An unknown id
    /// is a no-op and returns `Ok(false)`.
    pub fn update_rating(&mut self, id: &str, rating: u8) -> Result<bool, LibraryError> {
        let rating = Rating::new(rating)?;
        let Some(item) = self.items.iter_mut().find(|c| c.id == id) else {
            debug!(id, "Rating update for unknown content ignored");
            return Ok(false);
        };
        item.rating = Some(rating);
        self.persist();
        Ok(true)
    }

    pub fn get_content_by_id(&self, id: &str) -> Option<&Content> {
        self.items.iter().find(|c| c.id == id)
    }

    pub fn is_in_watched(&self, id: &str) -> bool {
        self.get_content_by_id(id).is_some_and(|c| c.watched)
    }

    pub fn is_in_watchlist(&self, id: &str) -> bool {
        self.get_content_by_id(id).is_some_and(|c| c.watchlist)
    }

    pub fn contents(&self) -> &[Content] {
        &self.items
    }

    pub fn watched(&self) -> Vec<&Content> {
        self.items.iter().filter(|c| c.watched).collect()
    }

    pub fn watchlist(&self) -> Vec<&Content> {
        self.items.iter().filter(|c| c.watchlist).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every record and rewrite the slot
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Run several mutations with a single storage write at the end.
    /// The write also happens if `f` panics.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.batch_depth += 1;
        let mut guard = BatchGuard { store: self };
        f(&mut *guard.store)
    }

    fn upsert(&mut self, content: Content) -> Result<(), LibraryError> {
        validate(&content)?;

        match self.items.iter_mut().find(|c| c.id == content.id) {
            Some(existing) => {
                if existing.content_type != content.content_type {
                    return Err(LibraryError::TypeChanged {
                        id: content.id,
                        existing: existing.content_type,
                        requested: content.content_type,
                    });
                }
                debug!(id = %content.id, "Replacing existing content");
                *existing = content;
            }
            None => {
                debug!(id = %content.id, "Adding content");
                self.items.push(content);
            }
        }

        self.persist();
        Ok(())
    }

    fn remove_where(&mut self, id: &str, in_view: impl Fn(&Content) -> bool) -> bool {
        let Some(pos) = self.items.iter().position(|c| c.id == id && in_view(c)) else {
            return false;
        };
        self.items.remove(pos);
        self.persist();
        true
    }

    fn persist(&mut self) {
        if self.batch_depth > 0 {
            self.dirty = true;
            return;
        }
        self.flush();
    }

    /// Whole-collection overwrite; failures are logged, not returned
    fn flush(&mut self) {
        self.dirty = false;
        let json = match serde_json::to_string(&self.items) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize library '{}': {}", self.key, e);
                return;
            }
        };
        match self.storage.write(&self.key, &json) {
            Ok(()) => debug!("Library saved: {} ({} items)", self.key, self.items.len()),
            Err(e) => warn!("Failed to write library '{}': {}", self.key, e),
        }
    }
}

/// Closes a batch level on scope exit, unwinding included
struct BatchGuard<'a, S: StorageBackend> {
    store: &'a mut LibraryStore<S>,
}

impl<S: StorageBackend> Drop for BatchGuard<'_, S> {
    fn drop(&mut self) {
        self.store.batch_depth -= 1;
        if self.store.batch_depth == 0 && self.store.dirty {
            self.store.flush();
        }
    }
}

fn validate(content: &Content) -> Result<(), LibraryError> {
    if content.id.trim().is_empty() {
        return Err(LibraryError::MissingField("id"));
    }
    if content.title.trim().is_empty() {
        return Err(LibraryError::MissingField("title"));
    }
    Ok(())
}

fn load_items<S: StorageBackend>(storage: &S, key: &str) -> Vec<Content> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored library under '{}', starting empty", key);
            return Vec::new();
        }
        Err(e) => {
            warn!("Failed to read library '{}': {}. Starting empty.", key, e);
            return Vec::new();
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Stored library '{}' is not a JSON array ({}). Starting empty.", key, e);
            if let Err(backup_err) = storage.quarantine(key) {
                warn!("Failed to back up unreadable library '{}': {}", key, backup_err);
            }
            return Vec::new();
        }
    };

    let total = values.len();
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(total);

    for (index, value) in values.into_iter().enumerate() {
        let mut content = match serde_json::from_value::<Content>(value) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping stored record #{} in '{}': {}", index, key, e);
                continue;
            }
        };
        if let Err(e) = validate(&content) {
            warn!("Skipping stored record #{} in '{}': {}", index, key, e);
            continue;
        }
        if !seen.insert(content.id.clone()) {
            warn!("Skipping duplicate stored record '{}' in '{}'", content.id, key);
            continue;
        }
        // Records written before the watchlist existed carry neither flag
        if !content.watchlist || content.watched {
            content.watched = true;
            content.watchlist = false;
        }
        items.push(content);
    }

    if items.len() < total {
        warn!("Loaded {} of {} stored records from '{}'", items.len(), total, key);
    } else {
        info!("Loaded library '{}' ({} items)", key, items.len());
    }

    items
}
