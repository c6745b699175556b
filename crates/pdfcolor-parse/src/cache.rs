//! Filters keyed by the indirect object they were parsed from.
//!
//! Without a cache every reference to the same color-space object is parsed
//! again, producing a fresh filter (and a fresh copy of any lookup table).
//! A [`FilterCache`] passed to [`FilterFactory::with_cache`] hands back the
//! filter built the first time instead.
//!
//! Object ids are only unique within one document, so a cache is bound to
//! the [`Document`] it was created for and refuses factories over any other.
//!
//! [`FilterFactory::with_cache`]: crate::FilterFactory::with_cache

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lopdf::{Document, ObjectId};
use pdfcolor_core::Result;
use tracing::debug;

use crate::filter::ColorSpaceFilterPtr;

type Entries = HashMap<ObjectId, Option<ColorSpaceFilterPtr>>;

/// Parse outcomes of one document keyed by object id. Soft failures are
/// cached as `None`.
#[derive(Debug)]
pub struct FilterCache<'d> {
    doc: &'d Document,
    entries: Mutex<Entries>,
}

impl<'d> FilterCache<'d> {
    /// Create an empty cache for objects of `doc`.
    pub fn new(doc: &'d Document) -> Self {
        Self {
            doc,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The document whose objects this cache holds.
    pub fn document(&self) -> &'d Document {
        self.doc
    }

    /// Whether `doc` is the document this cache was created for.
    pub fn belongs_to(&self, doc: &Document) -> bool {
        std::ptr::eq(self.doc, doc)
    }

    /// Cached outcome for `id`, if any.
    pub fn get(&self, id: ObjectId) -> Option<Option<ColorSpaceFilterPtr>> {
        self.lock().get(&id).cloned()
    }

    /// Number of cached outcomes.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached outcome.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Return the cached outcome for `id`, or run `create` and cache its
    /// outcome.
    ///
    /// The lock is not held while `create` runs, so nested declarations can
    /// use the cache too. When two callers race on the same id the first
    /// stored outcome wins and both get it. Errors are returned without
    /// being cached.
    pub fn get_or_try_insert_with<F>(
        &self,
        id: ObjectId,
        create: F,
    ) -> Result<Option<ColorSpaceFilterPtr>>
    where
        F: FnOnce() -> Result<Option<ColorSpaceFilterPtr>>,
    {
        if let Some(hit) = self.get(id) {
            debug!(object = id.0, generation = id.1, "color space cache hit");
            return Ok(hit);
        }
        let created = create()?;
        Ok(self.lock().entry(id).or_insert(created).clone())
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
