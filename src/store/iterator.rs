//! Cursor-resumable paging over a volume provider
//!
//! A [`VolumeIterator`] asks its provider for one page at a time, using the
//! name of the last volume it handed out as the cursor for the next request.
//! Providers may answer with fewer volumes than asked for, so only an empty
//! page ends the listing. It is forward-only and cannot be rewound.

use super::types::{PageQuery, VolumeInfo};
use super::{ListScope, VolumeStore};
use crate::error::{Result as ShResult, ShellError};
use std::collections::VecDeque;
use std::sync::Arc;

/// Lazy, paginated stream of volumes from one provider entry point
pub struct VolumeIterator {
    backend: Arc<dyn VolumeStore>,
    scope: ListScope,
    prefix: Option<String>,
    cursor: Option<String>,
    page_size: usize,
    remaining: Option<usize>,
    buffer: VecDeque<VolumeInfo>,
    exhausted: bool,
    pages_fetched: usize,
}

impl VolumeIterator {
    pub(crate) fn new(
        backend: Arc<dyn VolumeStore>,
        scope: ListScope,
        prefix: Option<String>,
        start_after: Option<String>,
        page_size: usize,
    ) -> Self {
        Self {
            backend,
            scope,
            prefix,
            cursor: start_after,
            page_size: page_size.max(1),
            remaining: None,
            buffer: VecDeque::new(),
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Never request more than `limit` volumes from the provider in total
    pub fn limit(mut self, limit: usize) -> Self {
        self.remaining = Some(limit);
        if limit == 0 {
            self.exhausted = true;
        }
        self
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_page(&mut self) -> ShResult<()> {
        let max_keys = match self.remaining {
            Some(remaining) => remaining.min(self.page_size),
            None => self.page_size,
        };
        let query = PageQuery {
            prefix: self.prefix.clone(),
            start_after: self.cursor.clone(),
            max_keys,
        };

        log::debug!(
            "fetching volume page {} ({:?}, start_after={:?}, max_keys={})",
            self.pages_fetched + 1,
            self.scope,
            query.start_after,
            max_keys
        );

        let mut page = match &self.scope {
            ListScope::Owner { name, .. } => self.backend.list_volumes_by_user(name, &query)?,
            ListScope::Global => self.backend.list_volumes(&query)?,
        };
        self.pages_fetched += 1;

        if page.len() > max_keys {
            log::warn!(
                "provider returned {} volumes for a page of {max_keys}; truncating",
                page.len()
            );
            page.truncate(max_keys);
        }
        if let Some(last) = page.last() {
            let advanced = self
                .cursor
                .as_deref()
                .is_none_or(|cursor| last.name() > cursor);
            if !advanced {
                return Err(ShellError::provider(format!(
                    "listing cursor did not advance past '{}'",
                    last.name()
                )));
            }
            self.cursor = Some(last.name().to_string());
        } else {
            self.exhausted = true;
        }

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= page.len();
            if *remaining == 0 {
                self.exhausted = true;
            }
        }

        self.buffer.extend(page);
        Ok(())
    }
}

impl Iterator for VolumeIterator {
    type Item = ShResult<VolumeInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(e) = self.fetch_page() {
                self.exhausted = true;
                self.buffer.clear();
                return Some(Err(e));
            }
        }
        self.buffer.pop_front().map(Ok)
    }
}

impl std::iter::FusedIterator for VolumeIterator {}
