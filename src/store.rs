//! Object store access for volume listing
//!
//! The actual storage backend is an external collaborator reached through the
//! [`VolumeStore`] trait. [`ObjectStore`] is the handle commands work with: it
//! turns one of the two backend entry points into a lazy [`VolumeIterator`].

use crate::error::Result as ShResult;
use std::fmt;
use std::sync::Arc;

// Sub-modules for organization
pub mod catalog;
pub mod iterator;
pub mod types;

pub use catalog::FileCatalog;
pub use iterator::VolumeIterator;
pub use types::*;

/// Where the owner of an owner-scoped listing came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerSource {
    /// Given with `--user`
    Explicit,
    /// `default_user` from the config file
    Config,
    /// Identity of the invoking process
    ProcessUser,
}

/// Which provider entry point a listing goes through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    Owner { name: String, source: OwnerSource },
    Global,
}

impl ListScope {
    pub fn owner(name: impl Into<String>) -> Self {
        ListScope::Owner {
            name: name.into(),
            source: OwnerSource::Explicit,
        }
    }

    pub fn global() -> Self {
        ListScope::Global
    }

    pub fn owner_name(&self) -> Option<&str> {
        match self {
            ListScope::Owner { name, .. } => Some(name),
            ListScope::Global => None,
        }
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListScope::Owner { name, .. } => write!(f, "{name}"),
            ListScope::Global => write!(f, "(all users)"),
        }
    }
}

/// Paginated volume listing offered by a storage backend
///
/// Each call answers one page: at most `query.max_keys` volumes whose names
/// start with `query.prefix` and sort strictly after `query.start_after`, in
/// ascending name order. A backend may cap pages below `max_keys`; an empty
/// page means the listing is exhausted.
pub trait VolumeStore: Send + Sync {
    /// Owner-scoped entry point
    fn list_volumes_by_user(&self, user: &str, query: &PageQuery) -> ShResult<Vec<VolumeInfo>>;

    /// Global entry point
    fn list_volumes(&self, query: &PageQuery) -> ShResult<Vec<VolumeInfo>>;
}

/// Client-side handle on a volume backend
#[derive(Clone)]
pub struct ObjectStore {
    backend: Arc<dyn VolumeStore>,
    page_size: usize,
}

impl ObjectStore {
    pub fn new(backend: Arc<dyn VolumeStore>) -> Self {
        Self::with_page_size(backend, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(backend: Arc<dyn VolumeStore>, page_size: usize) -> Self {
        ObjectStore {
            backend,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Volumes owned by `user`
    pub fn list_volumes_by_user(
        &self,
        user: &str,
        prefix: Option<&str>,
        start_after: Option<&str>,
    ) -> VolumeIterator {
        self.iterator(ListScope::owner(user), prefix, start_after)
    }

    /// Volumes of every owner
    pub fn list_volumes(&self, prefix: Option<&str>, start_after: Option<&str>) -> VolumeIterator {
        self.iterator(ListScope::Global, prefix, start_after)
    }

    /// Route to the entry point matching `scope`
    pub fn volumes(
        &self,
        scope: &ListScope,
        prefix: Option<&str>,
        start_after: Option<&str>,
    ) -> VolumeIterator {
        match scope {
            ListScope::Owner { .. } => self.iterator(scope.clone(), prefix, start_after),
            ListScope::Global => self.list_volumes(prefix, start_after),
        }
    }

    fn iterator(
        &self,
        scope: ListScope,
        prefix: Option<&str>,
        start_after: Option<&str>,
    ) -> VolumeIterator {
        VolumeIterator::new(
            Arc::clone(&self.backend),
            scope,
            prefix.map(str::to_string),
            start_after.map(str::to_string),
            self.page_size,
        )
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles for the provider seam

    use super::*;
    use crate::error::ShellError;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    pub fn volume(name: &str, owner: &str) -> VolumeInfo {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        VolumeInfo::new(name, owner, Quota::new(1, QuotaUnit::Tb), created)
    }

    enum Behavior {
        Serve,
        Capped(usize),
        Fail(String),
        Stall,
    }

    /// In-memory backend that records every page request it receives
    pub struct RecordingStore {
        volumes: Vec<VolumeInfo>,
        behavior: Behavior,
        queries: Mutex<Vec<(String, PageQuery)>>,
        served: Mutex<usize>,
    }

    impl RecordingStore {
        pub fn new(mut volumes: Vec<VolumeInfo>) -> Self {
            volumes.sort_by(|a, b| a.volume_name.cmp(&b.volume_name));
            RecordingStore {
                volumes,
                behavior: Behavior::Serve,
                queries: Mutex::new(Vec::new()),
                served: Mutex::new(0),
            }
        }

        pub fn with_names(owner: &str, names: &[&str]) -> Self {
            Self::new(names.iter().map(|n| volume(n, owner)).collect())
        }

        pub fn failing(message: &str) -> Self {
            let mut store = Self::new(Vec::new());
            store.behavior = Behavior::Fail(message.to_string());
            store
        }

        /// Never answers with more than `cap` volumes, whatever `max_keys` asks for
        pub fn capped(owner: &str, names: &[&str], cap: usize) -> Self {
            let mut store = Self::with_names(owner, names);
            store.behavior = Behavior::Capped(cap);
            store
        }

        /// Serves the first page for every query, ignoring the cursor
        pub fn stalled(owner: &str, names: &[&str]) -> Self {
            let mut store = Self::with_names(owner, names);
            store.behavior = Behavior::Stall;
            store
        }

        /// `(entry point, query)` pairs in request order
        pub fn queries(&self) -> Vec<(String, PageQuery)> {
            self.queries.lock().unwrap().clone()
        }

        pub fn entry_points(&self) -> Vec<String> {
            self.queries().into_iter().map(|(entry, _)| entry).collect()
        }

        /// Total volumes handed out across all pages
        pub fn served(&self) -> usize {
            *self.served.lock().unwrap()
        }

        fn matching(&self, owner: Option<&str>, query: &PageQuery, take: usize) -> Vec<VolumeInfo> {
            self.volumes
                .iter()
                .filter(|v| owner.is_none_or(|o| v.owner_name() == o))
                .filter(|v| query.admits(v.name()))
                .take(take)
                .cloned()
                .collect()
        }

        fn answer(
            &self,
            entry: String,
            owner: Option<&str>,
            query: &PageQuery,
        ) -> ShResult<Vec<VolumeInfo>> {
            self.queries.lock().unwrap().push((entry, query.clone()));
            let page: Vec<VolumeInfo> = match &self.behavior {
                Behavior::Fail(message) => return Err(ShellError::provider(message.clone())),
                Behavior::Stall => self.volumes.iter().take(query.max_keys).cloned().collect(),
                Behavior::Serve => self.matching(owner, query, query.max_keys),
                Behavior::Capped(cap) => self.matching(owner, query, query.max_keys.min(*cap)),
            };
            *self.served.lock().unwrap() += page.len();
            Ok(page)
        }
    }

    impl VolumeStore for RecordingStore {
        fn list_volumes_by_user(
            &self,
            user: &str,
            query: &PageQuery,
        ) -> ShResult<Vec<VolumeInfo>> {
            self.answer(format!("by_user:{user}"), Some(user), query)
        }

        fn list_volumes(&self, query: &PageQuery) -> ShResult<Vec<VolumeInfo>> {
            self.answer("global".to_string(), None, query)
        }
    }
}
