//! Volume backend served from a local JSON catalog
//!
//! The catalog is a JSON array of volume records. It is re-read on every page
//! request, so each request sees the file as it is at that moment, the same way
//! a remote listing service answers each page independently.

use super::VolumeStore;
use super::types::{PageQuery, VolumeInfo};
use crate::error::{Result as ShResult, ShellError};
use std::fs;
use std::path::{Path, PathBuf};

pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileCatalog {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load(&self) -> ShResult<Vec<VolumeInfo>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            ShellError::provider_with(
                format!("cannot read volume catalog {}", self.path.display()),
                e,
            )
        })?;
        let mut volumes: Vec<VolumeInfo> = serde_json::from_str(&raw).map_err(|e| {
            ShellError::provider_with(
                format!("malformed volume catalog {}", self.path.display()),
                e,
            )
        })?;
        volumes.sort_by(|a, b| a.volume_name.cmp(&b.volume_name));
        Ok(volumes)
    }

    fn page(&self, owner: Option<&str>, query: &PageQuery) -> ShResult<Vec<VolumeInfo>> {
        let page: Vec<VolumeInfo> = self
            .load()?
            .into_iter()
            .filter(|v| owner.is_none_or(|o| v.owner_name() == o))
            .filter(|v| query.admits(v.name()))
            .take(query.max_keys)
            .collect();

        log::debug!(
            "catalog {} answered {} volume(s) for owner {:?}",
            self.path.display(),
            page.len(),
            owner
        );
        Ok(page)
    }
}

impl VolumeStore for FileCatalog {
    fn list_volumes_by_user(&self, user: &str, query: &PageQuery) -> ShResult<Vec<VolumeInfo>> {
        self.page(Some(user), query)
    }

    fn list_volumes(&self, query: &PageQuery) -> ShResult<Vec<VolumeInfo>> {
        self.page(None, query)
    }
}
