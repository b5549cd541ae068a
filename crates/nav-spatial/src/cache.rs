//! Persistent, symmetric cache of computed paths.
//!
//! # Storage
//!
//! One file per region at `<dir>/<region>_path_cache.bin`, holding the whole
//! map bincode-encoded.  Every write re-encodes the full map into a temporary
//! file in the same directory and renames it over the old file, so readers
//! see either the previous or the new cache, never a partial one.
//!
//! A missing file loads as an empty cache.  A file that cannot be decoded is
//! logged and also treated as empty; the next write replaces it.
//!
//! The cache assumes one writing process per region file.

use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;

use nav_core::Coord;

use crate::{SpatialError, SpatialResult};

type PathMap = FxHashMap<(Coord, Coord), Vec<Coord>>;

// ── CacheConfig ───────────────────────────────────────────────────────────────

/// Where a region's path cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding cache files.
    pub dir: PathBuf,
    /// Region (campus) name; scopes the file name.
    pub region: String,
}

impl CacheConfig {
    /// Directory used when none is configured.
    pub const DEFAULT_DIR: &'static str = "outputs";

    /// Environment variable read by [`from_env`](Self::from_env).
    pub const DIR_ENV: &'static str = "NAV_CACHE_DIR";

    pub fn new(region: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(Self::DEFAULT_DIR), region: region.into() }
    }

    /// Like [`new`](Self::new), but `NAV_CACHE_DIR` overrides the directory
    /// when set and non-empty.
    pub fn from_env(region: impl Into<String>) -> Self {
        let config = Self::new(region);
        match env::var(Self::DIR_ENV) {
            Ok(dir) if !dir.is_empty() => config.with_dir(dir),
            _ => config,
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Full path of the cache file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(format!("{}_path_cache.bin", self.region))
    }
}

// ── PathCache ─────────────────────────────────────────────────────────────────

/// `(source, target) → path` map backed by a file.
pub struct PathCache {
    paths: PathMap,
    file:  PathBuf,
}

impl PathCache {
    /// Load the cache for `config`, falling back to an empty cache when the
    /// file is missing or unreadable.
    pub fn load(config: &CacheConfig) -> Self {
        let file = config.file_path();
        let paths = match read_paths(&file) {
            Ok(paths) => {
                info!("loaded {} cached paths from {}", paths.len(), file.display());
                paths
            }
            Err(e) if is_not_found(&e) => {
                debug!("no path cache at {}; starting empty", file.display());
                PathMap::default()
            }
            Err(e) => {
                warn!("ignoring unreadable path cache {}: {e}", file.display());
                PathMap::default()
            }
        };
        Self { paths, file }
    }

    /// Cached path from `source` to `target`.  Pure lookup.
    pub fn get(&self, source: Coord, target: Coord) -> Option<&[Coord]> {
        self.paths.get(&(source, target)).map(Vec::as_slice)
    }

    /// Store `path` under `(source, target)` and its reverse under
    /// `(target, source)`, then persist the whole cache.
    ///
    /// Existing entries for either key are overwritten.  If persisting fails
    /// the in-memory entries stay and the error is returned.
    pub fn insert(&mut self, source: Coord, target: Coord, path: Vec<Coord>) -> SpatialResult<()> {
        let mut reversed = path.clone();
        reversed.reverse();
        self.paths.insert((source, target), path);
        self.paths.insert((target, source), reversed);
        debug!("cached path {source} <-> {target}; {} entries", self.paths.len());
        self.save()
    }

    /// Write the full cache to its file via temp-file-and-rename.
    pub fn save(&self) -> SpatialResult<()> {
        let dir = match self.file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            bincode::serialize_into(&mut writer, &self.paths)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.file)?;
        Ok(())
    }

    /// Number of stored entries; each `insert` adds two keys.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }
}

fn read_paths(file: &Path) -> SpatialResult<PathMap> {
    let reader = BufReader::new(File::open(file)?);
    Ok(bincode::deserialize_from(reader)?)
}

fn is_not_found(e: &SpatialError) -> bool {
    matches!(e, SpatialError::Io(io) if io.kind() == std::io::ErrorKind::NotFound)
}
