//! JSON catalog loader
//!
//! Loads the skill and perk lists either from the copies compiled into the
//! binary or from a data directory. A failed load never aborts the program:
//! it is logged and the catalog comes back empty.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::item::{CatalogItem, ItemKind};

const BUNDLED_SKILLS: &str = include_str!("../../assets/data/skills.json");
const BUNDLED_PERKS: &str = include_str!("../../assets/data/perks.json");

const SKILLS_FILE: &str = "skills.json";
const PERKS_FILE: &str = "perks.json";

/// Errors that can occur while loading catalog data
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {file}: {source}")]
    Serialize {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog loader thread exited without a result")]
    Disconnected,
}

/// Where the catalog comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// Data compiled into the binary
    #[default]
    Bundled,
    /// `skills.json` and `perks.json` inside a directory
    Directory(PathBuf),
}

/// The full, immutable set of skills and perks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub skills: Vec<CatalogItem>,
    pub perks: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(skills: Vec<CatalogItem>, perks: Vec<CatalogItem>) -> Self {
        Self { skills, perks }
    }

    /// Entries of one kind, in source order
    pub fn items(&self, kind: ItemKind) -> &[CatalogItem] {
        match kind {
            ItemKind::Skill => &self.skills,
            ItemKind::Perk => &self.perks,
        }
    }

    /// Find an entry by exact name
    pub fn find(&self, kind: ItemKind, name: &str) -> Option<&CatalogItem> {
        self.items(kind).iter().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.skills.len() + self.perks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.perks.is_empty()
    }
}

/// Load a catalog, returning an empty one if anything goes wrong
pub fn load_catalog(source: &CatalogSource) -> Catalog {
    match try_load_catalog(source) {
        Ok(catalog) => {
            log::info!(
                "Loaded catalog from {:?}: {} skills, {} perks",
                source,
                catalog.skills.len(),
                catalog.perks.len()
            );
            catalog
        }
        Err(e) => {
            log::error!("Error loading skills and perks: {}", e);
            Catalog::default()
        }
    }
}

/// Load a catalog, reporting the first failure
pub fn try_load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    match source {
        CatalogSource::Bundled => Ok(Catalog {
            skills: parse_items(SKILLS_FILE, BUNDLED_SKILLS)?,
            perks: parse_items(PERKS_FILE, BUNDLED_PERKS)?,
        }),
        CatalogSource::Directory(dir) => Ok(Catalog {
            skills: read_items(dir, SKILLS_FILE)?,
            perks: read_items(dir, PERKS_FILE)?,
        }),
    }
}

/// The catalog compiled into the binary
pub fn bundled_catalog() -> Catalog {
    load_catalog(&CatalogSource::Bundled)
}

fn read_items(dir: &Path, file: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })?;
    parse_items(file, &content)
}

fn parse_items(file: &str, content: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Write the bundled catalog into `dir` as editable JSON
pub fn export_bundled_catalog(dir: &Path) -> Result<(), CatalogError> {
    let catalog = try_load_catalog(&CatalogSource::Bundled)?;

    fs::create_dir_all(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for (file, items) in [(SKILLS_FILE, &catalog.skills), (PERKS_FILE, &catalog.perks)] {
        let json = serde_json::to_string_pretty(items).map_err(|source| CatalogError::Serialize {
            file: file.to_string(),
            source,
        })?;
        let path = dir.join(file);
        fs::write(&path, json).map_err(|source| CatalogError::Io { path, source })?;
    }

    log::info!("Exported bundled catalog to {}", dir.display());
    Ok(())
}

/// A catalog load running on a background thread
pub struct PendingCatalog {
    receiver: Receiver<Catalog>,
    finished: bool,
}

impl PendingCatalog {
    /// Non-blocking check for the loaded catalog.
    ///
    /// Yields `Some` exactly once. If the loader thread died, the result is
    /// an empty catalog so the UI can still come up.
    pub fn poll(&mut self) -> Option<Catalog> {
        if self.finished {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(catalog) => {
                self.finished = true;
                Some(catalog)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                log::error!("Error loading skills and perks: {}", CatalogError::Disconnected);
                Some(Catalog::default())
            }
        }
    }

    /// Block until the catalog is available
    pub fn wait(mut self) -> Catalog {
        if self.finished {
            return Catalog::default();
        }
        self.finished = true;
        self.receiver.recv().unwrap_or_else(|_| {
            log::error!("Error loading skills and perks: {}", CatalogError::Disconnected);
            Catalog::default()
        })
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Start loading a catalog off the UI thread
pub fn spawn_catalog_load(source: CatalogSource) -> PendingCatalog {
    let (sender, receiver) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("catalog-loader".to_string())
        .spawn(move || {
            let catalog = load_catalog(&source);
            // The receiver may already be gone if the app quit early
            let _ = sender.send(catalog);
        });

    if let Err(e) = spawned {
        log::warn!("Failed to spawn catalog loader thread: {}", e);
    }

    PendingCatalog {
        receiver,
        finished: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bundled_catalog() {
        let catalog = bundled_catalog();
        assert!(!catalog.skills.is_empty(), "No skills bundled");
        assert!(!catalog.perks.is_empty(), "No perks bundled");

        // Names are the identity, so they must be unique per collection
        let names: HashSet<_> = catalog.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), catalog.skills.len());
        let names: HashSet<_> = catalog.perks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), catalog.perks.len());
    }

    #[test]
    fn test_export_then_load_directory() {
        let dir = tempfile::tempdir().unwrap();
        export_bundled_catalog(dir.path()).unwrap();

        assert!(dir.path().join("skills.json").exists(), "skills.json not created");
        assert!(dir.path().join("perks.json").exists(), "perks.json not created");

        let loaded = load_catalog(&CatalogSource::Directory(dir.path().to_path_buf()));
        assert_eq!(loaded, bundled_catalog());
    }

    #[test]
    fn test_missing_directory_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let source = CatalogSource::Directory(dir.path().join("nope"));

        assert!(matches!(try_load_catalog(&source), Err(CatalogError::Io { .. })));
        assert!(load_catalog(&source).is_empty());
    }

    #[test]
    fn test_malformed_json_gives_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("skills.json"), "[]").unwrap();
        fs::write(dir.path().join("perks.json"), "{ not json").unwrap();
        let source = CatalogSource::Directory(dir.path().to_path_buf());

        assert!(matches!(try_load_catalog(&source), Err(CatalogError::Parse { .. })));
        let catalog = load_catalog(&source);
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_spawned_load_delivers_once() {
        let pending = spawn_catalog_load(CatalogSource::Bundled);
        let catalog = pending.wait();
        assert_eq!(catalog, bundled_catalog());

        let mut pending = spawn_catalog_load(CatalogSource::Bundled);
        let mut received = None;
        while received.is_none() {
            received = pending.poll();
            thread::yield_now();
        }
        assert!(pending.is_finished());
        assert!(pending.poll().is_none());
    }

    #[test]
    fn test_find_by_name() {
        let catalog = bundled_catalog();
        let hide = catalog.find(ItemKind::Skill, "Hide").unwrap();
        assert_eq!(hide.cooldown.as_deref(), Some("40s"));
        assert!(catalog.find(ItemKind::Perk, "Hide").is_none());
        assert!(catalog.find(ItemKind::Skill, "hide").is_none());
    }
}
