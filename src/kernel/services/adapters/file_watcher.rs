use notify::event::{ModifyKind, RenameMode};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, SystemTime};

const WATCHER_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiskEvent {
    Modified(PathBuf),
    Removed(PathBuf),
}

impl DiskEvent {
    pub fn path(&self) -> &Path {
        match self {
            DiskEvent::Modified(path) | DiskEvent::Removed(path) => path,
        }
    }

    pub fn is_removed(&self) -> bool {
        matches!(self, DiskEvent::Removed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FsDelta {
    Deleted { path: PathBuf },
    Renamed { from: PathBuf, to: PathBuf },
    Modified { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FileFingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

/// Watches the directories holding open documents and reports changes to
/// those documents only.
pub struct DiskWatcher {
    watcher: RecommendedWatcher,
    raw_event_rx: mpsc::Receiver<notify::Event>,
    watched_dirs: FxHashSet<PathBuf>,
    open_file_keys: FxHashMap<PathBuf, FxHashSet<PathBuf>>,
    open_file_fingerprints: FxHashMap<PathBuf, FileFingerprint>,
}

impl DiskWatcher {
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                let Ok(event) = res else { return };
                let _ = tx.send(event);
            },
            Config::default().with_poll_interval(WATCHER_POLL_INTERVAL),
        )?;
        Ok(Self {
            watcher,
            raw_event_rx: rx,
            watched_dirs: FxHashSet::default(),
            open_file_keys: FxHashMap::default(),
            open_file_fingerprints: FxHashMap::default(),
        })
    }

    pub fn sync_open_files<'a, I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut open_file_keys: FxHashMap<PathBuf, FxHashSet<PathBuf>> = FxHashMap::default();
        let mut open_file_fingerprints: FxHashMap<PathBuf, FileFingerprint> = FxHashMap::default();
        let mut seen = FxHashSet::default();
        let mut dirs = FxHashSet::default();

        for path in paths {
            let path = path.to_path_buf();
            if !seen.insert(path.clone()) {
                continue;
            }

            for key in path_identity_keys(path.as_path()) {
                open_file_keys.entry(key).or_default().insert(path.clone());
            }
            if let Some(parent) = path.parent().filter(|p| p.is_dir()) {
                dirs.insert(parent.to_path_buf());
            }

            if let Some(existing) = self.open_file_fingerprints.get(&path).cloned() {
                open_file_fingerprints.insert(path, existing);
            } else if let Some(fingerprint) = file_fingerprint(path.as_path()) {
                open_file_fingerprints.insert(path, fingerprint);
            }
        }

        for stale in self.watched_dirs.difference(&dirs) {
            let _ = self.watcher.unwatch(stale);
        }
        for dir in dirs.difference(&self.watched_dirs) {
            if let Err(err) = self.watcher.watch(dir, RecursiveMode::NonRecursive) {
                tracing::warn!(dir = %dir.display(), error = %err, "failed to watch directory");
            }
        }

        self.watched_dirs = dirs;
        self.open_file_keys = open_file_keys;
        self.open_file_fingerprints = open_file_fingerprints;
    }

    pub fn watched_dirs(&self) -> &FxHashSet<PathBuf> {
        &self.watched_dirs
    }

    /// Records the fingerprint left by our own write so it is not reported back.
    pub fn acknowledge_write(&mut self, path: &Path) {
        for tab_path in self.match_open_paths(path) {
            if let Some(fingerprint) = file_fingerprint(tab_path.as_path()) {
                self.open_file_fingerprints.insert(tab_path, fingerprint);
            } else {
                self.open_file_fingerprints.remove(&tab_path);
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<DiskEvent> {
        let mut removed = FxHashSet::default();
        let mut modified = FxHashSet::default();

        while let Ok(event) = self.raw_event_rx.try_recv() {
            for delta in normalize_notify_event(event) {
                self.route_delta(delta, &mut removed, &mut modified);
            }
        }

        let mut removed = removed.into_iter().collect::<Vec<_>>();
        removed.sort_unstable();
        let mut modified = modified
            .into_iter()
            .filter(|path| !removed.contains(path))
            .collect::<Vec<_>>();
        modified.sort_unstable();

        removed
            .into_iter()
            .map(DiskEvent::Removed)
            .chain(modified.into_iter().map(DiskEvent::Modified))
            .collect()
    }

    fn route_delta(
        &mut self,
        delta: FsDelta,
        removed: &mut FxHashSet<PathBuf>,
        modified: &mut FxHashSet<PathBuf>,
    ) {
        match delta {
            FsDelta::Modified { path } => {
                for tab_path in self.match_open_paths(path.as_path()) {
                    if !tab_path.exists() {
                        self.open_file_fingerprints.remove(&tab_path);
                        removed.insert(tab_path);
                    } else if self.refresh_open_file_fingerprint(tab_path.as_path()) {
                        modified.insert(tab_path);
                    }
                }
            }
            FsDelta::Deleted { path } => {
                for tab_path in self.match_open_paths(path.as_path()) {
                    self.open_file_fingerprints.remove(&tab_path);
                    removed.insert(tab_path);
                }
            }
            FsDelta::Renamed { from, to } => {
                for tab_path in self.match_open_paths(from.as_path()) {
                    self.open_file_fingerprints.remove(&tab_path);
                    removed.insert(tab_path);
                }
                for tab_path in self.match_open_paths(to.as_path()) {
                    let _ = self.refresh_open_file_fingerprint(tab_path.as_path());
                    removed.remove(&tab_path);
                    modified.insert(tab_path);
                }
            }
        }
    }

    fn refresh_open_file_fingerprint(&mut self, path: &Path) -> bool {
        match file_fingerprint(path) {
            Some(new_fingerprint) => {
                if let Some(previous) = self
                    .open_file_fingerprints
                    .insert(path.to_path_buf(), new_fingerprint.clone())
                {
                    previous != new_fingerprint
                } else {
                    true
                }
            }
            None => self.open_file_fingerprints.remove(path).is_some(),
        }
    }

    fn match_open_paths(&self, path: &Path) -> FxHashSet<PathBuf> {
        let mut matched = FxHashSet::default();
        for key in path_identity_keys(path) {
            if let Some(paths) = self.open_file_keys.get(&key) {
                matched.extend(paths.iter().cloned());
            }
        }
        matched
    }
}

fn path_identity_keys(path: &Path) -> Vec<PathBuf> {
    let mut keys = vec![path.to_path_buf()];
    if let Ok(canonical) = path.canonicalize() {
        if canonical != path {
            keys.push(canonical);
        }
    }
    keys
}

fn file_fingerprint(path: &Path) -> Option<FileFingerprint> {
    let metadata = std::fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    Some(FileFingerprint {
        len: metadata.len(),
        modified: metadata.modified().ok(),
    })
}

fn normalize_notify_event(event: notify::Event) -> Vec<FsDelta> {
    match event.kind {
        EventKind::Create(_) => event
            .paths
            .into_iter()
            .map(|path| FsDelta::Modified { path })
            .collect(),
        EventKind::Remove(_) => event
            .paths
            .into_iter()
            .map(|path| FsDelta::Deleted { path })
            .collect(),
        EventKind::Modify(kind) => normalize_modify_event(kind, event.paths),
        _ => Vec::new(),
    }
}

fn normalize_modify_event(kind: ModifyKind, paths: Vec<PathBuf>) -> Vec<FsDelta> {
    match kind {
        ModifyKind::Name(RenameMode::Both) if paths.len() >= 2 => vec![FsDelta::Renamed {
            from: paths[0].clone(),
            to: paths[1].clone(),
        }],
        ModifyKind::Name(RenameMode::From) => paths
            .into_iter()
            .map(|path| FsDelta::Deleted { path })
            .collect(),
        _ => paths
            .into_iter()
            .map(|path| FsDelta::Modified { path })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file_watcher.rs"]
mod tests;
