use super::classify::classify;
use super::mover::move_file;
use super::plan::{Destination, MovePlan};
use super::progress::MoveCounter;
use super::prune::remove_empty_subdirs;
use super::walker::TreeWalker;
use crate::error::{DicomSortError, Result};
use crate::extraction::MetadataReader;
use crate::types::{GroupKey, ReorganizeConfig};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that could not be moved
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MoveFailure {
    pub source: PathBuf,
    pub target: PathBuf,
    pub reason: String,
    /// Whether the target was already occupied
    pub collision: bool,
}

/// Outcome of a reorganization run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ReorganizeReport {
    /// Nothing was changed on disk
    pub dry_run: bool,
    /// Files moved (or that would be moved, in a dry run)
    pub moved: usize,
    /// Files already at their canonical location
    pub already_in_place: usize,
    /// Distinct series seen
    pub series: usize,
    /// DICOM files lacking identifiers
    pub uncategorized: usize,
    /// Unrecognized files
    pub other: usize,
    /// Empty directories removed afterwards
    pub pruned_dirs: usize,
    pub failures: Vec<MoveFailure>,
}

impl ReorganizeReport {
    /// Number of moves skipped because the target was occupied
    pub fn collisions(&self) -> usize {
        self.failures.iter().filter(|f| f.collision).count()
    }

    /// Total files examined
    pub fn files_seen(&self) -> usize {
        self.moved + self.already_in_place + self.failures.len()
    }

    /// Whether every file reached its canonical location
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reorganizes DICOM trees into `dicoms/<patient>/<study>/<series>/`
///
/// # Example
///
/// ```no_run
/// use dicomsort_core::{DicomFileReader, ReorganizeConfig, Reorganizer};
/// use std::path::Path;
///
/// let reorganizer = Reorganizer::new(DicomFileReader, ReorganizeConfig::default());
/// let report = reorganizer
///     .run(Path::new("/data/incoming"), None, |moved| println!("{} files moved", moved))
///     .unwrap();
/// println!("{} files moved, {} failed", report.moved, report.failures.len());
/// ```
pub struct Reorganizer<R> {
    reader: R,
    config: ReorganizeConfig,
}

impl<R: MetadataReader> Reorganizer<R> {
    pub fn new(reader: R, config: ReorganizeConfig) -> Self {
        Self { reader, config }
    }

    pub fn config(&self) -> &ReorganizeConfig {
        &self.config
    }

    /// Reorganizes `source` in place, or into `destination` when given
    ///
    /// `on_progress` receives the running move count every
    /// `progress_interval` moves.
    pub fn run<F: FnMut(usize)>(
        &self,
        source: &Path,
        destination: Option<&Path>,
        on_progress: F,
    ) -> Result<ReorganizeReport> {
        match destination {
            Some(destination) => self.reorganize_into(source, destination, on_progress),
            None => self.reorganize_in_place(source, on_progress),
        }
    }

    /// Inventories the whole tree under `source` without moving anything
    pub fn plan(&self, source: &Path, target_root: &Path) -> MovePlan {
        let mut plan = MovePlan::new(target_root, &self.config.extension);
        for listing in TreeWalker::new(source) {
            self.plan_files(&mut plan, listing.file_paths());
        }
        plan
    }

    fn plan_files(&self, plan: &mut MovePlan, files: impl Iterator<Item = PathBuf>) {
        for path in files {
            let classification = classify(&self.reader, &path);
            debug!("{} classified as {:?}", path.display(), classification);
            plan.add(path, classification);
        }
    }

    /// Reorganizes `source` into its own canonical hierarchy
    ///
    /// The full plan is built before the first move, then empty directories
    /// left behind are pruned (the root is kept).
    pub fn reorganize_in_place<F: FnMut(usize)>(
        &self,
        source: &Path,
        on_progress: F,
    ) -> Result<ReorganizeReport> {
        require_dir(source)?;

        info!("Analyzing file structure");
        let plan = self.plan(source, source);
        info!("Finished analyzing file structure: {} files", plan.len());

        info!("Starting reorganization");
        let mut session = Session::new(&self.config, on_progress);
        session.apply(&plan);
        let mut report = session.finish();

        if !self.config.dry_run && self.config.prune_empty_dirs {
            info!("Finished moving files. Cleaning up empty subdirectories");
            report.pruned_dirs = remove_empty_subdirs(source);
        }

        Ok(report)
    }

    /// Moves files from `source` into the canonical hierarchy under `destination`
    ///
    /// Files are moved directory by directory as the walk proceeds.
    ///
    /// # Errors
    ///
    /// Fails before touching the filesystem if `source` is not a directory or
    /// the destination lies inside `source`, and before moving anything if
    /// the destination cannot be created.
    pub fn reorganize_into<F: FnMut(usize)>(
        &self,
        source: &Path,
        destination: &Path,
        on_progress: F,
    ) -> Result<ReorganizeReport> {
        require_dir(source)?;
        ensure_outside(source, destination)?;
        if !self.config.dry_run {
            fs::create_dir_all(destination)?;
        }

        info!("Started moving files");
        let mut session = Session::new(&self.config, on_progress);
        for listing in TreeWalker::new(source) {
            let mut plan = MovePlan::new(destination, &self.config.extension);
            self.plan_files(&mut plan, listing.file_paths());
            session.apply(&plan);
        }
        info!("Finished moving files");

        Ok(session.finish())
    }
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(DicomSortError::NotADirectory(path.to_path_buf()))
    }
}

/// Resolves `path` through its deepest existing ancestor
///
/// The path itself need not exist yet.
fn absolute(path: &Path) -> Result<PathBuf> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut missing = Vec::new();
    let mut existing = path.as_path();
    loop {
        if let Ok(base) = fs::canonicalize(existing) {
            return Ok(missing.iter().rev().fold(base, |acc, name| acc.join(name)));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(path.clone()),
        }
    }
}

/// Rejects a destination equal to or nested inside the source tree
fn ensure_outside(source: &Path, destination: &Path) -> Result<()> {
    let source_abs = absolute(source)?;
    let destination_abs = absolute(destination)?;

    if destination_abs.starts_with(&source_abs) {
        return Err(DicomSortError::OverlappingTrees {
            source_root: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }
    Ok(())
}

/// State carried through the apply phase of one run
struct Session<'a, F> {
    config: &'a ReorganizeConfig,
    counter: MoveCounter,
    on_progress: F,
    report: ReorganizeReport,
    series: HashSet<GroupKey>,
    /// Targets taken by earlier moves of a dry run
    claimed: HashSet<PathBuf>,
}

impl<'a, F: FnMut(usize)> Session<'a, F> {
    fn new(config: &'a ReorganizeConfig, on_progress: F) -> Self {
        Self {
            config,
            counter: MoveCounter::new(config.progress_interval),
            on_progress,
            report: ReorganizeReport {
                dry_run: config.dry_run,
                ..Default::default()
            },
            series: HashSet::new(),
            claimed: HashSet::new(),
        }
    }

    fn apply(&mut self, plan: &MovePlan) {
        for (destination, moves) in plan.groups() {
            match destination {
                Destination::Series(key) => {
                    self.series.insert(key.clone());
                }
                Destination::Uncategorized => self.report.uncategorized += moves.len(),
                Destination::Other => self.report.other += moves.len(),
            }

            let target_dir = plan.target_dir(destination);
            if !self.config.dry_run {
                if let Err(e) = fs::create_dir_all(&target_dir) {
                    error!("Cannot create {}: {}", target_dir.display(), e);
                    for planned in moves {
                        let target = target_dir.join(&planned.file_name);
                        self.fail(&planned.source, target, e.to_string(), false);
                    }
                    continue;
                }
            }

            for planned in moves {
                let target = target_dir.join(&planned.file_name);
                if planned.source == target {
                    self.report.already_in_place += 1;
                    continue;
                }

                let result = if self.config.dry_run {
                    self.claim(&target)
                } else {
                    move_file(&planned.source, &target)
                };

                match result {
                    Ok(()) => {
                        debug!("Moved {} to {}", planned.source.display(), target.display());
                        self.report.moved += 1;
                        if let Some(count) = self.counter.record() {
                            (self.on_progress)(count);
                        }
                    }
                    Err(e) => {
                        let collision = e.is_collision();
                        self.fail(&planned.source, target, e.to_string(), collision);
                    }
                }
            }
        }
    }

    /// Dry-run stand-in for a move: detects occupied or already claimed targets
    fn claim(&mut self, target: &Path) -> Result<()> {
        if fs::symlink_metadata(target).is_ok() || !self.claimed.insert(target.to_path_buf()) {
            return Err(DicomSortError::TargetExists(target.to_path_buf()));
        }
        Ok(())
    }

    fn fail(&mut self, source: &Path, target: PathBuf, reason: String, collision: bool) {
        if collision {
            warn!("Skipping {}: {}", source.display(), reason);
        } else {
            error!("Failed to move {}: {}", source.display(), reason);
        }
        self.report.failures.push(MoveFailure {
            source: source.to_path_buf(),
            target,
            reason,
            collision,
        });
    }

    fn finish(mut self) -> ReorganizeReport {
        self.report.series = self.series.len();
        self.report
    }
}
