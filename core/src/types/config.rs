/// Default canonical extension for DICOM files
pub const DEFAULT_EXTENSION: &str = "dcm";

/// Default number of moves between progress reports
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Configuration for a reorganization run
///
/// # Example
///
/// ```
/// use dicomsort_core::ReorganizeConfig;
///
/// let config = ReorganizeConfig::default()
///     .with_progress_interval(10)
///     .dry_run(true);
///
/// assert_eq!(config.extension, "dcm");
/// assert_eq!(config.progress_interval, 10);
/// assert!(config.dry_run);
/// assert!(config.prune_empty_dirs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorganizeConfig {
    /// Extension (without the dot) every DICOM file name must carry
    pub extension: String,

    /// Report progress every this many moved files
    pub progress_interval: usize,

    /// Plan and report without touching the filesystem
    pub dry_run: bool,

    /// Remove empty subdirectories after an in-place run
    pub prune_empty_dirs: bool,
}

impl Default for ReorganizeConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            dry_run: false,
            prune_empty_dirs: true,
        }
    }
}

impl ReorganizeConfig {
    /// Builder: Set the canonical extension
    ///
    /// A leading dot is ignored.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Builder: Set the progress interval
    ///
    /// An interval of zero is treated as one.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Builder: Enable or disable dry run
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builder: Enable or disable pruning of empty directories
    pub fn prune_empty_dirs(mut self, enabled: bool) -> Self {
        self.prune_empty_dirs = enabled;
        self
    }
}
