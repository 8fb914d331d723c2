//! Runtime configuration: zfs binary discovery and terminal size

use crate::matrix::QueryMode;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the zfs binary
pub const ZFS_PATH_ENV: &str = "ZFSPACE_ZFS_PATH";

/// Environment variable forcing sequential space queries
pub const SEQUENTIAL_ENV: &str = "ZFSPACE_SEQUENTIAL";

/// Terminal width used when nothing else is known
pub const DEFAULT_COLUMNS: usize = 80;

/// How zfspace talks to the storage tool
#[derive(Debug, Clone)]
pub struct ZfsConfig {
    /// Path of the zfs binary, or plain `zfs` to search `$PATH`
    pub zfs_binary: PathBuf,
    /// Issue space queries one at a time
    pub sequential: bool,
}

impl ZfsConfig {
    /// Create a configuration from the environment with automatic discovery
    pub fn new() -> Self {
        Self {
            zfs_binary: Self::discover_zfs_binary(),
            sequential: parse_flag(env::var(SEQUENTIAL_ENV).ok().as_deref()),
        }
    }

    /// Use an explicit binary (scripts and tests)
    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            zfs_binary: path.into(),
            sequential: false,
        }
    }

    /// Discover the zfs binary using various methods
    fn discover_zfs_binary() -> PathBuf {
        // 1. Check environment variable override
        if let Ok(path) = env::var(ZFS_PATH_ENV) {
            let path_buf = PathBuf::from(path);
            if path_buf.exists() {
                return path_buf;
            }
            log::warn!("{} points to missing file {}, ignoring", ZFS_PATH_ENV, path_buf.display());
        }

        // 2. Check standard system paths
        for path in Self::get_standard_paths() {
            if path.is_file() {
                return path;
            }
        }

        // 3. Leave it to $PATH
        PathBuf::from("zfs")
    }

    /// Standard installation paths for each platform
    fn get_standard_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("/sbin/zfs"),
            PathBuf::from("/usr/sbin/zfs"),
            PathBuf::from("/usr/local/sbin/zfs"),
        ];

        if cfg!(target_os = "macos") {
            // OpenZFS on macOS installer
            paths.push(PathBuf::from("/usr/local/zfs/bin/zfs"));
        }

        paths
    }

    /// Query mode, with a command-line override for sequential queries
    pub fn query_mode(&self, force_sequential: bool) -> QueryMode {
        if force_sequential || self.sequential {
            QueryMode::Sequential
        } else {
            QueryMode::Parallel
        }
    }
}

impl Default for ZfsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize zfs configuration and log what was found
pub fn init_zfs() -> ZfsConfig {
    let config = ZfsConfig::new();
    log::debug!("Using zfs binary: {}", config.zfs_binary.display());
    if config.sequential {
        log::debug!("Space queries forced sequential by {}", SEQUENTIAL_ENV);
    }
    config
}

/// Terminal column count: explicit override, then the terminal, then `$COLUMNS`.
pub fn terminal_columns(override_width: Option<usize>) -> usize {
    if let Some(width) = override_width {
        return width;
    }

    match crossterm::terminal::size() {
        Ok((columns, _lines)) if columns > 0 => return columns as usize,
        Ok(_) => {}
        Err(e) => log::debug!("Could not query terminal size: {}", e),
    }

    parse_columns(env::var("COLUMNS").ok().as_deref()).unwrap_or(DEFAULT_COLUMNS)
}

fn parse_columns(value: Option<&str>) -> Option<usize> {
    value?.trim().parse().ok().filter(|&columns: &usize| columns > 0)
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
