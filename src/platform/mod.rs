// Platform-specific defaults

/// Operating system family, as far as path conventions are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

/// Root of the system drive on the given platform
pub fn default_disk_path(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "C:\\",
        Platform::Posix => "/",
    }
}

/// Resolve the disk path to monitor from an optional user choice.
///
/// A POSIX root given on Windows is mapped to the system drive; the returned
/// flag reports whether that rewrite happened.
pub fn resolve_disk_path(requested: Option<&str>, platform: Platform) -> (String, bool) {
    match requested {
        None => (default_disk_path(platform).to_string(), false),
        Some("/") if platform == Platform::Windows => {
            (default_disk_path(platform).to_string(), true)
        }
        Some(path) => (path.to_string(), false),
    }
}
