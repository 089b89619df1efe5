use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the XDG/HOME config base.
const APP_DIR: &str = "upwall";

/// On-disk layout rooted at the upwall configuration directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Root directory, e.g. `$HOME/.config/upwall`.
    root: PathBuf,
}

impl ConfigPaths {
    /// What: Resolve the configuration root.
    ///
    /// Inputs:
    /// - `override_dir`: Explicit directory from `--config-dir`, if any.
    ///
    /// Output:
    /// - `ConfigPaths` whose root exists (best effort).
    ///
    /// Details:
    /// - Priority: explicit override, `$HOME/.config/upwall`, then
    ///   `$XDG_CONFIG_HOME/upwall` (or `./.config/upwall` when neither is set).
    #[must_use]
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        let root = override_dir.map_or_else(default_root, Path::to_path_buf);
        let _ = std::fs::create_dir_all(&root);
        Self { root }
    }

    /// Use `root` as-is without touching the environment.
    #[must_use]
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Configuration root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Logs directory under config: `<root>/logs` (ensured to exist).
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        ensure(self.root.join("logs"))
    }

    /// Session directory holding the persisted token and user: `<root>/session` (ensured to exist).
    #[must_use]
    pub fn session_dir(&self) -> PathBuf {
        ensure(self.root.join("session"))
    }

    /// Default download target: `<root>/downloads` (not created until used).
    #[must_use]
    pub fn default_download_dir(&self) -> PathBuf {
        self.root.join("downloads")
    }

    /// Path of `settings.conf` under the root, whether or not it exists.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.conf")
    }
}

/// What: Determine the root when no override is given.
///
/// Output:
/// - `$HOME/.config/upwall` when it exists or can be created, otherwise the XDG location.
fn default_root() -> PathBuf {
    if let Ok(home) = env::var("HOME")
        && !home.trim().is_empty()
    {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR)
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Create `dir` if missing and hand it back.
fn ensure(dir: PathBuf) -> PathBuf {
    let _ = std::fs::create_dir_all(&dir);
    dir
}
