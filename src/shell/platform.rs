//! Platform and shell detection.
//!
//! Environment access goes through [`EnvProvider`] so detection can be
//! exercised with a fixed `SHELL` and home directory.

use crate::error::{FoodtruckError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Whether this is Windows.
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }
}

/// Read-only view of the process environment.
pub trait EnvProvider {
    /// Look up an environment variable.
    fn var(&self, key: &str) -> Option<String>;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Per-user data directory (`~/.local/share` on Linux).
    fn data_dir(&self) -> Option<PathBuf>;

    /// The platform we are running on.
    fn platform(&self) -> Platform;
}

/// [`EnvProvider`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn data_dir(&self) -> Option<PathBuf> {
        dirs::data_dir()
    }

    fn platform(&self) -> Platform {
        Platform::current()
    }
}

/// [`EnvProvider`] with fixed values, for tests and previews.
///
/// # Example
///
/// ```
/// use foodtruck::shell::{EnvProvider, FixedEnv, Platform};
///
/// let env = FixedEnv::new("/home/dev").with_var("SHELL", "/bin/zsh");
/// assert_eq!(env.var("SHELL").as_deref(), Some("/bin/zsh"));
/// assert_eq!(env.platform(), Platform::Linux);
/// ```
#[derive(Debug, Clone)]
pub struct FixedEnv {
    vars: HashMap<String, String>,
    home: Option<PathBuf>,
    platform: Platform,
}

impl FixedEnv {
    /// Create an environment rooted at `home` on Linux with no variables.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            home: Some(home.into()),
            platform: Platform::Linux,
        }
    }

    /// Set a variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Set the platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Remove the home directory.
    pub fn without_home(mut self) -> Self {
        self.home = None;
        self
    }
}

impl EnvProvider for FixedEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join(".local").join("share"))
    }

    fn platform(&self) -> Platform {
        self.platform
    }
}

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            "powershell" | "pwsh" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Unknown,
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::PowerShell => "powershell",
            ShellType::Cmd => "cmd",
            ShellType::Unknown => "unknown",
        }
    }

    /// Detect the active shell from `SHELL`.
    ///
    /// Exact executable names win; otherwise a `zsh`/`bash` substring is
    /// accepted (e.g. `/usr/local/bin/bash5`). On Windows an unrecognized or
    /// unset `SHELL` means PowerShell.
    pub fn detect(env: &dyn EnvProvider) -> Self {
        let shell = env.var("SHELL").unwrap_or_default();
        let exact = ShellType::from_executable(&shell);
        if exact != ShellType::Unknown {
            return exact;
        }
        if shell.contains("zsh") {
            ShellType::Zsh
        } else if shell.contains("bash") {
            ShellType::Bash
        } else if env.platform().is_windows() {
            ShellType::PowerShell
        } else {
            ShellType::Unknown
        }
    }
}

/// Line that prepends `dir` to PATH in the given shell's syntax.
pub fn export_line(shell: ShellType, dir: &Path) -> String {
    match shell {
        ShellType::PowerShell => format!("$env:PATH = \"{};\" + $env:PATH", dir.display()),
        ShellType::Fish => format!("fish_add_path \"{}\"", dir.display()),
        ShellType::Cmd => format!("set PATH={};%PATH%", dir.display()),
        _ => format!("export PATH=\"{}:$PATH\"", dir.display()),
    }
}

/// A shell together with the profile file that configures it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTarget {
    /// Which shell.
    pub shell: ShellType,
    /// Startup file where PATH changes persist.
    pub profile: PathBuf,
}

impl ShellTarget {
    /// Detect the active shell and map it to its profile file.
    ///
    /// Shells without a known profile yield
    /// [`FoodtruckError::UnsupportedShell`]; there is no fallback file.
    pub fn detect(env: &dyn EnvProvider) -> Result<Self> {
        match ShellType::detect(env) {
            ShellType::Unknown => Err(FoodtruckError::UnsupportedShell {
                shell: env
                    .var("SHELL")
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "unknown ($SHELL is not set)".to_string()),
            }),
            shell => Self::for_shell(shell, env),
        }
    }

    /// Map a specific shell to its profile file.
    pub fn for_shell(shell: ShellType, env: &dyn EnvProvider) -> Result<Self> {
        let home = env.home_dir().ok_or_else(|| {
            FoodtruckError::Other(anyhow::anyhow!("Could not determine home directory"))
        })?;

        let profile = match shell {
            ShellType::Bash => home.join(".bashrc"),
            ShellType::Zsh => home.join(".zshrc"),
            ShellType::PowerShell => env
                .var("POWERSHELL_PROFILE")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| {
                    home.join("Documents")
                        .join("WindowsPowerShell")
                        .join("Microsoft.PowerShell_profile.ps1")
                }),
            ShellType::Fish | ShellType::Cmd | ShellType::Unknown => {
                return Err(FoodtruckError::UnsupportedShell {
                    shell: shell.name().to_string(),
                })
            }
        };

        Ok(Self { shell, profile })
    }

    /// The PATH export line for this shell.
    pub fn export_line(&self, dir: &Path) -> String {
        export_line(self.shell, dir)
    }

    /// Command that reloads the profile in the current session.
    pub fn reload_hint(&self) -> String {
        match self.shell {
            ShellType::PowerShell => format!(". \"{}\"", self.profile.display()),
            _ => format!("source {}", self.profile.display()),
        }
    }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS", "JENKINS_URL"]
        .iter()
        .any(|key| std::env::var(key).is_ok())
}
