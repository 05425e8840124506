//! Run configuration: browser session settings and test credentials.
//!
//! Settings come from a YAML file, then environment variables override
//! individual keys:
//!
//! | Variable               | Key                    | Default     |
//! |------------------------|------------------------|-------------|
//! | `PAGEKIT_BROWSER`      | `browser.kind`         | `edge`      |
//! | `PAGEKIT_BROWSER_SIZE` | `browser.size`         | `1920x1080` |
//! | `PAGEKIT_TIMEOUT`      | `browser.timeout_ms`   | `10000`     |
//! | `PAGEKIT_HEADLESS`     | `browser.headless`     | `true`      |
//! | `PAGEKIT_EMAIL`        | `credentials.email`    |             |
//! | `PAGEKIT_PASSWORD`     | `credentials.password` |             |

use crate::result::{UiError, UiResult};
use crate::wait::{WaitOptions, DEFAULT_ELEMENT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Variable naming the config file
pub const CONFIG_ENV: &str = "PAGEKIT_CONFIG";
/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pagekit.yaml";

const BROWSER_ENV: &str = "PAGEKIT_BROWSER";
const BROWSER_SIZE_ENV: &str = "PAGEKIT_BROWSER_SIZE";
const TIMEOUT_ENV: &str = "PAGEKIT_TIMEOUT";
const HEADLESS_ENV: &str = "PAGEKIT_HEADLESS";
const EMAIL_ENV: &str = "PAGEKIT_EMAIL";
const PASSWORD_ENV: &str = "PAGEKIT_PASSWORD";

fn config_error(message: impl Into<String>) -> UiError {
    UiError::Config {
        message: message.into(),
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// Browser to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    /// Google Chrome
    Chrome,
    /// Microsoft Edge
    #[default]
    Edge,
    /// Chromium
    Chromium,
    /// Mozilla Firefox
    Firefox,
}

impl BrowserKind {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
        }
    }

    /// Whether the browser speaks the Chrome DevTools Protocol
    #[must_use]
    pub const fn is_chromium_based(&self) -> bool {
        !matches!(self, Self::Firefox)
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserKind {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(Self::Chrome),
            "edge" | "msedge" => Ok(Self::Edge),
            "chromium" => Ok(Self::Chromium),
            "firefox" => Ok(Self::Firefox),
            other => Err(config_error(format!("unknown browser '{other}'"))),
        }
    }
}

/// Browser session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Browser to launch
    pub kind: BrowserKind,
    /// Viewport as `WIDTHxHEIGHT`
    pub size: String,
    /// Element wait timeout in milliseconds
    pub timeout_ms: u64,
    /// Run without a window
    pub headless: bool,
    /// Explicit browser binary
    pub executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            kind: BrowserKind::Edge,
            size: "1920x1080".to_string(),
            timeout_ms: DEFAULT_ELEMENT_TIMEOUT_MS,
            headless: true,
            executable: None,
        }
    }
}

impl BrowserSettings {
    /// Parse `size` into `(width, height)`
    ///
    /// # Errors
    ///
    /// [`UiError::Config`] if `size` is not `WIDTHxHEIGHT` with positive numbers
    pub fn viewport(&self) -> UiResult<(u32, u32)> {
        let invalid = || config_error(format!("invalid browser size '{}'", self.size));
        let (width, height) = self
            .size
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok((width, height))
    }

    /// Element wait timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Wait options with this timeout and the default poll interval
    #[must_use]
    pub fn wait_options(&self) -> WaitOptions {
        WaitOptions::new().with_timeout(self.timeout_ms)
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Test account
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Login email
    pub email: Option<String>,
    /// Login password
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Configured email
    ///
    /// # Errors
    ///
    /// [`UiError::Config`] if missing
    pub fn email(&self) -> UiResult<&str> {
        self.email
            .as_deref()
            .ok_or_else(|| config_error(format!("credentials.email is not set ({EMAIL_ENV})")))
    }

    /// Configured password
    ///
    /// # Errors
    ///
    /// [`UiError::Config`] if missing
    pub fn password(&self) -> UiResult<&str> {
        self.password.as_deref().ok_or_else(|| {
            config_error(format!("credentials.password is not set ({PASSWORD_ENV})"))
        })
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Everything a test run reads once at start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browser session settings
    pub browser: BrowserSettings,
    /// Test account
    pub credentials: Credentials,
}

impl Settings {
    /// Parse YAML; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// [`UiError::Yaml`] on malformed input
    pub fn from_yaml_str(yaml: &str) -> UiResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a YAML file
    ///
    /// # Errors
    ///
    /// [`UiError::Io`] if unreadable, [`UiError::Yaml`] if malformed
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Apply `PAGEKIT_*` overrides from the process environment
    ///
    /// # Errors
    ///
    /// [`UiError::Config`] if an override does not parse
    pub fn with_env_overrides(self) -> UiResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PAGEKIT_*` overrides from `lookup`
    ///
    /// # Errors
    ///
    /// [`UiError::Config`] if an override does not parse
    pub fn with_overrides<F>(mut self, lookup: F) -> UiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup(BROWSER_ENV) {
            self.browser.kind = kind.parse()?;
        }
        if let Some(size) = lookup(BROWSER_SIZE_ENV) {
            self.browser.size = size;
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            self.browser.timeout_ms = timeout.trim().parse().map_err(|_| {
                config_error(format!("{TIMEOUT_ENV} must be milliseconds, got '{timeout}'"))
            })?;
        }
        if let Some(headless) = lookup(HEADLESS_ENV) {
            self.browser.headless = parse_bool(&headless).ok_or_else(|| {
                config_error(format!("{HEADLESS_ENV} must be true or false, got '{headless}'"))
            })?;
        }
        if let Some(email) = lookup(EMAIL_ENV) {
            self.credentials.email = Some(email);
        }
        if let Some(password) = lookup(PASSWORD_ENV) {
            self.credentials.password = Some(password);
        }
        Ok(self)
    }

    /// Load `$PAGEKIT_CONFIG`, else `./pagekit.yaml`, else defaults; then
    /// apply environment overrides
    ///
    /// # Errors
    ///
    /// Load or override errors. A missing `./pagekit.yaml` is not an error; a
    /// missing `$PAGEKIT_CONFIG` file is.
    pub fn discover() -> UiResult<Self> {
        Self::discover_with(|key| std::env::var(key).ok())
    }

    /// [`Self::discover`] reading `PAGEKIT_CONFIG` and the overrides from
    /// `lookup`
    ///
    /// # Errors
    ///
    /// Load or override errors
    pub fn discover_with<F>(lookup: F) -> UiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };
        base.with_overrides(lookup)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
