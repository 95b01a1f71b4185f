use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://ijgapis-soci.onrender.com/api";
pub const DEFAULT_SESSION_FILE: &str = ".ijg-session.json";
pub const DEFAULT_CALENDAR_FILE: &str = "calendar.json";

pub const API_URL_ENV: &str = "IJG_API_URL";
pub const SESSION_FILE_ENV: &str = "IJG_SESSION_FILE";
pub const CALENDAR_FILE_ENV: &str = "IJG_CALENDAR_FILE";

/// Where the console talks to and where it keeps its local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub calendar_file: PathBuf,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            calendar_file: PathBuf::from(DEFAULT_CALENDAR_FILE),
        }
    }
}

impl AdminConfig {
    /// Defaults overridden by `IJG_API_URL`, `IJG_SESSION_FILE` and
    /// `IJG_CALENDAR_FILE` when set and non-empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: non_empty_var(API_URL_ENV).unwrap_or(defaults.api_url),
            session_file: non_empty_var(SESSION_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            calendar_file: non_empty_var(CALENDAR_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.calendar_file),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Base URL with any trailing slash removed, ready for `{base}{endpoint}`.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
