use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Tab;

use super::constants::{
    DEFAULT_AUTH_URL, DEFAULT_BASE_URL, GREETING_MESSAGE, LOG_FILE_PATH, SESSION_FILE_PATH,
    THEME_NAME,
};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub features: FeaturesConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "greeting")]
    pub greeting: String,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub folder_path: Option<String>,
}

/// Where the chatbot and the auth service live. Deployments differ, so
/// neither URL is compiled in beyond its default.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    #[serde(default = "base_url")]
    pub base_url: String,

    #[serde(default = "auth_url")]
    pub auth_url: String,

    #[serde(default)]
    pub timeout_secs: Option<u16>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FeaturesConfig {
    #[serde(default = "default_true")]
    pub enhance_context: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ShellConfig {
    #[serde(default = "tabs")]
    pub tabs: Vec<Tab>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SessionConfig {
    #[serde(default = "session_file_path")]
    pub path: String,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(|secs| Duration::from_secs(secs as u64))
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            greeting: GREETING_MESSAGE.to_string(),
            verbose: false,
            show_timestamps: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: Some(THEME_NAME.to_string()),
            folder_path: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            enhance_context: true,
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            tabs: Tab::all().to_vec(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: SESSION_FILE_PATH.to_string(),
        }
    }
}
