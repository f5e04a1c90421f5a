use super::constants::*;
use crate::models::Tab;

pub(crate) fn greeting() -> String {
    GREETING_MESSAGE.to_string()
}

pub(crate) fn base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

pub(crate) fn auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}

pub(crate) fn session_file_path() -> String {
    SESSION_FILE_PATH.to_string()
}

pub(crate) fn tabs() -> Vec<Tab> {
    Tab::all().to_vec()
}

pub(crate) fn default_true() -> bool {
    true
}
