#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::Local;
use eyre::{Context, Result};
use log::LevelFilter;
use regex::{Captures, Regex};
use syntect::highlighting::{Theme, ThemeSet};

use super::constants::{LOG_ENV, THEME_NAME};
use super::{Configuration, LogConfig, ThemeConfig};

pub fn load_configuration(config_path: impl AsRef<Path>) -> Result<Configuration> {
    let config_path = config_path.as_ref();
    let config = std::fs::read_to_string(config_path)
        .wrap_err_with(|| format!("reading {}", config_path.display()))?;
    parse_configuration(&config)
}

pub fn parse_configuration(raw: &str) -> Result<Configuration> {
    let config: Configuration = toml::from_str(raw).wrap_err("parsing configuration")?;
    if config.api.base_url.trim().is_empty() {
        eyre::bail!("api.base_url must not be empty");
    }
    if config.shell.tabs.is_empty() {
        eyre::bail!("shell.tabs must list at least one tab");
    }
    Ok(config)
}

/// Logs go to a file since the terminal belongs to the UI. `RESQ_LOG`
/// takes precedence over the configured level and filters.
pub fn init_logger(config: &LogConfig) -> Result<()> {
    let path = resolve_path(&config.file.path)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("creating log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.file.append)
        .truncate(!config.file.append)
        .open(&path)
        .wrap_err_with(|| format!("opening log file {}", path.display()))?;

    let level = parse_level(config.level.as_deref())?;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    for filter in config.filters.iter().flatten() {
        let module_level = match filter.level.as_deref() {
            Some(raw) => parse_level(Some(raw))?,
            None => level,
        };
        builder.filter(filter.module.as_deref(), module_level);
    }
    builder.parse_env(env_logger::Env::new().filter(LOG_ENV));

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}:{} {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("installing logger")
}

/// A missing level means `info`.
pub fn parse_level(raw: Option<&str>) -> Result<LevelFilter> {
    let raw = raw.unwrap_or("info");
    LevelFilter::from_str(raw.trim()).wrap_err_with(|| format!("unknown log level {raw:?}"))
}

/// Loads the bundled themes plus any found in `theme.folder_path`. An
/// unknown theme name falls back to the bundled default.
pub fn init_theme(config: &ThemeConfig) -> Result<Theme> {
    let mut themes = ThemeSet::load_defaults();
    if let Some(folder) = config.folder_path.as_deref() {
        let folder = resolve_path(folder)?;
        themes
            .add_from_folder(&folder)
            .wrap_err_with(|| format!("loading themes from {}", folder.display()))?;
    }

    let name = config.name.as_deref().unwrap_or(THEME_NAME);
    if let Some(theme) = themes.themes.remove(name) {
        return Ok(theme);
    }
    log::warn!("theme {name:?} not found, using {THEME_NAME}");
    themes
        .themes
        .remove(THEME_NAME)
        .ok_or_else(|| eyre::eyre!("bundled theme {THEME_NAME} is missing"))
}

/// Expands `$VAR`, `${VAR}` and a leading `~/`, then makes the path
/// absolute. Unset variables expand to nothing.
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    let vars = Regex::new(r"\$\{(\w+)\}|\$(\w+)").wrap_err("compiling path pattern")?;
    let expanded = vars.replace_all(raw, |caps: &Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        std::env::var(name).unwrap_or_default()
    });

    let path = match (expanded.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(expanded.as_ref()),
    };
    std::path::absolute(&path).wrap_err_with(|| format!("resolving path {raw}"))
}

/// The first existing file among:
/// * $XDG_CONFIG_HOME/resq/config.toml
/// * $HOME/.config/resq/config.toml
/// * $HOME/.resq.toml
pub fn lookup_config_path() -> Option<PathBuf> {
    config_candidates().into_iter().find(|path| path.is_file())
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        candidates.push(Path::new(&xdg).join("resq").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        let home = Path::new(&home);
        candidates.push(home.join(".config").join("resq").join("config.toml"));
        candidates.push(home.join(".resq.toml"));
    }
    candidates
}
