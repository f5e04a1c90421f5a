use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A terminal client for the ResQ AI emergency care assistant

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/resq/config.toml
    * $HOME/.config/resq/config.toml
    * $HOME/.resq.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    /// Forget the stored session and exit
    #[arg(long)]
    logout: bool,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = match self.config.as_deref() {
            Some(path) => PathBuf::from(path),
            None => match lookup_config_path() {
                Some(path) => path,
                None => return Ok(Configuration::default()),
            },
        };
        load_configuration(&config_path)
            .wrap_err_with(|| format!("loading configuration {}", config_path.display()))
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn logout(&self) -> bool {
        self.logout
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }
}
