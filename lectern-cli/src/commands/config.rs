//! Config command for inspecting the effective configuration

use anyhow::Result;
use clap::Args;

use crate::config::{ConfigLoader, LecternConfig};

/// Arguments for the config command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print the user config file path instead of the configuration
    #[arg(long)]
    pub path: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        match ConfigLoader::user_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("no user config directory available"),
        }
        return Ok(());
    }

    let config: LecternConfig = ConfigLoader::load()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
