use anyhow::Result;
use env_logger::{Builder, Env};
use log::info;

use learngl::interface::cli::{self, Command, ConfigError};
use learngl::interface::window;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let command = match cli::parse() {
        Ok(command) => command,
        Err(ConfigError::Clap(e)) => e.exit(),
        Err(e) => return Err(e.into()),
    };

    match command {
        Command::Run(config) => {
            info!("Opening a {}x{} window", config.width, config.height);
            window::run(config)?;
        }
        Command::Check { vertex, fragment } => window::check(&vertex, &fragment)?,
    }

    Ok(())
}
