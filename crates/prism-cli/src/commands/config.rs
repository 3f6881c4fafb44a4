use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::session::SessionFile;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the session to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a default session file as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let session = SessionFile::example();
    let toml_str = toml::to_string_pretty(&session)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;
        println!("Default session saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
