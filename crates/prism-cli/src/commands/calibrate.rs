use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;

use crate::session::SessionFile;

#[derive(Args)]
pub struct CalibrateArgs {
    /// Session file (TOML)
    #[arg(long)]
    pub session: PathBuf,

    /// Number of sample positions to print across [0, 1]
    #[arg(long, default_value = "11")]
    pub samples: usize,
}

/// Validate the session's calibration and print the wavelength map.
pub fn run(args: &CalibrateArgs) -> Result<()> {
    let session = SessionFile::load(&args.session)?;
    let calibration = session.calibration();

    match calibration.solve() {
        Ok(map) => {
            println!("{}", Style::new().green().apply_to("Calibration valid"));
            let steps = args.samples.max(2);
            for i in 0..steps {
                let x = i as f64 / (steps - 1) as f64;
                println!("  {:.3} -> {:.1} nm", x, map.wavelength(x));
            }
        }
        Err(reason) => {
            println!(
                "{} {}",
                Style::new().red().apply_to("Calibration invalid:"),
                reason
            );
        }
    }

    Ok(())
}
