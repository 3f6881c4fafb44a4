use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use prism_core::io::frames::load_rgb_frame;
use prism_core::pipeline::{Session, TickOutput};

use crate::csv;
use crate::session::SessionFile;
use crate::summary::{print_process_summary, print_session_summary};

#[derive(Args)]
pub struct ProcessArgs {
    /// Frame image files, in capture order
    #[arg(required = true)]
    pub frames: Vec<PathBuf>,

    /// Session file (TOML)
    #[arg(long)]
    pub session: PathBuf,

    /// Output CSV for the intensity chart
    #[arg(short, long, default_value = "spectrum.csv")]
    pub output: PathBuf,

    /// Reference spectrum CSV; enables transmittance/absorbance output
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Save the last sampled strip as PNG
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

pub fn run(args: &ProcessArgs) -> Result<()> {
    let session_file = SessionFile::load(&args.session)?;
    print_session_summary(&session_file);
    info!(frames = args.frames.len(), "processing frame sequence");

    let mut session = Session::new(session_file.pipeline.clone());
    *session.calibration_mut() = session_file.calibration();

    if let Some(ref path) = args.reference {
        let chart = csv::read_chart(path)?;
        let key = session.store_mut().record("reference", chart);
        session.store_mut().set_reference(key);
    }

    let pb = ProgressBar::new(args.frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Processing [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut last: Option<TickOutput> = None;
    let mut processed = 0usize;
    let mut skipped = 0usize;
    for path in &args.frames {
        let frame = load_rgb_frame(path)
            .with_context(|| format!("Failed to load frame {}", path.display()))?;
        match session.process_frame(&frame, &session_file.reader_box)? {
            Some(output) => {
                last = Some(output);
                processed += 1;
            }
            None => skipped += 1,
        }
        pb.inc(1);
    }
    pb.finish();

    let Some(output) = last else {
        bail!("No frame produced output; check the reader box against the frame bounds");
    };
    let Some(ref intensity) = output.intensity else {
        match session.calibration_status() {
            Err(reason) => bail!("No chart produced: {reason}"),
            Ok(()) => bail!("No chart produced"),
        }
    };

    csv::write_chart(&args.output, intensity)?;
    println!("Intensity chart saved to {}", args.output.display());

    if let Some(ref transmittance) = output.transmittance {
        let path = sibling_chart_path(&args.output, "transmittance");
        csv::write_chart(&path, transmittance)?;
        println!("Transmittance chart saved to {}", path.display());
    }
    if let Some(ref absorbance) = output.absorbance {
        let path = sibling_chart_path(&args.output, "absorbance");
        csv::write_chart(&path, absorbance)?;
        println!("Absorbance chart saved to {}", path.display());
    }

    if let (Some(path), Some(png)) = (&args.preview, &output.preview_png) {
        std::fs::write(path, png)
            .with_context(|| format!("Failed to write preview to {}", path.display()))?;
        println!("Preview saved to {}", path.display());
    }

    print_process_summary(processed, skipped, output.oversaturated);
    Ok(())
}

/// `spectrum.csv` -> `spectrum_transmittance.csv` next to it.
fn sibling_chart_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "spectrum".into());
    output.with_file_name(format!("{stem}_{suffix}.csv"))
}
