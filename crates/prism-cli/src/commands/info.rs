use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use prism_core::io::frames::load_rgb_frame;

#[derive(Args)]
pub struct InfoArgs {
    /// Frame image files
    pub frames: Vec<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    for path in &args.frames {
        let frame = load_rgb_frame(path)?;
        println!(
            "{}: {}x{} ({} px)",
            path.display(),
            frame.width(),
            frame.height(),
            frame.width() * frame.height()
        );
    }
    Ok(())
}
