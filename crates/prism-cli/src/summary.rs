use console::Style;

use crate::session::SessionFile;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    warn: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow().bold(),
        }
    }
}

pub fn print_session_summary(session: &SessionFile) {
    let s = Styles::new();
    let rb = &session.reader_box;

    println!();
    println!("  {}", s.title.apply_to("Prism Session"));
    println!(
        "  {:<14}({:.3}, {:.3}) -> ({:.3}, {:.3})",
        s.label.apply_to("Reader box"),
        rb.low.x,
        rb.low.y,
        rb.high.x,
        rb.high.y
    );
    println!(
        "  {:<14}{:.3}  {}  {:.1} deg",
        s.label.apply_to("Width"),
        rb.width,
        s.label.apply_to("angle"),
        rb.angle_degrees()
    );
    println!(
        "  {:<14}{:?}",
        s.label.apply_to("Reduce"),
        session.pipeline.reduce
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Calibration"),
        s.value.apply_to(format!("{} points", session.calibration.len()))
    );
    for point in &session.calibration {
        println!(
            "  {:<14}{:.3} -> {:.1} nm",
            "",
            point.position,
            point.wavelength
        );
    }
    println!();
}

pub fn print_process_summary(processed: usize, skipped: usize, oversaturated: bool) {
    let s = Styles::new();

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(processed)
    );
    if skipped > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Skipped"),
            s.warn.apply_to(skipped)
        );
    }
    if oversaturated {
        println!(
            "  {}",
            s.warn
                .apply_to("Warning: signal oversaturated, lower the exposure")
        );
    }
    println!();
}
