use std::path::Path;

use anyhow::{Context, Result};

use prism_core::spectrum::ChartPoint;

/// Write a chart as `position,wavelength,value` rows.
pub fn write_chart(path: &Path, chart: &[ChartPoint]) -> Result<()> {
    let mut out = String::from("position,wavelength,value\n");
    for point in chart {
        out.push_str(&format!(
            "{:.6},{:.3},{:.6}\n",
            point.position, point.wavelength, point.y
        ));
    }
    std::fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a chart written by [`write_chart`] (header line optional).
pub fn read_chart(path: &Path) -> Result<Vec<ChartPoint>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut chart = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("position") {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 3 {
            anyhow::bail!(
                "{}:{}: expected 3 fields, got {}",
                path.display(),
                lineno + 1,
                fields.len()
            );
        }
        let parse = |s: &str| -> Result<f64> {
            s.trim()
                .parse()
                .with_context(|| format!("{}:{}: bad number {s:?}", path.display(), lineno + 1))
        };
        chart.push(ChartPoint {
            position: parse(fields[0])?,
            wavelength: parse(fields[1])?,
            y: parse(fields[2])?,
        });
    }
    Ok(chart)
}
