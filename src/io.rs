//! Plot-data export: CSV files written atomically (temp file + rename) so a
//! half-finished run never leaves a torn file behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

fn atomic_write(dest: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    let (_file, tmp_path) = tmp.keep()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

/// Write the correlation trace as `offset_bins,correlation` rows.
pub fn export_correlation_csv(
    dest: &Path,
    time_points: &[i64],
    trace: &[f64],
) -> io::Result<()> {
    let mut out = String::with_capacity(trace.len() * 16 + 32);
    out.push_str("offset_bins,correlation\n");
    for (t, c) in time_points.iter().zip(trace) {
        out.push_str(&format!("{t},{c}\n"));
    }
    atomic_write(dest, out.as_bytes())
}

/// Write the detection events as `time_ps,count` rows (one bin per row).
pub fn export_counts_csv(dest: &Path, counts: &[bool], time_bin_ps: f64) -> io::Result<()> {
    let mut out = String::with_capacity(counts.len() * 12 + 16);
    out.push_str("time_ps,count\n");
    for (i, &fired) in counts.iter().enumerate() {
        out.push_str(&format!("{},{}\n", i as f64 * time_bin_ps, u8::from(fired)));
    }
    atomic_write(dest, out.as_bytes())
}
