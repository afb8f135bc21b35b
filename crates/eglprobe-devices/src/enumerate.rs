//! The sequential per-device run loop.

use std::io::Write;

use anyhow::{Context, Result};

use crate::diag::parse_device_count;
use crate::helper::Launcher;

/// Builds the helper if needed, discovers the device count, then runs the
/// helper once per device index in order.
///
/// Report lines go to `out`; the helper's own stdout is inherited by the
/// child, so `out` is flushed before every launch to keep the two in order.
/// Returns the number of devices.
pub fn enumerate_devices<L, W>(launcher: &mut L, out: &mut W) -> Result<usize>
where
    L: Launcher + ?Sized,
    W: Write + ?Sized,
{
    if !launcher.artifact_exists() {
        launcher.build();
    }

    writeln!(out, "----------Default-------------")?;
    out.flush()?;

    let diagnostic = launcher.discover()?;
    log::info!("helper diagnostic: {}", diagnostic.trim_end());

    let count = parse_device_count(&diagnostic)
        .with_context(|| format!("cannot read device count from {diagnostic:?}"))?;
    writeln!(out, "number of EGL devices: {count}")?;

    for index in 0..count {
        writeln!(out, "----------Option #{} (id={})-------------", index + 1, index)?;
        out.flush()?;

        launcher.run_device(index)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(count)
}
