//! JSON run reports.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::OutputResult;

/// Write `report` (a `RunReport`, a slice of them, a summary…) to `path` as
/// pretty-printed JSON, creating parent directories as needed.
pub fn write_report_json<T>(path: &Path, report: &T) -> OutputResult<()>
where
    T: Serialize + ?Sized,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, report)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
