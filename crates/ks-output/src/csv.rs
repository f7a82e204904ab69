//! CSV event log.
//!
//! Appends to `<label>.events.csv` in the configured output directory, one
//! row per lifecycle event.  Successive runs with the same label share the
//! file; the header is written once, when the file is created.  Callers mark
//! run boundaries with [`CsvEventWriter::write_note`]:
//!
//! ```text
//! time_secs,event,subject,order,courier,detail
//! 0.0,RUN CONFIG,run,,,"{""orders_per_second"":2,...}"
//! 0.0,ORDER RECEIVED,order#0,0,,a8cfcb76 Banana Bread
//! 0.0,COURIER DISPATCHED,courier#0,0,0,delay=7.412s
//! ...
//! 9.731,RUN RESULTS,run,,,delivered=2/2 avg_order_wait=1.2040s avg_courier_wait=0.8720s
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use ks_core::{Event, EventSink, SimTime};

use crate::{EventRow, OutputError, OutputResult};

/// Writes the event stream of one run to a CSV file.
///
/// Errors from the writer are stored internally because
/// [`EventSink::record`] has no return value.  After the run, check for
/// errors with [`take_error`][Self::take_error].
pub struct CsvEventWriter {
    path:       PathBuf,
    events:     Writer<File>,
    rows:       u64,
    finished:   bool,
    last_error: Option<OutputError>,
}

impl CsvEventWriter {
    /// Create `dir` if needed and open `<label>.events.csv` for appending.
    /// The header row is written only when the file is new or empty.
    pub fn new(dir: &Path, label: &str) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{label}.events.csv"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let fresh = file.metadata()?.len() == 0;

        let mut events = WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            events.write_record(EventRow::HEADER)?;
        }

        Ok(Self {
            path,
            events,
            rows: 0,
            finished: false,
            last_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written so far, excluding the header.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Append one event.
    pub fn write_event(&mut self, event: &Event) -> OutputResult<()> {
        self.events.serialize(EventRow::from(event))?;
        self.rows += 1;
        Ok(())
    }

    /// Append a run-level row such as the run's configuration or its final
    /// averages.  Written through immediately, so it may follow [`flush`][Self::flush].
    /// Not counted in [`rows`][Self::rows].
    pub fn write_note(&mut self, at: SimTime, label: &'static str, detail: impl Into<String>) -> OutputResult<()> {
        self.events.serialize(EventRow::note(at, label, detail.into()))?;
        self.events.flush()?;
        Ok(())
    }

    /// Flush the file.  Later calls are no-ops.
    pub fn flush(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        log::debug!("wrote {} events to {}", self.rows, self.path.display());
        Ok(())
    }

    /// Take the stored write error (if any) after the run.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                log::warn!("event log {}: {e}", self.path.display());
                self.last_error = Some(e);
            }
        }
    }
}

impl EventSink for CsvEventWriter {
    fn record(&mut self, event: &Event) {
        let result = self.write_event(event);
        self.store_err(result);
    }

    fn finish(&mut self) {
        let result = self.flush();
        self.store_err(result);
    }
}
