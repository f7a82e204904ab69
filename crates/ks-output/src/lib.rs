//! `ks-output`: run output writers for the kitchen_sim workspace.
//!
//! | Writer                | Files created             | Contents                          |
//! |-----------------------|---------------------------|-----------------------------------|
//! | [`CsvEventWriter`]    | `<label>.events.csv`      | one row per lifecycle event       |
//! | [`write_report_json`] | any path                  | `RunReport`(s), pretty JSON       |
//!
//! [`CsvEventWriter`] implements `ks_core::EventSink`, so it plugs straight
//! into `Simulation::run`, alone or paired with a `LogSink`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ks_output::{CsvEventWriter, write_report_json};
//!
//! let mut events = CsvEventWriter::new(Path::new("./logs"), "pooled")?;
//! let outcome = sim.run(&orders, &mut events)?;
//! if let Some(e) = events.take_error() {
//!     eprintln!("event log error: {e}");
//! }
//! write_report_json(Path::new("./logs/pooled.report.json"), &outcome.report)?;
//! ```

pub mod csv;
pub mod error;
pub mod json;
pub mod row;


pub use self::csv::CsvEventWriter;
pub use error::{OutputError, OutputResult};
pub use json::write_report_json;
pub use row::EventRow;
