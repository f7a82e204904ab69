//! Workload loading.
//!
//! A workload is a JSON array of order descriptors:
//!
//! ```json
//! [
//!   { "id": "a8cfcb76-7f24-4420-a5ba-d46dd77bdffd", "name": "Banana Bread", "prepTime": 4 },
//!   { "id": "58e9b5fe-3fde-4a27-8e98-682e58a4a65d", "name": "McFlury", "prepTime": 14 }
//! ]
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ks_model::OrderSpec;

use crate::{SimError, SimResult};

/// Load and validate a workload file.
pub fn load_workload_json(path: impl AsRef<Path>) -> SimResult<Vec<OrderSpec>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let orders = load_workload_reader(BufReader::new(file))?;
    log::info!("loaded {} orders from {}", orders.len(), path.display());
    Ok(orders)
}

/// Parse and validate a workload from any reader.
///
/// Every `prepTime` must be finite and non-negative.  Repeated ids are
/// accepted with a warning: the kitchen numbers orders itself.
pub fn load_workload_reader<R: Read>(reader: R) -> SimResult<Vec<OrderSpec>> {
    let orders: Vec<OrderSpec> = serde_json::from_reader(reader)?;

    let mut seen = HashSet::with_capacity(orders.len());
    for (i, order) in orders.iter().enumerate() {
        if !order.prep_time.is_finite() || order.prep_time < 0.0 {
            return Err(SimError::Workload(format!(
                "order {i} ({:?}): prepTime {} is not a finite number >= 0",
                order.id, order.prep_time
            )));
        }
        if !seen.insert(order.id.as_str()) {
            log::warn!("order {i}: id {:?} appears more than once", order.id);
        }
    }
    Ok(orders)
}
