use std::error::Error as StdError;

use ks_core::{PoolId, ProcessId};
use thiserror::Error;

use crate::ResourceToken;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0} does not exist")]
    UnknownPool(PoolId),

    #[error("{0} is not registered with the scheduler")]
    UnknownProcess(ProcessId),

    #[error("release of {0} which is not held")]
    InvalidRelease(ResourceToken),

    /// A process resumed after `Yield::Acquire` found no token to take.
    #[error("{0} resumed without a pool grant")]
    MissingGrant(ProcessId),

    /// More pools or processes than the id type can number.
    #[error("{0} ids exhausted")]
    IdsExhausted(&'static str),

    #[error("process {name} failed: {source}")]
    Process {
        name:   &'static str,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl EngineError {
    /// Wrap a domain error raised inside a process step.
    pub fn process<E>(name: &'static str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        EngineError::Process { name, source: Box::new(source) }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
