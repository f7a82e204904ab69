use ks_core::CoreError;
use ks_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("scheduler error: {0}")]
    Engine(#[from] EngineError),

    /// The workload parsed but describes an impossible order.
    #[error("invalid workload: {0}")]
    Workload(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
