use ks_core::{CourierId, OrderId};
use thiserror::Error;

use crate::CourierState;

#[derive(Debug, Error)]
pub enum ModelError {
    /// An operation that needs a non-empty queue found it empty.  Callers are
    /// expected to check the matching predicate first.
    #[error("queue {0} is empty")]
    EmptyQueue(&'static str),

    /// An average was requested over zero records.
    #[error("no {0} to average")]
    NoData(&'static str),

    #[error("{0} ids exhausted")]
    IdsExhausted(&'static str),

    #[error("{0} is not in preparation")]
    UnknownOrder(OrderId),

    #[error("{0} was never dispatched")]
    UnknownCourier(CourierId),

    #[error("{courier} cannot take an order while {state:?}")]
    CourierUnavailable {
        courier: CourierId,
        state:   CourierState,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
