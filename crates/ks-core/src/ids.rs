//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and in
//! ordered collections.  Ids are handed out sequentially by their owner
//! (`Kitchen` for orders, `Delivery` for couriers, `Scheduler` for processes
//! and pools), so the inner integer doubles as an arena index via `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id following `self` in allocation order.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Kitchen-assigned order identifier, unique within one run even when the
    /// workload repeats an external id.
    pub struct OrderId(u32) => "order";
}

typed_id! {
    /// Courier identifier, generated at dispatch.
    pub struct CourierId(u32) => "courier";
}

typed_id! {
    /// Handle of a process spawned on the scheduler.
    pub struct ProcessId(u32) => "process";
}

typed_id! {
    /// Handle of a capacity-bounded resource pool.
    pub struct PoolId(u16) => "pool";
}
