//! Strongly typed entity identifiers.
//!
//! Ids are handed out sequentially by the managers that create the entities,
//! so they double as a spawn counter and give a stable, deterministic order.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The id following `self` in spawn order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// A pedestrian, numbered from 0 in spawn order.
    pub struct PedId(u64);
}

typed_id! {
    /// An automobile, numbered from 0 in spawn order.
    pub struct CarId(u64);
}
