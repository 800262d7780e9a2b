//! Arena handles.
//!
//! All three are plain indices into arenas owned by a
//! [`Function`](crate::Function). They are `Copy` and never own what they
//! point at, so blocks and instructions may reference each other in any
//! direction.

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Create an ID from a `Vec` position.
            ///
            /// # Panics
            ///
            /// Panics if `index` exceeds `u32::MAX`.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                Self(
                    u32::try_from(index)
                        .unwrap_or_else(|_| panic!("{} exceeds u32::MAX", stringify!($name))),
                )
            }
        }
    };
}

arena_id!(
    /// Basic block within a function, in definition order.
    BlockId
);

arena_id!(
    /// Instruction within a function's instruction arena.
    InstId
);

arena_id!(
    /// Function parameter position.
    ParamId
);
