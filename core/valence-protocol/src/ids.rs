#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        #[repr(transparent)] // Ensure it has the same layout as u32
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(SentenceId, "Unique identifier for a parsed sentence in the corpus.");
define_id!(WordId, "Identifier of a token inside one sentence; doubles as the dependency-tree vertex id.");
