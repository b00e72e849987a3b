#![no_std] // Shared by every crate of the workspace, no allocation beyond alloc

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod complement;
pub mod ids;
pub mod record;
pub mod signature;

// Re-export core types for convenience
pub use complement::{ComplementClass, InvalidClassCode, Preposition, PREPOSITIONS};
pub use ids::{SentenceId, WordId};
pub use record::{Edge, SentenceRecord};
pub use signature::Signature;
