//! Reader for legacy MCEdit "Alpha" schematics.
//!
//! Decodes the NBT tree, rebuilds 12-bit legacy block ids, maps them to
//! modern block states and runs compatibility rules over tile entities and
//! entities before filling a [`Clipboard`](mc_schem_world::Clipboard).

pub mod compat;
pub mod diagnostic;
pub mod error;
pub mod ids;
pub mod reader;
pub mod rename;

pub use compat::{BlockCompatibilityRule, CompatibilityPipeline, EntityCompatibilityRule};
pub use diagnostic::Diagnostic;
pub use error::SchematicError;
pub use reader::SchematicReader;
