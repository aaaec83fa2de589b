//! Non-fatal problems found while decoding.

use std::fmt;

use mc_schem_world::BlockVector3;
use tracing::warn;

/// Something in the input that was skipped. The decode still succeeds.
///
/// Positions are relative to the schematic's minimum corner, as stored in
/// the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No modern state exists for a legacy id/data pair; the cell is empty.
    UnknownBlock {
        id: u16,
        data: u8,
        position: BlockVector3,
    },
    /// An entity whose type is not registered; it was omitted.
    UnknownEntity { id: String },
    /// A tile entity positioned outside the volume; it was dropped.
    TileEntityOutOfBounds { position: BlockVector3 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlock { id, data, position } => {
                write!(f, "unknown block {id}:{data} at {position}")
            }
            Self::UnknownEntity { id } => write!(f, "unknown entity '{id}'"),
            Self::TileEntityOutOfBounds { position } => {
                write!(f, "tile entity at {position} lies outside the schematic")
            }
        }
    }
}

/// Logs every diagnostic and optionally keeps them for the caller.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    collected: Option<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    pub(crate) fn logging() -> Self {
        Self { collected: None }
    }

    pub(crate) fn collecting() -> Self {
        Self {
            collected: Some(Vec::new()),
        }
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        warn!("Schematic: {diagnostic}");
        if let Some(collected) = &mut self.collected {
            collected.push(diagnostic);
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.collected.unwrap_or_default()
    }
}
