//! In-memory block volume produced by decoding a structure file.

use crate::block::BaseBlock;
use crate::entity::BaseEntity;
use crate::math::{BlockVector3, CuboidRegion, Location};

/// An entity placed in a clipboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardEntity {
    pub location: Location,
    pub entity: BaseEntity,
}

/// A cuboid of optional blocks plus the entities inside it.
///
/// Blocks are stored flat in the region's `y`, `z`, `x` order; a `None`
/// cell has never been written.
#[derive(Debug, Clone)]
pub struct Clipboard {
    region: CuboidRegion,
    origin: BlockVector3,
    blocks: Vec<Option<BaseBlock>>,
    entities: Vec<ClipboardEntity>,
}

impl Clipboard {
    /// An empty clipboard over `region`, with its origin at the minimum corner.
    pub fn new(region: CuboidRegion) -> Self {
        Self {
            region,
            origin: region.minimum_point(),
            blocks: vec![None; region.volume()],
            entities: Vec::new(),
        }
    }

    pub fn region(&self) -> &CuboidRegion {
        &self.region
    }

    /// The paste anchor. Not necessarily inside the region.
    pub fn origin(&self) -> BlockVector3 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: BlockVector3) {
        self.origin = origin;
    }

    pub fn dimensions(&self) -> BlockVector3 {
        self.region.dimensions()
    }

    /// The block at an absolute position, `None` if unset or outside the region.
    pub fn block(&self, pos: BlockVector3) -> Option<&BaseBlock> {
        self.region
            .index_of(pos)
            .and_then(|i| self.blocks[i].as_ref())
    }

    /// Store a block. Returns `false` (and stores nothing) if `pos` is
    /// outside the region.
    pub fn set_block(&mut self, pos: BlockVector3, block: BaseBlock) -> bool {
        match self.region.index_of(pos) {
            Some(i) => {
                self.blocks[i] = Some(block);
                true
            }
            None => false,
        }
    }

    pub fn create_entity(&mut self, location: Location, entity: BaseEntity) {
        self.entities.push(ClipboardEntity { location, entity });
    }

    pub fn entities(&self) -> &[ClipboardEntity] {
        &self.entities
    }

    /// All set blocks with their absolute positions, in storage order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (BlockVector3, &BaseBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (self.region.position_of(i), b)))
    }

    /// Number of cells holding a block.
    pub fn block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_some()).count()
    }
}
