//! Decoder for MCEdit / pre-1.13 WorldEdit `.schematic` files.
//!
//! The file is a single NBT compound named `Schematic` holding the volume as
//! flat `Blocks`/`Data` arrays of legacy ids, plus optional `AddBlocks`
//! high nibbles, tile entities and entities.

use std::collections::HashMap;
use std::io::Read;

use mc_schem_nbt::{read_nbt_from, CompoundExt, ListExt, NbtCompound, NbtRoot, NbtTag};
use mc_schem_world::{
    BaseEntity, BlockState, BlockVector3, Clipboard, CuboidRegion, Location, Registries,
};
use tracing::debug;

use crate::compat::CompatibilityPipeline;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::SchematicError;
use crate::ids::{flat_index, reconstruct_ids};
use crate::rename::{convert_block_entity_id, convert_entity_id};

const ROOT_NAME: &str = "Schematic";
const SUPPORTED_MATERIALS: &str = "Alpha";

/// Reads one schematic from a byte stream (raw or gzip-compressed).
///
/// Reading consumes the decoder, so the stream is dropped on every exit
/// path, including failures.
pub struct SchematicReader<R> {
    input: R,
    registries: Registries,
    pipeline: CompatibilityPipeline,
}

/// Dimensions and placement taken from the schematic header.
#[derive(Debug, Clone, Copy)]
struct Metadata {
    width: usize,
    height: usize,
    length: usize,
    region: CuboidRegion,
    origin: BlockVector3,
}

impl Metadata {
    fn volume(&self) -> usize {
        self.width * self.height * self.length
    }

    fn contains(&self, pos: BlockVector3) -> bool {
        (0..self.width as i64).contains(&i64::from(pos.x))
            && (0..self.height as i64).contains(&i64::from(pos.y))
            && (0..self.length as i64).contains(&i64::from(pos.z))
    }

    fn index_of(&self, pos: BlockVector3) -> usize {
        flat_index(
            pos.x as usize,
            pos.y as usize,
            pos.z as usize,
            self.width,
            self.length,
        )
    }
}

/// Per-cell legacy ids and data nibbles, validated against the volume.
struct LegacyBlocks {
    ids: Vec<u16>,
    data: Vec<u8>,
}

impl LegacyBlocks {
    fn at(&self, index: usize) -> (u16, u8) {
        (self.ids[index], self.data[index])
    }
}

/// Tile-entity payloads and pipeline overrides keyed by relative position.
#[derive(Default)]
struct TileEntities {
    payloads: HashMap<BlockVector3, NbtCompound>,
    overrides: HashMap<BlockVector3, BlockState>,
}

impl<R: Read> SchematicReader<R> {
    pub fn new(input: R, registries: Registries) -> Self {
        Self {
            input,
            registries,
            pipeline: CompatibilityPipeline::default(),
        }
    }

    /// Replace the default compatibility rules.
    pub fn with_pipeline(mut self, pipeline: CompatibilityPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Decode the stream. Skipped blocks and entities are logged.
    pub fn read(self) -> Result<Clipboard, SchematicError> {
        let (clipboard, _) = self.decode(DiagnosticSink::logging())?;
        Ok(clipboard)
    }

    /// Decode the stream and also return everything that was skipped.
    pub fn read_with_diagnostics(self) -> Result<(Clipboard, Vec<Diagnostic>), SchematicError> {
        self.decode(DiagnosticSink::collecting())
    }

    fn decode(
        self,
        mut sink: DiagnosticSink,
    ) -> Result<(Clipboard, Vec<Diagnostic>), SchematicError> {
        let Self {
            input,
            registries,
            pipeline,
        } = self;

        let schematic = expect_root(read_nbt_from(input)?)?;
        validate_schema(&schematic)?;

        let meta = extract_metadata(&schematic)?;
        debug!(
            "Schematic {}x{}x{} at {} (origin {})",
            meta.width,
            meta.height,
            meta.length,
            meta.region.minimum_point(),
            meta.origin
        );

        let blocks = reconstruct_blocks(&schematic, &meta)?;
        let tiles = collect_tile_entities(
            &schematic,
            &meta,
            &blocks,
            &registries,
            &pipeline,
            &mut sink,
        )?;
        debug!(
            "Collected {} tile entities, {} block overrides",
            tiles.payloads.len(),
            tiles.overrides.len()
        );

        let mut clipboard = Clipboard::new(meta.region);
        clipboard.set_origin(meta.origin);
        assemble_blocks(&mut clipboard, &meta, &blocks, tiles, &registries, &mut sink);
        assemble_entities(&mut clipboard, &schematic, &registries, &pipeline, &mut sink);
        debug!(
            "Decoded {} blocks and {} entities",
            clipboard.block_count(),
            clipboard.entities().len()
        );

        Ok((clipboard, sink.into_vec()))
    }
}

fn expect_root(root: NbtRoot) -> Result<NbtCompound, SchematicError> {
    if root.name != ROOT_NAME {
        return Err(SchematicError::UnexpectedRootName(root.name));
    }
    Ok(root.compound)
}

fn validate_schema(schematic: &NbtCompound) -> Result<(), SchematicError> {
    if !schematic.contains_key("Blocks") {
        return Err(SchematicError::MissingBlocks);
    }
    let materials = schematic.require_string("Materials")?;
    if materials != SUPPORTED_MATERIALS {
        return Err(SchematicError::UnsupportedMaterials(materials.to_string()));
    }
    Ok(())
}

fn extract_metadata(schematic: &NbtCompound) -> Result<Metadata, SchematicError> {
    let dimension = |axis: &'static str| -> Result<usize, SchematicError> {
        let value = schematic.require_short(axis)?;
        usize::try_from(value).map_err(|_| SchematicError::NegativeDimension { axis, value })
    };
    let width = dimension("Width")?;
    let height = dimension("Height")?;
    let length = dimension("Length")?;
    let size = BlockVector3::at(width as i32, height as i32, length as i32);

    // The WorldEdit placement group is all-or-nothing.
    let (region, origin) = match origin_group(schematic) {
        Some((min, offset)) => (CuboidRegion::new(min, size), min - offset),
        None => (CuboidRegion::new(BlockVector3::ZERO, size), BlockVector3::ZERO),
    };

    Ok(Metadata {
        width,
        height,
        length,
        region,
        origin,
    })
}

fn origin_group(schematic: &NbtCompound) -> Option<(BlockVector3, BlockVector3)> {
    let vector = |prefix: &str| -> Option<BlockVector3> {
        Some(BlockVector3::at(
            schematic.get_int(&format!("{prefix}X"))?,
            schematic.get_int(&format!("{prefix}Y"))?,
            schematic.get_int(&format!("{prefix}Z"))?,
        ))
    };
    Some((vector("WEOrigin")?, vector("WEOffset")?))
}

fn reconstruct_blocks(
    schematic: &NbtCompound,
    meta: &Metadata,
) -> Result<LegacyBlocks, SchematicError> {
    let ids = schematic.require_byte_array("Blocks")?;
    let data = schematic.require_byte_array("Data")?;
    let extension: &[i8] = if schematic.contains_key("AddBlocks") {
        schematic.require_byte_array("AddBlocks")?
    } else {
        &[]
    };

    let needed = meta.volume();
    for (key, len) in [("Blocks", ids.len()), ("Data", data.len())] {
        if len < needed {
            return Err(SchematicError::ArrayTooShort { key, len, needed });
        }
    }

    Ok(LegacyBlocks {
        ids: reconstruct_ids(ids, extension),
        data: data.iter().map(|&d| (d as u8) & 0x0F).collect(),
    })
}

fn collect_tile_entities(
    schematic: &NbtCompound,
    meta: &Metadata,
    blocks: &LegacyBlocks,
    registries: &Registries,
    pipeline: &CompatibilityPipeline,
    sink: &mut DiagnosticSink,
) -> Result<TileEntities, SchematicError> {
    let mut tiles = TileEntities::default();

    for tag in schematic.require_list("TileEntities")? {
        let Some(compound) = tag.as_compound() else {
            continue;
        };
        let pos = BlockVector3::at(
            compound.int_or_default("x"),
            compound.int_or_default("y"),
            compound.int_or_default("z"),
        );
        if !meta.contains(pos) {
            sink.report(Diagnostic::TileEntityOutOfBounds { position: pos });
            continue;
        }

        let mut values = compound.clone();
        let id = convert_block_entity_id(compound.string_or_default("id"));
        values.insert("id".to_string(), NbtTag::String(id));

        let (id, data) = blocks.at(meta.index_of(pos));
        if let Some(resolved) = registries.legacy.resolve(id, data) {
            if let Some(state) = pipeline.apply_block(resolved, &mut values, registries) {
                tiles.overrides.insert(pos, state);
            }
        }
        tiles.payloads.insert(pos, values);
    }

    Ok(tiles)
}

fn assemble_blocks(
    clipboard: &mut Clipboard,
    meta: &Metadata,
    blocks: &LegacyBlocks,
    mut tiles: TileEntities,
    registries: &Registries,
    sink: &mut DiagnosticSink,
) {
    let min = meta.region.minimum_point();
    for x in 0..meta.width {
        for y in 0..meta.height {
            for z in 0..meta.length {
                let pos = BlockVector3::at(x as i32, y as i32, z as i32);
                let (id, data) = blocks.at(flat_index(x, y, z, meta.width, meta.length));

                let state = match tiles.overrides.remove(&pos) {
                    Some(state) => state,
                    None => match registries.legacy.resolve(id, data) {
                        Some(state) => state.clone(),
                        None => {
                            sink.report(Diagnostic::UnknownBlock {
                                id,
                                data,
                                position: pos,
                            });
                            continue;
                        }
                    },
                };

                // Every (x, y, z) here lies inside the region.
                let block = state.to_base_block(tiles.payloads.remove(&pos));
                let placed = clipboard.set_block(min + pos, block);
                debug_assert!(placed, "{pos} outside schematic region");
            }
        }
    }
}

fn assemble_entities(
    clipboard: &mut Clipboard,
    schematic: &NbtCompound,
    registries: &Registries,
    pipeline: &CompatibilityPipeline,
    sink: &mut DiagnosticSink,
) {
    let Some(entities) = schematic.get_list("Entities") else {
        return;
    };

    for compound in entities.iter().filter_map(NbtTag::as_compound) {
        let id = convert_entity_id(compound.string_or_default("id"));
        if id.is_empty() {
            continue;
        }
        let Some(entity_type) = registries.entity_types.get(&id) else {
            sink.report(Diagnostic::UnknownEntity {
                id: id.to_lowercase(),
            });
            continue;
        };

        let pos = compound.list_or_empty("Pos");
        let rotation = compound.list_or_empty("Rotation");
        let location = Location::new(
            pos.double_at(0),
            pos.double_at(1),
            pos.double_at(2),
            rotation.float_at(0),
            rotation.float_at(1),
        );

        let nbt = pipeline.apply_entity(&entity_type, compound.clone());
        clipboard.create_entity(location, BaseEntity::new(entity_type, nbt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::BlockCompatibilityRule;
    use bytes::BytesMut;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use mc_schem_nbt::{write_nbt, NbtError};
    use mc_schem_world::LegacyMapper;
    use std::cell::Cell;
    use std::io::Write;
    use std::rc::Rc;
    use std::sync::Arc;

    fn schematic(size: (i16, i16, i16), blocks: Vec<i8>, data: Vec<i8>) -> NbtCompound {
        let mut c = NbtCompound::new();
        c.insert("Materials".into(), NbtTag::String("Alpha".into()));
        c.insert("Width".into(), NbtTag::Short(size.0));
        c.insert("Height".into(), NbtTag::Short(size.1));
        c.insert("Length".into(), NbtTag::Short(size.2));
        c.insert("Blocks".into(), NbtTag::ByteArray(blocks));
        c.insert("Data".into(), NbtTag::ByteArray(data));
        c.insert("TileEntities".into(), NbtTag::List(Vec::new()));
        c
    }

    fn compound(entries: Vec<(&str, NbtTag)>) -> NbtTag {
        NbtTag::Compound(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    fn encode_named(name: &str, c: NbtCompound) -> Vec<u8> {
        let mut buf = BytesMut::new();
        write_nbt(&mut buf, &NbtRoot::new(name, c));
        buf.to_vec()
    }

    fn encode(c: NbtCompound) -> Vec<u8> {
        encode_named("Schematic", c)
    }

    fn registries() -> Registries {
        Registries::bundled().unwrap()
    }

    fn decode(c: NbtCompound) -> Result<(Clipboard, Vec<Diagnostic>), SchematicError> {
        SchematicReader::new(encode(c).as_slice(), registries()).read_with_diagnostics()
    }

    #[test]
    fn single_block_roundtrip() {
        let (clip, diags) = decode(schematic((1, 1, 1), vec![1], vec![0])).unwrap();
        assert!(diags.is_empty());
        assert_eq!(clip.block_count(), 1);
        assert_eq!(clip.origin(), BlockVector3::ZERO);
        let block = clip.block(BlockVector3::ZERO).unwrap();
        assert_eq!(block.state, BlockState::new("minecraft:stone"));
        assert!(!block.has_nbt());
    }

    #[test]
    fn cells_follow_layered_layout() {
        // index = y*4 + z*2 + x
        let ids = vec![1, 2, 3, 4, 5, 7, 12, 13];
        let (clip, _) = decode(schematic((2, 2, 2), ids, vec![0; 8])).unwrap();
        let id_at = |x, y, z| {
            clip.block(BlockVector3::at(x, y, z))
                .unwrap()
                .state
                .path()
                .to_string()
        };
        assert_eq!(id_at(0, 0, 0), "stone");
        assert_eq!(id_at(1, 0, 0), "grass_block");
        assert_eq!(id_at(0, 0, 1), "dirt");
        assert_eq!(id_at(0, 1, 0), "oak_planks");
        assert_eq!(id_at(1, 1, 1), "gravel");
    }

    #[test]
    fn data_values_select_variants() {
        let (clip, _) = decode(schematic((1, 1, 1), vec![35], vec![0x11])).unwrap();
        assert_eq!(
            clip.block(BlockVector3::ZERO).unwrap().state.id(),
            "minecraft:orange_wool"
        );
    }

    struct DropFlag {
        inner: std::io::Cursor<Vec<u8>>,
        dropped: Rc<Cell<bool>>,
    }

    impl Read for DropFlag {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    #[test]
    fn missing_blocks_fails_and_closes_stream() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.remove("Blocks");
        let dropped = Rc::new(Cell::new(false));
        let input = DropFlag {
            inner: std::io::Cursor::new(encode(c)),
            dropped: dropped.clone(),
        };
        let reader = SchematicReader::new(input, registries());
        assert!(matches!(reader.read(), Err(SchematicError::MissingBlocks)));
        assert!(dropped.get());
    }

    #[test]
    fn partial_origin_falls_back_to_zero() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert("WEOriginX".into(), NbtTag::Int(100));
        let (clip, _) = decode(c).unwrap();
        assert_eq!(clip.origin(), BlockVector3::ZERO);
        assert_eq!(clip.region().minimum_point(), BlockVector3::ZERO);
        assert!(clip.block(BlockVector3::ZERO).is_some());
    }

    #[test]
    fn full_origin_group_places_region() {
        let mut c = schematic((2, 1, 1), vec![1, 4], vec![0, 0]);
        for (key, value) in [
            ("WEOriginX", 10),
            ("WEOriginY", 64),
            ("WEOriginZ", -5),
            ("WEOffsetX", -2),
            ("WEOffsetY", 0),
            ("WEOffsetZ", 3),
        ] {
            c.insert(key.into(), NbtTag::Int(value));
        }
        let (clip, _) = decode(c).unwrap();
        assert_eq!(clip.region().minimum_point(), BlockVector3::at(10, 64, -5));
        assert_eq!(clip.origin(), BlockVector3::at(12, 64, -8));
        assert_eq!(
            clip.block(BlockVector3::at(11, 64, -5)).unwrap().state.path(),
            "cobblestone"
        );
        assert!(clip.block(BlockVector3::at(1, 0, 0)).is_none());
    }

    #[test]
    fn extreme_origin_wraps() {
        let mut c = schematic((2, 1, 1), vec![1, 4], vec![0, 0]);
        for (key, value) in [
            ("WEOriginX", i32::MAX),
            ("WEOriginY", 0),
            ("WEOriginZ", 0),
            ("WEOffsetX", -1),
            ("WEOffsetY", 0),
            ("WEOffsetZ", 0),
        ] {
            c.insert(key.into(), NbtTag::Int(value));
        }
        let (clip, diags) = decode(c).unwrap();
        assert!(diags.is_empty());
        assert_eq!(clip.origin(), BlockVector3::at(i32::MIN, 0, 0));
        assert_eq!(clip.block_count(), 2);
        assert_eq!(
            clip.block(BlockVector3::at(i32::MAX, 0, 0)).unwrap().state.path(),
            "stone"
        );
        assert_eq!(
            clip.block(BlockVector3::at(i32::MIN, 0, 0)).unwrap().state.path(),
            "cobblestone"
        );
    }

    #[test]
    fn unknown_block_leaves_cell_empty() {
        let (clip, diags) = decode(schematic((2, 1, 1), vec![1, 36], vec![0, 0])).unwrap();
        assert_eq!(clip.block_count(), 1);
        assert!(clip.block(BlockVector3::at(1, 0, 0)).is_none());
        assert_eq!(
            diags,
            vec![Diagnostic::UnknownBlock {
                id: 36,
                data: 0,
                position: BlockVector3::at(1, 0, 0),
            }]
        );
    }

    #[test]
    fn add_blocks_extend_ids() {
        let table = r#"{"blocks": {"1:0": "minecraft:stone", "256:0": "minecraft:glass"}}"#;
        let regs = registries().with_legacy(Arc::new(LegacyMapper::from_json(table).unwrap()));
        let mut c = schematic((2, 1, 1), vec![0, 1], vec![0, 0]);
        c.insert("AddBlocks".into(), NbtTag::ByteArray(vec![0x01]));
        let clip = SchematicReader::new(encode(c).as_slice(), regs).read().unwrap();
        assert_eq!(clip.block(BlockVector3::ZERO).unwrap().state.path(), "glass");
        assert_eq!(clip.block(BlockVector3::at(1, 0, 0)).unwrap().state.path(), "stone");
    }

    #[test]
    fn mistyped_add_blocks_is_fatal() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert("AddBlocks".into(), NbtTag::Int(0));
        assert!(matches!(
            decode(c),
            Err(SchematicError::Nbt(NbtError::WrongTagType { .. }))
        ));
    }

    #[test]
    fn wrong_root_name_rejected() {
        let bytes = encode_named("Structure", schematic((1, 1, 1), vec![1], vec![0]));
        let result = SchematicReader::new(bytes.as_slice(), registries()).read();
        assert!(matches!(
            result,
            Err(SchematicError::UnexpectedRootName(name)) if name == "Structure"
        ));
    }

    #[test]
    fn non_alpha_materials_rejected() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert("Materials".into(), NbtTag::String("Pocket".into()));
        assert!(matches!(
            decode(c),
            Err(SchematicError::UnsupportedMaterials(m)) if m == "Pocket"
        ));
    }

    #[test]
    fn missing_materials_is_an_nbt_error() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.remove("Materials");
        assert!(matches!(
            decode(c),
            Err(SchematicError::Nbt(NbtError::MissingTag { key })) if key == "Materials"
        ));
    }

    #[test]
    fn negative_dimension_rejected() {
        let c = schematic((1, -2, 1), vec![1], vec![0]);
        assert!(matches!(
            decode(c),
            Err(SchematicError::NegativeDimension {
                axis: "Height",
                value: -2
            })
        ));
    }

    #[test]
    fn short_arrays_rejected() {
        let c = schematic((2, 2, 1), vec![1, 1, 1, 1], vec![0, 0]);
        assert!(matches!(
            decode(c),
            Err(SchematicError::ArrayTooShort {
                key: "Data",
                len: 2,
                needed: 4
            })
        ));
    }

    #[test]
    fn empty_volume_decodes() {
        let (clip, _) = decode(schematic((0, 0, 0), vec![], vec![])).unwrap();
        assert_eq!(clip.block_count(), 0);
        assert_eq!(clip.region().volume(), 0);
    }

    #[test]
    fn gzip_input_matches_raw() {
        let mut c = schematic((2, 1, 1), vec![1, 20], vec![0, 0]);
        c.insert(
            "Entities".into(),
            NbtTag::List(vec![compound(vec![("id", NbtTag::String("Pig".into()))])]),
        );
        let raw = encode(c);
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(&raw).unwrap();
        let compressed = gz.finish().unwrap();

        let a = SchematicReader::new(raw.as_slice(), registries()).read().unwrap();
        let b = SchematicReader::new(compressed.as_slice(), registries()).read().unwrap();
        let blocks_a: Vec<_> = a.iter_blocks().map(|(p, b)| (p, b.clone())).collect();
        let blocks_b: Vec<_> = b.iter_blocks().map(|(p, b)| (p, b.clone())).collect();
        assert_eq!(blocks_a, blocks_b);
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn tile_entity_attached_with_renamed_id() {
        let mut c = schematic((1, 1, 1), vec![25], vec![0]);
        c.insert(
            "TileEntities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Music".into())),
                ("x", NbtTag::Int(0)),
                ("y", NbtTag::Int(0)),
                ("z", NbtTag::Int(0)),
                ("note", NbtTag::Byte(5)),
            ])]),
        );
        let (clip, _) = decode(c).unwrap();
        let block = clip.block(BlockVector3::ZERO).unwrap();
        assert_eq!(block.state.id(), "minecraft:note_block");
        assert_eq!(block.state.property("note"), Some("5"));
        let nbt = block.nbt.as_ref().unwrap();
        assert_eq!(nbt["id"], NbtTag::String("note_block".into()));
        assert_eq!(nbt["note"], NbtTag::Byte(5));
    }

    #[test]
    fn sign_text_is_converted() {
        let mut c = schematic((1, 1, 1), vec![63], vec![4]);
        c.insert(
            "TileEntities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Sign".into())),
                ("Text1", NbtTag::String("Welcome".into())),
            ])]),
        );
        let (clip, _) = decode(c).unwrap();
        let block = clip.block(BlockVector3::ZERO).unwrap();
        assert_eq!(block.state.property("rotation"), Some("4"));
        let nbt = block.nbt.as_ref().unwrap();
        assert_eq!(nbt["Text1"], NbtTag::String(r#"{"text":"Welcome"}"#.into()));
        assert_eq!(nbt["id"], NbtTag::String("Sign".into()));
    }

    #[test]
    fn sign_text_with_java_encoded_chars() {
        let mut c = schematic((1, 1, 1), vec![63], vec![0]);
        c.insert(
            "TileEntities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Sign".into())),
                ("Text1", NbtTag::String("a\0\u{1F600}".into())),
            ])]),
        );
        let bytes = encode(c);
        // NUL is written as C0 80, never as a raw zero byte inside the string.
        assert!(bytes.windows(2).any(|w| w == [0xC0, 0x80]));

        let (clip, _) = SchematicReader::new(bytes.as_slice(), registries())
            .read_with_diagnostics()
            .unwrap();
        let nbt = clip.block(BlockVector3::ZERO).unwrap().nbt.as_ref().unwrap();
        let NbtTag::String(json) = &nbt["Text1"] else {
            panic!("Text1 is not a string");
        };
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["text"], "a\0\u{1F600}");
    }

    struct StripAndAbort;

    impl BlockCompatibilityRule for StripAndAbort {
        fn matches(&self, _: &BlockState) -> bool {
            true
        }

        fn apply(&self, _: &BlockState, nbt: &mut NbtCompound, _: &Registries) -> Option<BlockState> {
            nbt.remove("Secret");
            None
        }
    }

    #[test]
    fn aborted_rule_keeps_resolved_state() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert(
            "TileEntities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Custom".into())),
                ("Secret", NbtTag::Int(1)),
            ])]),
        );
        let pipeline = CompatibilityPipeline::empty().with_block_rule(StripAndAbort);
        let clip = SchematicReader::new(encode(c).as_slice(), registries())
            .with_pipeline(pipeline)
            .read()
            .unwrap();
        let block = clip.block(BlockVector3::ZERO).unwrap();
        assert_eq!(block.state, BlockState::new("stone"));
        let nbt = block.nbt.as_ref().unwrap();
        assert!(!nbt.contains_key("Secret"));
    }

    #[test]
    fn out_of_bounds_tile_entity_skipped() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert(
            "TileEntities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Chest".into())),
                ("x", NbtTag::Int(3)),
            ])]),
        );
        let (clip, diags) = decode(c).unwrap();
        assert!(!clip.block(BlockVector3::ZERO).unwrap().has_nbt());
        assert_eq!(
            diags,
            vec![Diagnostic::TileEntityOutOfBounds {
                position: BlockVector3::at(3, 0, 0)
            }]
        );
    }

    #[test]
    fn non_compound_tile_entities_skipped() {
        let mut c = schematic((1, 1, 1), vec![1], vec![0]);
        c.insert("TileEntities".into(), NbtTag::List(vec![NbtTag::Int(7)]));
        let (clip, diags) = decode(c).unwrap();
        assert!(!clip.block(BlockVector3::ZERO).unwrap().has_nbt());
        assert!(diags.is_empty());
    }

    #[test]
    fn entities_are_renamed_and_located() {
        let mut c = schematic((1, 1, 1), vec![0], vec![0]);
        c.insert(
            "Entities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("PigZombie".into())),
                (
                    "Pos",
                    NbtTag::List(vec![
                        NbtTag::Double(1.5),
                        NbtTag::Double(2.0),
                        NbtTag::Double(-3.5),
                    ]),
                ),
                (
                    "Rotation",
                    NbtTag::List(vec![NbtTag::Float(90.0), NbtTag::Float(-10.0)]),
                ),
            ])]),
        );
        let (clip, diags) = decode(c).unwrap();
        assert!(diags.is_empty());
        let [entity] = clip.entities() else {
            panic!("expected one entity");
        };
        assert_eq!(entity.entity.entity_type.id(), "minecraft:zombified_piglin");
        assert_eq!(entity.location, Location::new(1.5, 2.0, -3.5, 90.0, -10.0));
        assert_eq!(
            entity.entity.nbt["id"],
            NbtTag::String("PigZombie".into())
        );
    }

    #[test]
    fn hanging_entities_get_facing() {
        let mut c = schematic((1, 1, 1), vec![0], vec![0]);
        c.insert(
            "Entities".into(),
            NbtTag::List(vec![compound(vec![
                ("id", NbtTag::String("Painting".into())),
                ("Dir", NbtTag::Byte(0)),
            ])]),
        );
        let (clip, _) = decode(c).unwrap();
        assert_eq!(clip.entities()[0].entity.nbt["Facing"], NbtTag::Byte(2));
    }

    #[test]
    fn unknown_and_empty_entities_skipped() {
        let mut c = schematic((1, 1, 1), vec![0], vec![0]);
        c.insert(
            "Entities".into(),
            NbtTag::List(vec![
                compound(vec![("id", NbtTag::String("Herobrine".into()))]),
                compound(vec![("id", NbtTag::String(String::new()))]),
                compound(vec![("id", NbtTag::String("Cow".into()))]),
            ]),
        );
        let (clip, diags) = decode(c).unwrap();
        assert_eq!(clip.entities().len(), 1);
        assert_eq!(clip.entities()[0].entity.entity_type.id(), "minecraft:cow");
        assert_eq!(
            diags,
            vec![Diagnostic::UnknownEntity {
                id: "herobrine".into()
            }]
        );
    }

    #[test]
    fn mistyped_entity_list_ignored() {
        let mut c = schematic((1, 1, 1), vec![0], vec![0]);
        c.insert("Entities".into(), NbtTag::Int(1));
        let (clip, _) = decode(c).unwrap();
        assert!(clip.entities().is_empty());
    }
}
