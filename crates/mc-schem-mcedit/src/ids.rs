//! Legacy 12-bit block id reconstruction and flat cell indexing.

/// Combine `Blocks` (low 8 bits) with the optional `AddBlocks` nibble array
/// (bits 8-11). Cell `i` takes the low nibble of `extension[i / 2]` when `i`
/// is even and the high nibble when odd.
///
/// Cells past the end of `extension` get no high bits. A short `AddBlocks`
/// therefore loses the tail of its coverage; legacy writers relied on this.
pub fn reconstruct_ids(ids: &[i8], extension: &[i8]) -> Vec<u16> {
    ids.iter()
        .enumerate()
        .map(|(i, &id)| {
            let low = u16::from(id as u8);
            match extension.get(i / 2) {
                None => low,
                Some(&ext) => {
                    let ext = u16::from(ext as u8);
                    let high = if i % 2 == 0 {
                        (ext & 0x0F) << 8
                    } else {
                        (ext & 0xF0) << 4
                    };
                    high | low
                }
            }
        })
        .collect()
}

/// Index of `(x, y, z)` in a `width` by `length` layered array.
#[inline]
pub fn flat_index(x: usize, y: usize, z: usize, width: usize, length: usize) -> usize {
    y * width * length + z * width + x
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn packing_example() {
        let ids = reconstruct_ids(&[0x05, 0x0A], &[0x1F]);
        assert_eq!(ids, vec![3845, 3850]);
    }

    #[test]
    fn empty_extension_keeps_low_byte() {
        let raw: Vec<i8> = vec![0, 1, -1, 127, -128, 35];
        let ids = reconstruct_ids(&raw, &[]);
        assert_eq!(ids, vec![0, 1, 255, 127, 128, 35]);
    }

    #[test]
    fn short_extension_covers_head_only() {
        // 5 cells need 3 nibble bytes; only one is present.
        let ids = reconstruct_ids(&[1, 2, 3, 4, 5], &[0x21]);
        assert_eq!(ids, vec![0x101, 0x202, 3, 4, 5]);
    }

    #[test]
    fn high_nibble_byte_is_unsigned() {
        let ids = reconstruct_ids(&[-1, -1], &[-1]);
        assert_eq!(ids, vec![4095, 4095]);
    }

    #[test]
    fn flat_index_is_bijective() {
        let (w, h, l) = (3, 4, 5);
        let mut seen = HashSet::new();
        for y in 0..h {
            for z in 0..l {
                for x in 0..w {
                    let i = flat_index(x, y, z, w, l);
                    assert!(i < w * h * l);
                    assert!(seen.insert(i));
                }
            }
        }
        assert_eq!(seen.len(), w * h * l);
    }
}
