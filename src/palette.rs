use crate::format::{PALETTE_BYTE_LENGTH, PixelFormat};

/// Index of the palette entry closest to the premultiplied color `c`.
///
/// Entries are 4-byte B, G, R, A; at most 256 are considered. Only the three
/// indexed formats are scored; any other `palette_format` yields 0, as does
/// an empty palette. Distance is the sum of squared differences of the
/// 16-bit widened A, R, G and B channels, after premultiplying entries of a
/// non-premultiplied palette. Ties go to the lowest index.
pub fn closest_element(palette: &[u8], palette_format: PixelFormat, c: u32) -> u8 {
    let nonpremul = match palette_format {
        PixelFormat::INDEXED_BGRA_NONPREMUL => true,
        PixelFormat::INDEXED_BGRA_PREMUL | PixelFormat::INDEXED_BGRA_BINARY => false,
        _ => return 0,
    };

    let ca = 0x101 * (0xFF & (c >> 24));
    let cr = 0x101 * (0xFF & (c >> 16));
    let cg = 0x101 * (0xFF & (c >> 8));
    let cb = 0x101 * (0xFF & c);

    let n = (palette.len() / 4).min(PALETTE_BYTE_LENGTH / 4);
    let mut best_index = 0;
    let mut best_score = u64::MAX;
    for (i, entry) in palette[..n * 4].chunks_exact(4).enumerate() {
        let mut pb = 0x101 * entry[0] as u32;
        let mut pg = 0x101 * entry[1] as u32;
        let mut pr = 0x101 * entry[2] as u32;
        let pa = 0x101 * entry[3] as u32;
        if nonpremul && pa != 0xFFFF {
            pb = pb * pa / 0xFFFF;
            pg = pg * pa / 0xFFFF;
            pr = pr * pa / 0xFFFF;
        }

        // Signed deltas, but squaring in wrapping u32 gives the same bits.
        let sq = |p: u32, q: u32| {
            let d = p.wrapping_sub(q);
            d.wrapping_mul(d) as u64
        };
        let score = sq(pb, cb) + sq(pg, cg) + sq(pr, cr) + sq(pa, ca);
        if score < best_score {
            best_score = score;
            best_index = i;
        }
    }
    best_index as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_of(entries: &[u32]) -> [u8; PALETTE_BYTE_LENGTH] {
        let mut p = [0u8; PALETTE_BYTE_LENGTH];
        for (chunk, &e) in p.chunks_exact_mut(4).zip(entries) {
            chunk.copy_from_slice(&e.to_le_bytes());
        }
        p
    }

    #[test]
    fn empty_palette_is_zero() {
        assert_eq!(closest_element(&[], PixelFormat::INDEXED_BGRA_PREMUL, 0xFFFFFFFF), 0);
        assert_eq!(closest_element(&[1, 2, 3], PixelFormat::INDEXED_BGRA_PREMUL, 0xFFFFFFFF), 0);
    }

    #[test]
    fn non_indexed_format_is_zero() {
        let p = palette_of(&[0xFF000000, 0xFFFFFFFF]);
        assert_eq!(closest_element(&p, PixelFormat::BGRA_PREMUL, 0xFFFFFFFF), 0);
    }

    #[test]
    fn exact_match() {
        let p = palette_of(&[0xFF000000, 0xFFFF0000, 0xFF00FF00, 0xFF0000FF]);
        let f = PixelFormat::INDEXED_BGRA_PREMUL;
        assert_eq!(closest_element(&p, f, 0xFF00FF00), 2);
        assert_eq!(closest_element(&p, f, 0xFF0000F0), 3);
        assert_eq!(closest_element(&p, f, 0xFFE01010), 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let p = palette_of(&[0xFF101010, 0xFF303030, 0xFF303030]);
        let f = PixelFormat::INDEXED_BGRA_BINARY;
        assert_eq!(closest_element(&p[..12], f, 0xFF202020), 0);
        assert_eq!(closest_element(&p[..12], f, 0xFF303030), 1);
    }

    #[test]
    fn nonpremul_entries_are_premultiplied() {
        // Entry 0 is transparent white, which premultiplies to transparent
        // black. Entry 1 is opaque gray.
        let p = palette_of(&[0x00FFFFFF, 0xFF808080]);
        assert_eq!(closest_element(&p[..8], PixelFormat::INDEXED_BGRA_NONPREMUL, 0), 0);
        assert_eq!(closest_element(&p[..8], PixelFormat::INDEXED_BGRA_PREMUL, 0x00FFFFFF), 0);
        // As premultiplied entries, 0x00FFFFFF is far from transparent black.
        assert_eq!(closest_element(&p[..8], PixelFormat::INDEXED_BGRA_PREMUL, 0xFF000000), 1);
    }

    #[test]
    fn considers_at_most_256_entries() {
        let mut big = [0u8; 2048];
        big[1024..1028].copy_from_slice(&0xFFFFFFFFu32.to_le_bytes());
        assert_eq!(closest_element(&big, PixelFormat::INDEXED_BGRA_PREMUL, 0xFFFFFFFF), 0);
    }
}
