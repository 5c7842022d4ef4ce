use crate::common::{
    galois::{generator_polynomial, mul},
    metadata::{ECLevel, Version},
};

// Reed-Solomon error correction codewords
//------------------------------------------------------------------------------

/// Splits data codewords into blocks and computes the ECC of each block.
pub fn ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let gen_poly = generator_polynomial(version.ecc_per_block(ec_level));
    let ecc_blocks = data_blocks.iter().map(|b| ecc_per_block(b, &gen_poly)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(block1_count + block2_count);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Remainder of the block polynomial, shifted by the generator degree, divided by
// the generator polynomial
fn ecc_per_block(block: &[u8], gen_poly: &[u8]) -> Vec<u8> {
    let mut res = vec![0u8; gen_poly.len()];
    for &b in block {
        let factor = b ^ res[0];
        res.rotate_left(1);
        if let Some(last) = res.last_mut() {
            *last = 0;
        }
        for (r, &g) in res.iter_mut().zip(gen_poly) {
            *r ^= mul(g, factor);
        }
    }
    res
}

/// Number of codeword errors the symbol recovers from. Low versions reserve a few
/// misdecode protection codewords.
pub fn error_correction_capacity(version: Version, ec_level: ECLevel) -> usize {
    let p = match (*version, ec_level) {
        (1, ECLevel::L) => 3,
        (1, ECLevel::M) | (2, ECLevel::L) => 2,
        (1, _) | (3, ECLevel::L) => 1,
        _ => 0,
    };

    let ec_bytes = version.block_count(ec_level) * version.ecc_per_block(ec_level);
    (ec_bytes - p) / 2
}

#[cfg(test)]
mod ec_tests {
    use super::{blockify, ecc, ecc_per_block, error_correction_capacity};
    use crate::common::{
        galois::generator_polynomial,
        metadata::{ECLevel, Version},
    };

    #[test]
    fn test_poly_mod_1() {
        let gen_poly = generator_polynomial(10);
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11", &gen_poly);
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_poly_mod_2() {
        let gen_poly = generator_polynomial(13);
        let res = ecc_per_block(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec", &gen_poly);
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_poly_mod_3() {
        let gen_poly = generator_polynomial(18);
        let res = ecc_per_block(b"CUF\x86W&U\xc2w2\x06\x12\x06g&", &gen_poly);
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_add_ec_simple() {
        let msg = b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11";
        let expected_ecc = [b"\xc4\x23\x27\x77\xeb\xd7\xe7\xe2\x5d\x17"];
        let (data, ecc) = ecc(msg, Version(1), ECLevel::M);
        assert_eq!(data, [&msg[..]]);
        assert_eq!(&*ecc, expected_ecc);
    }

    #[test]
    fn test_add_ec_complex() {
        let msg = b"CUF\x86W&U\xc2w2\x06\x12\x06g&\xf6\xf6B\x07v\x86\xf2\x07&V\x16\xc6\xc7\x92\x06\
                    \xb6\xe6\xf7w2\x07v\x86W&R\x06\x86\x972\x07F\xf7vV\xc2\x06\x972\x10\xec\x11\xec\
                    \x11\xec\x11\xec";
        let expected_ec = [
            b"\xd5\xc7\x0b\x2d\x73\xf7\xf1\xdf\xe5\xf8\x9a\x75\x9a\x6f\x56\xa1\x6f\x27",
            b"\x57\xcc\x60\x3c\xca\xb6\x7c\x9d\xc8\x86\x1b\x81\xd1\x11\xa3\xa3\x78\x85",
            b"\x94\x74\xb1\xd4\x4c\x85\x4b\xf2\xee\x4c\xc3\xe6\xbd\x0a\x6c\xf0\xc0\x8d",
            b"\xeb\x9f\x05\xad\x18\x93\x3b\x21\x6a\x28\xff\xac\x52\x02\x83\x20\xb2\xec",
        ];
        let (_, ecc) = ecc(msg, Version(5), ECLevel::Q);
        assert_eq!(&*ecc, &expected_ec[..]);
    }

    #[test]
    fn test_blockify_groups() {
        let data: Vec<u8> = (0..62).collect();
        let blocks = blockify(&data, Version(5), ECLevel::Q);
        let sizes: Vec<usize> = blocks.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, [15, 15, 16, 16]);
        assert_eq!(blocks[2][0], 30);
    }

    #[test]
    fn test_error_correction_capacity() {
        assert_eq!(error_correction_capacity(Version(1), ECLevel::L), 2);
        assert_eq!(error_correction_capacity(Version(1), ECLevel::H), 8);
        assert_eq!(error_correction_capacity(Version(5), ECLevel::Q), 36);
    }
}
