// GF(256) arithmetic over the QR primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE: u16 = 0x11d;

pub static EXP_TABLE: [u8; 256] = exp_table();

pub static LOG_TABLE: [u8; 256] = log_table();

const fn exp_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 256 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    table
}

// LOG_TABLE[0] is undefined and left as 0
const fn log_table() -> [u8; 256] {
    let exp = exp_table();
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        table[exp[i] as usize] = i as u8;
        i += 1;
    }
    table
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

/// Coefficients of (x - a^0)(x - a^1)...(x - a^(degree-1)), highest degree first,
/// without the leading 1.
pub fn generator_polynomial(degree: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&degree), "Invalid generator degree: {degree}");

    let mut res = vec![0u8; degree];
    res[degree - 1] = 1;
    let mut root = 1u8;
    for _ in 0..degree {
        for j in 0..degree {
            res[j] = mul(res[j], root);
            if j + 1 < degree {
                res[j] ^= res[j + 1];
            }
        }
        root = mul(root, 0x02);
    }
    res
}
