#[allow(dead_code)]
pub fn to_hex(hex: &[u8]) -> String {
    hex.iter().map(|x| format!("{:02x}", x)).collect()
}

#[allow(dead_code)]
pub fn from_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

// digest from an independent MD4 implementation
#[allow(dead_code)]
pub fn reference_digest(msg: &[u8]) -> Vec<u8> {
    use md4::Digest;

    md4::Md4::digest(msg).to_vec()
}

// first message of the published Wang et al. collision pair
#[allow(dead_code)]
pub const WANG_ONE: [u32; 16] = [
    0x4d7a9c83, 0x56cb927a, 0xb9d5a578, 0x57a7a5ee, 0xde748a3c, 0xdcc366b3, 0xb683a020, 0x3b2a5d9f,
    0xc69d71b3, 0xf9e99198, 0xd79f805e, 0xa63bb2e8, 0x45dd8e31, 0x97e31fe5, 0x2794bf08, 0xb9e8c3e9,
];

// second published pair, differing from the first in the last two words
#[allow(dead_code)]
pub const WANG_TWO: [u32; 16] = [
    0x4d7a9c83, 0x56cb927a, 0xb9d5a578, 0x57a7a5ee, 0xde748a3c, 0xdcc366b3, 0xb683a020, 0x3b2a5d9f,
    0xc69d71b3, 0xf9e99198, 0xd79f805e, 0xa63bb2e8, 0x45dd8e31, 0x97e31fe5, 0xf713c240, 0xa7b8cf69,
];
