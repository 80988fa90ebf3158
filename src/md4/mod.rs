/// MD4 round function, shift tables, and the single-step inverse
mod round;

/// Full-trace block compression
mod compress;

/// Padding and word encoding
mod pad;

/// Incremental Merkle-Damgaard hasher
mod hasher;

pub use compress::*;
pub use hasher::*;
pub use pad::*;
pub use round::*;

/// Byte-length of an MD4 block
pub const BLOCK_LEN: usize = 64;

/// Number of 32-bit words in an MD4 block
pub const BLOCK_WORDS: usize = 16;

/// Byte-length of an MD4 digest
pub const DIGEST_LEN: usize = 16;

/// Number of compression steps per block (3 rounds of 16 steps)
pub const STEPS: usize = 48;

/// Standard MD4 initial chaining state
pub const INIT_STATE: State = State {
    a: 0x6745_2301,
    b: 0xefcd_ab89,
    c: 0x98ba_dcfe,
    d: 0x1032_5476,
};

/// Byte order used to decode words, encode the length field, and serialize digests
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

impl Default for Endian {
    fn default() -> Self {
        Endian::Little
    }
}

/// One of the four MD4 registers
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Register {
    A,
    B,
    C,
    D,
}

impl Register {
    /// Register updated by the given compression step
    ///
    /// Steps cycle through A, D, C, B
    pub const fn for_step(step: usize) -> Self {
        match step % 4 {
            0 => Register::A,
            1 => Register::D,
            2 => Register::C,
            _ => Register::B,
        }
    }
}

/// MD4 chaining state (A, B, C, D)
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct State {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl State {
    /// Create a new state from register values
    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self { a, b, c, d }
    }

    /// Get the value of a register
    pub fn get(&self, reg: Register) -> u32 {
        match reg {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
        }
    }

    /// Set the value of a register
    pub fn set(&mut self, reg: Register, val: u32) {
        match reg {
            Register::A => self.a = val,
            Register::B => self.b = val,
            Register::C => self.c = val,
            Register::D => self.d = val,
        }
    }

    /// Register-wise addition mod 2^32, used for the Davies-Meyer feed-forward
    pub fn wrapping_add(&self, other: &State) -> Self {
        Self {
            a: self.a.wrapping_add(other.a),
            b: self.b.wrapping_add(other.b),
            c: self.c.wrapping_add(other.c),
            d: self.d.wrapping_add(other.d),
        }
    }

    /// Serialize the state as a digest in the given byte order
    pub fn to_bytes(&self, endian: Endian) -> [u8; DIGEST_LEN] {
        let mut res = [0_u8; DIGEST_LEN];
        for (chunk, word) in res
            .chunks_exact_mut(4)
            .zip([self.a, self.b, self.c, self.d].iter())
        {
            chunk.copy_from_slice(&word_to_bytes(*word, endian));
        }
        res
    }

    /// Deserialize a digest into a chaining state
    pub fn from_bytes(digest: &[u8; DIGEST_LEN], endian: Endian) -> Self {
        let mut words = [0_u32; 4];
        for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(4)) {
            *word = word_from_bytes(chunk, endian);
        }
        Self::new(words[0], words[1], words[2], words[3])
    }
}
