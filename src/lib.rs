#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod error;

pub use error::*;

/// MD4 compression core: padding, round function, full-trace compression
pub mod md4;

/// Birthday-bound collision search over small chaining states
pub mod search;

/// Wang et al. differential attack on MD4
pub mod wang;
