//! IO modules - side effects (network, in-memory archive decoding)

pub mod download;
pub mod inspect;
