//! # Burrows
//!
//! A lossless byte-stream compressor built from the classical pipeline:
//! suffix array induced sorting (SA-IS) feeds the Burrows-Wheeler
//! Transform, whose output is rank-coded by move-to-front and then
//! entropy-coded with a static Huffman trie over a bit-oriented stream.
//!
//! * `sais` builds the suffix array - the hardest piece, linear time,
//!   reusing a single `i32` buffer across its own recursion.
//! * `bwt` derives the last-column transform from the suffix array and
//!   inverts it via LF-mapping.
//! * `mtf` is the move-to-front rank coder sitting between BWT and Huffman.
//! * `huffman` builds the frequency trie, serialises it preorder, and
//!   encodes/decodes the payload.
//! * `bitio` is the MSB-first bit-packed stream the Huffman stage rides on.
//! * `pipeline` composes the stages and is the only module that touches
//!   the filesystem.
//!
//! ## Buffer Example
//!
//! ```
//! use burrows::pipeline;
//! let text = b"some text, some text, some text";
//! let archive = pipeline::compress_bytes(text).expect("compression failed");
//! let restored = pipeline::expand_bytes(&archive).expect("expansion failed");
//! assert_eq!(restored, text);
//! ```

pub mod bitio;
pub mod mtf;
pub mod sais;
pub mod bwt;
pub mod huffman;
pub mod pipeline;

pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(), DYNERR>;

/// Top-level pipeline errors. Bit-stream contract violations live in
/// `bitio::Error`, since those belong to that module's own closed set of
/// failure modes.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("input path does not end in .burrows")]
    FileFormatMismatch,
    #[error("archive is malformed")]
    MalformedArchive,
    #[error("operation requested on an empty alphabet")]
    EmptyAlphabet
}
