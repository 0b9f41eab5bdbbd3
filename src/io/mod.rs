//! I/O module: text sources and transparent decompression
//!
//! All readers stream with constant memory regardless of file size; file
//! handles are scoped to each open call and released when the reader drops.

pub mod source;

pub use source::{count_nonblank_lines, Compression, TextSource, MMAP_THRESHOLD};
