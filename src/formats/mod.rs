//! Format-specific definitions and parsing primitives.
//!
//! - [`meta`]: structured VCF meta-line (`##TAG=<key=value,...>`) parsing
//! - [`plink`]: PLINK binary fileset layout (`.bed`/`.bim`/`.fam`)

pub mod meta;
pub mod plink;

pub use meta::MetaLine;
pub use plink::{TriadPaths, BED_MAGIC};
