//! PLINK binary fileset layout.
//!
//! A PLINK binary dataset is a triad of companion files sharing one prefix:
//!
//! - `<prefix>.bed`: binary genotype matrix, first three bytes fixed
//! - `<prefix>.bim`: variant metadata, one tab-delimited line per variant
//! - `<prefix>.fam`: sample metadata, one line per sample
//!
//! This module only describes the on-disk shape; genotype content is never
//! decoded here.

use std::path::{Path, PathBuf};

/// Magic bytes opening a `.bed` genotype matrix file.
///
/// `0x6C 0x1B` identify the format, `0x01` selects SNP-major ordering.
pub const BED_MAGIC: [u8; 3] = [0x6c, 0x1b, 0x01];

/// Derives a companion path by appending `.suffix` to the full prefix.
///
/// The suffix is appended, never substituted, so a prefix like `data.v2`
/// yields `data.v2.bed` rather than `data.bed`.
pub fn companion_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// The three companion paths derived from a shared prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriadPaths {
    /// Binary genotype matrix path (`<prefix>.bed`)
    pub bed: PathBuf,
    /// Variant metadata path (`<prefix>.bim`)
    pub bim: PathBuf,
    /// Sample metadata path (`<prefix>.fam`)
    pub fam: PathBuf,
}

impl TriadPaths {
    /// Derives all three companion paths from a prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use genolens::formats::TriadPaths;
    /// use std::path::PathBuf;
    ///
    /// let triad = TriadPaths::from_prefix("cohort/batch1");
    /// assert_eq!(triad.bed, PathBuf::from("cohort/batch1.bed"));
    /// assert_eq!(triad.bim, PathBuf::from("cohort/batch1.bim"));
    /// assert_eq!(triad.fam, PathBuf::from("cohort/batch1.fam"));
    /// ```
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let prefix = prefix.as_ref();
        TriadPaths {
            bed: companion_path(prefix, "bed"),
            bim: companion_path(prefix, "bim"),
            fam: companion_path(prefix, "fam"),
        }
    }

    /// Paths with their suffix labels, in check order.
    pub fn labeled(&self) -> [(&Path, &'static str); 3] {
        [
            (&self.bed, "bed"),
            (&self.bim, "bim"),
            (&self.fam, "fam"),
        ]
    }
}
