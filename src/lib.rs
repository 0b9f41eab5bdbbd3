//! genolens: streaming inspection and structural validation of genomic
//! variant-call files.
//!
//! Two independent cores, both operating purely on file content:
//!
//! - [`inspect::VcfInspector`] streams a VCF text file (gzip decompressed
//!   transparently) and summarizes it: sample count, variant count, header
//!   line count, declared contigs and INFO/FORMAT fields.
//! - [`validate::FileValidator`] checks on-disk shape (the VCF header-line
//!   signature, or presence plus magic bytes of a PLINK `.bed`/`.bim`/`.fam`
//!   fileset) and reports every violation instead of raising.
//!
//! The actual format conversion is delegated to an external PLINK binary;
//! [`convert::FormatConverter`] builds the command line, runs it, and counts
//! the produced companion files afterward. No genotype data is ever decoded.
//!
//! # Examples
//!
//! ```no_run
//! use genolens::{FileValidator, VcfInspector};
//!
//! # fn main() -> genolens::Result<()> {
//! let report = FileValidator::new().validate_vcf("cohort.vcf.gz");
//! if report.all_valid() {
//!     let summary = VcfInspector::new().inspect("cohort.vcf.gz")?;
//!     println!(
//!         "{}: {} samples, {} variants",
//!         summary.source_path, summary.sample_count, summary.variant_count
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! All operations are synchronous, single-pass, and stateless across calls;
//! independent files may be processed from independent threads without
//! locking.

pub mod convert;
pub mod error;
pub mod formats;
pub mod inspect;
pub mod io;
pub mod validate;

pub use convert::{ConversionResult, FormatConverter, GenotypeFormat};
pub use error::{GenolensError, Result};
pub use inspect::{InspectionSummary, VcfInspector};
pub use validate::{CheckFailure, FileValidator, ValidationReport};
