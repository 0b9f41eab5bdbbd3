//! Structural validation of VCF files and PLINK binary filesets.
//!
//! Checks conformance to the expected on-disk shape without decoding
//! content: a VCF file must open with the `##fileformat=VCF` signature; a
//! PLINK triad must have all three companion files present and the right
//! magic bytes in its `.bed`.
//!
//! Expected failure modes (missing file, wrong signature, unreadable file)
//! never raise. Each check yields `Ok` or a [`CheckFailure`] reason, and the
//! reasons accumulate as human-readable entries in a [`ValidationReport`],
//! so a caller always gets a report to inspect.
//!
//! # Examples
//!
//! ```no_run
//! use genolens::validate::FileValidator;
//!
//! let validator = FileValidator::new();
//! let report = validator.validate_vcf("cohort.vcf.gz");
//!
//! if !report.all_valid() {
//!     for violation in &report.violations {
//!         eprintln!("{}", violation);
//!     }
//! }
//! ```

use crate::formats::plink::{TriadPaths, BED_MAGIC};
use crate::io::TextSource;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

/// Required prefix of the first line of a VCF file.
///
/// Matches any declared version (`##fileformat=VCFv4.2`, `v4.3`, ...).
pub const VCF_SIGNATURE: &str = "##fileformat=VCF";

/// Validation outcome for a set of files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of distinct files examined
    pub files_checked: usize,
    /// Number of files that passed their applicable check
    pub valid_count: usize,
    /// One entry per failed check, in check order
    pub violations: Vec<String>,
    /// Non-fatal advisories
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when no check failed.
    pub fn all_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Folds another report into this one, keeping input order.
    pub fn merge(&mut self, other: ValidationReport) {
        self.files_checked += other.files_checked;
        self.valid_count += other.valid_count;
        self.violations.extend(other.violations);
        self.warnings.extend(other.warnings);
    }
}

/// Reason a single structural check failed.
///
/// Rendered through `Display` into a report's violation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// Path does not exist; `component` names the triad suffix when the
    /// missing file is one of a fileset
    NotFound {
        /// Missing path
        path: PathBuf,
        /// Triad suffix (`bed`/`bim`/`fam`), if applicable
        component: Option<&'static str>,
    },
    /// Content does not open with the required signature
    SignatureMismatch {
        /// Offending path
        path: PathBuf,
        /// What was expected, for the report entry
        detail: &'static str,
    },
    /// I/O error while reading, including corrupt compressed streams
    ReadError {
        /// Offending path
        path: PathBuf,
        /// Underlying error message
        msg: String,
    },
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckFailure::NotFound {
                path,
                component: Some(suffix),
            } => write!(f, "Missing .{} file: {}", suffix, path.display()),
            CheckFailure::NotFound {
                path,
                component: None,
            } => write!(f, "File not found: {}", path.display()),
            CheckFailure::SignatureMismatch { path, detail } => {
                write!(f, "{}: {}", detail, path.display())
            }
            CheckFailure::ReadError { path, msg } => {
                write!(f, "Read error: {}: {}", path.display(), msg)
            }
        }
    }
}

/// Structural validator for VCF files and PLINK binary filesets.
///
/// Stateless; each check opens its own file handles and releases them on
/// every exit path, so batches of any size leak no descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileValidator;

impl FileValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        FileValidator
    }

    /// Validates a VCF file by its header-line signature.
    ///
    /// Opens the file (decompressing `.gz` transparently), reads only the
    /// first line, and requires the [`VCF_SIGNATURE`] prefix. Always returns
    /// a report with `files_checked == 1`.
    pub fn validate_vcf<P: AsRef<Path>>(&self, path: P) -> ValidationReport {
        let mut report = ValidationReport {
            files_checked: 1,
            ..ValidationReport::default()
        };

        match check_vcf_signature(path.as_ref()) {
            Ok(()) => report.valid_count = 1,
            Err(failure) => report.violations.push(failure.to_string()),
        }
        report
    }

    /// Validates a PLINK binary fileset derived from `prefix`.
    ///
    /// Each missing companion adds one violation. An existing `.bed` must
    /// additionally start with [`BED_MAGIC`]; `.bim` and `.fam` pass on
    /// existence alone, their content is trusted here. Always returns a
    /// report with `files_checked == 3`.
    pub fn validate_plink_binary<P: AsRef<Path>>(&self, prefix: P) -> ValidationReport {
        let triad = TriadPaths::from_prefix(prefix);
        let mut report = ValidationReport {
            files_checked: 3,
            ..ValidationReport::default()
        };

        for (path, suffix) in triad.labeled() {
            if !path.exists() {
                report.violations.push(
                    CheckFailure::NotFound {
                        path: path.to_path_buf(),
                        component: Some(suffix),
                    }
                    .to_string(),
                );
            }
        }

        if triad.bed.exists() {
            match check_bed_magic(&triad.bed) {
                Ok(()) => report.valid_count += 1,
                Err(failure) => report.violations.push(failure.to_string()),
            }
        }
        if triad.bim.exists() {
            report.valid_count += 1;
        }
        if triad.fam.exists() {
            report.valid_count += 1;
        }

        report
    }

    /// Validates a batch of inputs, aggregating one combined report.
    ///
    /// Dispatch is by extension only: `vcf` and `gz` paths get the VCF
    /// check, anything else is treated as a PLINK triad prefix. Sub-reports
    /// merge in input order.
    pub fn validate_batch<P: AsRef<Path>>(&self, paths: &[P]) -> ValidationReport {
        let mut combined = ValidationReport::default();

        for path in paths {
            let path = path.as_ref();
            let sub = match path.extension().and_then(|ext| ext.to_str()) {
                Some("vcf") | Some("gz") => self.validate_vcf(path),
                _ => self.validate_plink_binary(path),
            };
            combined.merge(sub);
        }
        combined
    }
}

/// Checks that the first line of `path` carries the VCF signature.
fn check_vcf_signature(path: &Path) -> Result<(), CheckFailure> {
    if !path.exists() {
        return Err(CheckFailure::NotFound {
            path: path.to_path_buf(),
            component: None,
        });
    }

    let mut reader = TextSource::from_path(path).open().map_err(|e| {
        CheckFailure::ReadError {
            path: path.to_path_buf(),
            msg: e.to_string(),
        }
    })?;

    let mut first_line = String::new();
    if let Err(e) = reader.read_line(&mut first_line) {
        return Err(CheckFailure::ReadError {
            path: path.to_path_buf(),
            msg: e.to_string(),
        });
    }

    if first_line.trim().starts_with(VCF_SIGNATURE) {
        Ok(())
    } else {
        Err(CheckFailure::SignatureMismatch {
            path: path.to_path_buf(),
            detail: "Missing VCF header",
        })
    }
}

/// Checks that `path` opens with the `.bed` magic bytes.
fn check_bed_magic(path: &Path) -> Result<(), CheckFailure> {
    let mut file = File::open(path).map_err(|e| CheckFailure::ReadError {
        path: path.to_path_buf(),
        msg: e.to_string(),
    })?;

    let mut magic = [0u8; 3];
    match file.read_exact(&mut magic) {
        Ok(()) if magic == BED_MAGIC => Ok(()),
        // A file too short for the magic fails the signature, not the read.
        Ok(()) => Err(bad_magic(path)),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(bad_magic(path)),
        Err(e) => Err(CheckFailure::ReadError {
            path: path.to_path_buf(),
            msg: e.to_string(),
        }),
    }
}

fn bad_magic(path: &Path) -> CheckFailure {
    CheckFailure::SignatureMismatch {
        path: path.to_path_buf(),
        detail: "Invalid .bed magic bytes",
    }
}
