//! Streaming VCF metadata extraction.
//!
//! [`VcfInspector`] derives a structured summary from a VCF text stream in a
//! single forward pass: sample and variant counts plus the declared contigs
//! and INFO/FORMAT fields. Gzip-compressed input decompresses transparently
//! (detected from the `.gz` extension). Memory stays constant regardless of
//! file size; nothing is buffered beyond one line.
//!
//! # Line classification
//!
//! - `##...` is a meta-line: counted toward the header; structured lines with a
//!   `contig`/`INFO`/`FORMAT` tag contribute their `ID` to the matching list
//! - `#CHROM...` is the column header: counted toward the header; columns past
//!   the nine mandatory ones are samples
//! - any other non-blank line is one variant record
//! - blank lines are ignored entirely
//!
//! # Examples
//!
//! ```no_run
//! use genolens::inspect::VcfInspector;
//!
//! # fn main() -> genolens::Result<()> {
//! let summary = VcfInspector::new().inspect("cohort.vcf.gz")?;
//!
//! println!("{} samples, {} variants", summary.sample_count, summary.variant_count);
//! println!("contigs: {:?}", summary.contigs);
//! # Ok(())
//! # }
//! ```

use crate::error::{GenolensError, Result};
use crate::formats::meta::MetaLine;
use crate::io::TextSource;
use std::io::BufRead;
use std::path::Path;

/// The nine mandatory VCF columns: CHROM POS ID REF ALT QUAL FILTER INFO FORMAT.
///
/// Columns past these are per-sample genotype columns.
pub const MANDATORY_COLUMNS: usize = 9;

/// Metadata summary of a single VCF file.
///
/// Fully populated by the end of one stream traversal; not mutated after it
/// is returned. The ID lists keep declaration order, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionSummary {
    /// Identifier of the inspected input
    pub source_path: String,
    /// Number of sample columns in the column-header line
    pub sample_count: usize,
    /// Number of non-blank data records
    pub variant_count: usize,
    /// Declared contig IDs, in declaration order
    pub contigs: Vec<String>,
    /// Declared INFO field IDs, in declaration order
    pub info_fields: Vec<String>,
    /// Declared FORMAT field IDs, in declaration order
    pub format_fields: Vec<String>,
    /// Count of meta-lines plus the column-header line
    pub header_line_count: usize,
}

/// Streaming VCF metadata extractor.
///
/// Stateless across calls; each inspection opens its own file handle and
/// releases it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct VcfInspector;

impl VcfInspector {
    /// Creates a new inspector.
    pub fn new() -> Self {
        VcfInspector
    }

    /// Inspects a VCF file, decompressing transparently for `.gz` paths.
    ///
    /// Inspection is all-or-nothing: on any failure no partial summary is
    /// produced.
    ///
    /// # Errors
    ///
    /// - [`GenolensError::Io`] if the path cannot be opened or read
    /// - [`GenolensError::Decode`] if the byte stream cannot be decoded as
    ///   text (invalid UTF-8 or a corrupted compressed stream)
    pub fn inspect<P: AsRef<Path>>(&self, path: P) -> Result<InspectionSummary> {
        let path = path.as_ref();
        let reader = TextSource::from_path(path).open()?;

        let mut summary = self.scan(reader)?;
        summary.source_path = path.display().to_string();
        Ok(summary)
    }

    /// Classifies lines from an already-open reader.
    fn scan<R: BufRead>(&self, mut reader: R) -> Result<InspectionSummary> {
        let mut summary = InspectionSummary::default();
        let mut line_buf = String::with_capacity(1024);
        let mut line_number = 0;

        loop {
            line_buf.clear();
            let bytes_read = reader
                .read_line(&mut line_buf)
                .map_err(|e| decode_or_io(e, line_number + 1))?;

            if bytes_read == 0 {
                break; // EOF
            }
            line_number += 1;

            let line = line_buf.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with("##") {
                summary.header_line_count += 1;
                record_declared_id(line, &mut summary);
            } else if line.starts_with("#CHROM") {
                summary.header_line_count += 1;
                let columns = line.split('\t').count();
                if columns > MANDATORY_COLUMNS {
                    summary.sample_count = columns - MANDATORY_COLUMNS;
                }
            } else {
                summary.variant_count += 1;
            }
        }

        Ok(summary)
    }
}

/// Appends the `ID` of a contig/INFO/FORMAT meta-line to its list.
///
/// Malformed or ID-less structured lines contribute nothing; that tolerance
/// is deliberate, the header count already happened.
fn record_declared_id(line: &str, summary: &mut InspectionSummary) {
    let Some(meta) = MetaLine::parse(line) else {
        return;
    };

    let list = match meta.tag {
        "contig" => &mut summary.contigs,
        "INFO" => &mut summary.info_fields,
        "FORMAT" => &mut summary.format_fields,
        _ => return,
    };

    if let Some(id) = meta.id() {
        list.push(id.to_string());
    }
}

/// Maps undecodable bytes to a decode failure, other I/O errors pass through.
fn decode_or_io(err: std::io::Error, line: usize) -> GenolensError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        GenolensError::Decode {
            line,
            msg: err.to_string(),
        }
    } else {
        GenolensError::Io(err)
    }
}
