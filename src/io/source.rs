//! Text sources with transparent decompression.
//!
//! Inspection and validation both consume files as streams of text lines.
//! A [`TextSource`] binds a path to a [`Compression`] scheme selected purely
//! from the file extension (never from content, so a mislabeled file fails
//! at decode time instead of being silently misparsed) and opens it as a
//! buffered reader:
//!
//! - `.gz` paths decompress through gzip while reading
//! - everything else is read as plain text, with memory-mapped I/O for
//!   large files
//!
//! # Examples
//!
//! ```no_run
//! use genolens::io::TextSource;
//! use std::io::BufRead;
//!
//! # fn main() -> genolens::Result<()> {
//! let source = TextSource::from_path("variants.vcf.gz");
//! let reader = source.open()?;
//!
//! for line in reader.lines() {
//!     let line = line?;
//!     // Process decompressed line
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use flate2::read::MultiGzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Memory-mapped file threshold (50 MB)
///
/// Below this size buffered reads win; at or above it, mapping the file
/// avoids double-buffering the whole stream.
pub const MMAP_THRESHOLD: u64 = 50 * 1024 * 1024; // 50 MB

/// Compression scheme of an on-disk text file.
///
/// Selected from the file extension only. Adding a scheme means adding a
/// variant here and an arm in [`TextSource::open`]; the scanning code never
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain, uncompressed text
    Plain,
    /// Gzip-compressed text (`.gz`)
    Gzip,
}

impl Compression {
    /// Detects the compression scheme from a path's extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use genolens::io::Compression;
    /// use std::path::Path;
    ///
    /// assert_eq!(Compression::from_path(Path::new("a.vcf")), Compression::Plain);
    /// assert_eq!(Compression::from_path(Path::new("a.vcf.gz")), Compression::Gzip);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Compression::Gzip,
            _ => Compression::Plain,
        }
    }
}

/// A file-backed source of text lines.
///
/// Couples a path with its detected [`Compression`] and produces buffered
/// readers over the decoded text.
#[derive(Debug, Clone)]
pub struct TextSource {
    path: PathBuf,
    compression: Compression,
}

impl TextSource {
    /// Creates a text source for the given path.
    ///
    /// Compression is keyed on the extension at construction time.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let compression = Compression::from_path(&path);
        TextSource { path, compression }
    }

    /// The source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The detected compression scheme.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Opens the source and returns a buffered reader over decoded text.
    ///
    /// The file handle lives inside the returned reader and is closed when
    /// the reader is dropped, on every exit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened. Corrupt compressed
    /// content surfaces later, as a read error from the returned reader.
    pub fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self.compression {
            Compression::Gzip => {
                let file = File::open(&self.path)?;
                Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
            }
            Compression::Plain => open_plain_file(&self.path),
        }
    }
}

/// Open a plain text file with threshold-based I/O method selection.
fn open_plain_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let metadata = std::fs::metadata(path)?;

    if metadata.len() >= MMAP_THRESHOLD {
        open_mmap_file(path)
    } else {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open file with memory mapping and sequential-access hints where supported.
#[cfg(target_os = "macos")]
fn open_mmap_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    use libc::{madvise, MADV_SEQUENTIAL, MADV_WILLNEED};

    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };

    // Give the kernel sequential access hints for the single linear pass.
    unsafe {
        madvise(
            mmap.as_ptr() as *mut _,
            mmap.len(),
            MADV_SEQUENTIAL | MADV_WILLNEED,
        );
    }

    Ok(Box::new(std::io::Cursor::new(mmap)))
}

#[cfg(not(target_os = "macos"))]
fn open_mmap_file(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(Box::new(std::io::Cursor::new(mmap)))
}

/// Counts non-blank lines in a text file.
///
/// A line is blank if it is empty after trimming whitespace. Missing files
/// count as zero, so post-conversion bookkeeping can run unconditionally.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn count_nonblank_lines<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(0);
    }

    let reader = TextSource::from_path(path).open()?;
    let mut count = 0;
    for line in reader.lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}
