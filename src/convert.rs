//! External converter invocation.
//!
//! Bidirectional VCF ↔ PLINK conversion is delegated to an external PLINK
//! binary; this module only constructs the argument list, runs the tool, and
//! reads the output fileset's companion files afterward for sample/variant
//! counts. The conversion algorithms themselves live entirely in the tool.
//!
//! A failed run is an expected outcome, not an error: it lands in
//! [`ConversionResult::success`] and [`ConversionResult::message`].

use crate::formats::plink::TriadPaths;
use crate::io::count_nonblank_lines;
use std::fmt;
use std::process::Command;

/// On-disk genotype formats the converter moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeFormat {
    /// VCF text format
    Vcf,
    /// PLINK binary fileset (`.bed`/`.bim`/`.fam`)
    PlinkBinary,
}

impl fmt::Display for GenotypeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenotypeFormat::Vcf => write!(f, "vcf"),
            GenotypeFormat::PlinkBinary => write!(f, "plink_binary"),
        }
    }
}

/// Outcome of one format conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Input path or fileset prefix
    pub input_path: String,
    /// Output path or fileset prefix
    pub output_prefix: String,
    /// Format converted from
    pub input_format: GenotypeFormat,
    /// Format converted to
    pub output_format: GenotypeFormat,
    /// Samples in the produced fileset (0 when not counted)
    pub sample_count: usize,
    /// Variants in the produced fileset (0 when not counted)
    pub variant_count: usize,
    /// Whether the external tool ran to completion
    pub success: bool,
    /// Failure description when `success` is false
    pub message: String,
}

impl ConversionResult {
    fn pending(
        input_path: &str,
        output_prefix: &str,
        input_format: GenotypeFormat,
        output_format: GenotypeFormat,
    ) -> Self {
        ConversionResult {
            input_path: input_path.to_string(),
            output_prefix: output_prefix.to_string(),
            input_format,
            output_format,
            sample_count: 0,
            variant_count: 0,
            success: false,
            message: String::new(),
        }
    }
}

/// Wrapper around an external PLINK binary for VCF ↔ PLINK conversion.
///
/// # Examples
///
/// ```no_run
/// use genolens::convert::FormatConverter;
///
/// let converter = FormatConverter::default();
/// let result = converter.vcf_to_plink("cohort.vcf", "cohort_plink", &[]);
///
/// if result.success {
///     println!("{} samples, {} variants", result.sample_count, result.variant_count);
/// } else {
///     eprintln!("conversion failed: {}", result.message);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FormatConverter {
    plink_binary: String,
}

impl Default for FormatConverter {
    fn default() -> Self {
        FormatConverter::new("plink")
    }
}

impl FormatConverter {
    /// Creates a converter using the given PLINK executable.
    pub fn new(plink_binary: impl Into<String>) -> Self {
        FormatConverter {
            plink_binary: plink_binary.into(),
        }
    }

    /// Argument list for a VCF → PLINK binary conversion.
    pub fn build_vcf_to_plink_cmd(
        &self,
        vcf_path: &str,
        output_prefix: &str,
        extra_args: &[&str],
    ) -> Vec<String> {
        let mut cmd = vec![
            self.plink_binary.clone(),
            "--vcf".to_string(),
            vcf_path.to_string(),
            "--make-bed".to_string(),
            "--out".to_string(),
            output_prefix.to_string(),
            "--allow-extra-chr".to_string(),
        ];
        cmd.extend(extra_args.iter().map(|arg| arg.to_string()));
        cmd
    }

    /// Argument list for a PLINK binary → VCF conversion.
    pub fn build_plink_to_vcf_cmd(
        &self,
        bfile_prefix: &str,
        output_path: &str,
        extra_args: &[&str],
    ) -> Vec<String> {
        let mut cmd = vec![
            self.plink_binary.clone(),
            "--bfile".to_string(),
            bfile_prefix.to_string(),
            "--recode".to_string(),
            "vcf".to_string(),
            "--out".to_string(),
            output_path.to_string(),
            "--allow-extra-chr".to_string(),
        ];
        cmd.extend(extra_args.iter().map(|arg| arg.to_string()));
        cmd
    }

    /// Converts VCF to the PLINK binary fileset `<output_prefix>.bed/.bim/.fam`.
    ///
    /// On success, samples and variants are counted from the produced `.fam`
    /// and `.bim` (non-blank lines; a missing or unreadable file counts 0).
    pub fn vcf_to_plink(
        &self,
        vcf_path: &str,
        output_prefix: &str,
        extra_args: &[&str],
    ) -> ConversionResult {
        let cmd = self.build_vcf_to_plink_cmd(vcf_path, output_prefix, extra_args);
        let mut result = ConversionResult::pending(
            vcf_path,
            output_prefix,
            GenotypeFormat::Vcf,
            GenotypeFormat::PlinkBinary,
        );

        match run_tool(&cmd) {
            Ok(()) => {
                result.success = true;
                let triad = TriadPaths::from_prefix(output_prefix);
                result.sample_count = count_nonblank_lines(&triad.fam).unwrap_or(0);
                result.variant_count = count_nonblank_lines(&triad.bim).unwrap_or(0);
            }
            Err(message) => result.message = message,
        }
        result
    }

    /// Converts a PLINK binary fileset to VCF.
    pub fn plink_to_vcf(
        &self,
        bfile_prefix: &str,
        output_path: &str,
        extra_args: &[&str],
    ) -> ConversionResult {
        let cmd = self.build_plink_to_vcf_cmd(bfile_prefix, output_path, extra_args);
        let mut result = ConversionResult::pending(
            bfile_prefix,
            output_path,
            GenotypeFormat::PlinkBinary,
            GenotypeFormat::Vcf,
        );

        match run_tool(&cmd) {
            Ok(()) => result.success = true,
            Err(message) => result.message = message,
        }
        result
    }
}

/// Runs an external tool with captured output.
///
/// A launch failure or nonzero exit becomes a message, never a panic or a
/// crate error.
fn run_tool(cmd: &[String]) -> Result<(), String> {
    let Some((program, args)) = cmd.split_first() else {
        return Err("empty command line".to_string());
    };

    match Command::new(program).args(args).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(output) => Err(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )),
        Err(e) => Err(format!("failed to launch {}: {}", program, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_vcf_to_plink_cmd() {
        let converter = FormatConverter::default();
        let cmd = converter.build_vcf_to_plink_cmd("input.vcf", "output", &[]);

        assert_eq!(cmd[0], "plink");
        assert!(cmd.contains(&"--vcf".to_string()));
        assert!(cmd.contains(&"input.vcf".to_string()));
        assert!(cmd.contains(&"--make-bed".to_string()));
        assert!(cmd.contains(&"--allow-extra-chr".to_string()));
    }

    #[test]
    fn test_build_plink_to_vcf_cmd() {
        let converter = FormatConverter::default();
        let cmd = converter.build_plink_to_vcf_cmd("input", "output", &[]);

        assert!(cmd.contains(&"--bfile".to_string()));
        assert!(cmd.contains(&"--recode".to_string()));
        assert!(cmd.contains(&"vcf".to_string()));
    }

    #[test]
    fn test_extra_args_appended() {
        let converter = FormatConverter::default();
        let cmd = converter.build_vcf_to_plink_cmd("in.vcf", "out", &["--maf", "0.01"]);

        assert_eq!(&cmd[cmd.len() - 2..], &["--maf", "0.01"]);
    }

    #[test]
    fn test_custom_binary_path() {
        let converter = FormatConverter::new("/opt/plink/plink19");
        let cmd = converter.build_plink_to_vcf_cmd("in", "out", &[]);
        assert_eq!(cmd[0], "/opt/plink/plink19");
    }

    #[test]
    fn test_genotype_format_display() {
        assert_eq!(GenotypeFormat::Vcf.to_string(), "vcf");
        assert_eq!(GenotypeFormat::PlinkBinary.to_string(), "plink_binary");
    }

    #[test]
    fn test_missing_tool_reports_failure() {
        let converter = FormatConverter::new("/nonexistent/plink-binary");
        let result = converter.vcf_to_plink("in.vcf", "out", &[]);

        assert!(!result.success);
        assert!(result.message.contains("failed to launch"));
        assert_eq!(result.sample_count, 0);
        assert_eq!(result.variant_count, 0);
    }
}
