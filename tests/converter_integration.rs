//! Integration tests for the external converter wrapper.
//!
//! The PLINK binary is not assumed to exist; these tests cover command
//! construction, failure reporting, and the companion-file counting that
//! runs after a successful conversion.

use genolens::formats::TriadPaths;
use genolens::io::count_nonblank_lines;
use genolens::{FormatConverter, GenotypeFormat};
use tempfile::TempDir;

#[test]
fn test_vcf_to_plink_command_shape() {
    let converter = FormatConverter::default();
    let cmd = converter.build_vcf_to_plink_cmd("input.vcf", "output", &[]);

    assert_eq!(
        cmd,
        vec![
            "plink",
            "--vcf",
            "input.vcf",
            "--make-bed",
            "--out",
            "output",
            "--allow-extra-chr",
        ]
    );
}

#[test]
fn test_plink_to_vcf_command_shape() {
    let converter = FormatConverter::default();
    let cmd = converter.build_plink_to_vcf_cmd("input", "output", &["--maf", "0.01"]);

    assert_eq!(
        cmd,
        vec![
            "plink",
            "--bfile",
            "input",
            "--recode",
            "vcf",
            "--out",
            "output",
            "--allow-extra-chr",
            "--maf",
            "0.01",
        ]
    );
}

#[test]
fn test_count_fam_samples() {
    let dir = TempDir::new().unwrap();
    let fam = dir.path().join("test.fam");
    std::fs::write(&fam, "FAM1 IND1 0 0 1 -9\nFAM2 IND2 0 0 2 -9\n").unwrap();

    assert_eq!(count_nonblank_lines(&fam).unwrap(), 2);
}

#[test]
fn test_count_bim_variants() {
    let dir = TempDir::new().unwrap();
    let bim = dir.path().join("test.bim");
    std::fs::write(
        &bim,
        "1\trs1\t0\t100\tA\tG\n1\trs2\t0\t200\tC\tT\n1\trs3\t0\t300\tG\tA\n",
    )
    .unwrap();

    assert_eq!(count_nonblank_lines(&bim).unwrap(), 3);
}

#[test]
fn test_count_missing_companion_is_zero() {
    assert_eq!(count_nonblank_lines("/nonexistent/none.fam").unwrap(), 0);
}

#[test]
fn test_counting_matches_triad_derivation() {
    let dir = TempDir::new().unwrap();
    let prefix = dir.path().join("cohort");
    let triad = TriadPaths::from_prefix(&prefix);
    std::fs::write(&triad.fam, "FAM1 IND1 0 0 1 -9\n\n").unwrap();
    std::fs::write(&triad.bim, "1\trs1\t0\t100\tA\tG\n").unwrap();

    assert_eq!(count_nonblank_lines(&triad.fam).unwrap(), 1);
    assert_eq!(count_nonblank_lines(&triad.bim).unwrap(), 1);
}

#[test]
fn test_failed_run_reports_without_raising() {
    let converter = FormatConverter::new("/nonexistent/plink-binary");
    let result = converter.vcf_to_plink("in.vcf", "out_prefix", &[]);

    assert!(!result.success);
    assert!(!result.message.is_empty());
    assert_eq!(result.input_path, "in.vcf");
    assert_eq!(result.output_prefix, "out_prefix");
    assert_eq!(result.input_format, GenotypeFormat::Vcf);
    assert_eq!(result.output_format, GenotypeFormat::PlinkBinary);
    assert_eq!(result.sample_count, 0);
    assert_eq!(result.variant_count, 0);
}

#[test]
fn test_failed_reverse_run_reports_without_raising() {
    let converter = FormatConverter::new("/nonexistent/plink-binary");
    let result = converter.plink_to_vcf("prefix", "out.vcf", &[]);

    assert!(!result.success);
    assert_eq!(result.input_format, GenotypeFormat::PlinkBinary);
    assert_eq!(result.output_format, GenotypeFormat::Vcf);
}
