#![allow(dead_code)]
use std::path::PathBuf;

use hapscan::{args::StandardArgs, models::GenotypeModel};

pub const TEST_VCF: &str = "tests/data/test.vcf";
pub const IDENTICAL_VCF: &str = "tests/data/identical.vcf";
pub const UNPHASED_VCF: &str = "tests/data/unphased.vcf";
pub const SAMPLES: &str = "tests/data/samples.txt";

pub const ALL_TARGETS: [usize; 6] = [0, 1, 2, 3, 4, 5];

pub fn standard_args(file: &str, targets: &[usize]) -> StandardArgs {
    StandardArgs {
        file: PathBuf::from(file),
        targets: Some(targets.to_vec()),
        model: GenotypeModel::GT,
        ..Default::default()
    }
}

/// A fresh output path in the system temp directory
pub fn output_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("hapscan-tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

pub fn read_rows(path: &PathBuf) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').map(String::from).collect())
        .collect()
}

#[cfg(feature = "clap")]
pub fn silent_verbosity() -> hapscan::clap::LogAndVerbosity {
    hapscan::clap::LogAndVerbosity {
        verbosity: 1,
        log_file: None,
        silent: false,
    }
}
