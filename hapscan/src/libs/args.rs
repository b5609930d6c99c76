use std::path::PathBuf;

use crate::error::Error;
use crate::models::GenotypeModel;

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct StandardArgs {
    /// Phased VCF or BCF file
    pub file: PathBuf,

    /// Zero-based, comma separated VCF sample columns of the target individuals, i.e. 0,1,2,3
    #[cfg_attr(feature = "clap", arg(short = 't', long, value_delimiter = ','))]
    pub targets: Option<Vec<usize>>,

    /// List of target sample IDs (one ID per row)
    #[cfg_attr(feature = "clap", arg(short = 'S', long, value_hint = clap::ValueHint::FilePath))]
    pub samples: Option<PathBuf>,

    /// Genotype likelihood format used for the allele frequency
    #[cfg_attr(feature = "clap", arg(short = 'y', long = "type", value_enum))]
    pub model: GenotypeModel,

    /// Restrict to a region, i.e. chr1 or chr1:1-1000
    #[cfg_attr(feature = "clap", arg(short = 'r', long))]
    pub region: Option<String>,

    /// Output file (default: stdout)
    #[cfg_attr(feature = "clap", arg(short = 'o', long, value_hint = clap::ValueHint::FilePath))]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct IhsParams {
    /// Minimum number of retained sites for scoring a contig
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 10))]
    pub min_sites: usize,

    /// Sites with a lower target allele frequency are skipped
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 0.05))]
    pub min_af: f64,

    /// Sites with a higher target allele frequency are skipped
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 0.95))]
    pub max_af: f64,
}

impl Default for IhsParams {
    fn default() -> Self {
        Self {
            min_sites: 10,
            min_af: 0.05,
            max_af: 0.95,
        }
    }
}

impl IhsParams {
    pub fn band(&self) -> Result<AlleleFrequencyBand, Error> {
        AlleleFrequencyBand::new(self.min_af, self.max_af)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct DiversityParams {
    /// Number of SNPs per window
    #[cfg_attr(feature = "clap", arg(short = 'w', long, default_value_t = 20))]
    pub window: usize,

    /// Sites with a lower target allele frequency are skipped
    #[cfg_attr(feature = "clap", arg(short = 'a', long = "af", default_value_t = 0.0))]
    pub min_af: f64,
}

impl Default for DiversityParams {
    fn default() -> Self {
        Self {
            window: 20,
            min_af: 0.0,
        }
    }
}

impl DiversityParams {
    pub fn band(&self) -> Result<AlleleFrequencyBand, Error> {
        AlleleFrequencyBand::new(self.min_af, 1.0)
    }

    pub fn check_window(&self) -> Result<(), Error> {
        match self.window {
            0 => Err(Error::InvalidWindow),
            _ => Ok(()),
        }
    }
}

/// Inclusive range of accepted allele frequencies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlleleFrequencyBand {
    pub min: f64,
    pub max: f64,
}

impl AlleleFrequencyBand {
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        match in_unit(min) && in_unit(max) && min <= max {
            true => Ok(Self { min, max }),
            false => Err(Error::InvalidFrequencyBand { min, max }),
        }
    }

    pub fn contains(&self, af: f64) -> bool {
        self.min <= af && af <= self.max
    }
}

impl Default for AlleleFrequencyBand {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allele_frequency_band() {
        let band = IhsParams::default().band().unwrap();
        assert!(band.contains(0.05));
        assert!(band.contains(0.95));
        assert!(band.contains(0.5));
        assert!(!band.contains(0.04));
        assert!(!band.contains(0.96));

        let band = DiversityParams::default().band().unwrap();
        assert!(band.contains(0.0));
        assert!(band.contains(1.0));

        assert!(AlleleFrequencyBand::new(0.6, 0.4).is_err());
        assert!(AlleleFrequencyBand::new(-0.1, 0.4).is_err());
        assert!(AlleleFrequencyBand::new(0.1, 1.1).is_err());
    }

    #[test]
    fn test_check_window() {
        let params = DiversityParams { window: 0, ..Default::default() };
        assert!(matches!(params.check_window(), Err(Error::InvalidWindow)));
        assert!(DiversityParams::default().check_window().is_ok());
    }
}
