use rust_htslib::bcf::Record;

use crate::error::Error;

/// The FORMAT field used for estimating the allele frequency of a site
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum GenotypeModel {
    /// Phred scaled genotype likelihoods
    #[cfg_attr(feature = "clap", value(name = "PL"))]
    PL,
    /// Log10 scaled genotype likelihoods
    #[cfg_attr(feature = "clap", value(name = "GL"))]
    GL,
    /// Genotype posterior probabilities
    #[cfg_attr(feature = "clap", value(name = "GP"))]
    GP,
    /// Called genotypes
    #[default]
    #[cfg_attr(feature = "clap", value(name = "GT"))]
    GT,
}

impl std::str::FromStr for GenotypeModel {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "PL" => Ok(Self::PL),
            "GL" => Ok(Self::GL),
            "GP" => Ok(Self::GP),
            "GT" => Ok(Self::GT),
            _ => Err(Error::UnknownModel { tag: tag.into() }),
        }
    }
}

impl std::fmt::Display for GenotypeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::PL => write!(f, "PL"),
            Self::GL => write!(f, "GL"),
            Self::GP => write!(f, "GP"),
            Self::GT => write!(f, "GT"),
        }
    }
}

impl GenotypeModel {
    pub fn field(&self) -> &'static [u8] {
        match self {
            Self::PL => b"PL",
            Self::GL => b"GL",
            Self::GP => b"GP",
            Self::GT => b"GT",
        }
    }

    /// Alternate allele frequency of the target samples at a bi-allelic site.
    ///
    /// `alleles` holds the phased calls of the targets, two per sample. Likelihood models use the
    /// expected alternate allele dosage of each sample and fall back to the called dosage when a
    /// sample does not carry exactly three values.
    pub fn estimate_af(
        &self,
        record: &Record,
        targets: &[usize],
        alleles: &[u8],
        contig: &str,
        pos: u64,
    ) -> Result<f64, Error> {
        let missing_field = |_| Error::MissingFormatField {
            field: self.to_string(),
            contig: contig.to_string(),
            pos,
        };

        let dosages: Vec<f64> = match self {
            Self::GT => called_dosages(alleles).collect(),
            Self::PL => {
                let buffer = record.format(self.field()).integer().map_err(missing_field)?;
                expected_dosages(targets, alleles, |sample| {
                    let values = int_values(buffer.get(sample)?);
                    weights(&values, |pl| 10_f64.powf(-pl / 10.0))
                })
            }
            Self::GL => {
                let buffer = record.format(self.field()).float().map_err(missing_field)?;
                expected_dosages(targets, alleles, |sample| {
                    let values = float_values(buffer.get(sample)?);
                    weights(&values, |gl| 10_f64.powf(gl))
                })
            }
            Self::GP => {
                let buffer = record.format(self.field()).float().map_err(missing_field)?;
                expected_dosages(targets, alleles, |sample| {
                    let values = float_values(buffer.get(sample)?);
                    weights(&values, |gp| gp)
                })
            }
        };

        Ok(allele_frequency(&dosages))
    }
}

pub fn allele_frequency(dosages: &[f64]) -> f64 {
    if dosages.is_empty() {
        return 0.0;
    }
    dosages.iter().sum::<f64>() / (2 * dosages.len()) as f64
}

fn called_dosages(alleles: &[u8]) -> impl Iterator<Item = f64> + '_ {
    alleles
        .chunks_exact(2)
        .map(|gt| f64::from(gt[0]) + f64::from(gt[1]))
}

fn expected_dosages<F>(targets: &[usize], alleles: &[u8], mut sample_weights: F) -> Vec<f64>
where
    F: FnMut(usize) -> Option<[f64; 3]>,
{
    targets
        .iter()
        .zip(called_dosages(alleles))
        .map(|(sample, called)| match sample_weights(*sample) {
            Some(w) => (w[1] + 2.0 * w[2]) / (w[0] + w[1] + w[2]),
            None => called,
        })
        .collect()
}

// Missing values and vector ends are the two smallest integers
fn int_values(values: &[i32]) -> Vec<f64> {
    values
        .iter()
        .filter(|v| **v > i32::MIN + 1)
        .map(|v| f64::from(*v))
        .collect()
}

// Missing values and vector ends are NaN payloads
fn float_values(values: &[f32]) -> Vec<f64> {
    values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| f64::from(*v))
        .collect()
}

fn weights(values: &[f64], scale: impl Fn(f64) -> f64) -> Option<[f64; 3]> {
    let [hom_ref, het, hom_alt] = values else {
        return None;
    };
    let w = [scale(*hom_ref), scale(*het), scale(*hom_alt)];
    let total = w[0] + w[1] + w[2];
    (total > 0.0 && total.is_finite()).then_some(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_str() {
        assert_eq!("PL".parse::<GenotypeModel>().unwrap(), GenotypeModel::PL);
        assert_eq!("GT".parse::<GenotypeModel>().unwrap(), GenotypeModel::GT);

        let err = "XX".parse::<GenotypeModel>().unwrap_err();
        assert!(matches!(err, Error::UnknownModel { .. }));
        assert_eq!(GenotypeModel::GP.to_string(), "GP");
    }

    #[test]
    fn test_called_allele_frequency() {
        let dosages: Vec<f64> = called_dosages(&[0, 1, 1, 1, 0, 0, 0, 0]).collect();
        assert_eq!(dosages, vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(allele_frequency(&dosages), 0.375);
        assert_eq!(allele_frequency(&[]), 0.0);
    }

    #[test]
    fn test_weights() {
        assert_eq!(weights(&[0.0, 1.0, 0.0], |gp| gp), Some([0.0, 1.0, 0.0]));
        assert_eq!(weights(&[0.0, 0.0], |gp| gp), None);
        assert_eq!(weights(&[0.0, 0.0, 0.0], |gp| gp), None);

        let w = weights(&[0.0, 10.0, 20.0], |pl| 10_f64.powf(-pl / 10.0)).unwrap();
        assert_eq!(w[0], 1.0);
        assert!((w[1] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_expected_dosages_fall_back_to_calls() {
        let dosages = expected_dosages(&[0, 3], &[1, 1, 0, 1], |sample| match sample {
            0 => Some([1.0, 0.0, 0.0]),
            _ => None,
        });
        assert_eq!(dosages, vec![0.0, 1.0]);
    }

    #[test]
    fn test_missing_values_are_dropped() {
        assert_eq!(int_values(&[0, 3, i32::MIN + 1]), vec![0.0, 3.0]);
        assert_eq!(int_values(&[i32::MIN, 3, 5]), vec![3.0, 5.0]);
        assert_eq!(float_values(&[-0.1, f32::NAN]).len(), 1);
    }
}
