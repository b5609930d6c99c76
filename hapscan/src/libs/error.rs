use thiserror::Error as ThisError;

#[rustfmt::skip]
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Failed to parse coords: {coord}")]
    CoordParse { coord: String },

    #[error("Position {value:?} is not an integer in coords {coord}")]
    PosParse { coord: String, value: String },

    #[error("At least two target individuals are required, got {count}")]
    TooFewTargets { count: usize },

    #[error("Target index {index} is out of range, the VCF has {nsamples} samples")]
    TargetOutOfRange { index: usize, nsamples: usize },

    #[error("None of the wanted samples was found in the vcf.")]
    SamplesNotFound,

    #[error("Unknown genotype likelihood format: {tag:?}. Use one of PL, GL, GP or GT")]
    UnknownModel { tag: String },

    #[error("Found an unphased genotype at {contig}:{pos}. All genotypes must be phased!")]
    Unphased { contig: String, pos: u64 },

    #[error("Missing genotype at {contig}:{pos}. Missing genotypes are not allowed")]
    MissingGenotype { contig: String, pos: u64 },

    #[error("Ploidy error at {contig}:{pos}: a sample has {ploidy} alleles, only diploid genotypes are supported")]
    Ploidy { contig: String, pos: u64, ploidy: usize },

    #[error("FORMAT field {field} is missing at {contig}:{pos}")]
    MissingFormatField { field: String, contig: String, pos: u64 },

    #[error("Window size must be at least 1")]
    InvalidWindow,

    #[error("Invalid allele frequency band: [{min}, {max}]")]
    InvalidFrequencyBand { min: f64, max: f64 },

    #[error("Record has no contig id at position {pos}")]
    NoContig { pos: u64 },

    #[error("Htslib error: {0}")]
    HtsLib(#[from] rust_htslib::errors::Error),

    #[error("Io error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("Failed to grow the haplotype matrix: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
