/// Integrated haplotype score (iHS). Integrates the decay of haplotype homozygosity around every
/// core SNP separately for the alternate and the reference allele carriers.
pub mod ihs;

/// Nucleotide diversity (pi) and extended haplotype homozygosity (eHH) in sliding SNP windows
pub mod diversity;

/// Shortcut to read vcf sample names
pub mod list_samples;
