use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::ensure, Result};
use rust_htslib::bcf::header::HeaderView;
use rust_htslib::bcf::record::{Buffer, GenotypeAllele};
use rust_htslib::bcf::{IndexedReader, Read, Reader, Record};

use crate::{
    args::{AlleleFrequencyBand, StandardArgs},
    error::Error,
    io::read_sample_ids,
    models::GenotypeModel,
    structs::{ContigAccumulator, HaplotypeMatrix, PhasedSite, Site},
    utils::Region,
};

pub enum VcfReader {
    Indexed(IndexedReader),
    Streaming(Reader),
}

impl VcfReader {
    pub fn header(&self) -> &HeaderView {
        match self {
            Self::Indexed(reader) => reader.header(),
            Self::Streaming(reader) => reader.header(),
        }
    }

    pub fn empty_record(&self) -> Record {
        match self {
            Self::Indexed(reader) => reader.empty_record(),
            Self::Streaming(reader) => reader.empty_record(),
        }
    }

    pub fn read(&mut self, record: &mut Record) -> Option<rust_htslib::errors::Result<()>> {
        match self {
            Self::Indexed(reader) => reader.read(record),
            Self::Streaming(reader) => reader.read(record),
        }
    }
}

/// Opens the VCF. A region is fetched through the index when one exists, otherwise the whole
/// file is streamed and the caller is expected to filter records by the region.
pub fn get_reader(path: &Path, region: Option<&Region>) -> Result<VcfReader, Error> {
    let Some(region) = region else {
        return Ok(VcfReader::Streaming(Reader::from_path(path)?));
    };

    match IndexedReader::from_path(path) {
        Ok(mut reader) => {
            let rid = reader.header().name2rid(region.contig.as_bytes())?;

            match region.range {
                // RUST-HTSLIB is 0-based so subtract 1
                Some((start, end)) => {
                    reader.fetch(rid, start.saturating_sub(1), Some(end.saturating_sub(1)))?
                }
                None => reader.fetch(rid, 0, None)?,
            };

            Ok(VcfReader::Indexed(reader))
        }
        Err(e) => {
            tracing::warn!("No index found for {path:?} ({e}). Streaming the whole file to find region {region}.");
            Ok(VcfReader::Streaming(Reader::from_path(path)?))
        }
    }
}

pub fn get_samples(header: &HeaderView) -> Vec<String> {
    header
        .samples()
        .into_iter()
        .map(|sample| String::from_utf8_lossy(sample).to_string())
        .collect()
}

/// Sorted and deduplicated VCF columns of the targets, given as indexes and/or sample IDs
pub fn resolve_targets(
    samples: &[String],
    targets: &Option<Vec<usize>>,
    sample_file: &Option<PathBuf>,
) -> Result<Vec<usize>> {
    let mut indexes = BTreeSet::new();

    if let Some(targets) = targets {
        for index in targets {
            ensure!(
                *index < samples.len(),
                Error::TargetOutOfRange {
                    index: *index,
                    nsamples: samples.len()
                }
            );
            indexes.insert(*index);
        }
    }

    if let Some(wanted) = read_sample_ids(sample_file)? {
        for id in wanted.iter().filter(|id| !samples.contains(id)) {
            tracing::warn!("Wanted sample {id} is not in the VCF");
        }

        let found = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| wanted.contains(s))
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();

        ensure!(!found.is_empty(), Error::SamplesNotFound);
        indexes.extend(found);
    }

    ensure!(
        indexes.len() >= 2,
        Error::TooFewTargets {
            count: indexes.len()
        }
    );

    Ok(indexes.into_iter().collect())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Site(PhasedSite),
    MultiAllelic(usize),
    NoAlt,
}

/// Extracts the phased alleles of the targets and the target allele frequency from a record.
///
/// An unphased genotype in any sample of the VCF is an error. Missing and non-diploid genotypes
/// are errors for the targets. Both hold even at records that are skipped for their allele count.
pub fn parse_record(
    record: &Record,
    contig: &str,
    targets: &[usize],
    model: GenotypeModel,
    buffer: &mut Buffer,
) -> Result<RecordOutcome, Error> {
    // HTSlib is 0-based so add 1
    let pos = (record.pos() + 1) as u64;

    let gts = record.genotypes_shared_buffer(buffer)?;

    for sample in 0..record.sample_count() as usize {
        let gt = gts.get(sample);

        // The phase of a genotype is stored in its second allele, haploid calls have no phase
        if gt.len() > 1
            && !matches!(
                gt[1],
                GenotypeAllele::Phased(_) | GenotypeAllele::PhasedMissing
            )
        {
            return Err(Error::Unphased {
                contig: contig.to_string(),
                pos,
            });
        }
    }

    let mut alleles = Vec::with_capacity(targets.len() * 2);

    for sample in targets {
        let gt = gts.get(*sample);

        if gt.len() != 2 {
            return Err(Error::Ploidy {
                contig: contig.to_string(),
                pos,
                ploidy: gt.len(),
            });
        }

        for allele in gt.iter() {
            match allele.index() {
                Some(idx) => alleles.push(idx as u8),
                None => {
                    return Err(Error::MissingGenotype {
                        contig: contig.to_string(),
                        pos,
                    })
                }
            }
        }
    }

    match record.allele_count() {
        0 | 1 => return Ok(RecordOutcome::NoAlt),
        2 => (),
        n => return Ok(RecordOutcome::MultiAllelic(n as usize - 1)),
    }

    let af = model.estimate_af(record, targets, &alleles, contig, pos)?;

    Ok(RecordOutcome::Site(PhasedSite {
        contig: contig.to_string(),
        site: Site { pos, af },
        alleles,
    }))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub records: usize,
    pub retained: usize,
    pub skipped_allele_count: usize,
    pub skipped_af: usize,
    pub contigs: usize,
}

/// Streams the VCF one record at a time and hands every finished contig to `consumer`.
///
/// Records with other than one ALT allele and records with a target allele frequency outside
/// `band` are skipped.
pub fn stream_contigs<F>(
    args: &StandardArgs,
    band: &AlleleFrequencyBand,
    mut consumer: F,
) -> Result<StreamSummary>
where
    F: FnMut(&HaplotypeMatrix) -> Result<()>,
{
    let region = args
        .region
        .as_deref()
        .map(str::parse::<Region>)
        .transpose()?;

    let mut reader = get_reader(&args.file, region.as_ref())?;
    let samples = get_samples(reader.header());
    let targets = resolve_targets(&samples, &args.targets, &args.samples)?;

    tracing::info!("Input VCF: {:?}", args.file);
    tracing::info!("There are {} individuals in the target.", targets.len());
    tracing::info!(
        "Target samples: {}",
        targets
            .iter()
            .map(|i| samples[*i].as_str())
            .collect::<Vec<&str>>()
            .join(",")
    );
    tracing::info!(
        "Genotype likelihood format: {}. Allele frequency band: [{}, {}].",
        args.model,
        band.min,
        band.max
    );

    let mut accumulator = ContigAccumulator::new(targets.len() * 2);
    let mut summary = StreamSummary::default();

    let mut record = reader.empty_record();
    let mut buffer = Buffer::new();

    while let Some(result) = reader.read(&mut record) {
        result?;

        // HTSlib is 0-based so add 1
        let pos = (record.pos() + 1) as u64;
        let rid = record.rid().ok_or(Error::NoContig { pos })?;
        let contig = String::from_utf8_lossy(record.header().rid2name(rid)?).to_string();

        if let Some(region) = &region {
            if !region.contains(&contig, pos) {
                continue;
            }
        }

        summary.records += 1;
        tracing::trace!("Reading record at {contig}:{pos}");

        let site = match parse_record(&record, &contig, &targets, args.model, &mut buffer)? {
            RecordOutcome::Site(site) => site,
            RecordOutcome::MultiAllelic(n) => {
                tracing::debug!("Skipping {contig}:{pos}, {n} ALT alleles");
                summary.skipped_allele_count += 1;
                continue;
            }
            RecordOutcome::NoAlt => {
                tracing::debug!("Skipping {contig}:{pos}, no ALT allele");
                summary.skipped_allele_count += 1;
                continue;
            }
        };

        if !band.contains(site.site.af) {
            tracing::debug!(
                "Skipping {contig}:{pos}, allele frequency {} outside the band",
                site.site.af
            );
            summary.skipped_af += 1;
            continue;
        }

        summary.retained += 1;

        if let Some(finished) = accumulator.push(site)? {
            flush(&finished, &mut consumer, &mut summary)?;
        }
    }

    if let Some(last) = accumulator.finish() {
        flush(&last, &mut consumer, &mut summary)?;
    }

    tracing::info!(
        "Read {} records from {} contigs. Retained {} sites, skipped {} for the ALT allele count and {} for the allele frequency.",
        summary.records,
        summary.contigs,
        summary.retained,
        summary.skipped_allele_count,
        summary.skipped_af,
    );

    Ok(summary)
}

fn flush<F>(matrix: &HaplotypeMatrix, consumer: &mut F, summary: &mut StreamSummary) -> Result<()>
where
    F: FnMut(&HaplotypeMatrix) -> Result<()>,
{
    tracing::info!(
        "Finished contig {} with {} retained sites.",
        matrix.contig(),
        matrix.nsites()
    );
    summary.contigs += 1;
    consumer(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<String> {
        (1..=4).map(|v| format!("SAMPLE{v}")).collect()
    }

    #[test]
    fn test_resolve_target_indexes() {
        let targets = resolve_targets(&samples(), &Some(vec![3, 0, 3]), &None).unwrap();
        assert_eq!(targets, vec![0, 3]);
    }

    #[test]
    fn test_resolve_too_few_targets() {
        let err = resolve_targets(&samples(), &Some(vec![1, 1]), &None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::TooFewTargets { count: 1 })
        ));

        let err = resolve_targets(&samples(), &None, &None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::TooFewTargets { count: 0 })
        ));
    }

    #[test]
    fn test_resolve_target_out_of_range() {
        let err = resolve_targets(&samples(), &Some(vec![0, 4]), &None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::TargetOutOfRange { index: 4, nsamples: 4 })
        ));
    }
}
