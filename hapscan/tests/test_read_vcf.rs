mod common;

use std::path::PathBuf;

use hapscan::{
    args::AlleleFrequencyBand,
    models::GenotypeModel,
    read_vcf::{get_reader, get_samples, stream_contigs, StreamSummary},
    subcommands::list_samples::{self, get_sample_names},
};

use crate::common::*;

#[test]
fn stream_contigs_one_at_a_time() {
    let args = standard_args(TEST_VCF, &ALL_TARGETS);
    let mut seen = vec![];

    let summary = stream_contigs(&args, &AlleleFrequencyBand::default(), |matrix| {
        assert_eq!(matrix.nhaplotypes(), 12);
        seen.push((matrix.contig().to_string(), matrix.nsites(), matrix.site(0).pos));
        Ok(())
    })
    .unwrap();

    assert_eq!(
        seen,
        vec![
            (String::from("chr1"), 14, 100),
            (String::from("chr2"), 12, 50),
            (String::from("chr3"), 5, 20),
        ]
    );
    assert_eq!(
        summary,
        StreamSummary {
            records: 33,
            retained: 31,
            skipped_allele_count: 2,
            skipped_af: 0,
            contigs: 3,
        }
    );
}

#[test]
fn stream_only_the_targets() {
    let args = standard_args(TEST_VCF, &[5, 0]);
    let band = AlleleFrequencyBand::new(0.05, 0.95).unwrap();

    let mut afs = vec![];
    let summary = stream_contigs(&args, &band, |matrix| {
        assert_eq!(matrix.nhaplotypes(), 4);
        afs.extend(matrix.sites().iter().map(|site| site.af));
        Ok(())
    })
    .unwrap();

    assert_eq!(summary.retained + summary.skipped_af, 31);
    assert_eq!(afs.len(), summary.retained);
    assert!(afs.iter().all(|af| band.contains(*af)));
}

#[test]
fn stream_with_likelihoods() {
    let mut args = standard_args(TEST_VCF, &ALL_TARGETS);
    args.model = GenotypeModel::PL;

    let mut first = None;
    stream_contigs(&args, &AlleleFrequencyBand::default(), |matrix| {
        first.get_or_insert(matrix.site(1).af);
        Ok(())
    })
    .unwrap();

    // Three hets and three hom-refs, the likelihoods lift the estimate slightly above 0.25
    let af = first.unwrap();
    assert!(af > 0.25 && af < 0.26);
}

#[test]
fn stream_region() {
    let mut args = standard_args(TEST_VCF, &ALL_TARGETS);
    args.region = Some(String::from("chr1:500-900"));

    let mut positions = vec![];
    let summary = stream_contigs(&args, &AlleleFrequencyBand::default(), |matrix| {
        positions.extend(matrix.sites().iter().map(|site| site.pos));
        Ok(())
    })
    .unwrap();

    assert_eq!(positions, vec![500, 600, 700, 800, 900]);
    assert_eq!(summary.skipped_allele_count, 1);

    let mut args = standard_args(TEST_VCF, &ALL_TARGETS);
    args.region = Some(String::from("chr1:900-500"));
    assert!(stream_contigs(&args, &AlleleFrequencyBand::default(), |_| Ok(())).is_err());
}

#[test]
fn read_sample_names() {
    let ids = get_sample_names(&PathBuf::from(TEST_VCF)).unwrap();
    let expected: Vec<String> = (1..=6).map(|v| format!("SAMPLE{v}")).collect();
    assert_eq!(ids, expected);

    let reader = get_reader(&PathBuf::from(IDENTICAL_VCF), None).unwrap();
    assert_eq!(get_samples(reader.header()).len(), 4);

    assert!(list_samples::run(PathBuf::from(TEST_VCF)).is_ok());
}

#[test]
#[cfg(feature = "clap")]
fn samples_subcommand() {
    let cmd = hapscan::clap::SubCommand::Samples {
        file: PathBuf::from(TEST_VCF),
        log_and_verbosity: silent_verbosity(),
    };
    hapscan::clap::run_cmd(cmd).unwrap();
}
