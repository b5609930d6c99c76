use std::io::Write;

use color_eyre::Result;
use csv::Writer;

use crate::args::{IhsParams, StandardArgs};
use crate::groups::HaplotypeGroups;
use crate::io::{format_stat, open_strict_tsv_writer};
use crate::read_vcf::stream_contigs;
use crate::stats::TrapezoidIntegral;
use crate::structs::HaplotypeMatrix;

/// Decay of both classes below this value ends the scan of a core site
pub const EHH_CUTOFF: f64 = 0.05;

/// Integrated EHH of the haplotypes carrying the alternate and the reference allele of a core site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IhsScore {
    pub pos: u64,
    pub af: f64,
    pub iehh_alt: f64,
    pub iehh_ref: f64,
    /// Number of window growth steps taken after the seed
    pub steps: usize,
}

impl IhsScore {
    /// ln(iEHH alt / iEHH ref), `None` when the ratio is not finite
    pub fn ihs(&self) -> Option<f64> {
        let ihs = (self.iehh_alt / self.iehh_ref).ln();
        ihs.is_finite().then_some(ihs)
    }
}

/// Haplotypes of the window at `step` and the offset of the core site within it.
/// The seed is the core site alone, after that the window grows by one site on both sides.
pub fn decay_window(core: usize, step: usize) -> (std::ops::Range<usize>, usize) {
    match step {
        0 => (core..core + 1, 0),
        t => (core - t..core + t, t),
    }
}

/// EHH of the (alternate, reference) classes. A class with less than two haplotypes scores zero.
pub fn class_ehh(matrix: &HaplotypeMatrix, core: usize, step: usize) -> (f64, f64) {
    let (window, offset) = decay_window(core, step);
    let groups = HaplotypeGroups::from_window(matrix, window);
    let (reference, alternate) = groups.classify(offset);

    tracing::trace!(
        "{}:{} step {step}: {} alt and {} ref haplotypes in {} groups",
        matrix.contig(),
        matrix.site(core).pos,
        alternate.total,
        reference.total,
        groups.ngroups(),
    );

    (
        alternate.homozygosity().unwrap_or(0.0),
        reference.homozygosity().unwrap_or(0.0),
    )
}

/// Integrates the EHH decay around one core site
pub fn score_core_site(matrix: &HaplotypeMatrix, core: usize) -> IhsScore {
    let nsites = matrix.nsites();

    let (seed_alt, seed_ref) = class_ehh(matrix, core, 0);
    let mut alt = TrapezoidIntegral::new(seed_alt);
    let mut reference = TrapezoidIntegral::new(seed_ref);

    let mut steps = 0;

    loop {
        let step = steps + 1;

        // The window has reached either end of the contig
        if step > core || core + step >= nsites - 1 {
            break;
        }

        let (ehh_alt, ehh_ref) = class_ehh(matrix, core, step);
        alt.push(ehh_alt);
        reference.push(ehh_ref);
        steps = step;

        if ehh_alt < EHH_CUTOFF && ehh_ref < EHH_CUTOFF {
            break;
        }
    }

    let site = matrix.site(core);

    IhsScore {
        pos: site.pos,
        af: site.af,
        iehh_alt: alt.area(),
        iehh_ref: reference.area(),
        steps,
    }
}

/// Scores every retained site of the contig as a core site
pub fn decay_scan(matrix: &HaplotypeMatrix) -> impl Iterator<Item = IhsScore> + '_ {
    (0..matrix.nsites()).map(move |core| score_core_site(matrix, core))
}

pub fn write_score<W: Write>(wtr: &mut Writer<W>, contig: &str, score: &IhsScore) -> Result<()> {
    wtr.write_record([
        contig.to_string(),
        score.pos.to_string(),
        score.af.to_string(),
        score.iehh_alt.to_string(),
        score.iehh_ref.to_string(),
        format_stat(score.ihs()),
    ])?;
    Ok(())
}

/// Scores a contig and writes the scores, contigs with too few sites are skipped
pub fn write_contig<W: Write>(
    wtr: &mut Writer<W>,
    matrix: &HaplotypeMatrix,
    min_sites: usize,
) -> Result<usize> {
    if matrix.nsites() < min_sites {
        tracing::info!(
            "Skipping contig {}: {} retained sites is less than the minimum of {min_sites}.",
            matrix.contig(),
            matrix.nsites()
        );
        return Ok(0);
    }

    let mut n = 0;
    for score in decay_scan(matrix) {
        write_score(wtr, matrix.contig(), &score)?;
        n += 1;
    }
    wtr.flush()?;

    tracing::info!("Scored {n} core sites on {}.", matrix.contig());
    Ok(n)
}

#[doc(hidden)]
pub fn run(args: StandardArgs, params: IhsParams) -> Result<()> {
    let band = params.band()?;
    let mut wtr = open_strict_tsv_writer(args.output.clone())?;

    stream_contigs(&args, &band, |matrix| {
        write_contig(&mut wtr, matrix, params.min_sites)?;
        Ok(())
    })?;

    wtr.flush()?;
    Ok(())
}
