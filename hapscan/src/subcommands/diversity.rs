use std::io::Write;

use color_eyre::Result;
use csv::Writer;

use crate::args::{DiversityParams, StandardArgs};
use crate::groups::HaplotypeGroups;
use crate::io::{format_stat, open_strict_tsv_writer};
use crate::read_vcf::stream_contigs;
use crate::structs::HaplotypeMatrix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiversityWindow {
    /// Position of the first site of the window
    pub start: u64,
    /// Position of the first site after the window
    pub end: u64,
    pub pi: f64,
    pub ehh: Option<f64>,
}

/// Number of windows of `window` sites on a contig of `nsites` retained sites.
/// The end position of a window is taken from the site following it.
pub fn window_count(nsites: usize, window: usize) -> usize {
    nsites.saturating_sub(window)
}

pub fn score_window(matrix: &HaplotypeMatrix, start: usize, window: usize) -> DiversityWindow {
    let groups = HaplotypeGroups::from_window(matrix, start..start + window);

    tracing::trace!(
        "{}:{} window of {window} sites has {} haplotype groups",
        matrix.contig(),
        matrix.site(start).pos,
        groups.ngroups(),
    );

    DiversityWindow {
        start: matrix.site(start).pos,
        end: matrix.site(start + window).pos,
        pi: groups.nucleotide_diversity(),
        ehh: groups.homozygosity(),
    }
}

/// Slides a window of `window` sites over the contig one site at a time
pub fn diversity_scan(
    matrix: &HaplotypeMatrix,
    window: usize,
) -> impl Iterator<Item = DiversityWindow> + '_ {
    (0..window_count(matrix.nsites(), window)).map(move |start| score_window(matrix, start, window))
}

pub fn write_window<W: Write>(
    wtr: &mut Writer<W>,
    contig: &str,
    window: &DiversityWindow,
) -> Result<()> {
    wtr.write_record([
        contig.to_string(),
        window.start.to_string(),
        window.end.to_string(),
        window.pi.to_string(),
        format_stat(window.ehh),
    ])?;
    Ok(())
}

pub fn write_contig<W: Write>(
    wtr: &mut Writer<W>,
    matrix: &HaplotypeMatrix,
    window: usize,
) -> Result<usize> {
    let mut n = 0;
    for scored in diversity_scan(matrix, window) {
        write_window(wtr, matrix.contig(), &scored)?;
        n += 1;
    }
    wtr.flush()?;

    match n {
        0 => tracing::info!(
            "Skipping contig {}: {} retained sites do not fill a window of {window}.",
            matrix.contig(),
            matrix.nsites()
        ),
        n => tracing::info!("Wrote {n} windows on {}.", matrix.contig()),
    }

    Ok(n)
}

#[doc(hidden)]
pub fn run(args: StandardArgs, params: DiversityParams) -> Result<()> {
    params.check_window()?;
    let band = params.band()?;

    tracing::info!("Window size: {} SNPs", params.window);

    let mut wtr = open_strict_tsv_writer(args.output.clone())?;

    stream_contigs(&args, &band, |matrix| {
        write_contig(&mut wtr, matrix, params.window)?;
        Ok(())
    })?;

    wtr.flush()?;
    Ok(())
}
