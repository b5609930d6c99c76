use std::ops::Range;

use ndarray::{s, Array2, ArrayView1, ShapeBuilder};

use crate::error::Error;

/// A retained, phased and bi-allelic site
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Site {
    pub pos: u64,
    pub af: f64,
}

/// A site together with the alleles of every haplotype copy.
/// Individual `i` owns alleles `2i` and `2i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasedSite {
    pub contig: String,
    pub site: Site,
    pub alleles: Vec<u8>,
}

/// Phased haplotypes of one contig. One row per haplotype copy, one column per retained site.
#[derive(Debug, Clone, PartialEq)]
pub struct HaplotypeMatrix {
    contig: String,
    sites: Vec<Site>,
    matrix: Array2<u8>,
}

impl HaplotypeMatrix {
    pub fn new(contig: &str, nhaplotypes: usize) -> Self {
        Self {
            contig: contig.to_string(),
            sites: vec![],
            // Column major so that appending sites does not move the existing alleles
            matrix: Array2::zeros((nhaplotypes, 0).f()),
        }
    }

    pub fn push_site(&mut self, site: Site, alleles: &[u8]) -> Result<(), Error> {
        self.matrix.push_column(ArrayView1::from(alleles))?;
        self.sites.push(site);
        Ok(())
    }

    pub fn contig(&self) -> &str {
        &self.contig
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn site(&self, idx: usize) -> &Site {
        &self.sites[idx]
    }

    pub fn nsites(&self) -> usize {
        self.sites.len()
    }

    pub fn nhaplotypes(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn haplotype(&self, hap: usize) -> ArrayView1<'_, u8> {
        self.matrix.row(hap)
    }

    /// Slices of every haplotype over the given site range
    pub fn windows(&self, window: Range<usize>) -> impl Iterator<Item = ArrayView1<'_, u8>> + '_ {
        (0..self.nhaplotypes()).map(move |hap| self.matrix.slice(s![hap, window.clone()]))
    }
}

/// Collects phased sites into per contig matrices.
///
/// Pushing a site from a new contig hands the finished matrix of the previous contig back to the
/// caller and starts a fresh one, which keeps site indexes starting from zero on every contig.
#[derive(Debug)]
pub struct ContigAccumulator {
    nhaplotypes: usize,
    current: Option<HaplotypeMatrix>,
}

impl ContigAccumulator {
    pub fn new(nhaplotypes: usize) -> Self {
        Self {
            nhaplotypes,
            current: None,
        }
    }

    /// Appends a site. When the site starts a new contig the finished matrix of the previous
    /// contig is returned. A failed push leaves the accumulator untouched.
    pub fn push(&mut self, site: PhasedSite) -> Result<Option<HaplotypeMatrix>, Error> {
        if let Some(matrix) = self.current.as_mut() {
            if matrix.contig() == site.contig {
                matrix.push_site(site.site, &site.alleles)?;
                return Ok(None);
            }
        }

        let mut matrix = HaplotypeMatrix::new(&site.contig, self.nhaplotypes);
        matrix.push_site(site.site, &site.alleles)?;

        Ok(self.current.replace(matrix))
    }

    pub fn finish(self) -> Option<HaplotypeMatrix> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phased(contig: &str, pos: u64, alleles: &[u8]) -> PhasedSite {
        PhasedSite {
            contig: contig.to_string(),
            site: Site { pos, af: 0.5 },
            alleles: alleles.to_vec(),
        }
    }

    #[test]
    fn test_push_site() {
        let mut matrix = HaplotypeMatrix::new("chr1", 4);
        matrix.push_site(Site { pos: 1, af: 0.5 }, &[0, 1, 1, 0]).unwrap();
        matrix.push_site(Site { pos: 5, af: 0.25 }, &[1, 1, 0, 0]).unwrap();

        assert_eq!(matrix.nsites(), 2);
        assert_eq!(matrix.nhaplotypes(), 4);
        assert_eq!(matrix.haplotype(0).to_vec(), vec![0, 1]);
        assert_eq!(matrix.haplotype(2).to_vec(), vec![1, 0]);

        let windows: Vec<Vec<u8>> = matrix.windows(1..2).map(|w| w.to_vec()).collect();
        assert_eq!(windows, vec![vec![1], vec![1], vec![0], vec![0]]);
    }

    #[test]
    fn test_push_site_wrong_width() {
        let mut matrix = HaplotypeMatrix::new("chr1", 4);
        assert!(matrix.push_site(Site::default(), &[0, 1]).is_err());
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_contig_transitions() {
        assert!(ContigAccumulator::new(2).finish().is_none());

        let mut acc = ContigAccumulator::new(2);
        assert!(acc.push(phased("chr1", 1, &[0, 1])).unwrap().is_none());
        assert!(acc.push(phased("chr1", 2, &[1, 1])).unwrap().is_none());

        let chr1 = acc.push(phased("chr2", 1, &[0, 0])).unwrap().unwrap();
        assert_eq!(chr1.contig(), "chr1");
        assert_eq!(chr1.nsites(), 2);

        let chr2 = acc.finish().unwrap();
        assert_eq!(chr2.contig(), "chr2");
        assert_eq!(chr2.nsites(), 1);
        assert_eq!(chr2.site(0).pos, 1);
        assert_eq!(chr2.haplotype(0).to_vec(), vec![0]);
    }

    #[test]
    fn test_failed_push_keeps_the_finished_contig() {
        let mut acc = ContigAccumulator::new(2);
        acc.push(phased("chr1", 1, &[0, 1])).unwrap();
        acc.push(phased("chr1", 2, &[1, 1])).unwrap();

        // A malformed first site of the next contig must not drop chr1
        assert!(acc.push(phased("chr2", 1, &[0, 0, 1])).is_err());
        assert!(acc.push(phased("chr1", 3, &[0])).is_err());

        let chr1 = acc.finish().unwrap();
        assert_eq!(chr1.contig(), "chr1");
        assert_eq!(chr1.nsites(), 2);
        assert_eq!(chr1.haplotype(1).to_vec(), vec![1, 1]);
    }
}
