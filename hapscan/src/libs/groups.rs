use std::ops::Range;

use indexmap::IndexMap;
use itertools::Itertools;
use ndarray::ArrayView1;

use crate::stats::{choose2, hamming_distance};
use crate::structs::HaplotypeMatrix;

/// Allele symbol of the alternate allele
pub const ALT_ALLELE: u8 = 1;

/// Identical pairs and total haplotype count of one allele class
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClassCounts {
    pub pairs: f64,
    pub total: usize,
}

impl ClassCounts {
    fn add_group(&mut self, count: usize) {
        self.pairs += choose2(count as f64);
        self.total += count;
    }

    /// Probability that two haplotypes drawn from the class are identical.
    /// `None` when the class has less than two members.
    pub fn homozygosity(&self) -> Option<f64> {
        if self.total < 2 {
            return None;
        }
        Some(self.pairs / choose2(self.total as f64))
    }
}

/// Identical haplotype slices grouped together, in order of first appearance
#[derive(Debug, Clone)]
pub struct HaplotypeGroups<'a> {
    groups: IndexMap<ArrayView1<'a, u8>, usize>,
    total: usize,
}

impl<'a> HaplotypeGroups<'a> {
    pub fn from_haplotypes<I>(haplotypes: I) -> Self
    where
        I: IntoIterator<Item = ArrayView1<'a, u8>>,
    {
        let mut groups: IndexMap<ArrayView1<'a, u8>, usize> = IndexMap::new();
        let mut total = 0;

        for hap in haplotypes {
            *groups.entry(hap).or_insert(0) += 1;
            total += 1;
        }

        Self { groups, total }
    }

    /// Groups the slices of every haplotype of the matrix over `window`
    pub fn from_window(matrix: &'a HaplotypeMatrix, window: Range<usize>) -> Self {
        Self::from_haplotypes(matrix.windows(window))
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn ngroups(&self) -> usize {
        self.groups.len()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.values().copied().collect()
    }

    /// Splits the groups by the allele at `offset` of each group's haplotype slice
    /// into (reference, alternate) classes
    pub fn classify(&self, offset: usize) -> (ClassCounts, ClassCounts) {
        let mut reference = ClassCounts::default();
        let mut alternate = ClassCounts::default();

        for (hap, count) in &self.groups {
            match hap[offset] == ALT_ALLELE {
                true => alternate.add_group(*count),
                false => reference.add_group(*count),
            }
        }

        (reference, alternate)
    }

    /// Class agnostic homozygosity (eHH) over all groups
    pub fn homozygosity(&self) -> Option<f64> {
        let mut all = ClassCounts::default();
        self.groups.values().for_each(|count| all.add_group(*count));
        all.homozygosity()
    }

    /// Frequency weighted pairwise differences between distinct groups (Nei & Li 1979)
    pub fn nucleotide_diversity(&self) -> f64 {
        let n = self.total as f64;

        self.groups
            .iter()
            .tuple_combinations()
            .map(|((a, count_a), (b, count_b))| {
                (*count_a as f64 / n) * (*count_b as f64 / n) * hamming_distance(a, b) as f64
            })
            .fold(0.0, |acc, x| acc + x)
    }
}
