use ndarray::{ArrayView1, Zip};

/// "n choose 2". Counts may be fractional allele dosage sums, anything at or below one has no pairs.
pub fn choose2(n: f64) -> f64 {
    if n <= 1.0 {
        0.0
    } else {
        n * (n - 1.0) / 2.0
    }
}

/// Number of positions where two equally long haplotypes differ
pub fn hamming_distance(a: &ArrayView1<u8>, b: &ArrayView1<u8>) -> usize {
    Zip::from(a)
        .and(b)
        .fold(0, |acc, x, y| acc + usize::from(x != y))
}

/// Trapezoidal rule over unit steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidIntegral {
    prev: f64,
    area: f64,
}

impl TrapezoidIntegral {
    pub fn new(seed: f64) -> Self {
        Self {
            prev: seed,
            area: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.area += (self.prev + value) / 2.0;
        self.prev = value;
    }

    pub fn area(&self) -> f64 {
        self.area
    }
}
