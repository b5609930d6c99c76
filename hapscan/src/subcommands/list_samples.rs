use std::path::PathBuf;

use color_eyre::Result;
use rust_htslib::bcf::{Read, Reader};

use crate::read_vcf::get_samples;

pub fn get_sample_names(path: &PathBuf) -> Result<Vec<String>> {
    let reader = Reader::from_path(path)?;
    Ok(get_samples(reader.header()))
}

/// Prints the zero-based target index and the ID of every sample
#[doc(hidden)]
pub fn run(path: PathBuf) -> Result<()> {
    let ids = get_sample_names(&path)?;
    for (idx, id) in ids.iter().enumerate() {
        println!("{idx}\t{id}");
    }
    Ok(())
}
