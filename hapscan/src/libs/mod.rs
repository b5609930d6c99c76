// HAPSCAN - Haplotype homozygosity scans
// Copyright (C) 2024  The HAPSCAN authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! HAPSCAN - Haplotype homozygosity scans
//!
//! This library and program compute haplotype based selection and diversity statistics from
//! phased, bi-allelic VCF files. Statistics are computed contig by contig, over a SNP index
//! rather than a physical or genetic distance.
//!
//! HAPSCAN commands
//!
//! * Integrated haplotype score (iHS) for every retained core SNP
//! * Nucleotide diversity (pi) and extended haplotype homozygosity (eHH) in sliding SNP windows
//! * Utility to list the VCF sample names and their column indexes
//!
//! # Getting started
//!
//! ## Running HAPSCAN
//!
//! To print the available commands use:
//! ```bash
//! hapscan --help
//! ```
//!
//! Pick the target individuals by their zero-based VCF column:
//! ```bash
//! hapscan samples $file
//!
//! hapscan ihs $file --targets 0,1,2,3,4,5,6,7 --type GT > ${outdir}/ihs.tsv
//!
//! hapscan diversity $file --targets 0,1,2,3,4,5,6,7 --type PL --window 20 > ${outdir}/pi.tsv
//! ```
//!

#[doc(hidden)]
pub mod args;

#[doc(hidden)]
pub mod io;

/// Functions for streaming phased sites out of a VCF
pub mod read_vcf;

/// Genotype likelihood models for allele frequency estimates
pub mod models;

/// Per contig haplotype matrix and the contig state machine
pub mod structs;

/// Grouping of identical haplotypes within a window
pub mod groups;

#[doc(hidden)]
pub mod stats;

#[doc(hidden)]
pub mod utils;

#[doc(hidden)]
pub mod error;

#[cfg(feature = "clap")]
pub mod clap;
