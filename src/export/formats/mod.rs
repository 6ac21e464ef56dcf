pub mod fasta;
pub mod lib_counts;
pub mod query_counts;
pub mod stats;
