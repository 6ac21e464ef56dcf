pub mod cli;
pub mod commands;
pub mod config;
pub mod counting;
pub mod error;
pub mod export;
pub mod library;
pub mod read_qc;
pub mod sequence_processor;
pub mod statistics;
pub(crate) mod utils;

pub use counting::{
    most_common, LibraryDependentStats, LibraryIndependentStats, SequenceCounter, SequenceCounts,
};
pub use error::{QuestError, QuestResult};
pub use library::{Target, TargetLibrary};
