mod mapper;
mod target;

pub use mapper::{MappingRow, MappingSink, LOW_COUNT_THRESHOLDS};
pub use target::{Target, TargetLibrary};
