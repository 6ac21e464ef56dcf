pub mod core;
pub mod readers;

// Re-export commonly used items
pub use self::core::{Sequence, SequenceMetadata, SequenceProcessor, SequenceReader};
pub use readers::{InputFormat, InputReader, ReaderOptions};
