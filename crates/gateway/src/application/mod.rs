pub mod book_sync;
pub mod pipeline;
pub mod store;

pub use book_sync::{BookSyncConfig, BookSynchronizer, BookUpdate, SyncError};
pub use pipeline::{CycleSummary, MetadataPipeline, Stage, StageError, StageFailure};
pub use store::SharedMetadata;
