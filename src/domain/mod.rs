pub mod entries;
pub mod rewind;

// Re-exports
pub use entries::{ListEntry, Media, MediaListCollection, MediaListStatus};
pub use rewind::{Report, build_report};
