// ── Client-side storage ──

mod cache;

pub use cache::{EntityCache, Snapshot, SortOrder};
