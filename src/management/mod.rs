mod cache;
mod selection;
mod song_table;
mod verifier;

pub use cache::ApiCache;
pub use cache::PlaylistItemsCache;
pub use selection::Selection;
pub use song_table::build_song_table;
pub use verifier::VerifierStore;
