pub mod dedupe;
pub mod entry;
pub mod filter;
pub mod parser;
pub mod render;

pub use dedupe::SeenNames;
pub use entry::Entry;
pub use filter::{FilterRules, SkipReason};
pub use parser::parse_blocks;
pub use render::{Playlist, Section};
