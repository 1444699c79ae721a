pub mod list;
pub mod prune;
pub mod version;

pub use list::*;
pub use prune::*;
pub use version::*;
