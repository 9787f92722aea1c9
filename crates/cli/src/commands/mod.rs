//! CLI command implementations.

mod archive;
mod clean;
mod init;
mod inspect;
mod render;

pub use archive::archive;
pub use clean::clean;
pub use init::init;
pub use inspect::{layout, validate};
pub use render::render;
