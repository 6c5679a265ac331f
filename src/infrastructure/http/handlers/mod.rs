//! HTTP Handlers

mod book;
mod chapter;
mod ping;
mod style;

pub use book::*;
pub use chapter::*;
pub use ping::*;
pub use style::*;
