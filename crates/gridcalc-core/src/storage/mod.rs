//! Storage formats for sheets.

mod parser;
mod writer;

pub use parser::{parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};
