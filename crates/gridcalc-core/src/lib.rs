//! gridcalc-core - UI-agnostic sheet model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Document;
pub use error::{GridcalcError, Result};

pub use gridcalc_engine::engine::CellRef;
