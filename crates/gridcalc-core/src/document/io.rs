use super::Document;
use crate::error::{GridcalcError, Result};
use crate::storage::{parse_grd, write_grd};
use log::debug;
use std::path::{Path, PathBuf};

impl Document {
    /// Create a document and load a file if provided.
    /// A path that does not exist yet becomes the save target.
    pub fn with_file(path: Option<PathBuf>) -> Result<Self> {
        let mut doc = Self::new();
        if let Some(p) = path {
            if p.exists() {
                doc.load_file(&p)?;
            } else {
                doc.file_path = Some(p);
            }
        }
        Ok(doc)
    }

    /// Load from file, replacing every cell.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let cells = parse_grd(path)?;
        debug!("loaded {} cells from {}", cells.len(), path.display());

        self.cells = cells;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(GridcalcError::NoFilePath);
        };

        write_grd(path, &self.cells)?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to a new path, which becomes the current file path.
    pub fn save_file_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }
}
