//! Grid file loading

use crate::error::InputError;
use refuge_optimizer::Grid;
use std::fs;
use std::path::Path;

/// Read a grid in text form (`.` empty, `R` collectible, `B` obstacle; one row per line)
pub fn load_grid(path: &Path) -> Result<Grid, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    content.parse().map_err(|source| InputError::Grid {
        path: path.to_path_buf(),
        source,
    })
}
