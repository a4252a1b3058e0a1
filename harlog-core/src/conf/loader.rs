use crate::conf::{ConfigError, ConfigFile, MetricsOptions, normalize_options};
use std::fs;
use std::path::Path;

/// Reads an HCL file holding a `metrics { ... }` block and normalizes it.
pub fn load_options(path: &Path) -> Result<MetricsOptions, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    let file: ConfigFile = hcl::from_str(&raw).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Alias merging and validation
    //--------------------------------------------------------------------------
    normalize_options(file.metrics)
}
