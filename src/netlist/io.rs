// SPDX-License-Identifier: Apache-2.0

//! Loading designs from disk.
//!
//! Designs are stored as JSON (the serde serialization of [`Design`]),
//! optionally gzipped. This is the crate's own interchange format for the
//! command-line surface and for test fixtures; it is not the host
//! synthesizer's netlist format.

use crate::netlist::Design;
use anyhow::{anyhow, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a `Design` from a `.json` or `.json.gz` file.
pub fn load_design_from_path(path: &Path) -> Result<Design> {
    let file = File::open(path)
        .map_err(|e| anyhow!(format!("opening design '{}': {}", path.display(), e)))?;
    let is_gz = path.extension().map(|e| e == "gz").unwrap_or(false);
    let reader: Box<dyn Read> = if is_gz {
        Box::new(MultiGzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(file)
    };

    let design: Design = serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| anyhow!(format!("parsing design '{}': {}", path.display(), e)))?;
    Ok(design)
}
