// instrscope - platform/fs.rs
//
// Filesystem access for the pipeline: opening the log for a single forward
// read and creating output files with path-aware errors.

use crate::util::error::ScanError;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// Open the log for a single sequential scan.
///
/// The returned reader owns the file handle; dropping it closes the file on
/// every exit path, including a scan that stops on a malformed line.
pub fn open_log(path: &Path) -> Result<BufReader<File>, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        file: path.to_path_buf(),
        source,
    })?;

    match file.metadata() {
        Ok(meta) if meta.is_dir() => {
            return Err(ScanError::Open {
                file: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "path is a directory"),
            });
        }
        Ok(meta) => {
            tracing::debug!(path = %path.display(), bytes = meta.len(), "Log opened");
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Log opened, size unknown");
        }
    }

    Ok(BufReader::new(file))
}

/// Create (or truncate) an output file, buffered.
pub fn create_output(path: &Path) -> io::Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}
