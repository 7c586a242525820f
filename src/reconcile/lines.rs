//! Line-by-line input for listing and export files.
//!
//! Inputs are read as a stream so that memory stays bounded by the directory
//! index, not by the size of the export. Bytes that are not valid UTF-8 are
//! replaced rather than rejected.

use crate::error::ToolError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Iterator over the lines of a reader, decoded lossily.
///
/// Line terminators are kept; record parsers trim them.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Lines of a file on disk, with I/O errors tagged by path.
pub struct FileLines {
    path: PathBuf,
    inner: LossyLines<BufReader<File>>,
}

impl FileLines {
    /// Open `path` for streaming. Failing to open is fatal for the run.
    pub fn open(path: &Path) -> Result<Self, ToolError> {
        let file = File::open(path).map_err(|e| ToolError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            inner: LossyLines::new(BufReader::new(file)),
        })
    }
}

impl Iterator for FileLines {
    type Item = Result<String, ToolError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|line| line.map_err(|e| ToolError::io(&self.path, e)))
    }
}
