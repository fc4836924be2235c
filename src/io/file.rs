//! Input/Output file handling with [`InputStream`] and [`OutputStream`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Check if a file is a gzipped by looking for the magic numbers.
///
/// Files shorter than two bytes are never gzipped.
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let file = File::open(file_path.as_ref())?;
    let mut buffer = Vec::with_capacity(2);
    file.take(2).read_to_end(&mut buffer)?;
    Ok(buffer == [0x1f, 0x8b])
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and gzip-compressed input
/// to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputStream {
    pub filepath: PathBuf,
}

impl InputStream {
    /// Constructs a new `InputStream`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. Gzip-compressed files are detected by their
    ///   magic number (not their extension) and decompressed on the fly.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped_file(&self.filepath)? {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

#[derive(Clone, Debug)]
enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file, or standard output.
///
/// This abstracts writing both plaintext and gzip-compressed files.
#[derive(Clone, Debug)]
pub struct OutputStream {
    destination: OutputDestination,
}

impl OutputStream {
    /// Constructs a new `OutputStream` to a file. If the file extension is
    /// `.gz`, `OutputStream` will automatically write gzip-compressed output.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
        }
    }

    /// Constructs a new [`OutputStream`] for standard output.
    pub fn new_stdout() -> Self {
        Self {
            destination: OutputDestination::Stdout,
        }
    }

    /// Opens the destination and returns a buffered writer.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;

    #[test]
    fn test_gzip_roundtrip_detection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt.gz");

        {
            let mut writer = OutputStream::new(&path).writer().unwrap();
            writeln!(writer, "chr1\tline").unwrap();
            writer.flush().unwrap();
        }

        assert!(is_gzipped_file(&path).unwrap());
        let lines: Vec<String> = InputStream::new(&path)
            .reader()
            .unwrap()
            .lines()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lines, vec!["chr1\tline".to_string()]);
    }

    #[test]
    fn test_empty_file_not_gzipped() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(!is_gzipped_file(file.path()).unwrap());
    }
}
