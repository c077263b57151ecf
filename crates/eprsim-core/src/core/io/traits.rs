use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Common interface of the text formats eprsim reads and writes.
///
/// Implementors only provide stream-level parsing and serialization; path and string
/// helpers are derived from those.
pub trait DataFile {
    /// What one document of this format holds.
    type Content;

    /// The error type for I/O and parse failures.
    type Error: Error + From<io::Error>;

    /// Parses a whole document from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the document is malformed. Parsing is
    /// all-or-nothing: no partial content is returned.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Content, Self::Error>;

    /// Serializes `content` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or `content` cannot be represented.
    fn write_to(content: &Self::Content, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Content, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(content: &Self::Content, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(content, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn read_from_str(text: &str) -> Result<Self::Content, Self::Error> {
        Self::read_from(&mut text.as_bytes())
    }

    fn write_to_string(content: &Self::Content) -> Result<String, Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(content, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}
