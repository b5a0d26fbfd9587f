//! Access to the specification document inside an AASX package.

use std::io::{self, Read, Seek};

use zip::ZipArchive;

use crate::config::{ARCHIVE_DIR_PREFIX, DOCUMENT_EXTENSION};
use crate::error::Result;

/// Whether an archive member holds the specification document.
///
/// # Examples
/// ```
/// use aasx_extractor::archive::is_document_member;
///
/// assert!(is_document_member("aasx/IDTA 02006/IDTA 02006.aas.xml"));
/// assert!(!is_document_member("[Content_Types].xml"));
/// assert!(!is_document_member("aasx/aasx-origin"));
/// ```
#[must_use]
pub fn is_document_member(name: &str) -> bool {
    name.starts_with(ARCHIVE_DIR_PREFIX) && name.ends_with(DOCUMENT_EXTENSION)
}

/// Read the specification document from a zip container.
///
/// The first matching member wins; later members are never visited. Returns
/// `Ok(None)` if the container holds no document.
///
/// # Errors
/// Returns an error if the container or the member cannot be read, or if the
/// member is not UTF-8.
pub fn read_document<R: Read + Seek>(reader: R) -> Result<Option<String>> {
    let mut archive = ZipArchive::new(reader)?;

    for index in 0..archive.len() {
        let mut member = archive.by_index(index)?;
        if !is_document_member(member.name()) {
            continue;
        }
        tracing::debug!(member = member.name(), "Reading specification document");

        let mut content = Vec::new();
        member.read_to_end(&mut content)?;
        let text = String::from_utf8(content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        return Ok(Some(
            text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text),
        ));
    }

    tracing::debug!("No specification document in archive");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractorError;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(members: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in members {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content).unwrap();
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_first_document_wins() {
        let cursor = archive(&[
            ("[Content_Types].xml", b"<Types/>".as_slice()),
            ("aasx/first.aas.xml", b"\xEF\xBB\xBF<first/>".as_slice()),
            ("aasx/second.aas.xml", b"<second/>".as_slice()),
        ]);

        assert_eq!(read_document(cursor).unwrap().as_deref(), Some("<first/>"));
    }

    #[test]
    fn test_missing_document() {
        let cursor = archive(&[("aasx/aasx-origin", b"".as_slice())]);
        assert_eq!(read_document(cursor).unwrap(), None);
    }

    #[test]
    fn test_not_a_zip() {
        let result = read_document(Cursor::new(b"not a zip file".to_vec()));
        assert!(matches!(result, Err(ExtractorError::Archive(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        let cursor = archive(&[("aasx/bad.xml", b"\xFF\xFE".as_slice())]);
        assert!(matches!(read_document(cursor), Err(ExtractorError::Io(_))));
    }
}
