//! Input format classification
//!
//! Classifies an uploaded station export as delimited text, SpreadsheetML
//! markup, or a binary spreadsheet by inspecting a bounded prefix of the
//! input. Classification is explicit and ordered rather than
//! control-flow-by-failure: the delimited probe runs first because a
//! delimited file with an unexpected column order must not be silently
//! misclassified as markup, then the raw byte prefix decides between the
//! two spreadsheet encodings.
//!
//! The caller's read cursor is restored to its starting position on every
//! exit path, including errors, via a scoped guard.

use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

use crate::app::models::InputFormat;
use crate::app::services::schema_normalizer::parse_timestamp;
use crate::config::IngestConfig;
use crate::constants::{SNIFF_PREFIX_LEN, UTF8_BOM, XML_DECLARATION_TAG};
use crate::{Error, Result};

/// Restores the stream position of the wrapped reader when dropped.
///
/// The rewind cannot propagate an error from `drop`; a failed seek leaves
/// the cursor where it was, which the next read surfaces as an I/O error.
struct ReadPositionGuard<'a, R: Seek> {
    inner: &'a mut R,
    origin: u64,
}

impl<'a, R: Read + Seek> ReadPositionGuard<'a, R> {
    fn acquire(inner: &'a mut R) -> Result<Self> {
        let origin = inner
            .stream_position()
            .map_err(|e| Error::io("failed to record read position before sniffing", e))?;
        Ok(Self { inner, origin })
    }

    fn read_prefix(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; len];
        let mut filled = 0;
        // read() may return short counts; loop until EOF or the buffer is full
        while filled < buffer.len() {
            let n = self
                .inner
                .read(&mut buffer[filled..])
                .map_err(|e| Error::io("failed to read sniff prefix", e))?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buffer.truncate(filled);
        Ok(buffer)
    }
}

impl<R: Seek> Drop for ReadPositionGuard<'_, R> {
    fn drop(&mut self) {
        let _ = self.inner.seek(SeekFrom::Start(self.origin));
    }
}

/// Classify the input as one of the three supported physical formats.
///
/// The read cursor is rewound to where it was on entry before this function
/// returns, whether classification succeeds or fails.
pub fn sniff<R: Read + Seek>(input: &mut R, config: &IngestConfig) -> Result<InputFormat> {
    let mut guard = ReadPositionGuard::acquire(input)?;
    let sample = guard.read_prefix(config.sniff_window)?;

    // A sample that filled the whole window may have cut the input mid-line
    let truncated = sample.len() == config.sniff_window;
    let format = classify(&sample, config.delimiter, truncated);
    debug!("Sniffed input format: {}", format.name());

    Ok(format)
}

/// Classify a raw byte sample. Ordered: strict delimited probe first, then
/// the XML declaration check, with binary spreadsheet as the fallback.
///
/// `truncated` marks a sample that may end mid-line; the probe then ignores
/// the final partial line.
pub fn classify(sample: &[u8], delimiter: u8, truncated: bool) -> InputFormat {
    if delimited_probe(sample, delimiter, truncated) {
        return InputFormat::DelimitedText;
    }

    let prefix = strip_bom(sample);
    let scan = &prefix[..prefix.len().min(SNIFF_PREFIX_LEN)];
    if scan.starts_with(XML_DECLARATION_TAG) {
        InputFormat::MarkupSpreadsheet
    } else {
        InputFormat::BinarySpreadsheet
    }
}

/// Strict delimited-text probe: the sample must contain a header row plus at
/// least one complete data row, and the first cell of every complete data
/// row must parse as a timestamp.
fn delimited_probe(sample: &[u8], delimiter: u8, truncated: bool) -> bool {
    let sample = strip_bom(sample);
    let Some(text) = utf8_prefix(sample, truncated) else {
        return false;
    };

    let mut lines: Vec<&str> = text.lines().collect();
    if truncated && !text.ends_with('\n') {
        lines.pop();
    }

    let mut rows = lines.iter().filter(|line| !line.trim().is_empty());
    if rows.next().is_none() {
        return false;
    }

    let mut saw_data_row = false;
    for row in rows {
        let first_cell = row
            .split(delimiter as char)
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches('"');
        if parse_timestamp(first_cell).is_none() {
            return false;
        }
        saw_data_row = true;
    }

    saw_data_row
}

/// Decode the sample as UTF-8. A truncated sample may end inside a
/// multi-byte character; the valid prefix is enough for line probing.
fn utf8_prefix(sample: &[u8], truncated: bool) -> Option<&str> {
    match std::str::from_utf8(sample) {
        Ok(text) => Some(text),
        Err(e) if truncated && e.error_len().is_none() => {
            std::str::from_utf8(&sample[..e.valid_up_to()]).ok()
        }
        Err(_) => None,
    }
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn default_config() -> IngestConfig {
        IngestConfig::default()
    }

    #[test]
    fn test_classifies_delimited_text() {
        let csv = "Date/Time,Precip,TempMax\n2024-01-01 09:00:00,5,30\n2024-01-02 09:00:00,0,32\n";
        let mut input = Cursor::new(csv.as_bytes().to_vec());

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::DelimitedText);
    }

    #[test]
    fn test_classifies_markup_spreadsheet() {
        let xml = "<?xml version=\"1.0\"?>\n<Workbook><Worksheet/></Workbook>";
        let mut input = Cursor::new(xml.as_bytes().to_vec());

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::MarkupSpreadsheet);
    }

    #[test]
    fn test_classifies_markup_with_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<?xml version=\"1.0\"?><Workbook/>");
        let mut input = Cursor::new(bytes);

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::MarkupSpreadsheet);
    }

    #[test]
    fn test_classifies_binary_fallback() {
        // OLE compound document magic, invalid as UTF-8 text
        let bytes = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00];
        let mut input = Cursor::new(bytes);

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::BinarySpreadsheet);
    }

    #[test]
    fn test_unexpected_column_order_still_delimited() {
        // No canonical names anywhere, but the first column is timestamps
        let csv = "when,x,y\n2023-05-05,1,2\n2023-05-06,3,4\n";
        let mut input = Cursor::new(csv.as_bytes().to_vec());

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::DelimitedText);
    }

    #[test]
    fn test_non_timestamp_first_column_is_not_delimited() {
        let csv = "name,value\nalpha,1\nbeta,2\n";
        let mut input = Cursor::new(csv.as_bytes().to_vec());

        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::BinarySpreadsheet);
    }

    #[test]
    fn test_rewinds_cursor_on_success() {
        let csv = "Date/Time,Precip\n2024-01-01,5\n";
        let mut input = Cursor::new(csv.as_bytes().to_vec());

        sniff(&mut input, &default_config()).unwrap();
        assert_eq!(input.stream_position().unwrap(), 0);
    }

    #[test]
    fn test_rewinds_cursor_from_nonzero_origin() {
        let csv = "XXDate/Time,Precip\n2024-01-01,5\n";
        let mut input = Cursor::new(csv.as_bytes().to_vec());
        input.seek(SeekFrom::Start(2)).unwrap();

        sniff(&mut input, &default_config()).unwrap();
        assert_eq!(input.stream_position().unwrap(), 2);
    }

    #[test]
    fn test_empty_input_is_binary_fallback() {
        let mut input = Cursor::new(Vec::new());
        let format = sniff(&mut input, &default_config()).unwrap();
        assert_eq!(format, InputFormat::BinarySpreadsheet);
    }
}
