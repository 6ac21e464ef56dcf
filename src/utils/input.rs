use crate::error::QuestResult;
use niffler::get_reader;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Bytes niffler reads to sniff the compression format
const SNIFF_LEN: u64 = 5;

/// Wrap a byte stream in the matching decompressor.
///
/// Streams shorter than a compression magic number cannot be compressed and
/// are passed through as plain text, so empty inputs read as empty.
pub(crate) fn decompress(mut inner: Box<dyn Read>) -> QuestResult<Box<dyn Read>> {
    let mut head = Vec::with_capacity(SNIFF_LEN as usize);
    inner.by_ref().take(SNIFF_LEN).read_to_end(&mut head)?;
    if (head.len() as u64) < SNIFF_LEN {
        return Ok(Box::new(Cursor::new(head)));
    }

    let (reader, _compression) = get_reader(Box::new(Cursor::new(head).chain(inner)))?;
    Ok(reader)
}

pub(crate) fn open_path(path: &Path) -> QuestResult<Box<dyn Read>> {
    decompress(Box::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read_all(data: &[u8]) -> String {
        let mut reader = decompress(Box::new(Cursor::new(data.to_vec()))).unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_short_streams_pass_through() {
        assert_eq!(read_all(b""), "");
        assert_eq!(read_all(b"#\n"), "#\n");
        assert_eq!(read_all(b"\n\n"), "\n\n");
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(read_all(b"a\tb\tCCCC\n"), "a\tb\tCCCC\n");
        assert_eq!(read_all(b"@r1\nACGT\n+\nIIII\n"), "@r1\nACGT\n+\nIIII\n");
    }

    #[test]
    fn test_gzip_file_is_decompressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.tsv.gz");
        {
            let mut writer = crate::export::open_output(&path, true).unwrap();
            writer.write_all(b"1\tg1\tACGT\n").unwrap();
        }

        let mut text = String::new();
        open_path(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "1\tg1\tACGT\n");
    }
}
