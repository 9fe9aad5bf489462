use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};

use crate::error::{Error, Result};

/// Recommended buffer size for the file-backed variant; quick-xml reads
/// through this in `BufRead::fill_buf`-sized chunks regardless, but sizing
/// the underlying `BufReader` keeps syscalls off the hot path.
const BUFFER_SIZE: usize = 64 * 1024;

/// Input abstraction: either an in-memory byte slice or a buffered file
/// handle. Both sides implement `std::io::BufRead`, which is all the XML
/// event iterator needs.
pub(crate) enum Source<'a> {
    Memory(Cursor<&'a [u8]>),
    File(BufReader<File>),
}

impl<'a> Source<'a> {
    pub(crate) fn from_str(text: &'a str) -> Source<'a> {
        Source::Memory(Cursor::new(text.as_bytes()))
    }

    pub(crate) fn from_path(path: &str) -> Result<Source<'static>> {
        let file = File::open(path).map_err(|e| Error::file(path, e))?;
        Ok(Source::File(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}

impl<'a> Read for Source<'a> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Memory(cursor) => cursor.read(buf),
            Source::File(reader) => reader.read(buf),
        }
    }
}

impl<'a> io::BufRead for Source<'a> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Source::Memory(cursor) => cursor.fill_buf(),
            Source::File(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Source::Memory(cursor) => cursor.consume(amt),
            Source::File(reader) => reader.consume(amt),
        }
    }
}
