use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::error::{Error, Result};


/// Where encoded NDJSON bytes ultimately land.
pub(crate) enum Writer {
    /// Accumulates everything in memory; returned to the caller as a
    /// string once the pipeline finishes.
    Memory(Vec<u8>),
    /// A buffered file handle, opened once at pipeline start and closed at
    /// pipeline end.
    File { path: String, writer: BufWriter<File> },
}

impl Writer {
    pub(crate) fn memory() -> Writer {
        Writer::Memory(Vec::new())
    }

    pub(crate) fn create_file(path: &str) -> Result<Writer> {
        let file = File::create(path).map_err(|e| Error::file(path, e))?;
        Ok(Writer::File { path: path.to_string(), writer: BufWriter::new(file) })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            Writer::Memory(buf) => {
                buf.try_reserve(bytes.len()).map_err(|_| Error::memory("failed to grow the output buffer"))?;
                buf.extend_from_slice(bytes);
                Ok(())
            }
            Writer::File { path, writer } => {
                writer.write_all(bytes).map_err(|e| io_error_with_path(e, path))
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            Writer::Memory(_) => Ok(()),
            Writer::File { path, writer } => writer.flush().map_err(|e| io_error_with_path(e, path)),
        }
    }

    /// Consumes the sink, returning the accumulated bytes for the
    /// string-sink variant. Callers must flush before calling this.
    pub(crate) fn into_memory(self) -> Option<Vec<u8>> {
        match self {
            Writer::Memory(buf) => Some(buf),
            Writer::File { .. } => None,
        }
    }
}

fn io_error_with_path(e: io::Error, path: &str) -> Error {
    Error::file(path, e)
}

/// Buffers encoded records and flushes them to the underlying [`Writer`]
/// once `batch_size` records have accumulated, at end-of-input, or
/// best-effort on error.
pub(crate) struct Sink {
    writer: Writer,
    batch_size: usize,
    buffer: Vec<u8>,
    pending: usize,
    emitted: u64,
}

impl Sink {
    pub(crate) fn new(writer: Writer, batch_size: usize) -> Sink {
        Sink { writer, batch_size, buffer: Vec::new(), pending: 0, emitted: 0 }
    }

    /// Appends one already-encoded, newline-terminated record and flushes
    /// if the batch is full.
    pub(crate) fn push_record(&mut self, line: &str) -> Result<()> {
        self.buffer
            .try_reserve(line.len())
            .map_err(|_| Error::memory("failed to grow the batch buffer"))?;
        self.buffer.extend_from_slice(line.as_bytes());
        self.pending += 1;
        self.emitted += 1;
        if self.pending >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        self.pending = 0;
        self.writer.flush()
    }

    /// Best-effort flush used on the error path: failures here are
    /// swallowed since a real error is already propagating.
    pub(crate) fn flush_best_effort(&mut self) {
        let _ = self.flush();
    }

    pub(crate) fn emitted(&self) -> u64 {
        self.emitted
    }

    pub(crate) fn into_writer(self) -> Writer {
        self.writer
    }
}
