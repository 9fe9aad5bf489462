use std::io::BufRead;

use crate::assembler::Assembler;
use crate::error::{Error, Result};
use crate::sink::{Sink, Writer};
use crate::xml::{EventReader, XmlEvent};

#[cfg(test)]
mod tests;

/// Upper bound on `batch_size`; above this the caller gets `ResourceLimit`
/// rather than an unbounded in-memory batch.
pub(crate) const MAX_BATCH_SIZE: usize = 1_000_000;

/// Default `batch_size` when the caller doesn't configure one.
pub(crate) const DEFAULT_BATCH_SIZE: usize = 1_000;

/// Validates the two public knobs before any I/O happens.
pub(crate) fn validate(target_element: &str, batch_size: usize) -> Result<()> {
    if target_element.is_empty() {
        return Err(Error::invalid_input("target_element must not be empty"));
    }
    if batch_size == 0 {
        return Err(Error::invalid_input("batch_size must be at least 1"));
    }
    if batch_size > MAX_BATCH_SIZE {
        return Err(Error::resource_limit(format!(
            "batch_size {batch_size} exceeds the maximum of {MAX_BATCH_SIZE}"
        )));
    }
    Ok(())
}

/// Runs one pipeline invocation to completion: pulls events from `reader`,
/// feeds them to a fresh [`Assembler`], encodes every completed record and
/// hands it to `writer`'s [`Sink`]. Returns the sink so the caller can pull
/// out either the emitted count or the accumulated bytes.
///
/// Callers are expected to have already called [`validate`].
pub(crate) fn run<R: BufRead>(
    source: R,
    target_element: &str,
    batch_size: usize,
    max_record_bytes: Option<usize>,
    writer: Writer,
) -> Result<Sink> {
    let mut reader = EventReader::new(source);
    let mut assembler = Assembler::new(target_element.to_string(), max_record_bytes);
    let mut sink = Sink::new(writer, batch_size);
    let mut line = String::new();

    let outcome: Result<()> = (|| loop {
        let event = reader.next()?;
        let is_eof = event == XmlEvent::Eof;
        if let Some(value) = assembler.handle(&event)? {
            line.clear();
            value.encode_line(&mut line);
            sink.push_record(&line)?;
        }
        if is_eof {
            return Ok(());
        }
    })();

    match outcome {
        Ok(()) => {
            sink.flush()?;
            Ok(sink)
        }
        Err(e) => {
            sink.flush_best_effort();
            Err(e)
        }
    }
}
