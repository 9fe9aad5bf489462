use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

#[cfg(test)]
mod tests;

/// One XML token, as consumed by the scope tracker and record assembler.
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// swallowed by [`EventReader::next`] itself and never reach this type —
/// they carry no information the rest of the pipeline needs, and a
/// malformed one is reported as a parse error before it would otherwise
/// surface here.
#[derive(Debug, PartialEq)]
pub(crate) enum XmlEvent {
    Start { name: String, attrs: Vec<(String, String)> },
    End { name: String },
    Text(String),
    CData(String),
    Eof,
}

/// A pull-style tokenizer over a [`BufRead`] source.
///
/// Wraps [`quick_xml::Reader`], translating its event set into
/// [`XmlEvent`] and two behaviours the wrapped reader doesn't give for
/// free: self-closing elements are split into a `Start` immediately
/// followed by an `End` of the same name (one is queued and replayed on
/// the following call), and qualified names are kept whole — no prefix is
/// ever split off, since this crate treats `book:item` as a single opaque
/// name rather than resolving a namespace.
pub(crate) struct EventReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    pending_end: Option<String>,
    done: bool,
}

impl<R: BufRead> EventReader<R> {
    pub(crate) fn new(source: R) -> EventReader<R> {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().trim_text(false);
        EventReader { reader, buf: Vec::new(), pending_end: None, done: false }
    }

    /// Returns the next token. Once `Eof` has been produced, every further
    /// call keeps returning `Eof` rather than panicking or restarting.
    pub(crate) fn next(&mut self) -> Result<XmlEvent> {
        if let Some(name) = self.pending_end.take() {
            return Ok(XmlEvent::End { name });
        }
        if self.done {
            return Ok(XmlEvent::Eof);
        }

        loop {
            self.buf.clear();
            // Note: every branch below only touches `self.reader` through
            // direct field access (`self.reader.decoder()`, `.buffer_position()`)
            // rather than a `&self`/`&mut self` helper method — the event
            // values produced here borrow `self.buf`, and a whole-self method
            // call would conflict with that live borrow.
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(e)) => {
                    let name = decode_utf8(e.name().as_ref())
                        .map_err(|msg| Error::parse(msg, Some(self.reader.buffer_position() as u64)))?;
                    let decoder = self.reader.decoder();
                    let attrs = collect_attrs(&e, decoder)
                        .map_err(|msg| Error::parse(msg, Some(self.reader.buffer_position() as u64)))?;
                    return Ok(XmlEvent::Start { name, attrs });
                }
                Ok(Event::Empty(e)) => {
                    let name = decode_utf8(e.name().as_ref())
                        .map_err(|msg| Error::parse(msg, Some(self.reader.buffer_position() as u64)))?;
                    let decoder = self.reader.decoder();
                    let attrs = collect_attrs(&e, decoder)
                        .map_err(|msg| Error::parse(msg, Some(self.reader.buffer_position() as u64)))?;
                    self.pending_end = Some(name.clone());
                    return Ok(XmlEvent::Start { name, attrs });
                }
                Ok(Event::End(e)) => {
                    let name = decode_utf8(e.name().as_ref())
                        .map_err(|msg| Error::parse(msg, Some(self.reader.buffer_position() as u64)))?;
                    return Ok(XmlEvent::End { name });
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::parse(err.to_string(), Some(self.reader.buffer_position() as u64)))?;
                    return Ok(XmlEvent::Text(text.into_owned()));
                }
                Ok(Event::CData(e)) => {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw).map_err(|_| {
                        Error::parse("CDATA section is not valid UTF-8".to_string(), Some(self.reader.buffer_position() as u64))
                    })?;
                    return Ok(XmlEvent::CData(text.to_string()));
                }
                Ok(Event::Comment(_)) | Ok(Event::PI(_)) | Ok(Event::Decl(_)) | Ok(Event::DocType(_)) => {
                    continue;
                }
                Ok(Event::Eof) => {
                    self.done = true;
                    return Ok(XmlEvent::Eof);
                }
                Err(e) => return Err(Error::parse(e.to_string(), Some(self.reader.buffer_position() as u64))),
            }
        }
    }
}

fn decode_utf8(raw: &[u8]) -> std::result::Result<String, String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| "element or attribute name is not valid UTF-8".to_string())
}

fn collect_attrs(
    start: &BytesStart<'_>,
    decoder: quick_xml::encoding::Decoder,
) -> std::result::Result<Vec<(String, String)>, String> {
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|_| "attribute name is not valid UTF-8".to_string())?
            .to_string();
        let value = attr.decode_and_unescape_value(decoder).map_err(|err| err.to_string())?.into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}
