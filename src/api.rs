use crate::driver;
use crate::error::Result;
use crate::sink::Writer;
use crate::source::Source;


/// Configuration for one pipeline invocation.
///
/// Built with [`Config::new`] and the two optional setters; validated once,
/// by the [`driver`], rather than in the setters themselves.
#[derive(Debug, Clone)]
pub struct Config {
    target_element: String,
    batch_size: usize,
    max_record_bytes: Option<usize>,
}

impl Config {
    /// Starts a configuration for extracting every occurrence of
    /// `target_element`, with the default batch size and no byte ceiling.
    pub fn new(target_element: impl Into<String>) -> Config {
        Config {
            target_element: target_element.into(),
            batch_size: driver::DEFAULT_BATCH_SIZE,
            max_record_bytes: None,
        }
    }

    /// Number of records buffered before a write to the sink. Must be in
    /// `1..=1_000_000`; out-of-range values are rejected when the pipeline
    /// runs, not here.
    pub fn batch_size(mut self, batch_size: usize) -> Config {
        self.batch_size = batch_size;
        self
    }

    /// Rejects a record once its attribute and text bytes exceed this
    /// ceiling. Unset by default (no limit).
    pub fn max_record_bytes(mut self, max_record_bytes: usize) -> Config {
        self.max_record_bytes = Some(max_record_bytes);
        self
    }
}

/// Parses `xml_text` and returns the NDJSON output as a string.
pub fn parse_string_to_string(xml_text: &str, config: &Config) -> Result<String> {
    driver::validate(&config.target_element, config.batch_size)
        .map_err(|e| e.context("validating configuration"))?;
    let source = Source::from_str(xml_text);
    let sink = driver::run(source, &config.target_element, config.batch_size, config.max_record_bytes, Writer::memory())
        .map_err(|e| e.context("parsing XML from an in-memory string"))?;
    let bytes = sink.into_writer().into_memory().expect("memory sink always yields its buffer");
    String::from_utf8(bytes).map_err(|e| {
        crate::error::Error::parse(format!("output was not valid UTF-8: {e}"), None)
            .context("encoding NDJSON output")
    })
}

/// Parses `xml_text` and writes NDJSON output to `output_path`, returning
/// the number of emitted records. The output file is created or truncated.
pub fn parse_string_to_file(xml_text: &str, output_path: &str, config: &Config) -> Result<u64> {
    driver::validate(&config.target_element, config.batch_size)
        .map_err(|e| e.context("validating configuration"))?;
    let source = Source::from_str(xml_text);
    let writer = Writer::create_file(output_path).map_err(|e| e.context(format!("creating output file {output_path}")))?;
    let sink = driver::run(source, &config.target_element, config.batch_size, config.max_record_bytes, writer)
        .map_err(|e| e.context("parsing XML from an in-memory string"))?;
    Ok(sink.emitted())
}

/// Reads the XML document at `input_path` and returns the NDJSON output as
/// a string.
pub fn parse_file_to_string(input_path: &str, config: &Config) -> Result<String> {
    driver::validate(&config.target_element, config.batch_size)
        .map_err(|e| e.context("validating configuration"))?;
    let source = Source::from_path(input_path).map_err(|e| e.context(format!("opening input file {input_path}")))?;
    let sink = driver::run(source, &config.target_element, config.batch_size, config.max_record_bytes, Writer::memory())
        .map_err(|e| e.context(format!("reading input file {input_path}")))?;
    let bytes = sink.into_writer().into_memory().expect("memory sink always yields its buffer");
    String::from_utf8(bytes).map_err(|e| {
        crate::error::Error::parse(format!("output was not valid UTF-8: {e}"), None)
            .context("encoding NDJSON output")
    })
}

/// Reads the XML document at `input_path` and writes NDJSON output to
/// `output_path`, returning the number of emitted records.
pub fn parse_file_to_file(input_path: &str, output_path: &str, config: &Config) -> Result<u64> {
    driver::validate(&config.target_element, config.batch_size)
        .map_err(|e| e.context("validating configuration"))?;
    let source = Source::from_path(input_path).map_err(|e| e.context(format!("opening input file {input_path}")))?;
    let writer = Writer::create_file(output_path).map_err(|e| e.context(format!("creating output file {output_path}")))?;
    let sink = driver::run(source, &config.target_element, config.batch_size, config.max_record_bytes, writer)
        .map_err(|e| e.context(format!("reading input file {input_path}")))?;
    Ok(sink.emitted())
}
