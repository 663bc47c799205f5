#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Parser for CAVP KDFCTR response files
//!
//! ```text
//! [PRF=HMAC_SHA256]
//! [CTRLOCATION=BEFORE_FIXED]
//! [RLEN=8_BITS]
//!
//! COUNT=0
//! L = 128
//! KI = 3edc6b5b...
//! FixedInputDataByteLen = 60
//! FixedInputData = 98e9988b...
//! KO = 6c037652...
//! ```
//!
//! Lines starting with `#` are comments. Records in sections with another
//! counter location or an unsupported PRF are skipped.

use kbkdf_primitives::{FieldWidth, PrfAlgorithm};
use std::path::Path;
use tracing::{debug, info};

use crate::cavp::types::CavpKbkdfVector;
use crate::error::{CavpError, Result};

const BEFORE_FIXED: &str = "BEFORE_FIXED";

#[derive(Debug, Default)]
struct Section {
    /// `None` once a PRF header names something other than HMAC-SHA2
    prf: Option<PrfAlgorithm>,
    prf_seen: bool,
    ctr_location: Option<String>,
    counter_width: Option<FieldWidth>,
}

impl Section {
    fn is_skipped(&self) -> bool {
        (self.prf_seen && self.prf.is_none())
            || self.ctr_location.as_deref().is_some_and(|loc| loc != BEFORE_FIXED)
    }
}

#[derive(Debug)]
struct PendingRecord {
    line: usize,
    count: u32,
    l_bits: Option<u32>,
    ki: Option<Vec<u8>>,
    fixed_input_len: Option<usize>,
    fixed_input: Option<Vec<u8>>,
    expected_ko: Option<Vec<u8>>,
}

impl PendingRecord {
    fn new(line: usize, count: u32) -> Self {
        Self {
            line,
            count,
            l_bits: None,
            ki: None,
            fixed_input_len: None,
            fixed_input: None,
            expected_ko: None,
        }
    }

    fn finish(self, section: &Section) -> Result<CavpKbkdfVector> {
        let line = self.line;
        let count = self.count;
        let missing =
            |field: &str| CavpError::parse(line, format!("COUNT={} is missing {}", count, field));

        let prf = section
            .prf
            .ok_or_else(|| CavpError::parse(line, "record appears before a [PRF=...] header"))?;
        let counter_width = section
            .counter_width
            .ok_or_else(|| CavpError::parse(line, "record appears before a [RLEN=...] header"))?;

        let l_bits = self.l_bits.ok_or_else(|| missing("L"))?;
        let ki = self.ki.ok_or_else(|| missing("KI"))?;
        let fixed_input = self.fixed_input.ok_or_else(|| missing("FixedInputData"))?;
        let expected_ko = self.expected_ko.ok_or_else(|| missing("KO"))?;

        if let Some(declared) = self.fixed_input_len {
            if declared != fixed_input.len() {
                return Err(CavpError::parse(
                    line,
                    format!(
                        "FixedInputDataByteLen is {} but FixedInputData has {} bytes",
                        declared,
                        fixed_input.len()
                    ),
                ));
            }
        }

        let expected_len = usize::try_from(l_bits.div_ceil(8)).unwrap_or(usize::MAX);
        if expected_ko.len() != expected_len {
            return Err(CavpError::parse(
                line,
                format!(
                    "KO has {} bytes, expected {} for L = {}",
                    expected_ko.len(),
                    expected_len,
                    l_bits
                ),
            ));
        }

        Ok(CavpKbkdfVector {
            id: CavpKbkdfVector::make_id(prf, counter_width, self.count),
            prf,
            counter_width,
            l_bits,
            ki,
            fixed_input,
            expected_ko,
        })
    }
}

fn parse_number<T: std::str::FromStr>(line: usize, key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CavpError::parse(line, format!("{} is not a number: {:?}", key, value)))
}

fn parse_bytes(line: usize, key: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value)
        .map_err(|e| CavpError::parse(line, format!("{} is not valid hex: {}", key, e)))
}

fn parse_header(line: usize, body: &str, section: &mut Section) -> Result<()> {
    let Some((key, value)) = body.split_once('=') else {
        debug!(line, header = body, "Ignoring header without a value");
        return Ok(());
    };
    let value = value.trim();

    match key.trim() {
        "PRF" => {
            *section = Section::default();
            section.prf_seen = true;
            section.prf = PrfAlgorithm::from_name(value).ok();
            if section.prf.is_none() {
                debug!(line, prf = value, "Skipping section with unsupported PRF");
            }
        }
        "CTRLOCATION" => {
            if value != BEFORE_FIXED {
                debug!(
                    line,
                    ctr_location = value,
                    "Skipping section with other counter location"
                );
            }
            section.ctr_location = Some(value.to_string());
        }
        "RLEN" => {
            let bits = value.strip_suffix("_BITS").unwrap_or(value);
            let bits: u32 = parse_number(line, "RLEN", bits)?;
            let width = FieldWidth::try_from(bits)
                .map_err(|e| CavpError::parse(line, format!("RLEN: {}", e)))?;
            section.counter_width = Some(width);
        }
        other => debug!(line, header = other, "Ignoring unknown header"),
    }
    Ok(())
}

/// Parse the text of a CAVP KDFCTR response file.
///
/// # Errors
/// Returns `CavpError::Parse` with the 1-based line number for malformed
/// headers, malformed values, unknown record fields or incomplete records
/// in a supported section.
pub fn parse_rsp(text: &str) -> Result<Vec<CavpKbkdfVector>> {
    let mut vectors = Vec::new();
    let mut section = Section::default();
    let mut pending: Option<PendingRecord> = None;
    let mut skipped = 0usize;

    let mut flush = |pending: &mut Option<PendingRecord>, section: &Section| -> Result<()> {
        if let Some(record) = pending.take() {
            if section.is_skipped() {
                skipped = skipped.saturating_add(1);
            } else {
                vectors.push(record.finish(section)?);
            }
        }
        Ok(())
    };

    for (index, raw) in text.lines().enumerate() {
        let line = index.saturating_add(1);
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(body) = trimmed.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
            flush(&mut pending, &section)?;
            parse_header(line, body, &mut section)?;
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(CavpError::parse(
                line,
                format!("expected `key = value`, found {:?}", trimmed),
            ));
        };
        let (key, value) = (key.trim(), value.trim());

        if key == "COUNT" {
            flush(&mut pending, &section)?;
            pending = Some(PendingRecord::new(line, parse_number(line, key, value)?));
            continue;
        }

        if section.is_skipped() {
            continue;
        }

        let Some(record) = pending.as_mut() else {
            return Err(CavpError::parse(line, format!("{} appears before COUNT", key)));
        };

        match key {
            "L" => record.l_bits = Some(parse_number(line, key, value)?),
            "KI" => record.ki = Some(parse_bytes(line, key, value)?),
            "FixedInputDataByteLen" => {
                record.fixed_input_len = Some(parse_number(line, key, value)?);
            }
            "FixedInputData" => record.fixed_input = Some(parse_bytes(line, key, value)?),
            "KO" => record.expected_ko = Some(parse_bytes(line, key, value)?),
            other => {
                return Err(CavpError::parse(line, format!("unexpected field {:?}", other)));
            }
        }
    }
    flush(&mut pending, &section)?;

    info!(loaded = vectors.len(), skipped, "Parsed CAVP KDFCTR vectors");
    Ok(vectors)
}

/// Read and parse a CAVP KDFCTR response file.
///
/// # Errors
/// Returns `CavpError::Io` if the file cannot be read, otherwise as [`parse_rsp`].
pub fn parse_rsp_file(path: impl AsRef<Path>) -> Result<Vec<CavpKbkdfVector>> {
    let text = std::fs::read_to_string(path)?;
    parse_rsp(&text)
}
