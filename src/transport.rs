//! Text in, text out: parsing raw file contents into a candidate document and writing a
//! catalog back as pretty JSON. Nothing here holds state or validates.

use crate::{Candidate, Catalog, PriceEntry, error::ParseError, statics};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::{fmt::Write as _, fs, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => statics::NL_LF,
            LineEnding::CrLf => statics::NL_CRLF,
        }
    }
}

/// Parse raw text into an untrusted candidate. Run `validate::check_document` before use.
///
/// Only strict JSON is accepted: comments, unquoted keys and trailing commas are malformed.
pub fn parse(raw_text: &str) -> Result<Candidate, ParseError> {
    let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);
    check_nesting(text)?;
    serde_json::from_str::<Candidate>(text).map_err(|e| ParseError::Malformed {
        message: e.to_string(),
    })
}

// One pass over the text, skipping string literals, so hostile nesting is refused before the
// recursive parser sees it.
fn check_nesting(text: &str) -> Result<(), ParseError> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in text.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > statics::MAX_NESTING_DEPTH {
                    return Err(ParseError::Malformed {
                        message: format!(
                            "nesting deeper than {} levels",
                            statics::MAX_NESTING_DEPTH
                        ),
                    });
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Pretty JSON with two-space indentation, insertion key order and LF line endings.
pub fn serialize(catalog: &Catalog) -> String {
    serialize_with_newline(catalog, LineEnding::Lf)
}

pub fn serialize_with_newline(catalog: &Catalog, line_ending: LineEnding) -> String {
    let newline = line_ending.as_str();
    let mut out = String::new();
    write_object(&mut out, 0, newline, catalog.categories_map().iter(), |out, models, indent| {
        write_object(out, indent, newline, models.iter(), |out, configs, indent| {
            write_object(out, indent, newline, configs.iter(), |out, entry, indent| {
                write_entry(out, entry, indent, newline)
            })
        })
    });
    out.push_str(newline);
    out
}

fn write_object<K: AsRef<str>, V>(
    out: &mut String,
    indent: usize,
    newline: &str,
    entries: impl ExactSizeIterator<Item = (K, V)>,
    mut write_value: impl FnMut(&mut String, V, usize),
) {
    out.push('{');
    let len = entries.len();
    if len == 0 {
        out.push('}');
        return;
    }

    out.push_str(newline);
    for (i, (key, value)) in entries.enumerate() {
        push_indent(out, indent + 1);
        write_escaped_string(out, key.as_ref());
        out.push_str(": ");
        write_value(out, value, indent + 1);
        if i + 1 != len {
            out.push(',');
        }
        out.push_str(newline);
    }
    push_indent(out, indent);
    out.push('}');
}

fn write_entry(out: &mut String, entry: &PriceEntry, indent: usize, newline: &str) {
    let fields = [
        (statics::FIELD_PURCHASE_ENTRY, Some(entry.purchase_entry)),
        (statics::FIELD_WHOLESALE_SMALL, entry.wholesale_small),
        (statics::FIELD_MARKET, entry.market),
    ];
    write_object(out, indent, newline, fields.into_iter(), |out, value, _| {
        match value {
            Some(v) => write_number(out, v),
            None => out.push_str("null"),
        }
    });
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(statics::INDENT);
    }
}

// Integral values print without a fractional part ("999", not "999.0").
fn write_number(out: &mut String, v: f64) {
    if !v.is_finite() {
        // JSON has no spelling for these; validation keeps them out of a catalog anyway.
        out.push_str("null");
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        write!(out, "{}", v as i64).ok();
    } else {
        let mut buf = ryu::Buffer::new();
        out.push_str(buf.format_finite(v));
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                write!(out, "\\u{:04x}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Majority line terminator of `text`, so a loaded file saves back the way it came in.
pub fn detect_line_ending(text: &str) -> LineEnding {
    let bytes = text.as_bytes();
    let mut lf_count = 0usize;
    let mut crlf_count = 0usize;

    for (i, b) in bytes.iter().enumerate() {
        if *b != b'\n' {
            continue;
        }
        if i > 0 && bytes[i - 1] == b'\r' {
            crlf_count += 1;
        } else {
            lf_count += 1;
        }
    }

    if crlf_count > lf_count {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

/// `price-config-YYYY-MM-DD.json`
pub fn suggested_file_name(date: NaiveDate) -> String {
    format!(
        "{}{}{}",
        statics::FILE_NAME_PREFIX,
        date.format(statics::FILE_DATE_FORMAT),
        statics::FILE_NAME_EXTENSION
    )
}

/// Suggested file name for a save made today (local time).
pub fn default_file_name() -> String {
    suggested_file_name(Local::now().date_naive())
}

pub fn read_path(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
    String::from_utf8(bytes).context("price file is not valid UTF-8")
}

pub fn write_path(path: &Path, text: &str) -> anyhow::Result<()> {
    fs::write(path, text).with_context(|| format!("writing {path:?}"))
}
