//! Number formatting collaborator
//!
//! Numeric items never format or parse numbers themselves. They go through a
//! [`Formatter`], a pair of plain function pointers operating on caller
//! buffers:
//!
//! - `to_chars(buffer, value, precision, kind) -> Result<written_length, Error>`
//! - `parse(text, kind) -> Result<value, Error>`
//!
//! [`Formatter::CORE`] implements both on top of `core::fmt` and `str::parse`,
//! without allocating. Firmware with its own fixed-point or locale rules
//! supplies a different pair.

use core::fmt::{self, Write};

use crate::types::Error;

// =============================================================================
// TYPES
// =============================================================================

/// Notation used to render and read a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatKind {
    /// Whole number, fractional part truncated.
    Integer,
    /// Shortest representation that reads back exactly.
    #[default]
    Floating,
    /// Scientific notation with `precision` fractional digits.
    Exponential,
    /// Fixed-point with `precision` fractional digits.
    Fixed,
    /// Upper-case hexadecimal with a `0x` prefix. Non-negative only.
    Hex,
}

/// Writes `value` into `buffer`, returning the number of bytes written.
pub type ToChars = fn(&mut [u8], f64, u8, FormatKind) -> Result<usize, Error>;

/// Reads a value back from text.
pub type Parse = fn(&str, FormatKind) -> Result<f64, Error>;

/// Formatting and parsing entry points used by numeric items.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    pub to_chars: ToChars,
    pub parse: Parse,
}

impl Formatter {
    /// Formatter built on `core::fmt`.
    pub const CORE: Self = Self {
        to_chars: core_to_chars,
        parse: core_parse,
    };

    /// Format into `buffer` and return the written text.
    pub fn format<'b>(
        &self,
        buffer: &'b mut [u8],
        value: f64,
        precision: u8,
        kind: FormatKind,
    ) -> Result<&'b str, Error> {
        let len = (self.to_chars)(buffer, value, precision, kind)?;
        let written = buffer.get(..len).ok_or(Error::BufferTooSmall)?;
        core::str::from_utf8(written).map_err(|_| Error::FormatError)
    }

    pub fn parse(&self, text: &str, kind: FormatKind) -> Result<f64, Error> {
        (self.parse)(text, kind)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::CORE
    }
}

// =============================================================================
// CORE IMPLEMENTATION
// =============================================================================

/// `fmt::Write` sink over a fixed byte buffer.
struct SliceWriter<'b> {
    buffer: &'b mut [u8],
    len: usize,
    overflow: bool,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        match self.buffer.get_mut(self.len..end) {
            Some(dst) => {
                dst.copy_from_slice(s.as_bytes());
                self.len = end;
                Ok(())
            }
            None => {
                self.overflow = true;
                Err(fmt::Error)
            }
        }
    }
}

fn core_to_chars(buffer: &mut [u8], value: f64, precision: u8, kind: FormatKind) -> Result<usize, Error> {
    let precision = usize::from(precision);
    let mut out = SliceWriter {
        buffer,
        len: 0,
        overflow: false,
    };

    let written = match kind {
        FormatKind::Integer => {
            if !value.is_finite() {
                return Err(Error::FormatError);
            }
            write!(out, "{}", value as i64)
        }
        FormatKind::Floating => write!(out, "{value}"),
        FormatKind::Exponential => write!(out, "{:.*e}", precision, value),
        FormatKind::Fixed => write!(out, "{:.*}", precision, value),
        FormatKind::Hex => {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::FormatError);
            }
            write!(out, "0x{:X}", value as u64)
        }
    };

    match written {
        Ok(()) => Ok(out.len),
        Err(_) if out.overflow => Err(Error::BufferTooSmall),
        Err(_) => Err(Error::FormatError),
    }
}

fn core_parse(text: &str, kind: FormatKind) -> Result<f64, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidFormat);
    }

    match kind {
        FormatKind::Integer => text
            .parse::<i64>()
            .map(|v| v as f64)
            .map_err(|_| Error::InvalidFormat),
        FormatKind::Hex => {
            let digits = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(text);
            u64::from_str_radix(digits, 16)
                .map(|v| v as f64)
                .map_err(|_| Error::InvalidFormat)
        }
        FormatKind::Floating | FormatKind::Exponential | FormatKind::Fixed => {
            text.parse::<f64>().map_err(|_| Error::InvalidFormat)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: f64, precision: u8, kind: FormatKind) -> Result<String, Error> {
        let mut buf = [0u8; 32];
        Formatter::CORE
            .format(&mut buf, value, precision, kind)
            .map(str::to_owned)
    }

    #[test]
    fn test_kinds() {
        assert_eq!(render(42.9, 0, FormatKind::Integer).as_deref(), Ok("42"));
        assert_eq!(render(-1.5, 0, FormatKind::Floating).as_deref(), Ok("-1.5"));
        assert_eq!(render(1234.5, 2, FormatKind::Exponential).as_deref(), Ok("1.23e3"));
        assert_eq!(render(3.14159, 3, FormatKind::Fixed).as_deref(), Ok("3.142"));
        assert_eq!(render(255.0, 0, FormatKind::Hex).as_deref(), Ok("0xFF"));
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 3];
        assert_eq!(
            (Formatter::CORE.to_chars)(&mut buf, 12345.0, 0, FormatKind::Integer),
            Err(Error::BufferTooSmall)
        );
    }

    #[test]
    fn test_unrepresentable_values() {
        assert_eq!(render(f64::NAN, 0, FormatKind::Integer), Err(Error::FormatError));
        assert_eq!(render(-1.0, 0, FormatKind::Hex), Err(Error::FormatError));
    }

    #[test]
    fn test_parse() {
        let core = Formatter::CORE;
        assert_eq!(core.parse(" 17 ", FormatKind::Integer), Ok(17.0));
        assert_eq!(core.parse("0x1f", FormatKind::Hex), Ok(31.0));
        assert_eq!(core.parse("2.5e1", FormatKind::Exponential), Ok(25.0));
        assert_eq!(core.parse("1.5", FormatKind::Integer), Err(Error::InvalidFormat));
        assert_eq!(core.parse("", FormatKind::Fixed), Err(Error::InvalidFormat));
        assert_eq!(core.parse("-", FormatKind::Floating), Err(Error::InvalidFormat));
    }
}
