//! Command lines for the Liftpanel display
//!
//! A line addresses one of the two display rows by its three-byte prefix.
//! Parsing never fails: anything that is not a row command is simply
//! [`LineCommand::Ignored`].

use crate::line::LINE_TERMINATOR;
use heapless::Vec;

/// Prefix selecting the top row
pub const TOP_PREFIX: &[u8; 3] = b"L1:";

/// Prefix selecting the bottom row
pub const BOTTOM_PREFIX: &[u8; 3] = b"L2:";

/// Length of a row prefix in bytes
pub const PREFIX_LEN: usize = 3;

/// Maximum text carried by an encoded command
pub const MAX_TEXT_LEN: usize = 64;

/// Maximum encoded command size (PREFIX + TEXT + TERMINATOR)
pub const MAX_ENCODED_LEN: usize = PREFIX_LEN + MAX_TEXT_LEN + 1;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Output buffer cannot hold the encoded line
    BufferTooSmall,
    /// Text contains the line terminator
    EmbeddedTerminator,
    /// An ignored line has no wire form
    NotEncodable,
}

/// Display row addressed by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Row 0, prefix `L1:`
    Top,
    /// Row 1, prefix `L2:`
    Bottom,
}

impl Row {
    /// Both rows, top first
    pub const ALL: [Row; 2] = [Row::Top, Row::Bottom];

    /// Zero-based row index on the display
    pub const fn index(self) -> u8 {
        match self {
            Row::Top => 0,
            Row::Bottom => 1,
        }
    }

    /// Wire prefix selecting this row
    pub const fn prefix(self) -> &'static [u8; 3] {
        match self {
            Row::Top => TOP_PREFIX,
            Row::Bottom => BOTTOM_PREFIX,
        }
    }
}

/// A complete line, interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineCommand<'a> {
    /// Blank `row` and write `text` from column 0
    SetLine { row: Row, text: &'a [u8] },
    /// Unrecognized or empty prefix, dropped without effect
    Ignored,
}

impl<'a> LineCommand<'a> {
    /// Interpret a line (terminator already stripped)
    ///
    /// Prefixes are matched case-sensitively and only at the very start
    /// of the line. The text is everything after the prefix, untruncated.
    pub fn parse(line: &'a [u8]) -> Self {
        for row in Row::ALL {
            if let Some(text) = line.strip_prefix(&row.prefix()[..]) {
                return LineCommand::SetLine { row, text };
            }
        }
        LineCommand::Ignored
    }

    /// Build a row command, as the controller would send it
    pub fn set_line(row: Row, text: &'a str) -> Self {
        LineCommand::SetLine {
            row,
            text: text.as_bytes(),
        }
    }

    /// Encode this command as a terminated line
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CommandError> {
        let (row, text) = match self {
            LineCommand::SetLine { row, text } => (*row, *text),
            LineCommand::Ignored => return Err(CommandError::NotEncodable),
        };

        if text.contains(&LINE_TERMINATOR) {
            return Err(CommandError::EmbeddedTerminator);
        }

        let line_len = PREFIX_LEN + text.len() + 1;
        if buffer.len() < line_len {
            return Err(CommandError::BufferTooSmall);
        }

        buffer[..PREFIX_LEN].copy_from_slice(row.prefix());
        buffer[PREFIX_LEN..PREFIX_LEN + text.len()].copy_from_slice(text);
        buffer[line_len - 1] = LINE_TERMINATOR;

        Ok(line_len)
    }

    /// Encode this command into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_ENCODED_LEN>, CommandError> {
        let mut buffer = [0u8; MAX_ENCODED_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| CommandError::BufferTooSmall)?;
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineReceiver;

    #[test]
    fn test_parse_top_row() {
        assert_eq!(
            LineCommand::parse(b"L1:Floor 3"),
            LineCommand::SetLine {
                row: Row::Top,
                text: b"Floor 3"
            }
        );
    }

    #[test]
    fn test_parse_bottom_row() {
        assert_eq!(
            LineCommand::parse(b"L2:Moving Up"),
            LineCommand::SetLine {
                row: Row::Bottom,
                text: b"Moving Up"
            }
        );
    }

    #[test]
    fn test_parse_empty_remainder() {
        assert_eq!(
            LineCommand::parse(b"L1:"),
            LineCommand::SetLine {
                row: Row::Top,
                text: b""
            }
        );
    }

    #[test]
    fn test_parse_keeps_long_text() {
        let line = b"L2:this text is longer than sixteen";
        match LineCommand::parse(line) {
            LineCommand::SetLine { text, .. } => assert_eq!(text, &line[3..]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_ignores_other_lines() {
        for line in [
            &b""[..],
            b"L1",
            b"l1:lower",
            b"L3:nope",
            b" L1:leading space",
            b"PING",
            b"MOVE:3",
        ] {
            assert_eq!(LineCommand::parse(line), LineCommand::Ignored);
        }
    }

    #[test]
    fn test_row_index_and_prefix() {
        assert_eq!(Row::Top.index(), 0);
        assert_eq!(Row::Bottom.index(), 1);
        assert_eq!(Row::Top.prefix(), TOP_PREFIX);
        assert_eq!(Row::Bottom.prefix(), BOTTOM_PREFIX);
    }

    #[test]
    fn test_encode_set_line() {
        let mut buffer = [0u8; 16];
        let len = LineCommand::set_line(Row::Bottom, "Door")
            .encode(&mut buffer)
            .unwrap();
        assert_eq!(&buffer[..len], b"L2:Door\n");
    }

    #[test]
    fn test_encode_errors() {
        let mut small = [0u8; 4];
        assert_eq!(
            LineCommand::set_line(Row::Top, "Lobby").encode(&mut small),
            Err(CommandError::BufferTooSmall)
        );
        assert_eq!(
            LineCommand::set_line(Row::Top, "a\nb").encode_to_vec(),
            Err(CommandError::EmbeddedTerminator)
        );
        assert_eq!(
            LineCommand::Ignored.encode_to_vec(),
            Err(CommandError::NotEncodable)
        );
    }

    #[test]
    fn test_encoded_line_parses_back() {
        let encoded = LineCommand::set_line(Row::Top, "Floor 3")
            .encode_to_vec()
            .unwrap();

        let mut rx = LineReceiver::new();
        for &b in encoded.iter() {
            rx.feed(b);
        }
        let line = rx.line().unwrap();
        assert_eq!(
            LineCommand::parse(line),
            LineCommand::set_line(Row::Top, "Floor 3")
        );
    }
}
