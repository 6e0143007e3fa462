//! Line-based codec for tokio.
//!
//! Splits an inbound byte stream into newline-terminated lines and writes
//! outbound [`Command`]s one per line.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::command::Command;
use crate::error;

/// Classic IRC line limit, including the terminator.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// Line codec that frames the inbound stream and serializes outbound commands.
///
/// Decoded lines have their trailing `\r\n` removed. Blank lines are skipped.
/// A line longer than the limit is dropped up to its newline and framing
/// resumes with the next one.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length
    max_len: usize,
    /// Set while skipping the rest of an over-long line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a codec with the default 512 byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom max line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// Sanitize outgoing line data.
    ///
    /// - Truncates at the first line ending
    /// - Rejects other illegal control characters
    pub fn sanitize(mut data: String) -> error::Result<String> {
        if let Some(pos) = data.find(['\r', '\n']) {
            data.truncate(pos);
        }

        if let Some(ch) = data.chars().find(|&ch| is_illegal_control_char(ch)) {
            return Err(error::ProtocolError::IllegalControlChar(ch));
        }

        Ok(data)
    }
}

/// Control characters that may not appear inside a line.
///
/// IRC formatting codes (bold, color, italic, reset, reverse, underline,
/// strikethrough, monospace) are allowed.
pub fn is_illegal_control_char(ch: char) -> bool {
    const FORMAT_CODES: [char; 8] = [
        '\x02', '\x03', '\x0f', '\x11', '\x16', '\x1d', '\x1e', '\x1f',
    ];
    ch.is_control() && ch != '\r' && ch != '\n' && !FORMAT_CODES.contains(&ch)
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        loop {
            // Look for newline starting from where we left off
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                } else if src.len() > self.max_len {
                    warn!(
                        buffered = src.len(),
                        limit = self.max_len,
                        "Discarding over-long line"
                    );
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                } else {
                    // No complete line yet - remember where we stopped
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if self.discarding {
                self.discarding = false;
                continue;
            }

            if line.len() > self.max_len {
                warn!(
                    actual = line.len(),
                    limit = self.max_len,
                    "Discarding over-long line"
                );
                continue;
            }

            if let Some(text) = to_text(&line) {
                return Ok(Some(text));
            }
        }
    }

    /// Flush a final unterminated line once the peer has closed.
    ///
    /// Returns `Ok(None)` once the buffer is drained, so end of stream is
    /// never reported as an error.
    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        let rest = src.split();
        self.next_index = 0;
        if std::mem::take(&mut self.discarding) {
            return Ok(None);
        }
        Ok(to_text(&rest))
    }
}

/// Lossy text of a raw line without its terminator; `None` if blank.
fn to_text(raw: &[u8]) -> Option<String> {
    let data = String::from_utf8_lossy(raw);
    let trimmed = data.trim_end_matches(['\r', '\n']);
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl Encoder<Command> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, cmd: Command, dst: &mut BytesMut) -> error::Result<()> {
        let line = Self::sanitize(cmd.to_string())?;
        dst.reserve(line.len() + 2);
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(b"\r\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(codec: &mut LineCodec, buf: &mut BytesMut) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = codec.decode(buf).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result, Some("PING :test".to_string()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"server\n");
        assert_eq!(
            codec.decode(&mut buf).unwrap(),
            Some("PING :server".to_string())
        );
    }

    #[test]
    fn test_decode_several_lines_in_one_read() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(":a!b PRIVMSG #c :one\r\n:a!b PRIVMSG #c :two\r\n:a!b");

        let lines = decode_all(&mut codec, &mut buf);
        assert_eq!(lines, vec![":a!b PRIVMSG #c :one", ":a!b PRIVMSG #c :two"]);
        assert_eq!(&buf[..], b":a!b");
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("\r\n\nPING :x\n");

        assert_eq!(decode_all(&mut codec, &mut buf), vec!["PING :x"]);
    }

    #[test]
    fn test_decode_too_long_is_skipped() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("this is way too long\nPING :a\n");

        assert_eq!(decode_all(&mut codec, &mut buf), vec!["PING :a"]);
    }

    #[test]
    fn test_decode_too_long_across_reads() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("0123456789abcdef");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        buf.extend_from_slice(b"still the same line\nPING :b\n");
        assert_eq!(decode_all(&mut codec, &mut buf), vec!["PING :b"]);
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from(&b"PRIVMSG #c :caf\xe9\r\n"[..]);

        let line = codec.decode(&mut buf).unwrap().unwrap();
        assert!(line.starts_with("PRIVMSG #c :caf"));
    }

    #[test]
    fn test_decode_eof_flushes_unterminated_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :a\r\nERROR :Closing link");

        assert_eq!(codec.decode_eof(&mut buf).unwrap(), Some("PING :a".to_string()));
        assert_eq!(
            codec.decode_eof(&mut buf).unwrap(),
            Some("ERROR :Closing link".to_string())
        );
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_eof_drops_discarded_tail() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("0123456789abcdef");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        buf.extend_from_slice(b"tail");
        assert_eq!(codec.decode_eof(&mut buf).unwrap(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::new();

        codec.encode(Command::join("#rust"), &mut buf).unwrap();
        assert_eq!(&buf[..], b"JOIN #rust\r\n");
    }

    #[test]
    fn test_sanitize_truncates_newline() {
        let result = LineCodec::sanitize("PRIVMSG #test :hello\r\nQUIT".to_string());
        assert_eq!(result.unwrap(), "PRIVMSG #test :hello");
    }

    #[test]
    fn test_sanitize_rejects_bell() {
        let result = LineCodec::sanitize("PRIVMSG #test :ding\x07".to_string());
        assert!(matches!(
            result,
            Err(error::ProtocolError::IllegalControlChar('\x07'))
        ));
    }

    #[test]
    fn test_sanitize_allows_formatting() {
        let result = LineCodec::sanitize("PRIVMSG #test :\x02bold\x02".to_string());
        assert!(result.is_ok());
    }
}
