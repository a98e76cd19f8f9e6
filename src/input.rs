//! The designated input stream `READ` consumes: either a named file or,
//! absent that, standard input. Both present the same interface so the
//! engine never branches on which one is in play.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Stdin};

pub enum InputSource {
    Stdin(Stdin),
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl InputSource {
    pub fn stdin() -> Self {
        InputSource::Stdin(io::stdin())
    }

    pub fn open(path: &std::path::Path) -> io::Result<Self> {
        Ok(InputSource::File(BufReader::new(File::open(path)?)))
    }

    /// An in-memory input stream, for tests that exercise `READ` without
    /// touching the filesystem or real stdin.
    pub fn from_str_for_tests(contents: &str) -> Self {
        InputSource::Memory(Cursor::new(contents.as_bytes().to_vec()))
    }

    /// Reads one line, trailing whitespace/newline stripped. Returns
    /// `None` on end-of-input — both a file at EOF and stdin at EOF take
    /// this path, per spec §9's open question ("behaviors match").
    pub fn read_line(&mut self) -> Option<String> {
        let mut buf = String::new();
        let n = match self {
            InputSource::Stdin(stdin) => stdin.lock().read_line(&mut buf),
            InputSource::File(reader) => reader.read_line(&mut buf),
            InputSource::Memory(reader) => reader.read_line(&mut buf),
        }
        .unwrap_or(0);
        if n == 0 {
            None
        } else {
            Some(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_lines_and_then_yields_none() {
        let mut input = InputSource::from_str_for_tests("one\ntwo\n");
        assert_eq!(input.read_line(), Some("one".to_string()));
        assert_eq!(input.read_line(), Some("two".to_string()));
        assert_eq!(input.read_line(), None);
    }

    #[test]
    fn strips_trailing_carriage_return() {
        let mut input = InputSource::from_str_for_tests("crlf\r\n");
        assert_eq!(input.read_line(), Some("crlf".to_string()));
    }
}
