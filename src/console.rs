//! Default input unit for the `,` instruction.
//!
//! On a terminal a single keypress is read in raw mode, without waiting for
//! Enter and without echo. Otherwise (piped or redirected stdin) one
//! character is decoded from the byte stream, UTF-8 where the bytes form a
//! valid sequence and one raw byte where they don't.

use std::io::{self, BufRead, IsTerminal};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Read one character of input. `Ok(None)` means end of input.
///
/// Only a Ctrl+C keypress in raw mode is reported as
/// [`io::ErrorKind::Interrupted`].
pub fn read_char() -> io::Result<Option<char>> {
    if io::stdin().is_terminal() {
        read_key()
    } else {
        read_char_from(&mut io::stdin().lock())
    }
}

/// Leaves raw mode again even when the read fails.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn read_key() -> io::Result<Option<char>> {
    let _raw = RawModeGuard::enable()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_interrupt(&key) {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "ctrl+c pressed"));
        }
        if is_end_of_input(&key) {
            return Ok(None);
        }
        if let Some(ch) = key_to_char(&key) {
            return Ok(Some(ch));
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

fn is_end_of_input(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('d') | KeyCode::Char('z'))
}

/// Keys that produce a character; navigation and function keys are skipped.
fn key_to_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        KeyCode::Backspace => Some('\u{8}'),
        KeyCode::Esc => Some('\u{1b}'),
        _ => None,
    }
}

/// Read one character from a byte stream.
///
/// A complete UTF-8 sequence decodes to its character. Any other byte is taken
/// as-is (Latin-1), so raw bytes 0x80-0xFF reach the tape unchanged. A
/// sequence split across reads is reassembled; if input ends inside it, the
/// lead byte is used and the rest of the sequence is dropped. `EINTR` is
/// retried and never surfaces as [`io::ErrorKind::Interrupted`].
pub fn read_char_from<R: BufRead>(reader: &mut R) -> io::Result<Option<char>> {
    wait_for_data(reader)?;
    let available = reader.fill_buf()?;
    let Some(&lead) = available.first() else {
        return Ok(None);
    };

    let width = match utf8_width(lead) {
        Some(w) if w > 1 => w,
        _ => {
            reader.consume(1);
            return Ok(Some(char::from(lead)));
        }
    };

    if available.len() >= width {
        let decoded = decode(&available[..width]);
        reader.consume(if decoded.is_some() { width } else { 1 });
        return Ok(Some(decoded.unwrap_or(char::from(lead))));
    }

    let mut bytes = available.to_vec();
    reader.consume(bytes.len());
    while bytes.len() < width {
        wait_for_data(reader)?;
        let more = reader.fill_buf()?;
        if more.is_empty() {
            break;
        }
        let take = (width - bytes.len()).min(more.len());
        bytes.extend_from_slice(&more[..take]);
        reader.consume(take);
    }
    Ok(Some(decode(&bytes).unwrap_or(char::from(lead))))
}

fn decode(bytes: &[u8]) -> Option<char> {
    std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next())
}

/// Fill the reader's buffer, retrying reads interrupted by a signal.
fn wait_for_data<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        match reader.fill_buf() {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
