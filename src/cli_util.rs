use std::io::{self, Write};

use crate::error::Fault;
use crate::loader::LoadError;
use crate::tape::MemoryReport;
use crate::theme::Palette;

/// Characters of context shown on either side of a fault position.
const WINDOW_CHARS: usize = 32;

pub const NO_OUTPUT_NOTICE: &str = "No output provided.";

/// Render a fault as `<Kind>: at position <p> - <message>`, followed by a
/// caret under the offending instruction when `code` is the sanitized stream.
pub fn render_fault(palette: &Palette, code: Option<&str>, fault: &Fault) -> String {
    let name = palette.fault_name.paint(fault.kind().name());
    let mut out = match fault.position() {
        Some(pos) => format!(
            "{name}: {}",
            palette
                .fault_message
                .paint(format!("at position {pos} - {fault}"))
        ),
        None => format!("{name}: {}", palette.fault_message.paint(fault.to_string())),
    };

    if let (Some(code), Some(pos)) = (code, fault.position()) {
        if !code.is_empty() {
            out.push('\n');
            out.push_str(&render_context(palette, code, pos));
        }
    }

    out
}

/// A short window of `code` around `pos` with a caret under the exact position.
/// Slicing is by chars so multi-byte characters stay intact.
fn render_context(palette: &Palette, code: &str, pos: usize) -> String {
    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    let slice = &code[start_byte..end_byte];

    let caret_offset_chars = pos.saturating_sub(start_char);
    let underline = format!("{}^", " ".repeat(caret_offset_chars));

    format!(
        "  {}\n  {}",
        palette.context.paint(slice),
        palette.caret.paint(underline)
    )
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}

pub fn render_load_error(palette: &Palette, err: &LoadError) -> String {
    format!(
        "{}: {}",
        palette.fault_name.paint("FileLoadError"),
        palette.fault_message.paint(err.to_string())
    )
}

pub fn render_notice(palette: &Palette) -> String {
    palette.notice.paint(NO_OUTPUT_NOTICE).to_string()
}

/// One row per non-zero cell, then the final pointer.
pub fn render_memory_report(palette: &Palette, report: &MemoryReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        palette.report_heading.paint(" Memory Breakdown\n------------------")
    ));

    for (index, value) in &report.cells {
        out.push_str(&format!(
            "{} - {}\n",
            palette.report_index.paint(format!("{index:>7}")),
            palette.report_value.paint(format!("[{value}]"))
        ));
    }

    out.push_str(&format!(
        "\n    ptr => {}",
        palette.pointer.paint(report.pointer.to_string())
    ));
    out
}

/// Write `text` plus a newline to stderr and flush.
pub fn print_diagnostic(text: &str) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{text}");
    let _ = stderr.flush();
}
