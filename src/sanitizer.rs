//! Source cleaning and structural validation.
//!
//! Raw text goes through these passes, in order:
//! 1. `//` line comments are cut up to the end of their line.
//! 2. Spaces, tabs, carriage returns and newlines are removed.
//! 3. `/* ... */` block comments are removed; a leftover `/*` or `*/` is a fault.
//! 4. `[` and `]` are counted; unequal counts are a fault.
//!
//! Every position reported from here on refers to the cleaned stream, so a
//! program spread over several lines is addressed as if it were one line.
//! Characters outside the instruction set are kept; the interpreter rejects
//! them when it reaches them.

use crate::error::{BracketKind, Fault};

const LINE_COMMENT: &str = "//";

/// A cleaned instruction stream, ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<char>,
}

impl Program {
    pub fn instructions(&self) -> &[char] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The cleaned stream as text, e.g. for rendering fault context.
    pub fn as_string(&self) -> String {
        self.instructions.iter().collect()
    }
}

/// Clean `raw` source text and check its comment and bracket structure.
pub fn sanitize(raw: &str) -> Result<Program, Fault> {
    let instructions = strip_block_comments(&compact(raw))?;
    check_bracket_balance(&instructions)?;
    Ok(Program { instructions })
}

/// The cleaned stream as far as it can be cleaned, for showing context around
/// a fault that [`sanitize`] reports. Block comments are removed up to the
/// first unmatched delimiter; from there on the text is kept as is, so the
/// fault position points at that delimiter.
pub fn preview(raw: &str) -> String {
    let (cleaned, _) = remove_block_comments(&compact(raw));
    cleaned.into_iter().collect()
}

/// Line comments and whitespace removed.
fn compact(raw: &str) -> Vec<char> {
    strip_line_comments(raw)
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect()
}

fn strip_line_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.split_inclusive('\n') {
        match line.find(LINE_COMMENT) {
            Some(start) => {
                out.push_str(&line[..start]);
                if line.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

fn strip_block_comments(chars: &[char]) -> Result<Vec<char>, Fault> {
    match remove_block_comments(chars) {
        (out, None) => Ok(out),
        (_, Some(fault)) => Err(fault),
    }
}

/// Remove `/* ... */` spans. The first unmatched delimiter, scanning left to
/// right, is reported at the index it would occupy in the cleaned stream, and
/// everything from that delimiter on is returned untouched.
fn remove_block_comments(chars: &[char]) -> (Vec<char>, Option<Fault>) {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let pair = (chars[i], chars.get(i + 1).copied());
        match pair {
            ('/', Some('*')) => {
                let body_start = i + 2;
                let Some(close) = find_block_close(chars, body_start) else {
                    let fault = Fault::UnterminatedComment { pos: out.len() };
                    out.extend_from_slice(&chars[i..]);
                    return (out, Some(fault));
                };
                i = close + 2;
            }
            ('*', Some('/')) => {
                let fault = Fault::StrayCommentClose { pos: out.len() };
                out.extend_from_slice(&chars[i..]);
                return (out, Some(fault));
            }
            (c, _) => {
                out.push(c);
                i += 1;
            }
        }
    }

    (out, None)
}

fn find_block_close(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '*' && chars[j + 1] == '/')
}

fn check_bracket_balance(instructions: &[char]) -> Result<(), Fault> {
    let opens = instructions.iter().filter(|&&c| c == '[').count();
    let closes = instructions.iter().filter(|&&c| c == ']').count();

    if opens > closes {
        let pos = instructions.iter().position(|&c| c == '[').unwrap_or(0);
        return Err(Fault::UnbalancedBrackets { pos, kind: BracketKind::Open });
    }

    if closes > opens {
        let pos = instructions.iter().rposition(|&c| c == ']').unwrap_or(0);
        return Err(Fault::UnbalancedBrackets { pos, kind: BracketKind::Close });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(raw: &str) -> String {
        sanitize(raw).expect("source should sanitize").as_string()
    }

    #[test]
    fn comments_and_whitespace_only_yield_empty_stream() {
        let sources = [
            "",
            "   \t\r\n",
            "// just a note",
            "// one\n// two\n",
            "/* block */",
            "/* spans\nseveral\nlines */",
            "  // a\n /* b */ \t\n// c /* not a block */",
        ];
        for src in sources {
            assert!(sanitize(src).expect("sanitizes").is_empty(), "{src:?}");
        }
    }

    #[test]
    fn strips_line_comments_to_end_of_line_only() {
        assert_eq!(cleaned("+ // add one [\n-"), "+-");
        assert_eq!(cleaned("++//x\n//y\n."), "++.");
    }

    #[test]
    fn commented_instructions_are_ignored() {
        assert_eq!(cleaned("+/* [[[ ,,, */."), "+.");
        assert_eq!(cleaned("/*a*/+/*b*/+"), "++");
    }

    #[test]
    fn block_comment_can_hide_across_removed_whitespace() {
        // whitespace goes first, so "/ *" becomes an opening delimiter
        assert_eq!(cleaned("+/ * hidden * /+"), "++");
    }

    #[test]
    fn non_instruction_characters_survive() {
        assert_eq!(cleaned("+a+"), "+a+");
    }

    #[test]
    fn unterminated_block_comment_is_reported_at_cleaned_offset() {
        let err = sanitize("++\n  /* never closed").unwrap_err();
        assert!(matches!(err, Fault::UnterminatedComment { pos: 2 }));
    }

    #[test]
    fn stray_block_close_is_reported() {
        let err = sanitize("+/*ok*/ - */").unwrap_err();
        assert!(matches!(err, Fault::StrayCommentClose { pos: 2 }));
    }

    #[test]
    fn first_offending_delimiter_wins() {
        let err = sanitize("+*/ /*").unwrap_err();
        assert!(matches!(err, Fault::StrayCommentClose { pos: 1 }));
    }

    #[test]
    fn excess_open_reports_first_open() {
        let err = sanitize("[[]").unwrap_err();
        assert!(matches!(err, Fault::UnbalancedBrackets { pos: 0, kind: BracketKind::Open }));

        let err = sanitize("+ +\n[[ ]").unwrap_err();
        assert!(matches!(err, Fault::UnbalancedBrackets { pos: 2, kind: BracketKind::Open }));
    }

    #[test]
    fn excess_close_reports_last_close() {
        let err = sanitize("[]]+]").unwrap_err();
        assert!(matches!(err, Fault::UnbalancedBrackets { pos: 4, kind: BracketKind::Close }));
    }

    #[test]
    fn balanced_counts_pass_even_when_misordered() {
        assert_eq!(cleaned("]["), "][");
    }

    #[test]
    fn bracket_counts_match_after_sanitizing() {
        for src in ["[]", "+[->+<]", "[[[]]][]", "/* [ */ []"] {
            let program = sanitize(src).expect("balanced");
            let opens = program.instructions().iter().filter(|&&c| c == '[').count();
            let closes = program.instructions().iter().filter(|&&c| c == ']').count();
            assert_eq!(opens, closes, "{src:?}");
        }
    }

    #[test]
    fn preview_keeps_text_from_the_offending_delimiter() {
        let raw = "++ /* never\nclosed";
        let err = sanitize(raw).unwrap_err();
        let context = preview(raw);
        assert_eq!(context, "++/*neverclosed");
        assert_eq!(context.chars().nth(err.position().unwrap()), Some('/'));

        let raw = "+/*ok*/ - */ +";
        let err = sanitize(raw).unwrap_err();
        let context = preview(raw);
        assert_eq!(context, "+-*/+");
        assert_eq!(context.chars().nth(err.position().unwrap()), Some('*'));
    }

    #[test]
    fn preview_matches_sanitize_for_well_formed_comments() {
        let raw = "+ // note\n/* [ */ [[]";
        assert_eq!(preview(raw), "+[[]");
        let err = sanitize(raw).unwrap_err();
        assert_eq!(preview(raw).chars().nth(err.position().unwrap()), Some('['));
    }
}
