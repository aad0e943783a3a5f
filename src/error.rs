use std::fmt;

/// Everything that can stop a run before the instruction stream is exhausted.
///
/// Positions are zero-based indices into the sanitized instruction stream,
/// not line/column coordinates in the original file.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// A `/*` without a closing `*/`.
    #[error("cannot import code with unterminated multi-line comments. (\"/*\" was found in the code.)")]
    UnterminatedComment { pos: usize },

    /// A `*/` that closes nothing.
    #[error("cannot import code with stray comment characters. (\"*/\" was found in the code.)")]
    StrayCommentClose { pos: usize },

    /// `[` and `]` counts differ, or a skipped loop has no closing bracket.
    #[error("{}", unbalanced_message(.kind))]
    UnbalancedBrackets { pos: usize, kind: BracketKind },

    /// A character outside `><+-[],.` survived sanitization.
    #[error("unrecognised character '{ch}' found in code.")]
    InvalidInstruction { ch: char, pos: usize },

    #[error("cannot move pointer outside of {direction} bounds.")]
    PointerOutOfBounds { pos: usize, direction: Direction },

    #[error("cannot increment memory block past integer limit of 255.")]
    CellOverflow { pos: usize },

    #[error("cannot decrement memory block below 0.")]
    CellUnderflow { pos: usize },

    #[error("inputted character '{ch}' ({}) exceeds value of 255.", code_point(.ch))]
    InputOutOfRange { ch: char, pos: usize },

    #[error("failed to read input: {source}")]
    Io {
        pos: usize,
        #[source]
        source: std::io::Error,
    },

    /// A `]` executed while no loop was open.
    #[error("reached ']' with no open loop on the loop stack.")]
    LoopStackEmpty { pos: usize },

    #[error("execution aborted: step limit exceeded ({limit}).")]
    StepLimitExceeded { limit: u64 },

    #[error("execution aborted: interrupted.")]
    Interrupted,
}

/// Coarse classification of a [`Fault`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Syntax,
    Bounds,
    Overflow,
    Underflow,
    Input,
    Io,
    Internal,
    Aborted,
}

impl FaultKind {
    /// Name shown in front of a fault message.
    pub fn name(self) -> &'static str {
        match self {
            FaultKind::Syntax => "SyntaxError",
            FaultKind::Bounds => "OutOfBoundsError",
            FaultKind::Overflow => "OverflowError",
            FaultKind::Underflow => "SubZeroError",
            FaultKind::Input => "InputError",
            FaultKind::Io => "IoError",
            FaultKind::Internal => "InternalError",
            FaultKind::Aborted => "Aborted",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::UnterminatedComment { .. }
            | Fault::StrayCommentClose { .. }
            | Fault::UnbalancedBrackets { .. }
            | Fault::InvalidInstruction { .. } => FaultKind::Syntax,
            Fault::PointerOutOfBounds { .. } => FaultKind::Bounds,
            Fault::CellOverflow { .. } => FaultKind::Overflow,
            Fault::CellUnderflow { .. } => FaultKind::Underflow,
            Fault::InputOutOfRange { .. } => FaultKind::Input,
            Fault::Io { .. } => FaultKind::Io,
            Fault::LoopStackEmpty { .. } => FaultKind::Internal,
            Fault::StepLimitExceeded { .. } | Fault::Interrupted => FaultKind::Aborted,
        }
    }

    /// Index into the sanitized stream where the fault was raised.
    pub fn position(&self) -> Option<usize> {
        match self {
            Fault::UnterminatedComment { pos }
            | Fault::StrayCommentClose { pos }
            | Fault::UnbalancedBrackets { pos, .. }
            | Fault::InvalidInstruction { pos, .. }
            | Fault::PointerOutOfBounds { pos, .. }
            | Fault::CellOverflow { pos }
            | Fault::CellUnderflow { pos }
            | Fault::InputOutOfRange { pos, .. }
            | Fault::Io { pos, .. }
            | Fault::LoopStackEmpty { pos } => Some(*pos),
            Fault::StepLimitExceeded { .. } | Fault::Interrupted => None,
        }
    }
}

/// Which side of a loop was left unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

fn unbalanced_message(kind: &BracketKind) -> String {
    match kind {
        BracketKind::Open => format!(
            "cannot import code with unterminated while loops. (Unmatched {kind} was found in the code.)"
        ),
        BracketKind::Close => format!(
            "cannot import code with trailing while loop characters. (Unmatched {kind} was found in the code.)"
        ),
    }
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

/// Direction the data pointer tried to leave the tape in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "leftward"),
            Direction::Right => write!(f, "rightward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_positions() {
        let fault = Fault::CellOverflow { pos: 255 };
        assert_eq!(fault.kind(), FaultKind::Overflow);
        assert_eq!(fault.position(), Some(255));
        assert_eq!(Fault::Interrupted.position(), None);
        assert_eq!(Fault::StepLimitExceeded { limit: 3 }.kind(), FaultKind::Aborted);
    }

    #[test]
    fn messages_name_the_offending_side() {
        let open = Fault::UnbalancedBrackets { pos: 0, kind: BracketKind::Open };
        let close = Fault::UnbalancedBrackets { pos: 4, kind: BracketKind::Close };
        assert!(open.to_string().contains("Unmatched '['"));
        assert!(close.to_string().contains("Unmatched ']'"));

        let right = Fault::PointerOutOfBounds { pos: 1, direction: Direction::Right };
        assert_eq!(right.to_string(), "cannot move pointer outside of rightward bounds.");
    }

    #[test]
    fn input_message_reports_code_point() {
        let fault = Fault::InputOutOfRange { ch: 'Ā', pos: 0 };
        assert!(fault.to_string().contains("(256)"));
        assert_eq!(fault.kind().name(), "InputError");
    }
}
