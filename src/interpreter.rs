//! The execution engine.
//!
//! Runs a sanitized [`Program`] against a fresh [`Tape`]:
//! - `>` `<` move the data pointer; leaving the tape is a fault.
//! - `+` `-` change the current cell; there is no wraparound.
//! - `[` pushes its own position onto the loop stack. On a zero cell it skips
//!   forward past the matching `]` instead.
//! - `]` jumps back to the position on top of the loop stack while the cell
//!   is non-zero, otherwise pops it.
//! - `,` stores one character of input; code points above 255 are a fault and
//!   end of input stores 0.
//! - `.` emits the current cell as one byte.
//!
//! Any other character is a syntax fault. The first fault ends the run.

use std::io;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::console;
use crate::error::{BracketKind, Fault};
use crate::sanitizer::{self, Program};
use crate::tape::{MemoryReport, Tape};

type InputProvider = Box<dyn FnMut() -> io::Result<Option<char>> + Send>;
type OutputSink = Box<dyn FnMut(u8) + Send>;

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone, Debug, Default)]
pub struct StepControl {
    pub max_steps: Option<u64>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<u64>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }
}

/// Result of a run that reached the end of the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Bytes emitted by `.`, in order.
    pub output: Vec<u8>,
    /// Instructions executed, counting every loop iteration.
    pub steps: u64,
    /// Final data pointer.
    pub pointer: usize,
    /// Present when the run was asked for a memory report.
    pub memory: Option<MemoryReport>,
}

impl Outcome {
    /// False when no `.` ever executed.
    pub fn produced_output(&self) -> bool {
        !self.output.is_empty()
    }
}

/// An interpreter for one program.
///
/// Owns its tape and loop stack; nothing is shared between instances. Every
/// run starts from a zeroed tape, pointer 0 and an empty loop stack.
pub struct Interpreter {
    program: Program,
    tape: Tape,
    loop_stack: Vec<usize>,
    input_provider: Option<InputProvider>,
    output_sink: Option<OutputSink>,
}

impl Interpreter {
    /// Wrap an already sanitized program.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            tape: Tape::new(),
            loop_stack: Vec::new(),
            input_provider: None,
            output_sink: None,
        }
    }

    /// Sanitize raw source text and wrap the result.
    pub fn from_source(source: &str) -> Result<Self, Fault> {
        Ok(Self::new(sanitizer::sanitize(source)?))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Provide an input provider. When set, `,` reads from it instead of the console.
    /// Returning `Ok(None)` means end of input.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> io::Result<Option<char>> + Send + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    /// Provide an output sink that sees each byte as soon as `.` emits it.
    /// Bytes are collected into the [`Outcome`] either way.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Execute the program until completion.
    pub fn run(&mut self) -> Result<Outcome, Fault> {
        self.execute(false, None)
    }

    /// Execute the program and attach a [`MemoryReport`] to the outcome.
    pub fn run_with_report(&mut self) -> Result<Outcome, Fault> {
        self.execute(true, None)
    }

    /// Execute with cooperative cancellation and an optional step limit.
    pub fn run_with_control(
        &mut self,
        report: bool,
        step_control: &StepControl,
    ) -> Result<Outcome, Fault> {
        self.execute(report, Some(step_control))
    }

    fn execute(
        &mut self,
        report: bool,
        step_control: Option<&StepControl>,
    ) -> Result<Outcome, Fault> {
        self.tape = Tape::new();
        self.loop_stack.clear();

        let code = self.program.instructions().to_vec();
        let mut output = Vec::new();
        let mut code_ptr = 0;
        let mut steps: u64 = 0;

        while code_ptr < code.len() {
            if let Some(ctrl) = step_control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(Fault::Interrupted);
                }
                if let Some(limit) = ctrl.max_steps {
                    if steps >= limit {
                        return Err(Fault::StepLimitExceeded { limit });
                    }
                }
            }

            match code[code_ptr] {
                '>' => self.tape.move_right(code_ptr)?,
                '<' => self.tape.move_left(code_ptr)?,
                '+' => self.tape.increment(code_ptr)?,
                '-' => self.tape.decrement(code_ptr)?,
                '[' => {
                    if self.tape.current() == 0 {
                        code_ptr = skip_loop(&code, code_ptr)?;
                    } else {
                        self.loop_stack.push(code_ptr);
                    }
                }
                ']' => {
                    let Some(&loop_start) = self.loop_stack.last() else {
                        return Err(Fault::LoopStackEmpty { pos: code_ptr });
                    };
                    if self.tape.current() > 0 {
                        // Resume just after the '[' so it is not pushed again.
                        code_ptr = loop_start;
                    } else {
                        self.loop_stack.pop();
                    }
                }
                ',' => {
                    let value = self.read_input(code_ptr)?;
                    self.tape.set_current(value);
                }
                '.' => {
                    let byte = self.tape.current();
                    output.push(byte);
                    if let Some(sink) = self.output_sink.as_mut() {
                        sink(byte);
                    }
                }
                other => {
                    return Err(Fault::InvalidInstruction { ch: other, pos: code_ptr });
                }
            }

            steps += 1;
            code_ptr += 1;
        }

        Ok(Outcome {
            output,
            steps,
            pointer: self.tape.pointer(),
            memory: report.then(|| self.tape.report()),
        })
    }

    fn read_input(&mut self, code_ptr: usize) -> Result<u8, Fault> {
        let read = match self.input_provider.as_mut() {
            Some(provider) => provider(),
            None => console::read_char(),
        };

        match read {
            Ok(Some(ch)) => {
                u8::try_from(ch).map_err(|_| Fault::InputOutOfRange { ch, pos: code_ptr })
            }
            Ok(None) => Ok(0),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(Fault::Interrupted),
            Err(e) => Err(Fault::Io { pos: code_ptr, source: e }),
        }
    }
}

/// Position of the `]` matching the `[` at `open`, found by scanning forward.
fn skip_loop(code: &[char], open: usize) -> Result<usize, Fault> {
    let mut depth = 0usize;
    for (offset, &c) in code[open..].iter().enumerate() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + offset);
                }
            }
            _ => {}
        }
    }
    Err(Fault::UnbalancedBrackets { pos: open, kind: BracketKind::Open })
}

/// Sanitize and run `source` in one go. Each `,` consumes one byte of
/// `input`; running out of input stores 0.
pub fn run_source(source: &str, input: &[u8], report: bool) -> Result<Outcome, Fault> {
    let mut interpreter = Interpreter::from_source(source)?;
    let mut bytes = input.to_vec().into_iter();
    interpreter.set_input_provider(move || Ok(bytes.next().map(char::from)));
    interpreter.execute(report, None)
}
