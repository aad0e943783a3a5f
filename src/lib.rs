//! A strict Brainfuck interpreter library.
//!
//! Programs run on a fixed tape of 30,000 cells with a single data pointer.
//! Unlike most interpreters nothing wraps around:
//! - moving the pointer off either end of the tape is a fault,
//! - incrementing a cell holding 255 or decrementing one holding 0 is a fault,
//! - input characters above code point 255 are a fault.
//!
//! Sources may carry `//` line comments and `/* */` block comments, and any
//! amount of whitespace. These are stripped before execution, and fault
//! positions count instructions in the stripped stream.
//!
//! Quick start:
//!
//! ```
//! use strict_bf::Interpreter;
//!
//! let mut bf = Interpreter::from_source("+++++[>++++++++<-]>. // prints '('")
//!     .expect("program is well formed");
//! let outcome = bf.run_with_report().expect("program should run");
//! assert_eq!(outcome.output, b"(");
//! assert_eq!(outcome.memory.unwrap().cells, vec![(1, 40)]);
//! ```

pub mod cli_util;
pub mod config;
pub mod console;
pub mod error;
pub mod interpreter;
pub mod loader;
pub mod sanitizer;
pub mod tape;
pub mod theme;

pub use error::{BracketKind, Direction, Fault, FaultKind};
pub use interpreter::{Interpreter, Outcome, StepControl, run_source};
pub use loader::{LoadError, load_source};
pub use sanitizer::{Program, preview, sanitize};
pub use tape::{CELL_MAX, MemoryReport, TAPE_LEN, Tape};
