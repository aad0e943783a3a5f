use clap::Parser;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use strict_bf::cli_util::{
    print_diagnostic, render_fault, render_load_error, render_memory_report, render_notice,
};
use strict_bf::config::{CONFIG_FILE, Settings};
use strict_bf::theme::Palette;
use strict_bf::{Fault, Interpreter, StepControl, load_source, preview, sanitize};

const EXIT_INTERRUPTED: i32 = 130;

fn print_usage_and_exit(program: &str, palette: &Palette) -> ! {
    let hi = |s: &str| palette.report_index.paint(s.to_string()).to_string();
    let warn = |s: &str| palette.fault_name.paint(s.to_string()).to_string();
    eprintln!(
        r#"
Brainfuck Interpreter
---------------------

Runs Brainfuck programs stored in files with the .bf extension:

    {run}

Usage:
  {0} <FILE.bf> [--debug|-d] [--max-steps N] [--no-color]

Options:
  --debug,  -d     Print the non-zero memory cells and the pointer after the run
  --max-steps N    Abort after N instructions (fallback BF_MAX_STEPS, then the config file)
  --no-color       Print diagnostics without colours (also honours NO_COLOR)
  --help,   -h     Show this help

Extra Details
-------------

- Files can be documented with // line comments and /* block */ comments; they are
  stripped before execution, along with any instructions inside them.

- Whitespace is also stripped before execution, so it is {irrelevant} to code execution.
  Fault positions count instructions after comments and whitespace are removed.

- The memory is {cells}, and each cell {cannot} leave the inclusive range {range}.
  Moving the pointer off either end is an error too.

- Colours and a default step limit can be set in ~/.config/{CONFIG_FILE}.
"#,
        program,
        run = hi(&format!("{program} your-file.bf")),
        irrelevant = warn("irrelevant"),
        cells = hi("30,000 cells"),
        cannot = warn("cannot"),
        range = hi("0-255"),
    );
    let _ = io::stderr().flush();
    std::process::exit(0);
}

#[derive(Parser, Debug)]
#[command(name = "brainfuck", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Path to a `.bf` source file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the non-zero memory cells and the pointer after the run
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Maximum instructions before abort (fallback BF_MAX_STEPS, then config)
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,

    /// Disable coloured diagnostics
    #[arg(long = "no-color")]
    no_color: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn run(cli: Cli, settings: Settings, palette: &Palette, path: PathBuf) -> i32 {
    let source = match load_source(&path) {
        Ok(s) => s,
        Err(err) => {
            print_diagnostic(&render_load_error(palette, &err));
            return 1;
        }
    };

    let program = match sanitize(&source) {
        Ok(p) => p,
        Err(fault) => {
            print_diagnostic(&render_fault(palette, Some(&preview(&source)), &fault));
            return 1;
        }
    };
    let cleaned = program.as_string();

    // Resolve limits: flag -> env -> config file
    let max_steps = cli
        .max_steps
        .or_else(|| env::var("BF_MAX_STEPS").ok().and_then(|s| s.parse::<u64>().ok()))
        .or(settings.max_steps);

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel_clone.store(true, Ordering::Relaxed)) {
        print_diagnostic(&format!("failed to set ctrl+c handler: {e}"));
        return 1;
    }

    let mut bf = Interpreter::new(program);
    bf.set_output_sink(|byte| {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(&[byte]);
        let _ = stdout.flush();
    });

    let ctrl = StepControl::new(max_steps, cancel);
    match bf.run_with_control(cli.debug, &ctrl) {
        Ok(outcome) => {
            if outcome.produced_output() {
                // For readability, ensure output ends with a newline
                println!();
                let _ = io::stdout().flush();
            } else {
                print_diagnostic(&render_notice(palette));
            }
            if let Some(report) = outcome.memory.as_ref() {
                print_diagnostic(&render_memory_report(palette, report));
            }
            0
        }
        Err(fault) => {
            print_diagnostic(&render_fault(palette, Some(&cleaned), &fault));
            if matches!(fault, Fault::Interrupted) {
                EXIT_INTERRUPTED
            } else {
                1
            }
        }
    }
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("brainfuck"));

    let cli = Cli::parse();

    let settings = Settings::load();
    let palette = if cli.no_color || env::var_os("NO_COLOR").is_some() {
        Palette::plain()
    } else {
        settings.palette.clone()
    };

    if cli.help {
        print_usage_and_exit(&program, &palette);
    }
    let Some(path) = cli.file.clone() else {
        print_usage_and_exit(&program, &palette);
    };

    let code = run(cli, settings, &palette, path);
    std::process::exit(code);
}
