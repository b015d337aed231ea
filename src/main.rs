use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use reedline::{FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use its_lisp::interpreter::Interpreter;

/// its-lisp: a tiny lisp with q-expressions
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Script to evaluate instead of starting the repl
    file: Option<PathBuf>,

    /// Where repl history is kept
    #[arg(long, env = "ITS_LISP_HISTORY", default_value = ".its_history")]
    history: PathBuf,
}

struct ItsPrompt;

impl Prompt for ItsPrompt {
    fn render_prompt_left(&self) -> Cow<str> { Cow::Borrowed("its> ") }

    fn render_prompt_right(&self) -> Cow<str> { Cow::Borrowed("") }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> { Cow::Borrowed("") }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> { Cow::Borrowed("... ") }

    fn render_prompt_history_search_indicator(&self, history_search: PromptHistorySearch) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", prefix, history_search.term))
    }
}

fn run_file(interpreter: &Interpreter, path: &Path) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };
    match interpreter.execute_script(&source) {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn repl(interpreter: &Interpreter, history: PathBuf) -> ExitCode {
    println!("its-lisp v0.1\nctrl-c to exit\n");

    let mut editor = match FileBackedHistory::with_file(200, history) {
        Ok(history) => Reedline::create().with_history(Box::new(history)),
        Err(err) => {
            warn!("history disabled: {}", err);
            Reedline::create()
        }
    };
    let prompt = ItsPrompt;

    loop {
        match editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "exit" || input == "quit" {
                    break;
                }
                match interpreter.execute(input) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(message) => eprintln!("{}", message),
                }
            }
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => break,
            Err(err) => {
                eprintln!("repl error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let interpreter = Interpreter::new();

    match cli.file {
        Some(path) => {
            info!("running {}", path.display());
            run_file(&interpreter, &path)
        }
        None => repl(&interpreter, cli.history),
    }
}
