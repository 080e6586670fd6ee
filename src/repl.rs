//! Interactive session loop.
//!
//! Reads lines with rustyline, accumulates them into complete commands,
//! translates each one and either runs it or hands it to the dispatcher.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use crate::db::DatabaseBackend;
use crate::dispatch::{self, ActionTarget, DispatchOutput, Session};
use crate::error::{MygoError, Result};
use crate::help::HELP_TEXT;
use crate::render::ResultTable;
use crate::translate::{TranslationOutcome, Translator, DIRECTIVE_MARKER, TERMINATOR};

/// Prompt shown while a command is being continued.
pub const CONTINUATION_PROMPT: &str = "    -> ";

/// Printed when the session ends.
pub const GOODBYE: &str = "Bye!";

/// Collects input lines until they form a complete command.
///
/// A line ending in `;` or starting with `\` completes the command; other
/// lines are held and joined with a space.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed, non-empty line. Returns the command once complete.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if !line.ends_with(TERMINATOR) && !line.starts_with(DIRECTIVE_MARKER) {
            self.pending.push_str(line);
            self.pending.push(' ');
            return None;
        }

        if self.pending.is_empty() {
            return Some(line.to_string());
        }

        self.pending.push_str(line);
        Some(std::mem::take(&mut self.pending))
    }

    /// Returns true while a command is being continued.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discards any partial command.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Commands handled before translation, for every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `quit`, `exit`, `\q`, `\quit`.
    Quit,
    /// `help`, `\?`, `\help`.
    Help,
}

impl Builtin {
    /// Recognizes a builtin from a trimmed line.
    pub fn parse(line: &str) -> Option<Self> {
        match line.to_lowercase().as_str() {
            "quit" | "exit" | "\\q" | "\\quit" => Some(Self::Quit),
            "help" | "\\?" | "\\help" => Some(Self::Help),
            _ => None,
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print this text and read the next command.
    Continue(String),
    /// End the session.
    Exit,
}

/// A session bound to one live connection.
pub struct Repl<T: ActionTarget> {
    target: T,
    translator: Translator,
    session: Session,
}

impl<T: ActionTarget> Repl<T> {
    /// Creates a session on `target`, starting in `database`.
    pub fn new(target: T, database: Option<String>) -> Self {
        let translator = Translator::new(target.backend());
        Self {
            target,
            translator,
            session: Session::new(database),
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the connection this session runs on.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns the primary prompt, e.g. `mygo [shop]> `.
    pub fn prompt(&self) -> String {
        let database = self.session.active_database.as_deref().unwrap_or("(none)");
        format!("mygo [{database}]> ")
    }

    /// Translates and carries out one complete command.
    pub async fn execute(&mut self, command: &str) -> Result<Step> {
        match self.translator.translate(command)? {
            TranslationOutcome::Query(query) => {
                debug!("Executing: {}", query);
                let result = self.target.execute(&query).await?;

                if self.target.backend() == DatabaseBackend::MySql {
                    if let Some(database) = native_use_target(command) {
                        self.session.active_database = Some(database.clone());
                        return Ok(Step::Continue(format!(
                            "Database changed to '{database}'\n"
                        )));
                    }
                }

                Ok(Step::Continue(
                    ResultTable::new(&result).render(self.session.expanded),
                ))
            }
            TranslationOutcome::Special(action) => {
                let output = dispatch::dispatch(&action, &mut self.session, &mut self.target).await?;
                Ok(match output {
                    DispatchOutput::Rows { title, result } => {
                        let mut text = title.map(|t| format!("{t}\n")).unwrap_or_default();
                        text.push_str(&ResultTable::new(&result).render(self.session.expanded));
                        Step::Continue(text)
                    }
                    DispatchOutput::Message(message) => Step::Continue(format!("{message}\n")),
                    DispatchOutput::Help(text) => Step::Continue(format!("{text}\n")),
                    DispatchOutput::Exit => Step::Exit,
                })
            }
        }
    }

    /// Feeds one raw input line through builtins, accumulation and execution.
    ///
    /// Returns `None` while a command is still incomplete.
    pub async fn feed(&mut self, buffer: &mut LineBuffer, line: &str) -> Option<Result<Step>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match Builtin::parse(line) {
            Some(Builtin::Quit) => return Some(Ok(Step::Exit)),
            Some(Builtin::Help) => return Some(Ok(Step::Continue(format!("{HELP_TEXT}\n")))),
            None => {}
        }

        let command = buffer.push(line)?;
        Some(self.execute(&command).await)
    }

    /// Runs the interactive loop until quit or end of input.
    pub async fn run_interactive(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()
            .map_err(|e| MygoError::internal(format!("Could not start line editor: {e}")))?;

        let history = history_path();
        if let Some(ref path) = history {
            let _ = editor.load_history(path);
        }

        let mut buffer = LineBuffer::new();

        loop {
            let prompt = if buffer.is_pending() {
                CONTINUATION_PROMPT.to_string()
            } else {
                self.prompt()
            };

            match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.trim());
                    }
                    match self.feed(&mut buffer, &line).await {
                        None => {}
                        Some(Ok(Step::Continue(text))) => print!("{text}"),
                        Some(Ok(Step::Exit)) => {
                            println!("{GOODBYE}");
                            break;
                        }
                        Some(Err(e)) => eprintln!("{}", error_line(&e)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if buffer.is_pending() {
                        buffer.clear();
                        println!();
                    }
                }
                Err(ReadlineError::Eof) => {
                    println!("\n{GOODBYE}");
                    break;
                }
                Err(e) => {
                    warn!("Line editor failed: {}", e);
                    return Err(MygoError::internal(format!("Line editor failed: {e}")));
                }
            }
        }

        if let Some(ref path) = history {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Err(e) = editor.save_history(path) {
                warn!("Could not save history to {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    /// Carries out one complete command, builtins included.
    pub async fn execute_line(&mut self, command: &str) -> Result<Step> {
        let command = command.trim();
        match Builtin::parse(command) {
            Some(Builtin::Quit) => Ok(Step::Exit),
            Some(Builtin::Help) => Ok(Step::Continue(format!("{HELP_TEXT}\n"))),
            None => self.execute(command).await,
        }
    }

    /// Runs a single command non-interactively.
    pub async fn run_once(&mut self, command: &str) -> Result<()> {
        match self.execute_line(command).await? {
            Step::Continue(text) => print!("{text}"),
            Step::Exit => {}
        }
        Ok(())
    }
}

/// Formats an error the way the session reports it.
pub fn error_line(error: &MygoError) -> String {
    match error {
        MygoError::Query(message) if message.starts_with("ERROR") => message.clone(),
        MygoError::Query(message) => format!("ERROR: {message}"),
        other => format!("ERROR: {other}"),
    }
}

/// Returns the database named by a MySQL `USE` statement.
fn native_use_target(command: &str) -> Option<String> {
    let mut tokens = command.trim().trim_end_matches(TERMINATOR).split_whitespace();
    let keyword = tokens.next()?;
    let database = tokens.next()?;
    if !keyword.eq_ignore_ascii_case("use") || tokens.next().is_some() {
        return None;
    }
    Some(database.trim_matches('`').to_string())
}

/// Location of the persistent line history.
pub fn history_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join("mygo").join("history"))
}
