//! Interactive loop mapping typed input to presenter commands.
//!
//! This is the only place terminal input is turned into `Command` values.

use std::io::{BufRead, Write};
use taskboard_core::{Command, DispatchOutcome, Presenter, SlotStorage, TaskId, TaskStore};

use crate::terminal::TerminalUi;

const CANCEL_INPUT: &str = ":cancel";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// `add` with optional inline `title | description`.
    Add(Option<(String, String)>),
    Toggle(String),
    Edit(String),
    Delete(String),
    List,
    Help,
    Quit,
    Empty,
    MissingReference(&'static str),
    Unknown(String),
}

pub fn parse_line(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let with_reference = |name: &'static str, build: fn(String) -> Input| {
        if rest.is_empty() {
            Input::MissingReference(name)
        } else {
            build(rest.to_string())
        }
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" | "a" => Input::Add(rest.split_once('|').map(|(title, description)| {
            (title.trim().to_string(), description.trim().to_string())
        })),
        "toggle" | "done" | "t" => with_reference("toggle", Input::Toggle),
        "edit" | "e" => with_reference("edit", Input::Edit),
        "delete" | "rm" | "d" => with_reference("delete", Input::Delete),
        "list" | "ls" => Input::List,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

pub struct Repl<S: SlotStorage, R: BufRead, W: Write> {
    store: TaskStore<S>,
    presenter: Presenter<TerminalUi<R, W>>,
}

impl<S: SlotStorage, R: BufRead, W: Write> Repl<S, R, W> {
    pub fn new(store: TaskStore<S>, presenter: Presenter<TerminalUi<R, W>>) -> Self {
        Self { store, presenter }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn into_parts(self) -> (TaskStore<S>, Presenter<TerminalUi<R, W>>) {
        (self.store, self.presenter)
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) {
        self.presenter.render(&self.store);
        self.ui().info("Type `help` for commands.");

        while let Some(line) = self.ui().prompt("> ") {
            match parse_line(&line) {
                Input::Quit => break,
                Input::Empty => {}
                Input::Help => self.help(),
                Input::List => {
                    self.dispatch(Command::Refresh);
                }
                Input::Add(inline) => self.add(inline),
                Input::Toggle(reference) => {
                    if let Some(id) = self.resolve(&reference) {
                        self.dispatch(Command::Toggle(id));
                    }
                }
                Input::Edit(reference) => {
                    if let Some(id) = self.resolve(&reference) {
                        self.edit(id);
                    }
                }
                Input::Delete(reference) => {
                    if let Some(id) = self.resolve(&reference) {
                        self.dispatch(Command::Delete(id));
                    }
                }
                Input::MissingReference(verb) => self
                    .ui()
                    .info(&format!("usage: {verb} <number|id>")),
                Input::Unknown(verb) => self
                    .ui()
                    .info(&format!("unknown command `{verb}`, type `help`")),
            }
        }
    }

    fn add(&mut self, inline: Option<(String, String)>) {
        let (title, description) = match inline {
            Some(values) => values,
            None => {
                let Some(title) = self.ui().prompt("Title: ") else {
                    return;
                };
                let Some(description) = self.ui().prompt("Description: ") else {
                    return;
                };
                (title, description)
            }
        };
        self.dispatch(Command::Add { title, description });
    }

    /// Keeps edit mode open until a valid save or an explicit cancel.
    fn edit(&mut self, id: TaskId) {
        if self.dispatch(Command::BeginEdit(id.clone())) != DispatchOutcome::Applied {
            return;
        }
        self.ui()
            .info(&format!("Enter new values, or `{CANCEL_INPUT}` to discard."));

        loop {
            let Some(title) = self.prompt_or_cancel("New title: ") else {
                self.dispatch(Command::CancelEdit);
                return;
            };
            let Some(description) = self.prompt_or_cancel("New description: ") else {
                self.dispatch(Command::CancelEdit);
                return;
            };
            let outcome = self.dispatch(Command::SaveEdit {
                id: id.clone(),
                title,
                description,
            });
            if !matches!(outcome, DispatchOutcome::Rejected(_)) {
                return;
            }
        }
    }

    fn prompt_or_cancel(&mut self, label: &str) -> Option<String> {
        self.ui()
            .prompt(label)
            .filter(|value| value.trim() != CANCEL_INPUT)
    }

    fn resolve(&mut self, reference: &str) -> Option<TaskId> {
        let resolved = self.presenter.ui().resolve(reference);
        if resolved.is_none() {
            self.ui().info(&format!("no task matches `{reference}`"));
        }
        resolved
    }

    fn dispatch(&mut self, command: Command) -> DispatchOutcome {
        self.presenter.dispatch(&mut self.store, command)
    }

    fn ui(&mut self) -> &mut TerminalUi<R, W> {
        self.presenter.ui_mut()
    }

    fn help(&mut self) {
        let ui = self.ui();
        ui.info("Commands:");
        ui.info("  add [title | description]   Add a task (prompts when no inline values)");
        ui.info("  toggle <number|id>          Mark complete / pending");
        ui.info("  edit <number|id>            Edit title and description");
        ui.info("  delete <number|id>          Delete after confirmation");
        ui.info("  list                        Show the board");
        ui.info("  help                        Show commands");
        ui.info("  quit                        Exit");
    }
}
