//! Line-oriented terminal implementation of `TaskUi`.
//!
//! # Responsibility
//! - Print rendered boards, notices and prompts.
//! - Read confirmation answers and prompted input lines.
//! - Remember the last board so card numbers can be resolved.

use std::io::{BufRead, Write};
use taskboard_core::{BoardView, CardMode, Notice, TaskCard, TaskId, TaskUi};

pub struct TerminalUi<R: BufRead, W: Write> {
    input: R,
    output: W,
    last_board: Option<BoardView>,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            last_board: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints `label` and reads one line; `None` on end of input.
    pub fn prompt(&mut self, label: &str) -> Option<String> {
        let _ = write!(self.output, "{label}");
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    pub fn info(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }

    /// Resolves a 1-based card number or an id (or unique id prefix)
    /// against the last rendered board.
    pub fn resolve(&self, reference: &str) -> Option<TaskId> {
        let board = self.last_board.as_ref()?;
        if let Ok(number) = reference.parse::<usize>() {
            return board
                .cards()
                .nth(number.checked_sub(1)?)
                .map(|card| card.id.clone());
        }

        let mut matches = board
            .cards()
            .filter(|card| card.id.as_str().starts_with(reference));
        let first = matches.next()?;
        if first.id.as_str() == reference || matches.next().is_none() {
            return Some(first.id.clone());
        }
        None
    }

    fn write_card(&mut self, number: usize, card: &TaskCard) {
        let marker = if card.is_completed { "x" } else { " " };
        match &card.mode {
            CardMode::Display => {
                let _ = writeln!(self.output, "  {number:>2}. [{marker}] {}", card.title);
                let _ = writeln!(self.output, "         {}", card.description);
            }
            CardMode::Editing(draft) => {
                let _ = writeln!(self.output, "  {number:>2}. [{marker}] (editing)");
                let _ = writeln!(self.output, "         title: {}", draft.title);
                let _ = writeln!(self.output, "         description: {}", draft.description);
            }
        }
        let mut stamps = card.created_label.clone();
        if let Some(completed) = &card.completed_label {
            stamps.push_str("  ");
            stamps.push_str(completed);
        }
        let _ = writeln!(self.output, "         {stamps}");
    }
}

impl<R: BufRead, W: Write> TaskUi for TerminalUi<R, W> {
    fn render(&mut self, board: &BoardView) {
        let mut number = 0;
        for section in board.sections() {
            let _ = writeln!(self.output, "== {} ==", section.heading());
            if let Some(placeholder) = section.placeholder {
                let _ = writeln!(self.output, "  {placeholder}");
            }
            for card in &section.cards {
                number += 1;
                self.write_card(number, card);
            }
        }
        self.last_board = Some(board.clone());
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        let answer = self.prompt(&format!("{prompt} [y/N] "));
        matches!(
            answer.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        )
    }

    fn notify(&mut self, notice: &Notice) {
        let _ = writeln!(self.output, "! {notice}");
    }
}
