//! Journal prompts and the providers that choose among them.

use colored::Colorize;
use inquire::error::InquireError;
use inquire::Text;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{JournalError, Result};

/// The canned prompts offered for every new entry, in menu order.
pub const JOURNAL_PROMPTS: [&str; 10] = [
    "What went well today?",
    "What could have gone better?",
    "What am I grateful for today?",
    "What did I learn today?",
    "What's one thing I want to focus on tomorrow?",
    "What was the best part of my day?",
    "What challenged me today?",
    "How did I take care of myself today?",
    "What's something I accomplished today?",
    "What's something I'm looking forward to?",
];

/// Maximum number of prompts in one entry
pub const MAX_SELECTIONS: usize = 3;

/// Input that ends selection early
pub const DONE_SENTINEL: &str = "done";

/// Chooses which prompts go into today's entry.
pub trait PromptProvider {
    /// Return between zero and [`MAX_SELECTIONS`] prompt texts, in order.
    fn select(&mut self, prompts: &[&str]) -> Result<Vec<String>>;
}

/// Interpretation of one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Done,
    Prompt(String),
    Empty,
}

/// Interpret a single answer against the prompt list.
///
/// Numbers in `1..=prompts.len()` pick a canned prompt; anything else that is
/// not blank, out-of-range numbers included, is taken as free text.
pub fn resolve_selection(input: &str, prompts: &[&str]) -> Selection {
    let input = input.trim();

    if input.eq_ignore_ascii_case(DONE_SENTINEL) {
        return Selection::Done;
    }
    if input.is_empty() {
        return Selection::Empty;
    }

    if input.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = input.parse::<usize>() {
            if (1..=prompts.len()).contains(&n) {
                return Selection::Prompt(prompts[n - 1].to_string());
            }
        }
    }

    Selection::Prompt(input.to_string())
}

/// Drive the selection loop.
///
/// `next_answer` is called with the 1-based slot number and returns `None`
/// when input is exhausted. Blank answers are asked again for the same slot.
pub fn collect_selections<F>(prompts: &[&str], mut next_answer: F) -> Result<Vec<String>>
where
    F: FnMut(usize) -> Result<Option<String>>,
{
    let mut selected = Vec::new();

    while selected.len() < MAX_SELECTIONS {
        let Some(answer) = next_answer(selected.len() + 1)? else {
            break;
        };

        match resolve_selection(&answer, prompts) {
            Selection::Done => break,
            Selection::Prompt(prompt) => selected.push(prompt),
            Selection::Empty => continue,
        }
    }

    Ok(selected)
}

/// Write the numbered prompt menu and instructions.
pub fn write_menu<W: Write>(out: &mut W, prompts: &[&str]) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "===== Journal Entry Prompts =====".cyan().bold())?;
    writeln!(out, "You can choose from the following prompts or enter your own:")?;
    for (i, prompt) in prompts.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, prompt)?;
    }
    writeln!(out)?;
    writeln!(out, "Enter up to {MAX_SELECTIONS} prompt numbers or type your own prompts.")?;
    writeln!(out, "Enter '{DONE_SENTINEL}' when finished.")?;
    Ok(())
}

fn slot_label(slot: usize) -> String {
    format!("Prompt {slot} (or '{DONE_SENTINEL}' to finish):")
}

/// Interactive terminal prompts.
///
/// Cancelling a prompt (Esc or Ctrl-C) ends selection like typing `done`.
pub struct InquirePrompter;

impl PromptProvider for InquirePrompter {
    fn select(&mut self, prompts: &[&str]) -> Result<Vec<String>> {
        write_menu(&mut std::io::stdout(), prompts)?;

        collect_selections(prompts, |slot| {
            match Text::new(&slot_label(slot))
                .with_help_message("A number from the list, your own prompt, or 'done'")
                .prompt()
            {
                Ok(answer) => Ok(Some(answer)),
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    Ok(None)
                }
                Err(e) => Err(JournalError::Prompt(e.to_string())),
            }
        })
    }
}

/// Line-oriented prompts over arbitrary reader/writer pairs.
///
/// Used for piped stdin where a terminal UI is unavailable.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> PromptProvider for LinePrompter<R, W> {
    fn select(&mut self, prompts: &[&str]) -> Result<Vec<String>> {
        write_menu(&mut self.output, prompts)?;

        let Self { input, output } = self;
        collect_selections(prompts, |slot| {
            write!(output, "{} ", slot_label(slot))?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line))
        })
    }
}

/// Answers supplied up front, e.g. from `--prompt` flags.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    calls: usize,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            calls: 0,
        }
    }

    /// How many times [`PromptProvider::select`] has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl PromptProvider for ScriptedPrompter {
    fn select(&mut self, prompts: &[&str]) -> Result<Vec<String>> {
        self.calls += 1;
        let answers = &mut self.answers;
        collect_selections(prompts, |_| Ok(answers.pop_front()))
    }
}
