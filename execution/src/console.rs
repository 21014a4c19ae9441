//! Console boundary: everything the game prints or reads goes through [`Console`].
//!
//! Every prompt accepts a numeric selection plus two meta options, `X` (exit)
//! and `?` (help), case-insensitive.

use std::io;

use tracing::debug;

use crate::{GameError, HelpScreen};

/// Prompt shown before every read.
pub const PROMPT: &str = "Your selection: ";

/// How a line should be rendered. Terminals map tones to colors; tests ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Danger,
    Prompt,
}

/// Line-oriented console.
pub trait Console {
    /// Print one line.
    fn emit(&mut self, tone: Tone, text: &str);

    /// Show `prompt` and read one line. `None` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn say(&mut self, text: &str) {
        self.emit(Tone::Plain, text);
    }

    fn info(&mut self, text: &str) {
        self.emit(Tone::Info, text);
    }
}

/// A parsed line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Select(u64),
    Help,
    Exit,
}

impl Command {
    /// Parse player input. Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("x") {
            return Some(Command::Exit);
        }
        if input == "?" {
            return Some(Command::Help);
        }
        input.parse::<u64>().ok().map(Command::Select)
    }
}

/// The text shown before a prompt: heading lines, numbered choices, then the meta options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    heading: Vec<(Tone, String)>,
    choices: Vec<String>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.heading.push((tone, text.into()));
        self
    }

    pub fn choice(mut self, label: impl Into<String>) -> Self {
        self.choices.push(label.into());
        self
    }

    /// Number of numeric choices (valid selections are `0..len`).
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn show(&self, console: &mut dyn Console) {
        for (tone, line) in &self.heading {
            console.emit(*tone, line);
        }
        for (idx, label) in self.choices.iter().enumerate() {
            console.say(&format!("{idx} - {label}"));
        }
        console.say("X - exit");
        console.say("? - help");
    }
}

/// Show `menu` and read until the player picks a valid choice or exits.
///
/// Invalid input prints `invalid` and re-prompts, help prints the help screen
/// and then the same menu again. Returns `Ok(None)` on exit or end of input.
pub fn solicit(
    console: &mut dyn Console,
    menu: &Menu,
    help: &HelpScreen,
    invalid: &str,
) -> Result<Option<u64>, GameError> {
    menu.show(console);
    loop {
        let Some(line) = console.read_line(PROMPT)? else {
            debug!("input exhausted, treating as exit");
            return Ok(None);
        };
        match Command::parse(&line) {
            Some(Command::Exit) => return Ok(None),
            Some(Command::Help) => {
                help.show(console);
                menu.show(console);
            }
            Some(Command::Select(choice)) if choice < menu.len() as u64 => return Ok(Some(choice)),
            _ => console.emit(Tone::Danger, invalid),
        }
    }
}
