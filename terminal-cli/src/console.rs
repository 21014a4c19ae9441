use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crossterm::style::{style, Stylize};
use fairdice_execution::{Console, Tone};

/// Line-oriented console over a reader and a writer.
///
/// A failed write is held and returned by the next `read_line` or by
/// [`StdConsole::finish`].
pub struct StdConsole<R, W> {
    input: R,
    output: W,
    color: bool,
    write_error: Option<io::Error>,
}

impl StdConsole<StdinLock<'static>, Stdout> {
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), color)
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
            write_error: None,
        }
    }

    /// Flush the output and report any write error held since the last read.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        self.output.flush()
    }

    fn paint(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        if !self.color {
            return write!(self.output, "{text}");
        }
        match tone {
            Tone::Plain => write!(self.output, "{text}"),
            Tone::Info => write!(self.output, "{}", style(text).yellow()),
            Tone::Success => write!(self.output, "{}", style(text).green()),
            Tone::Danger => write!(self.output, "{}", style(text).red()),
            Tone::Prompt => write!(self.output, "{}", style(text).cyan()),
        }
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn emit(&mut self, tone: Tone, text: &str) {
        if let Err(err) = self.paint(tone, text).and_then(|_| writeln!(self.output)) {
            self.write_error.get_or_insert(err);
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if let Some(err) = self.write_error.take() {
            return Err(err);
        }
        self.paint(Tone::Prompt, prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
