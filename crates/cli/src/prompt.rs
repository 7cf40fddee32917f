// FILE: crates/cli/src/prompt.rs

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Line-oriented question/answer over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `label`, reads one line and returns it without its line terminator
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input ended before '{}' was answered", label);
        }

        Ok(strip_line_ending(&line).to_string())
    }

    /// Writer used for command output
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

/// Removes one trailing `\n` or `\r\n`, keeping every other character
pub fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}
