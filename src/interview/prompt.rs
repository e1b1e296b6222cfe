//! Line-oriented terminal prompts
//!
//! Generic over `BufRead` / `Write` so interviews can be driven from a
//! script in tests.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::error::ScaffoldError;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until `validate` accepts the answer.
    ///
    /// An empty answer is replaced by `default` when one is given. EOF
    /// aborts the interview with [`ScaffoldError::Aborted`].
    pub fn ask<T, F>(&mut self, question: &str, default: Option<&str>, validate: F) -> Result<T>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        loop {
            let answer = self.read_answer(&render_question(question, default))?;
            let answer = match default {
                Some(default) if answer.is_empty() => default.to_string(),
                _ => answer,
            };

            match validate(&answer) {
                Ok(value) => return Ok(value),
                Err(message) => writeln!(self.output, "error: {message}")?,
            }
        }
    }

    /// Ask once and return the trimmed answer without validation
    pub fn read_answer(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from terminal")?;
        if read == 0 {
            writeln!(self.output)?;
            return Err(ScaffoldError::Aborted.into());
        }

        Ok(line.trim().to_string())
    }

    /// Print a line of interview output
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    pub fn warn(&mut self, message: impl AsRef<str>) -> Result<()> {
        self.say(format!("warning: {}", message.as_ref()))
    }
}

fn render_question(question: &str, default: Option<&str>) -> String {
    match default {
        Some(default) if !default.is_empty() => format!("{question} [{default}]"),
        _ => question.to_string(),
    }
}
