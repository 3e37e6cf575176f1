//! Interactive input sources for parameter collection

use std::io::{BufRead, Write};

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::error::{ProgenError, ProgenResult};

/// Source of answers for parameter prompts
pub trait Prompter {
    /// Show an informational header (used for parameter groups)
    fn header(&mut self, text: &str) -> ProgenResult<()>;

    /// Ask for a single non-empty value
    fn ask(&mut self, prompt: &str) -> ProgenResult<String>;
}

/// Prompter over arbitrary reader/writer handles
///
/// Used for piped stdin and in tests.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the output handle
    pub fn into_output(self) -> W {
        self.output
    }

    fn write_prompt(&mut self, prompt: &str) -> ProgenResult<()> {
        write!(self.output, "{}: ", prompt)
            .and_then(|_| self.output.flush())
            .map_err(|e| ProgenError::Prompt(format!("Failed to write prompt: {}", e)))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn header(&mut self, text: &str) -> ProgenResult<()> {
        debug!(%text, "LinePrompter::header: called");
        writeln!(self.output, "{}", text).map_err(|e| ProgenError::Prompt(format!("Failed to write header: {}", e)))
    }

    fn ask(&mut self, prompt: &str) -> ProgenResult<String> {
        debug!(%prompt, "LinePrompter::ask: called");
        loop {
            self.write_prompt(prompt)?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| ProgenError::Prompt(format!("Failed to read input: {}", e)))?;
            if read == 0 {
                debug!("LinePrompter::ask: input closed");
                return Err(ProgenError::Prompt(format!("Input closed before answering '{}'", prompt)));
            }

            let answer = line.trim_end_matches(['\n', '\r']);
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            debug!("LinePrompter::ask: empty answer, asking again");
        }
    }
}

/// Prompter for an interactive terminal with line editing
pub struct ReadlinePrompter {
    editor: DefaultEditor,
}

impl ReadlinePrompter {
    pub fn new() -> ProgenResult<Self> {
        let editor =
            DefaultEditor::new().map_err(|e| ProgenError::Prompt(format!("Failed to initialize readline: {}", e)))?;
        Ok(Self { editor })
    }
}

impl Prompter for ReadlinePrompter {
    fn header(&mut self, text: &str) -> ProgenResult<()> {
        println!("{}", text.bright_cyan().bold());
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> ProgenResult<String> {
        debug!(%prompt, "ReadlinePrompter::ask: called");
        loop {
            match self.editor.readline(&format!("{}: ", prompt)) {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => return Ok(line),
                Err(ReadlineError::Interrupted) => return Err(ProgenError::Prompt("Interrupted".to_string())),
                Err(ReadlineError::Eof) => {
                    return Err(ProgenError::Prompt(format!("Input closed before answering '{}'", prompt)));
                }
                Err(e) => return Err(ProgenError::Prompt(format!("Readline error: {}", e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompter_reads_answers_in_order() {
        let mut prompter = LinePrompter::new(Cursor::new("first\r\nsecond\n"), Vec::new());
        assert_eq!(prompter.ask("One?").unwrap(), "first");
        assert_eq!(prompter.ask("Two?").unwrap(), "second");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output, "One?: Two?: ");
    }

    #[test]
    fn test_line_prompter_reprompts_on_empty_answer() {
        let mut prompter = LinePrompter::new(Cursor::new("\n\nvalue\n"), Vec::new());
        assert_eq!(prompter.ask("Name?").unwrap(), "value");

        let output = String::from_utf8(prompter.into_output()).unwrap();
        assert_eq!(output.matches("Name?: ").count(), 3);
    }

    #[test]
    fn test_line_prompter_keeps_surrounding_spaces() {
        let mut prompter = LinePrompter::new(Cursor::new("  padded  \n"), Vec::new());
        assert_eq!(prompter.ask("X").unwrap(), "  padded  ");
    }

    #[test]
    fn test_line_prompter_eof_is_error() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        assert!(matches!(prompter.ask("Name?"), Err(ProgenError::Prompt(_))));
    }

    #[test]
    fn test_line_prompter_header() {
        let mut prompter = LinePrompter::new(Cursor::new(""), Vec::new());
        prompter.header("Author details").unwrap();
        assert_eq!(String::from_utf8(prompter.into_output()).unwrap(), "Author details\n");
    }
}
