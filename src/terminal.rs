use std::io::{self, BufRead, Write};

use crate::theme::Theme;

/// The user-facing side of plan execution.
pub trait Terminal {
    /// Shows `prompt` and blocks for one line. The line ending is removed,
    /// nothing else is touched.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Prints the command about to run.
    fn echo_command(&mut self, command: &str) -> io::Result<()>;
}

pub struct Console<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(theme: Theme) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), theme)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self { input, output, theme }
    }

    pub fn done(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.theme.success.apply("✅ Done!"))
    }

    pub fn report_malformed_plan(&mut self, raw: &str) -> io::Result<()> {
        writeln!(
            self.output,
            "{}",
            self.theme.warning.apply("Failed to parse JSON from LLM. Response was:")
        )?;
        writeln!(self.output, "{}", raw)
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        let separator = if prompt.ends_with(':') || prompt.ends_with('?') { " " } else { ": " };
        write!(self.output, "{}{}", self.theme.prompt.apply(prompt), separator)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }

        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(answer.to_string())
    }

    fn echo_command(&mut self, command: &str) -> io::Result<()> {
        writeln!(self.output, "$ {}", self.theme.command.apply(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Theme::monochrome())
    }

    #[test]
    fn test_ask_reads_one_line() {
        let mut console = console("fix bug\r\nleftover\n");
        assert_eq!(console.ask("Enter commit message:").unwrap(), "fix bug");

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "Enter commit message: ");
    }

    #[test]
    fn test_ask_accepts_empty_answer() {
        let mut console = console("\n");
        assert_eq!(console.ask("Branch name").unwrap(), "");
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Branch name: ");
    }

    #[test]
    fn test_ask_on_closed_input() {
        let mut console = console("");
        let err = console.ask("Branch name").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_echo_and_markers() {
        let mut console = console("");
        console.echo_command("git checkout -b feature-x").unwrap();
        console.done().unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "$ git checkout -b feature-x\n✅ Done!\n");
    }

    #[test]
    fn test_malformed_plan_report() {
        let mut console = console("");
        console.report_malformed_plan("Sure! First, run git status.").unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(
            output,
            "Failed to parse JSON from LLM. Response was:\nSure! First, run git status.\n"
        );
    }
}
