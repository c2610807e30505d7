use crate::history::CommandHistory;

/// Channel a line of output was written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

/// Ordered output produced by commands.
///
/// Commands never write to the terminal themselves; the front end drains
/// this buffer after each line and renders it.
#[derive(Clone, Debug, Default)]
pub struct ShellOutput {
    lines: Vec<OutputLine>,
}

impl ShellOutput {
    pub fn write(&mut self, kind: OutputKind, text: impl Into<String>) {
        self.lines.push(OutputLine {
            kind,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.write(OutputKind::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.write(OutputKind::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.write(OutputKind::Error, text);
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    /// Text of every line, regardless of channel.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// Removes and returns everything written so far.
    pub fn drain(&mut self) -> Vec<OutputLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Session-wide state owned by the shell rather than the program.
#[derive(Debug, Default)]
pub struct ShellState {
    pub history: CommandHistory,
    pub output: ShellOutput,
    exit_requested: bool,
}

impl ShellState {
    pub fn new(history: CommandHistory) -> Self {
        Self {
            history,
            output: ShellOutput::default(),
            exit_requested: false,
        }
    }

    /// Asks the front end to leave its input loop after the current line.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}
