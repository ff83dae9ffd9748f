//! Console command capability
//!
//! Commands receive structured input and write to a captured output buffer.

use std::collections::BTreeMap;

/// Process-style exit status returned by a command
pub type ExitStatus = i32;

/// Successful exit status
pub const SUCCESS: ExitStatus = 0;

/// Console command trait
///
/// The host's console application runs commands; sprinkles only declare them.
pub trait Command: Send {
    /// Command name as typed on the console (e.g. `cache:clear`)
    fn name(&self) -> &str;

    /// One-line description shown in command listings
    fn description(&self) -> &str {
        ""
    }

    /// Run the command
    fn execute(
        &mut self,
        input: &CommandInput,
        output: &mut CommandOutput,
    ) -> anyhow::Result<ExitStatus>;
}

/// Parsed command input: positional arguments and named options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandInput {
    arguments: Vec<String>,
    options: BTreeMap<String, String>,
}

impl CommandInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse console-style arguments
    ///
    /// `--name=value` sets an option, a bare `--flag` sets it to `"true"`,
    /// anything after `--` is positional.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = Self::new();
        let mut positional_only = false;
        for arg in args {
            let arg = arg.into();
            if positional_only {
                input.arguments.push(arg);
                continue;
            }
            if arg == "--" {
                positional_only = true;
                continue;
            }
            match arg.strip_prefix("--") {
                Some(option) => match option.split_once('=') {
                    Some((key, value)) => {
                        input.options.insert(key.to_string(), value.to_string());
                    }
                    None => {
                        input.options.insert(option.to_string(), "true".to_string());
                    }
                },
                None => input.arguments.push(arg),
            }
        }
        input
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn with_flag(self, name: impl Into<String>) -> Self {
        self.with_option(name, "true")
    }

    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// True if the option is present and not `"false"`
    pub fn flag(&self, name: &str) -> bool {
        self.option(name).map_or(false, |v| v != "false")
    }
}

/// Captured command output
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    lines: Vec<String>,
    errors: Vec<String>,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writeln(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn error(&mut self, line: impl Into<String>) {
        self.errors.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Standard output joined with newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
