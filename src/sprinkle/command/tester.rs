//! Command tester
//!
//! Runs a single command against captured output, for use in tests.

use tracing::debug;

use crate::sprinkle::command::console::{Command, CommandInput, CommandOutput, ExitStatus};
use crate::sprinkle::traits::SprinkleError;

/// Test harness around one command
pub struct CommandTester {
    command: Box<dyn Command>,
    output: CommandOutput,
    status: Option<ExitStatus>,
}

impl CommandTester {
    pub fn new(command: Box<dyn Command>) -> Self {
        Self {
            command,
            output: CommandOutput::new(),
            status: None,
        }
    }

    /// Execute the command with `input`
    ///
    /// Output from a previous run is discarded. An error returned by the
    /// command surfaces as `CommandFailed`.
    pub fn execute(&mut self, input: CommandInput) -> Result<ExitStatus, SprinkleError> {
        self.output = CommandOutput::new();
        self.status = None;

        debug!("Executing command {} with {:?}", self.command.name(), input);
        let status = self
            .command
            .execute(&input, &mut self.output)
            .map_err(|e| SprinkleError::CommandFailed {
                command: self.command.name().to_string(),
                reason: format!("{:#}", e),
            })?;

        self.status = Some(status);
        Ok(status)
    }

    /// Standard output of the last run
    pub fn display(&self) -> String {
        self.output.text()
    }

    pub fn output(&self) -> &CommandOutput {
        &self.output
    }

    /// Exit status of the last successful run
    pub fn status_code(&self) -> Option<ExitStatus> {
        self.status
    }

    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }
}
