//! Console commands contributed by sprinkles

pub mod console;
pub mod registry;
pub mod tester;

pub use console::{Command, CommandInput, CommandOutput, ExitStatus, SUCCESS};
pub use registry::{CommandRegistry, COMMAND_CAPABILITY};
pub use tester::CommandTester;
