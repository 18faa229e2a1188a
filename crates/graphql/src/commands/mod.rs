pub(crate) mod check;

use crate::Cli;
use crate::CommandResult;
use check::CheckCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql")]
pub(crate) enum CommandEnum {
    /// Parse GraphQL documents and report syntax errors.
    Check(Box<CheckCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Check(cmd) => cmd.run(cli).await
        }
    }
}
