//! Ad-hoc shell command execution.

use anyhow::Result;
use clap::Args;

use crate::commands::{decorate, Ctx};
use crate::output::print_response;

#[derive(Args)]
pub struct CmdArgs {
    /// Shell command to run; multiple words are joined with spaces.
    #[arg(required = true)]
    pub command: Vec<String>,
}

impl CmdArgs {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        let command = self.command.join(" ");
        let target = ctx.target.clone();
        let response = ctx
            .client
            .run_shell(&target, &command)
            .await
            .map_err(|e| decorate(e, ctx.json))?;
        print_response(&response, ctx.json);
        Ok(())
    }
}
