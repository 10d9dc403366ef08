//! Bootstrap login: discover the master endpoint from the infrastructure
//! stack and persist it for every later invocation.

use anyhow::Result;
use clap::Args;
use fleet_gateway::stack::PulumiWorkspace;
use fleet_gateway::{login, LoginOptions};

use crate::cli::GlobalOptions;

#[derive(Args)]
pub struct LoginArgs {
    /// Stack to select; defaults to the workspace's current stack.
    #[arg(long)]
    pub stack: Option<String>,

    /// Persist the discovered endpoint without authenticating or
    /// probing minion reachability.
    #[arg(long)]
    pub skip_verify: bool,
}

impl LoginArgs {
    pub async fn run(self, global: &GlobalOptions) -> Result<()> {
        let mut workspace = PulumiWorkspace::new(std::env::current_dir()?);
        let options = LoginOptions {
            stack: self.stack,
            verify: !self.skip_verify,
        };

        let outcome = login(&mut workspace, &options).await?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&outcome.config)?);
            return Ok(());
        }

        println!("bastion host: {}", outcome.config.bastion_ip);
        println!("master API:   {}", outcome.config.api_url);
        println!("stack:        {}", outcome.config.stack_name);
        if let Some(online) = outcome.minions_online {
            println!("minions:      {online} online");
        }

        match outcome.persisted_to {
            Some(path) => println!("saved to {}", path.display()),
            None => {
                // Persistence failed; hand the operator the values so
                // the session still works.
                println!("configuration could not be saved; export it instead:");
                println!("  export FLEET_API_URL={}", outcome.config.api_url);
                println!("  export FLEET_USERNAME={}", outcome.config.username);
                println!("  export FLEET_PASSWORD={}", outcome.config.password);
            }
        }
        Ok(())
    }
}
