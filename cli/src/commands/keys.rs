//! Minion key inventory and acceptance.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{decorate, Ctx};
use crate::output::print_keys;

#[derive(Subcommand)]
pub enum KeysCommand {
    /// List minion keys grouped by state.
    List,
    /// Accept a pending minion key.
    Accept {
        /// Minion identifier with a pending key.
        minion_id: String,
    },
}

impl KeysCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::List => {
                let inventory = ctx
                    .client
                    .key_list()
                    .await
                    .map_err(|e| decorate(e, ctx.json))?;
                print_keys(&inventory, ctx.json);
            }
            Self::Accept { minion_id } => {
                ctx.client
                    .key_accept(&minion_id)
                    .await
                    .map_err(|e| decorate(e, ctx.json))?;
                if ctx.json {
                    println!("{}", serde_json::json!({"accepted": minion_id}));
                } else {
                    println!("accepted key for {minion_id}");
                }
            }
        }
        Ok(())
    }
}
