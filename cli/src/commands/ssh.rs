//! SSH key management on minions.

use anyhow::Result;
use clap::Subcommand;

use crate::commands::{dispatch_op, Ctx};

#[derive(Subcommand)]
pub enum SshCommand {
    /// Generate an SSH key pair for a user.
    Keygen {
        user: String,
        /// Key type, e.g. rsa or ed25519.
        #[arg(default_value = "ed25519")]
        key_type: String,
    },
    /// List authorized keys for a user.
    Authkeys { user: String },
    /// Add an authorized key for a user.
    Setkey { user: String, key: String },
}

impl SshCommand {
    pub async fn run(self, ctx: &mut Ctx) -> Result<()> {
        match self {
            Self::Keygen { user, key_type } => {
                dispatch_op(ctx, "ssh.keygen", vec![user, key_type]).await
            }
            Self::Authkeys { user } => dispatch_op(ctx, "ssh.authkeys", vec![user]).await,
            Self::Setkey { user, key } => dispatch_op(ctx, "ssh.setkey", vec![user, key]).await,
        }
    }
}
