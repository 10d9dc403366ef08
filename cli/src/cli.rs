//! CLI argument parsing and command dispatch.
//!
//! clap derive tree with env-backed global connection flags. Connection
//! precedence is: explicit flag > environment variable (merged here by
//! clap) > saved gateway configuration > built-in default.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::commands::archive::ArchiveCommand;
use crate::commands::cmd::CmdArgs;
use crate::commands::cron::CronCommand;
use crate::commands::docker::DockerCommand;
use crate::commands::file::FileCommand;
use crate::commands::git::GitCommand;
use crate::commands::grains::GrainsCommand;
use crate::commands::job::JobCommand;
use crate::commands::k8s::K8sCommand;
use crate::commands::keys::KeysCommand;
use crate::commands::login::LoginArgs;
use crate::commands::monitor::MonitorCommand;
use crate::commands::mount::MountCommand;
use crate::commands::network::NetworkCommand;
use crate::commands::pillar::PillarCommand;
use crate::commands::pkg::PkgCommand;
use crate::commands::process::ProcessCommand;
use crate::commands::service::ServiceCommand;
use crate::commands::ssh::SshCommand;
use crate::commands::state::StateCommand;
use crate::commands::system::SystemCommand;
use crate::commands::user::UserCommand;

/// Operator CLI for the fleet configuration-management master.
#[derive(Parser)]
#[command(name = "fleetctl")]
#[command(version)]
#[command(about = "Drive ad-hoc commands and declarative states across fleet minions")]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global options available to all commands.
#[derive(Args, Clone)]
pub struct GlobalOptions {
    /// Master API URL (e.g. http://bastion-ip:8000).
    #[arg(long, env = "FLEET_API_URL", global = true)]
    pub url: Option<String>,

    /// Master API username.
    #[arg(long, env = "FLEET_USERNAME", global = true)]
    pub username: Option<String>,

    /// Master API password.
    #[arg(long, env = "FLEET_PASSWORD", global = true)]
    pub password: Option<String>,

    /// Target minions: glob (web*), comma list, grain query (os:Ubuntu),
    /// or * for all.
    #[arg(short = 't', long, default_value = "*", global = true)]
    pub target: String,

    /// Output raw JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress all logging output (for scripting).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Discover the master endpoint from stack outputs and save it.
    Login(LoginArgs),

    /// Check minion reachability.
    Ping,

    /// List minions that answer a ping-all.
    Minions,

    /// Run a shell command on the targeted minions.
    Cmd(CmdArgs),

    /// Minion grain operations.
    #[command(subcommand)]
    Grains(GrainsCommand),

    /// Apply declarative states.
    #[command(subcommand)]
    State(StateCommand),

    /// Minion key management.
    #[command(subcommand)]
    Keys(KeysCommand),

    /// Package management.
    #[command(subcommand)]
    Pkg(PkgCommand),

    /// Service control.
    #[command(subcommand)]
    Service(ServiceCommand),

    /// Filesystem operations.
    #[command(subcommand)]
    File(FileCommand),

    /// System power, uptime, and resource queries.
    #[command(subcommand)]
    System(SystemCommand),

    /// User accounts.
    #[command(subcommand)]
    User(UserCommand),

    /// Docker containers.
    #[command(subcommand)]
    Docker(DockerCommand),

    /// Cron jobs.
    #[command(subcommand)]
    Cron(CronCommand),

    /// Tar and zip archives.
    #[command(subcommand)]
    Archive(ArchiveCommand),

    /// Mounted filesystems.
    #[command(subcommand)]
    Mount(MountCommand),

    /// SSH key management.
    #[command(subcommand)]
    Ssh(SshCommand),

    /// Git operations.
    #[command(subcommand)]
    Git(GitCommand),

    /// Kubernetes pass-through (kubectl on the targeted minions).
    #[command(subcommand)]
    K8s(K8sCommand),

    /// Pillar data.
    #[command(subcommand)]
    Pillar(PillarCommand),

    /// Master-side job control.
    #[command(subcommand)]
    Job(JobCommand),

    /// Network diagnostics.
    #[command(subcommand)]
    Network(NetworkCommand),

    /// Process control.
    #[command(subcommand)]
    Process(ProcessCommand),

    /// Load, I/O, and status monitoring.
    #[command(subcommand)]
    Monitor(MonitorCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Self { global, command } = self;

        // Login builds its own client from discovered values; everything
        // else shares one resolved context.
        match command {
            Commands::Login(args) => args.run(&global).await,
            command => {
                let mut ctx = commands::Ctx::build(&global)?;
                match command {
                    Commands::Login(_) => unreachable!("handled above"),
                    Commands::Ping => commands::ping::run_ping(&mut ctx).await,
                    Commands::Minions => commands::ping::run_minions(&mut ctx).await,
                    Commands::Cmd(args) => args.run(&mut ctx).await,
                    Commands::Grains(cmd) => cmd.run(&mut ctx).await,
                    Commands::State(cmd) => cmd.run(&mut ctx).await,
                    Commands::Keys(cmd) => cmd.run(&mut ctx).await,
                    Commands::Pkg(cmd) => cmd.run(&mut ctx).await,
                    Commands::Service(cmd) => cmd.run(&mut ctx).await,
                    Commands::File(cmd) => cmd.run(&mut ctx).await,
                    Commands::System(cmd) => cmd.run(&mut ctx).await,
                    Commands::User(cmd) => cmd.run(&mut ctx).await,
                    Commands::Docker(cmd) => cmd.run(&mut ctx).await,
                    Commands::Cron(cmd) => cmd.run(&mut ctx).await,
                    Commands::Archive(cmd) => cmd.run(&mut ctx).await,
                    Commands::Mount(cmd) => cmd.run(&mut ctx).await,
                    Commands::Ssh(cmd) => cmd.run(&mut ctx).await,
                    Commands::Git(cmd) => cmd.run(&mut ctx).await,
                    Commands::K8s(cmd) => cmd.run(&mut ctx).await,
                    Commands::Pillar(cmd) => cmd.run(&mut ctx).await,
                    Commands::Job(cmd) => cmd.run(&mut ctx).await,
                    Commands::Network(cmd) => cmd.run(&mut ctx).await,
                    Commands::Process(cmd) => cmd.run(&mut ctx).await,
                    Commands::Monitor(cmd) => cmd.run(&mut ctx).await,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_target() {
        let cli = Cli::try_parse_from(["fleetctl", "ping", "--target", "web*"]).unwrap();
        assert_eq!(cli.global.target, "web*");
        assert!(matches!(cli.command, Commands::Ping));
    }

    #[test]
    fn test_target_defaults_to_all() {
        let cli = Cli::try_parse_from(["fleetctl", "minions"]).unwrap();
        assert_eq!(cli.global.target, "*");
        assert!(!cli.global.json);
    }
}
