use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::shared::api_client::ApiClient;
use crate::shared::config::{self, Config};
use crate::shared::gateway::Gateway;
use crate::system::auth::{api::auth_client, Session};

pub mod account;
pub mod billing;
pub mod masters;
pub mod reports;
pub mod returns;

#[derive(Parser, Debug)]
#[command(name = "console", version = env!("CARGO_PKG_VERSION"), about = "Garment billing and returns console")]
pub struct Cli {
    /// Path to config.toml (defaults to the one next to the executable)
    #[arg(long, env = "CONSOLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login(account::Login),
    /// Create an account and sign in
    Register(account::Register),
    /// Forget the remembered session
    Logout(account::Logout),
    /// Change a password
    #[command(name = "change-password")]
    ChangePassword(account::ChangePassword),
    /// Users known to the backend
    Users(account::Users),

    /// Companies, couriers, designs and portals
    #[command(subcommand)]
    Master(masters::Masters),
    /// Seller logins per company and portal
    #[command(name = "portal-login", subcommand)]
    PortalLogin(masters::PortalLogins),

    #[command(subcommand)]
    Billing(billing::Billing),
    #[command(subcommand)]
    Status(billing::Status),

    #[command(subcommand)]
    Returns(returns::Returns),

    /// Company / portal / design summary for one day
    Summary(reports::Summary),
    /// Daily sales trend with design rankings
    Trend(reports::Trend),
    /// Grouped return report, PDF and share link
    #[command(name = "share-report")]
    ShareReport(reports::ShareReport),
}

impl Command {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Command::Login(cmd) => cmd.run(ctx).await,
            Command::Register(cmd) => cmd.run(ctx).await,
            Command::Logout(cmd) => cmd.run(ctx),
            Command::ChangePassword(cmd) => cmd.run(ctx).await,
            Command::Users(cmd) => cmd.run(ctx).await,
            Command::Master(cmd) => cmd.run(ctx).await,
            Command::PortalLogin(cmd) => cmd.run(ctx).await,
            Command::Billing(cmd) => cmd.run(ctx).await,
            Command::Status(cmd) => cmd.run(ctx).await,
            Command::Returns(cmd) => cmd.run(ctx).await,
            Command::Summary(cmd) => cmd.run(ctx).await,
            Command::Trend(cmd) => cmd.run(ctx).await,
            Command::ShareReport(cmd) => cmd.run(ctx).await,
        }
    }
}

/// Everything a command needs: config, HTTP clients, session location
pub struct AppContext {
    pub config: Config,
    pub gateway: Gateway,
    pub auth: ApiClient,
    pub session_file: PathBuf,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let root = ApiClient::from_config(&config.api)?;
        let gateway = Gateway::new(root.scoped(&config.api.data_path));
        let auth = auth_client(&root);
        let session_file = config::get_session_file(&config);
        Ok(Self {
            config,
            gateway,
            auth,
            session_file,
        })
    }

    /// Signed-in user; commands that stamp or authorize need one
    pub fn session(&self) -> Result<Session> {
        Session::load(&self.session_file)?
            .ok_or_else(|| anyhow!("Not signed in. Run `console login` first."))
    }

    pub fn output_dir(&self) -> PathBuf {
        config::get_output_dir(&self.config)
    }
}
