use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use contracts::domain::a005_portal_login::PortalLogin;

use super::AppContext;
use crate::domain::{a001_company, a002_courier, a003_design, a004_portal, a005_portal_login};
use crate::shared::gateway::Gateway;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasterKind {
    Company,
    Courier,
    Design,
    Portal,
}

impl MasterKind {
    async fn list(self, gateway: &Gateway) -> Result<Vec<String>> {
        Ok(match self {
            MasterKind::Company => a001_company::service::list_names(gateway).await?,
            MasterKind::Courier => a002_courier::service::list_names(gateway).await?,
            MasterKind::Design => a003_design::service::list_names(gateway).await?,
            MasterKind::Portal => a004_portal::service::list_names(gateway).await?,
        })
    }

    async fn add(self, gateway: &Gateway, name: &str) -> Result<()> {
        match self {
            MasterKind::Company => a001_company::service::add(gateway, name).await?,
            MasterKind::Courier => a002_courier::service::add(gateway, name).await?,
            MasterKind::Design => a003_design::service::add(gateway, name).await?,
            MasterKind::Portal => a004_portal::service::add(gateway, name).await?,
        }
        Ok(())
    }

    async fn remove(self, gateway: &Gateway, name: &str) -> Result<()> {
        match self {
            MasterKind::Company => a001_company::service::remove(gateway, name).await?,
            MasterKind::Courier => a002_courier::service::remove(gateway, name).await?,
            MasterKind::Design => a003_design::service::remove(gateway, name).await?,
            MasterKind::Portal => a004_portal::service::remove(gateway, name).await?,
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Masters {
    /// List names, sorted
    List(ListMaster),
    /// Add a name
    Add(EditMaster),
    /// Delete a name
    Remove(EditMaster),
}

impl Masters {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Masters::List(cmd) => {
                for name in cmd.kind.list(&ctx.gateway).await? {
                    println!("{}", name);
                }
                Ok(())
            }
            Masters::Add(cmd) => {
                cmd.kind.add(&ctx.gateway, &cmd.name).await?;
                println!("Added {:?} {}", cmd.kind, cmd.name.trim());
                Ok(())
            }
            Masters::Remove(cmd) => {
                cmd.kind.remove(&ctx.gateway, &cmd.name).await?;
                println!("Deleted {:?} {}", cmd.kind, cmd.name);
                Ok(())
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct ListMaster {
    #[arg(value_enum)]
    pub kind: MasterKind,
}

#[derive(Args, Debug)]
pub struct EditMaster {
    #[arg(value_enum)]
    pub kind: MasterKind,
    pub name: String,
}

#[derive(Subcommand, Debug)]
pub enum PortalLogins {
    List,
    /// Create, or update when `--id` is given
    Save(SavePortalLogin),
    Remove {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct SavePortalLogin {
    #[arg(long)]
    pub id: Option<i64>,
    #[arg(short, long)]
    pub company: String,
    #[arg(short, long)]
    pub portal: String,
    #[arg(short, long)]
    pub login_id: String,
}

impl PortalLogins {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            PortalLogins::List => {
                for login in a005_portal_login::service::list(&ctx.gateway).await? {
                    println!(
                        "{:>6}  {} / {}: {}",
                        login.id.map(|id| id.to_string()).unwrap_or_default(),
                        login.company,
                        login.portal,
                        login.login_id
                    );
                }
            }
            PortalLogins::Save(cmd) => {
                let mut login = PortalLogin::new(cmd.company, cmd.portal, cmd.login_id);
                login.id = cmd.id;
                a005_portal_login::service::save(&ctx.gateway, &login).await?;
                println!("Saved");
            }
            PortalLogins::Remove { id } => {
                a005_portal_login::service::remove(&ctx.gateway, id).await?;
                println!("Deleted");
            }
        }
        Ok(())
    }
}
