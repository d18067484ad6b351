use anyhow::Result;
use clap::Args;
use contracts::system::auth::{ChangePasswordRequest, LoginRequest};

use super::AppContext;
use crate::system::auth::{api, Session};

#[derive(Args, Debug)]
pub struct Login {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Login {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = LoginRequest {
            username: self.username,
            password: self.password,
        };
        let session = api::login(&ctx.auth, &request).await?;
        session.save(&ctx.session_file)?;
        println!("Welcome, {}!", session.username);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Register {
    #[arg(short, long)]
    pub username: String,
    #[arg(short, long, env = "CONSOLE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Register {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = LoginRequest {
            username: self.username,
            password: self.password,
        };
        let session = api::register(&ctx.auth, &request).await?;
        session.save(&ctx.session_file)?;
        println!("Registered and signed in as {}", session.username);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Logout {}

impl Logout {
    pub fn run(self, ctx: &AppContext) -> Result<()> {
        Session::clear(&ctx.session_file)?;
        println!("Signed out");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ChangePassword {
    #[arg(short, long)]
    pub username: String,
    #[arg(long)]
    pub current: String,
    #[arg(long)]
    pub new: String,
}

impl ChangePassword {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let request = ChangePasswordRequest {
            username: self.username,
            current_password: self.current,
            new_password: self.new,
        };
        api::change_password(&ctx.auth, &request).await?;
        println!("Password changed");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Users {}

impl Users {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        for user in api::login_ids(&ctx.gateway).await? {
            println!("{:>6}  {}", user.id, user.username);
        }
        Ok(())
    }
}
