use contracts::domain::a005_portal_login::PortalLogin;

use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::{Gateway, Resource};

impl Resource for PortalLogin {
    const PATH: &'static str = "portal_id";
}

/// Every saved portal login
pub async fn list(gateway: &Gateway) -> ConsoleResult<Vec<PortalLogin>> {
    gateway.list(&[]).await
}

/// Create when `id` is empty, update otherwise
pub async fn save(gateway: &Gateway, login: &PortalLogin) -> ConsoleResult<()> {
    login.validate().map_err(ConsoleError::Validation)?;

    match login.id {
        Some(id) => gateway.update(id, login).await,
        None => gateway.create(login).await.map(|_| ()),
    }
}

pub async fn remove(gateway: &Gateway, id: i64) -> ConsoleResult<()> {
    gateway.delete::<PortalLogin>(id).await
}
