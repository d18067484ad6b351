use contracts::system::auth::{
    ChangePasswordRequest, LoginIdEntry, LoginRequest, RegisterRequest, UserInfo,
};

use super::session::Session;
use crate::shared::api_client::ApiClient;
use crate::shared::error::{ConsoleError, ConsoleResult};
use crate::shared::gateway::Gateway;

/// Auth endpoints live at `<base_url>/auth`
pub fn auth_client(root: &ApiClient) -> ApiClient {
    root.scoped("auth")
}

pub async fn login(auth: &ApiClient, request: &LoginRequest) -> ConsoleResult<Session> {
    validate_credentials(request)?;
    let user: UserInfo = auth.post_json("login", request).await?;
    let session = Session::from_user(user)?;
    tracing::info!("Signed in as {} (id {})", session.username, session.user_id);
    Ok(session)
}

/// Registration signs the new user in
pub async fn register(auth: &ApiClient, request: &RegisterRequest) -> ConsoleResult<Session> {
    validate_credentials(request)?;
    let user: UserInfo = auth.post_json("register", request).await?;
    let session = Session::from_user(user)?;
    tracing::info!("Registered {} (id {})", session.username, session.user_id);
    Ok(session)
}

pub async fn change_password(auth: &ApiClient, request: &ChangePasswordRequest) -> ConsoleResult<()> {
    if request.username.trim().is_empty()
        || request.current_password.is_empty()
        || request.new_password.is_empty()
    {
        return Err(ConsoleError::validation("All fields required"));
    }
    let _: serde_json::Value = auth.post_json("change-password", request).await?;
    tracing::info!("Password changed for {}", request.username);
    Ok(())
}

/// Users known to the backend
pub async fn login_ids(gateway: &Gateway) -> ConsoleResult<Vec<LoginIdEntry>> {
    gateway.list_at("login_id", &[]).await
}

fn validate_credentials(request: &LoginRequest) -> ConsoleResult<()> {
    if request.username.trim().is_empty() || request.password.is_empty() {
        return Err(ConsoleError::validation("Username and password are required"));
    }
    Ok(())
}
