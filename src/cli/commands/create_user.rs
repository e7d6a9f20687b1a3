//! User account command handlers

use crate::config::Config;
use crate::services::Registration;
use crate::state::SharedState;

pub async fn cmd_create_user(config: Config, registration: Registration) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let user = shared
        .auth_service
        .register(registration)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {e}"))?;

    println!("✓ Created user {} (id {})", user.email, user.id);
    if user.is_superuser {
        println!("  Role: superuser");
    } else if user.is_staff {
        println!("  Role: staff");
    }

    Ok(())
}

pub async fn cmd_set_active(config: Config, email: &str, active: bool) -> anyhow::Result<()> {
    let shared = SharedState::new(config).await?;

    let user = shared
        .auth_service
        .set_active(email, active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update {email}: {e}"))?;

    let state = if user.is_active { "active" } else { "inactive" };
    println!("✓ {} is now {state}", user.email);

    Ok(())
}
