use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::entities::sea_orm_active_enums::UserRole;
use crate::repositories::{NewUser, UserRepository};

/// Creates the configured Admin account when it does not exist yet.
///
/// Returns `true` when a user was inserted.
pub async fn initialize_admin_user(db: &DatabaseConnection, config: &Config) -> Result<bool> {
    let (Some(admin_email), Some(admin_password)) =
        (config.admin_email.as_deref(), config.admin_password.as_deref())
    else {
        tracing::info!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(false);
    };

    let user_repo = UserRepository::new(db);
    if user_repo
        .email_exists(admin_email)
        .await
        .context("Failed to check existing admin")?
    {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(false);
    }

    let password_hash = bcrypt::hash(admin_password, config.password_hash_cost)
        .context("Failed to hash admin password")?;

    let admin = user_repo
        .create(NewUser {
            name: "System Administrator".to_string(),
            email: admin_email.to_string(),
            password_hash,
            role: UserRole::Admin,
        })
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("Admin user {} created ({})", admin.id, admin.email);
    tracing::warn!("Please change the bootstrap admin password after first login");
    Ok(true)
}
