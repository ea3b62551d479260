//! Startup seeding of the administrator account.

use eventhub_core::roles::ROLE_ADMIN;
use eventhub_db::models::user::CreateUser;
use eventhub_db::repositories::UserRepo;
use eventhub_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless a user with that username
/// already exists. An existing account is left untouched.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<()> {
    if let Some(existing) = UserRepo::find_by_username(pool, &admin.username).await? {
        tracing::debug!(user_id = existing.user_id, "Admin account already present");
        return Ok(());
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.user_id, username = %user.username, "Seeded admin account");
    Ok(())
}
