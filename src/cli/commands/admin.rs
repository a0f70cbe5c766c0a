use anyhow::{bail, Context};

use crate::auth::{self, ROLE_ADMIN, ROLE_EDITOR};
use crate::config::config;
use crate::database::{Database, UserRepository};

/// Bootstrap an admin-surface account. Used to create the first admin
/// before the dashboard has anyone who can log in.
pub async fn create_admin(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<()> {
    if role != ROLE_ADMIN && role != ROLE_EDITOR {
        bail!("role must be '{}' or '{}'", ROLE_ADMIN, ROLE_EDITOR);
    }
    if password.len() < 8 {
        bail!("password must be at least 8 characters");
    }

    let db = Database::new(&config().database);
    db.migrate().await.context("failed to apply migrations")?;

    let users = UserRepository::new(db.pool().await?);
    if users.find_by_email(email).await?.is_some() {
        bail!("a user with email '{}' already exists", email);
    }

    let password_hash = auth::hash_password(password)?;
    let user = users.insert(name, email, &password_hash, role).await?;

    println!("Created {} user {} <{}> ({})", user.role, user.name, user.email, user.id);
    Ok(())
}
