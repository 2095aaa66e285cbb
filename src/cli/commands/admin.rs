use std::sync::Arc;

use anyhow::Context;
use clap::Args;

use super::{connect_and_migrate, load_config};
use crate::auth::{provision_admin, Provisioned};
use crate::database::{PgStorage, Storage};

#[derive(Args, Debug, Default)]
pub struct InitAdminArgs {
    #[arg(long, help = "Admin username (defaults to ADMIN_USERNAME or \"admin\")")]
    pub username: Option<String>,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true, help = "Admin password")]
    pub password: Option<String>,
}

pub async fn handle(args: InitAdminArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    let username = args.username.unwrap_or_else(|| config.admin.username.clone());
    let password = args
        .password
        .or_else(|| config.admin.password.clone())
        .context("an admin password is required (--password or ADMIN_PASSWORD)")?;

    let db = connect_and_migrate(&config).await?;
    let storage: Arc<dyn Storage> = Arc::new(PgStorage::new(db.pool().clone()));
    let outcome = provision_admin(storage, &username, &password).await;
    db.close().await;

    match outcome.context("failed to provision admin user")? {
        Provisioned::Created => println!("Admin user '{}' created", username),
        Provisioned::AlreadyExists => println!("Admin user '{}' already exists", username),
    }
    Ok(())
}
