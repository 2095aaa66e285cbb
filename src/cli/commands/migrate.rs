use super::{connect_and_migrate, load_config};

pub async fn handle() -> anyhow::Result<()> {
    let config = load_config()?;
    let db = connect_and_migrate(&config).await?;
    db.close().await;
    println!("Database schema is up to date");
    Ok(())
}
