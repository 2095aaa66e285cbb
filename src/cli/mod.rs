pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nainaland-api")]
#[command(about = "Real-estate listings API with an admin back-office")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Create or upgrade the database schema")]
    Migrate,

    #[command(about = "Provision the admin account if it does not exist")]
    InitAdmin(commands::admin::InitAdminArgs),
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve(Default::default())) {
        Commands::Serve(args) => commands::serve::handle(args).await,
        Commands::Migrate => commands::migrate::handle().await,
        Commands::InitAdmin(args) => commands::admin::handle(args).await,
    }
}
