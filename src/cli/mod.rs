pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "portalctl")]
#[command(about = "Operator CLI for the ADR portal content API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an admin user directly in the database")]
    CreateAdmin {
        #[arg(long, help = "Login email (matched case-insensitively)")]
        email: String,

        #[arg(long, help = "Display name")]
        name: String,

        #[arg(long, help = "Initial password")]
        password: String,

        #[arg(long, default_value = "admin", help = "Role: admin or editor")]
        role: String,
    },

    #[command(about = "Check health of a running server")]
    Health {
        #[arg(long, default_value = "http://127.0.0.1:3000", help = "Server base URL")]
        url: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::CreateAdmin {
            email,
            name,
            password,
            role,
        } => commands::admin::create_admin(&email, &name, &password, &role).await,
        Commands::Health { url } => commands::health::check(&url).await,
    }
}
