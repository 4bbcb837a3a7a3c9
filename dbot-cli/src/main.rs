//! dbot: runs the Telegram command bot. Config from env (.env supported) and optional CLI args.

use anyhow::Result;
use clap::Parser;
use dbot_cli::{load_config, mask_token, run, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(load_config(token)?).await,
        Commands::Config { token } => {
            let config = load_config(token)?;
            println!("bot_token:           {}", mask_token(&config.bot_token));
            println!("api_url:             {}", config.api_url());
            println!("log_file:            {}", config.log_file);
            println!(
                "database_url:        {}",
                config.database_url.as_deref().unwrap_or("(disabled)")
            );
            println!("admin_user_ids:      {:?}", config.admin_user_ids);
            println!(
                "bot_username:        {}",
                config.bot_username.as_deref().unwrap_or("(from getMe)")
            );
            println!("commands configured: {}", config.load_command_config()?.len());
            println!("poll_timeout_secs:   {}", config.poll_timeout_secs);
            Ok(())
        }
    }
}
