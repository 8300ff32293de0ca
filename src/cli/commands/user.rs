use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::repository::{finish, Store, UserRepository};
use crate::database::{DatabaseError, DatabaseManager, PgStore};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user that can authenticate against the API")]
    Add {
        #[arg(help = "User id, as sent before the colon in the Authorization header")]
        id: String,
        #[arg(help = "Password, as sent after the colon")]
        secret: String,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Add { id, secret } => {
            let config = config::config();
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to PostgreSQL")?;
            let store = PgStore::new(pool.clone());

            let result = add_user(&store, &id, &secret).await;
            DatabaseManager::close(&pool).await;
            result?;

            output_success(
                &output_format,
                &format!("Created user '{}'", id),
                Some(json!({ "user_id": id })),
            )
        }
    }
}

async fn add_user<S: Store>(store: &S, id: &str, secret: &str) -> Result<(), DatabaseError> {
    let mut cx = store.begin().await?;
    let result = store.users().create(&mut cx, id, secret).await;
    finish(cx, result).await
}
