//! Command handlers for the CLI

use chrono::{Duration, Utc};
use intake_db::{hash_secret, ApiKeyRepo, SqliteStore};
use rand::{distributions::Alphanumeric, Rng};
use std::path::Path;

use crate::KeyCommands;

type CmdResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Handle key commands
pub fn handle_key_command(action: KeyCommands, db: &Path) -> CmdResult {
    let store = SqliteStore::open(db)?;
    store.init_schema()?;
    let keys = ApiKeyRepo::new(store);

    match action {
        KeyCommands::Create {
            name,
            limit,
            expires_days,
        } => {
            let now = Utc::now();
            let secret = generate_secret();
            let expires_at = expires_days.map(|days| now + Duration::days(days));

            let id = keys.insert(&name, &hash_secret(&secret), limit, expires_at, now)?;

            println!("API key created!");
            println!("  Id: {}", id);
            println!("  Name: {}", name);
            println!("  Rate limit: {}/hour", limit);
            match expires_at {
                Some(at) => println!("  Expires: {}", at),
                None => println!("  Expires: never"),
            }
            println!();
            // Only the hash is stored; the secret cannot be recovered later.
            println!("  Secret (store it now, it will not be shown again):");
            println!("  {}", secret);
        }

        KeyCommands::List => {
            for key in keys.list()? {
                let status = if key.is_active { "active" } else { "revoked" };
                println!(
                    "{}  {}  {}  {}/hour  last used: {}",
                    key.id,
                    key.name,
                    status,
                    key.rate_limit_per_hour,
                    key.last_used_at
                        .map(|at| at.to_string())
                        .unwrap_or_else(|| "never".to_string()),
                );
            }
        }

        KeyCommands::Revoke { id } => {
            keys.set_active(id, false)?;
            println!("Key {} revoked.", id);
        }
    }

    Ok(())
}

/// A fresh `sk_`-prefixed secret, 32 random alphanumeric characters.
fn generate_secret() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    format!("sk_{}", suffix)
}
