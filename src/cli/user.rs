//! User CLI commands

use clap::Subcommand;

use crate::error::LedgerResult;
use crate::storage::Storage;

use super::auth::read_new_password;

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Register a user
    Add {
        /// Username
        username: String,
    },

    /// List registered users
    List,
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> LedgerResult<()> {
    match cmd {
        UserCommands::Add { username } => {
            let password = read_new_password()?;
            storage.users.add_user(&username, &password)?;
            println!("Registered user: {}", username.trim());
        }

        UserCommands::List => {
            let users = storage.users.usernames()?;
            if users.is_empty() {
                println!("No users registered. Run 'pocket user add <name>'.");
            } else {
                for user in users {
                    println!("{}", user);
                }
            }
        }
    }

    Ok(())
}
