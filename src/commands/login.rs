use std::path::PathBuf;

use log::debug;

use crate::config::{ConfigStore, validate_token};
use crate::error::AppError;
use crate::prompt::Prompter;

/// `annexfour login`.
pub fn execute_login(store: &ConfigStore, prompter: &mut dyn Prompter) -> Result<(), AppError> {
    perform_login(store, prompter)?;
    println!("You can now run 'annexfour scan' without arguments.");
    Ok(())
}

/// Ask for a token until a valid one is entered, then persist it.
pub fn perform_login(
    store: &ConfigStore,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf, AppError> {
    println!("--- Annexfour Global Login ---");
    println!("Please paste your API Token (generated in Settings -> Developer).");

    let token = loop {
        let candidate = prompter.secret("API Token")?;
        match validate_token(&candidate) {
            Ok(()) => break candidate,
            Err(err) => {
                debug!("rejected token input");
                eprintln!("{err}");
            }
        }
    };

    let path = store.save(&token)?;
    println!("\n[+] Success! Token saved to {}", path.display());
    Ok(path)
}
