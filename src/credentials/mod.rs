use anyhow::{Context, Result};

/// Environment variable checked before prompting for an advisor API key.
pub const ENV_KEY_VAR: &str = "SMARTPROCURE_API_KEY";

/// Check for an advisor API key in the environment.
/// Returns Some(key) if the variable is set and non-empty, None otherwise.
pub fn get_key_from_env() -> Option<String> {
    match std::env::var(ENV_KEY_VAR) {
        Ok(val) => {
            let trimmed = val.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

/// Prompt the user for an advisor API key on stdin (input hidden).
pub fn prompt_for_key() -> Result<String> {
    eprintln!("The remote negotiation advisor needs an API key.");
    eprintln!("Set {} to skip this prompt.", ENV_KEY_VAR);
    eprintln!();

    let key = rpassword::prompt_password("Enter API key: ")
        .context("Failed to read API key from stdin")?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    Ok(key.to_string())
}

/// Resolve the advisor API key: environment first, interactive prompt
/// otherwise. Only called when the remote advisor is configured; the
/// rule-based advisor needs no credentials.
pub fn setup_key_if_missing() -> Result<String> {
    match get_key_from_env() {
        Some(key) => Ok(key),
        None => prompt_for_key(),
    }
}
