//! Build script for the spotifytime web service.
//!
//! Copies the `.env.example` configuration template to the user's local data
//! directory, next to the `.env` the service reads at start-up.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// # File Operations
///
/// ## Source Location
/// `.env.example` in the crate root directory (where Cargo.toml resides).
///
/// ## Destination Location
/// - Linux: `~/.local/share/spotifytime/.env.example`
/// - macOS: `~/Library/Application Support/spotifytime/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotifytime/.env.example`
///
/// # Error Handling
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or to write the copy fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotifytime");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
