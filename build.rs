//! Build script for the sprofile CLI.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory (`<data_local_dir>/sprofile/.env.example`) so the expected
//! configuration layout exists after installation.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the local data directory.
///
/// A missing template only produces a cargo warning; failing to create the
/// target directory or to write the file fails the build.
///
/// Target locations:
/// - Linux: `~/.local/share/sprofile/.env.example`
/// - macOS: `~/Library/Application Support/sprofile/.env.example`
/// - Windows: `%LOCALAPPDATA%/sprofile/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("sprofile");
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
