use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use env_logger::{Builder, Env, Target};

// stdout belongs to the TUI, so logs go to a file instead.
// Override the level with `RUST_LOG`, e.g. `RUST_LOG=debug` to see every transition.
pub fn setup_logger(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .unwrap_or(()); // already initialised
    Ok(())
}
