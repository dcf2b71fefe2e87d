// src/main.rs
use color_eyre::eyre::{Result, eyre};

fn main() -> Result<()> {
    color_eyre::install()?;
    menu_patch::cli::run().map_err(|e| eyre!("{e}"))
}
