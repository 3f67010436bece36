use super::context::AppContext;
use super::prompts;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;
use watchlog_core::StorageBackend;

pub fn run_clear(all: bool, library: bool, credentials: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    if !(all || library || credentials) {
        output.warn("No clear option specified. Use --library, --credentials, or --all");
        output.info("\nExample: watchlog clear --credentials");
        return Ok(());
    }

    if all || library {
        clear_library(&ctx, output)?;
    }
    if all || credentials {
        clear_credentials(&ctx, output)?;
    }
    Ok(())
}

fn clear_library(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut store = ctx.open_library();
    if store.is_empty() {
        output.info("Library is already empty");
        return Ok(());
    }

    if prompts::is_interactive()
        && !prompts::prompt_yes_no(&format!("Delete all {} tracked titles?", store.len()), false)?
    {
        output.info("Library left untouched");
        return Ok(());
    }

    let count = store.len();
    store.clear();
    store
        .storage()
        .remove(store.key())
        .map_err(|e| eyre!("Failed to remove library file: {}", e))?;
    output.success(format!("Cleared {} title(s) from the library", count));
    Ok(())
}

fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!(
                "Failed to remove credentials file at {}: {}",
                credentials_file.display(),
                e
            )
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
