//! Category command handlers

use anyhow::Result;

use linkhub_core::{distinct_categories, Store};

use crate::output::Output;

/// List all non-empty categories, sorted
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let links = store.list()?;
    output.print_categories(&distinct_categories(&links));
    Ok(())
}
