//! Link command handlers
//!
//! Local operator access to the store. These commands read and write the
//! data file directly, so they don't ask for the admin password.

use std::io::{self, Write};

use anyhow::{Context, Result};

use linkhub_core::{LinkHubError, LinkQuery, NewLink, Store};

use crate::output::Output;

/// Add a new link
pub fn add(store: &Store, new: NewLink, output: &Output) -> Result<()> {
    let link = store.add(new).context("Failed to add link")?;

    output.success(&format!("Added link: {}", link.id));
    output.print_link(&link);

    Ok(())
}

/// List links, optionally filtered by text and category
pub fn list(store: &Store, query: LinkQuery, output: &Output) -> Result<()> {
    let links = query.apply(store.list()?);
    output.print_links(&links);
    Ok(())
}

/// Show a single link
pub fn show(store: &Store, id: u64, output: &Output) -> Result<()> {
    let link = store.find_by_id(id)?;
    output.print_link(&link);
    Ok(())
}

/// Delete a link
pub fn delete(store: &Store, id: u64, output: &Output) -> Result<()> {
    let link = match store.find_by_id(id) {
        Ok(link) => link,
        Err(LinkHubError::NotFound { .. }) => {
            output.message(&format!("No link with id {}; nothing to delete.", id));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if output.should_prompt() {
        println!("Delete link: {} - {}", link.id, link.title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_by_id(id).context("Failed to delete link")?;

    output.success(&format!("Deleted link: {}", id));

    Ok(())
}

/// Search links by title, notes and URL
pub fn search(store: &Store, query: String, output: &Output) -> Result<()> {
    list(store, LinkQuery::new().text(query), output)
}

/// Ask a yes/no question on the terminal
///
/// Returns false without asking when stdin is not a terminal.
fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
