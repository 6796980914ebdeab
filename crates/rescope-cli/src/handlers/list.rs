//! List command handler.

use rescope_core::{ResourceLister, ResourceLocation};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the list command.
pub fn execute(ctx: &CliContext, uri: &str) -> Result<Vec<String>, CliError> {
    let location = ResourceLocation::parse(uri)?;
    let names = ctx
        .lister()
        .list(&location)?
        .ok_or_else(|| CliError::NotFound(uri.to_string()))?;

    if names.is_empty() {
        println!("{} is empty.", location.display_name());
    }
    for name in &names {
        println!("{name}");
    }
    Ok(names)
}
