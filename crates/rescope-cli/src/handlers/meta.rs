//! Meta command handler.

use rescope_core::{ResourceAccessor, ResourceLocation, ResourceMetaData};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::metadata_rows;

/// Execute the meta command, printing one `label: value` line per known field.
pub fn execute(ctx: &CliContext, uri: &str) -> Result<ResourceMetaData, CliError> {
    let location = ResourceLocation::parse(uri)?;
    let meta = ctx
        .accessor()
        .meta_data(&location, true)?
        .ok_or_else(|| CliError::NotFound(uri.to_string()))?;

    for (label, value) in metadata_rows(&meta) {
        println!("{label:<10} {value}");
    }
    Ok(meta)
}
