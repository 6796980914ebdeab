//! Put command handler.

use std::path::Path;

use rescope_core::{ReadableContent, ResourceLocation, ResourceUploader};
use rescope_transfer::length_text;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::transport::FileContent;

/// Execute the put command, returning the size of the uploaded file.
pub fn execute(ctx: &CliContext, file: &Path, uri: &str) -> Result<u64, CliError> {
    let destination = ResourceLocation::parse(uri)?;
    let content = FileContent::new(file)?;
    let length = content.content_length().unwrap_or_default();

    ctx.uploader().upload(&content, &destination)?;

    println!(
        "Uploaded {} ({}) to {}",
        file.display(),
        length_text(length),
        destination
    );
    Ok(length)
}
