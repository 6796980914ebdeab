//! Fetch command handler.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use rescope_core::{ResourceAccessor, ResourceLocation};
use rescope_transfer::length_text;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the fetch command.
///
/// Streams the resource into `output` (or discards it) and returns the
/// number of bytes read. With `limit`, reading stops after that many bytes.
pub fn execute(
    ctx: &CliContext,
    uri: &str,
    output: Option<&Path>,
    limit: Option<u64>,
) -> Result<u64, CliError> {
    let location = ResourceLocation::parse(uri)?;

    let copied = ctx
        .accessor()
        .with_content(&location, false, |stream, _| {
            let mut sink: Box<dyn Write> = match output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(io::sink()),
            };
            let copied = match limit {
                Some(limit) => io::copy(&mut Read::take(stream, limit), &mut sink)?,
                None => io::copy(stream, &mut sink)?,
            };
            sink.flush()?;
            Ok(copied)
        })?
        .ok_or_else(|| CliError::NotFound(uri.to_string()))?;

    match output {
        Some(path) => println!(
            "Read {} from {} into {}",
            length_text(copied),
            location.display_name(),
            path.display()
        ),
        None => println!("Read {} from {}", length_text(copied), location.display_name()),
    }
    Ok(copied)
}
