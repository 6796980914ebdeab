//! Available commands.

use std::path::PathBuf;

use clap::Subcommand;

/// Resource operations, each run as one traced operation.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a resource's content
    Fetch {
        /// Resource URI (e.g. "file:///srv/repo/a.jar")
        uri: String,
        /// Write the content to this file instead of discarding it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Read at most this many bytes
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Show a resource's metadata
    Meta {
        /// Resource URI
        uri: String,
    },

    /// List the children of a resource
    List {
        /// Parent resource URI
        uri: String,
    },

    /// Upload a local file to a resource
    Put {
        /// Local file to upload
        file: PathBuf,
        /// Destination resource URI
        uri: String,
    },
}
