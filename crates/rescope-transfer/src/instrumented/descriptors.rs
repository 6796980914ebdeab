//! Operation descriptors shared by the instrumented wrappers.

use rescope_core::{OperationDescriptor, OperationDetails, OperationKind, ResourceLocation};

/// Build the descriptor for a `kind` operation on `location`.
///
/// Streamed operations carry the short display name for progress UIs.
pub(crate) fn describe(kind: OperationKind, location: &ResourceLocation) -> OperationDescriptor {
    let uri = location.uri().clone();
    let details = match kind {
        OperationKind::Download => OperationDetails::Read { location: uri },
        OperationKind::ReadMetadata => OperationDetails::ReadMetadata { location: uri },
        OperationKind::Upload => OperationDetails::Write { location: uri },
        OperationKind::List => OperationDetails::List { location: uri },
    };
    let descriptor = OperationDescriptor::new(
        format!("{} {}", kind.capitalized(), location.display_name()),
        details,
    );
    if kind.tracks_progress() {
        descriptor.with_progress_display_name(location.short_display_name())
    } else {
        descriptor
    }
}
