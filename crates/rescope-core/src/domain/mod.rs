//! Domain types shared by every resource access port.

mod location;
mod metadata;
mod operation;
mod transfer;

pub use location::ResourceLocation;
pub use metadata::ResourceMetaData;
pub use operation::{
    OperationDescriptor, OperationDetails, OperationId, OperationKind, OperationResult,
};
pub use transfer::{ReadResult, WriteResult};
