pub mod error;
pub mod mode;
pub mod path_context;
pub mod resource_data;
pub mod resource_id;
pub mod resource_kind;
pub mod schema;
pub mod snapshot;
pub mod write_request;

pub use error::{AppError, TempStep};
pub use mode::FileMode;
pub use path_context::PathContext;
pub use resource_data::{AttrValue, Attributes, ResourceData};
pub use resource_id::ResourceId;
pub use resource_kind::ResourceKind;
pub use schema::{
    Comparison, FILE_READER, FILE_WRITER, FieldKind, FieldSpec, Presence, ResourceSchema,
};
pub use snapshot::FileSnapshot;
pub use write_request::{Relocation, WriteOutcome, WriteRequest};
