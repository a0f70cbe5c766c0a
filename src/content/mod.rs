pub mod registry;
pub mod validate;

pub use registry::{lookup, ContentKind, ContentTypeDef, FieldKind, FieldSpec, CONTENT_TYPES};
pub use validate::{validate_create, validate_update, ValidatedDoc, ValidationError};
