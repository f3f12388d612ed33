// Generic resource machinery shared by all entities.
//
// The three resources differ only in their field sets and the cascade rule,
// so validation and storage are implemented once against `EntityMeta`.

pub mod resource;
pub mod store;

pub use resource::{Entity, EntityMeta, FieldDef, FieldKind, FieldValue};
