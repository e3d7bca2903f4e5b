//! Table descriptions for entities.
//!
//! - **Traits**: [`Table`], the schema/row-shape contract an entity is bound to
//! - **Value**: [`ActiveValue`], per-column state deciding what gets written

pub mod traits;
#[doc(inline)]
pub use traits::Table;

pub mod value;
#[doc(inline)]
pub use value::ActiveValue;
