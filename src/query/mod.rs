//! Query primitives for the entity layer.
//!
//! # Architecture
//!
//! - **Read**: [`ReadRequest`] and [`SortInfo`], the description of a general read
//! - **Cursor**: [`Cursor`], the row iterator a read returns
//! - **Vendor**: [`Vendor`], the dialect handle that renders statements
//! - **Column**: [`ColumnTrait`], typed predicates on column handles
//! - **Value Conversion**: SeaQuery `Value` to `ToSql` parameter conversion

pub mod read;
#[doc(inline)]
pub use read::{ReadRequest, SortInfo};

pub mod cursor;
#[doc(inline)]
pub use cursor::Cursor;

pub mod vendor;
#[doc(inline)]
pub use vendor::{PostgresVendor, Vendor};

pub mod column;
#[doc(inline)]
pub use column::ColumnTrait;

pub(crate) mod value_conversion;

use sea_query::Iden;

/// Table identifier built from a `Table::table_name`
pub(crate) struct TableIden(pub(crate) &'static str);

impl Iden for TableIden {
    fn unquoted(&self) -> &str {
        self.0
    }
}
