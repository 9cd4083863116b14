//! Casting engine for table-schema fields.
//!
//! Turns untyped cell values (usually text read from CSV) into native typed
//! values according to a declared [`FieldDescriptor`]. Bind a descriptor once
//! with [`Field::new`], then call [`Field::cast`] for every raw value.
//!
//! ```
//! use schema_cast::{Field, FieldDescriptor, FieldType, Value};
//!
//! let field = Field::new(
//!     FieldDescriptor::new("price", FieldType::Number).with_format("currency"),
//! )
//! .unwrap();
//! assert_eq!(field.cast("$10,000.00").unwrap(), Some(Value::Number(10000.0)));
//! ```

pub mod error;
pub mod field;
pub mod null;
pub mod numeric;
pub mod temporal;
pub mod types;
pub mod value;

use anyhow::Result;

pub use error::CastError;
pub use field::{Constraints, FieldDescriptor, FieldType};
pub use types::{Caster, Field};
pub use value::{GeoPoint, Value};

/// Binds `descriptor` and casts a single value.
///
/// Descriptor problems surface as the outer error; value-level failures as
/// the inner [`CastError`].
pub fn cast(
    value: impl Into<Value>,
    descriptor: &FieldDescriptor,
) -> Result<Result<Option<Value>, CastError>> {
    let field = Field::new(descriptor.clone())?;
    Ok(field.cast(value))
}
