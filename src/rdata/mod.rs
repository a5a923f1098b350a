//! Record data.
//!
//! Record data is the type-specific part of a resource record. Each record
//! type defines its own format for it. Only the record data of TSIG records
//! lives here since the records that are not rendered in any special way
//! can be represented by [`UnknownRecord`].
//!
//! [`UnknownRecord`]: crate::base::record::UnknownRecord

pub mod tsig;

pub use self::tsig::{Time48, Tsig};
