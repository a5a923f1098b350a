//! IANA Definitions for DNS.
//!
//! This module contains types for the parameters defined in IANA registries
//! that are needed to render records.
//!
//! All types defined hereunder follow the same basic structure. They are
//! newtypes around the raw integer value with associated constants for all
//! well-defined values. Because of that, any integer value can be
//! represented and a well-defined constant and a raw value with the same
//! integer compare equal.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` convert from the string codes to the
//! values and back. Types also implement a `compose()` method for
//! composing into wire format.
//!
//! While each parameter type has a module of its own, they are all
//! re-exported here. This is mostly so we can have associated types like
//! `FromStrError` without having to resort to devilishly long names.

pub use self::class::Class;
pub use self::rcode::TsigRcode;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod rcode;
pub mod rtype;
