//! Handling of DNS data.
//!
//! This module provides types and traits for creating DNS data in wire
//! format. The basic types are the [`WireBuffer`] that wire-format data is
//! appended to, the [`NameTable`] that remembers where names have been
//! written for name compression, and the [`MessageRenderer`] combining both
//! with a length limit.
//!
//! Domain names are defined in the [`name`] module, parameter types from
//! the IANA registries in [`iana`].

pub use self::compress::{
    write_name_compressible, write_name_uncompressed, CompressMode, NameTable,
};
pub use self::iana::{Class, Rtype, TsigRcode};
pub use self::name::{Dname, Label};
pub use self::record::{ComposeRecord, LongRecordData, UnknownRecord};
pub use self::renderer::MessageRenderer;
pub use self::wire::{Compose, ComposeError, Composer, WireBuffer};

pub mod compress;
pub mod iana;
pub mod name;
pub mod record;
pub mod renderer;
pub mod wire;
