//! Domain names.
//!
//! A domain name is a sequence of labels, each of up to 63 octets of data.
//! The last label is always the empty root label. In wire format, each label
//! is preceded by a single octet with its length and the whole name can be
//! at most 255 octets long.
//!
//! The module provides the owned [`Dname`] type for complete names and the
//! unsized [`Label`] type for the labels in them. Both compare ignoring
//! ASCII case since that is how domain names are to be compared.

pub use self::dname::{Dname, DnameError, DnameIter, FromStrError, SuffixIter};
pub use self::label::{Label, LongLabelError};

mod dname;
mod label;
