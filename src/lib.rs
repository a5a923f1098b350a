//! Wire-format rendering of DNS messages.
//!
//! This crate provides the building blocks for turning DNS data into the
//! octets that go onto the wire. It doesn’t parse messages, it doesn’t
//! transport them, and it doesn’t calculate signatures. What it does is
//! make sure that the bytes produced are exactly right.
//!
//! # Modules
//!
//! * [base] contains the fundamental types: the [`WireBuffer`] that octets
//!   are appended to, domain names, the [`NameTable`] used for name
//!   compression, and the [`MessageRenderer`] which ties all of these
//!   together and enforces a length limit on a message.
//! * [rdata] contains record data types. Currently, this is only the record
//!   data of TSIG records.
//! * [tsig] contains the TSIG record itself, i.e., record data plus owner
//!   name, as it is appended to a signed message.
//!
//! # Name Compression and TSIG
//!
//! Name compression replaces a domain name or a suffix of it with a pointer
//! to an earlier occurrence of the same name in the message. Most record
//! types benefit from this. TSIG records, however, must always be written
//! out in full: the record is produced after the rest of the message has
//! been signed and it is also fed into the MAC calculation on its own, so
//! its names can’t depend on what else happens to be in the message. The
//! [`TsigRecord`] type takes care of that.
//!
//! [`WireBuffer`]: base::wire::WireBuffer
//! [`NameTable`]: base::compress::NameTable
//! [`MessageRenderer`]: base::renderer::MessageRenderer
//! [`TsigRecord`]: tsig::TsigRecord

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]

pub mod base;
pub mod rdata;
pub mod tsig;
