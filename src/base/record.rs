//! Resource Records.
//!
//! A resource record consists of an owner name, a record type, a class, a
//! time-to-live value, and record data prefixed by its length. This module
//! defines the [`ComposeRecord`] trait shared by all records that can be
//! added to a message and the generic [`UnknownRecord`] that carries its
//! record data as an opaque octets sequence.

use super::iana::{Class, Rtype};
use super::name::Dname;
use super::wire::{compose_u16_prefixed, Compose, ComposeError, Composer};
use core::fmt;
use std::vec::Vec;

//------------ ComposeRecord -------------------------------------------------

/// A record that can be appended to a message.
///
/// The trait is the common write contract used by
/// [`MessageRenderer::push`]. Implementations write the complete record,
/// i.e., from the owner name to the end of the record data.
///
/// [`MessageRenderer::push`]: super::renderer::MessageRenderer::push
pub trait ComposeRecord {
    /// Returns the length of the record in uncompressed wire format.
    fn compose_len(&self) -> usize;

    /// Appends the wire format of the record to `target`.
    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError>;
}

impl<'a, T: ComposeRecord + ?Sized> ComposeRecord for &'a T {
    fn compose_len(&self) -> usize {
        (*self).compose_len()
    }

    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        (*self).compose_record(target)
    }
}

//------------ UnknownRecord -------------------------------------------------

/// A record with opaque record data.
///
/// This type can represent a record of any type. The owner name is written
/// using name compression if the target supports it. The record data is
/// written as is, so it must not contain compressed names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownRecord {
    owner: Dname,
    rtype: Rtype,
    class: Class,
    ttl: u32,
    data: Vec<u8>,
}

impl UnknownRecord {
    /// Creates a new record from its components.
    ///
    /// Fails if `data` is longer than 65,535 octets.
    pub fn new(
        owner: Dname,
        rtype: Rtype,
        class: Class,
        ttl: u32,
        data: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        LongRecordData::check_len(data.len())?;
        Ok(UnknownRecord {
            owner,
            rtype,
            class,
            ttl,
            data,
        })
    }

    pub fn owner(&self) -> &Dname {
        &self.owner
    }

    pub fn rtype(&self) -> Rtype {
        self.rtype
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//--- ComposeRecord

impl ComposeRecord for UnknownRecord {
    fn compose_len(&self) -> usize {
        usize::from(self.owner.compose_len())
            + usize::from(Rtype::COMPOSE_LEN)
            + usize::from(Class::COMPOSE_LEN)
            + usize::from(u32::COMPOSE_LEN)
            + usize::from(u16::COMPOSE_LEN)
            + self.data.len()
    }

    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        target.append_compressed_name(&self.owner)?;
        self.rtype.compose(target)?;
        self.class.compose(target)?;
        self.ttl.compose(target)?;
        compose_u16_prefixed(&self.data, target)
    }
}

//--- Display

impl fmt::Display for UnknownRecord {
    /// Formats the record in the generic format for unknown types.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} \\# {}",
            self.owner.fmt_with_dot(),
            self.ttl,
            self.class,
            self.rtype,
            self.data.len()
        )?;
        for ch in &self.data {
            write!(f, " {:02x}", ch)?;
        }
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ LongRecordData ------------------------------------------------

/// The record data exceeds the maximum length of 65,535 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl LongRecordData {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        "record data too long"
    }

    /// Checks that a record data length fits into a 16 bit length field.
    pub fn check_len(len: usize) -> Result<(), Self> {
        if len > usize::from(u16::MAX) {
            Err(Self(()))
        } else {
            Ok(())
        }
    }
}

//--- Display and Error

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::wire::WireBuffer;
    use core::str::FromStr;

    fn record(owner: &str, data: &[u8]) -> UnknownRecord {
        UnknownRecord::new(
            Dname::from_str(owner).unwrap(),
            Rtype::A,
            Class::IN,
            3600,
            data.into(),
        )
        .unwrap()
    }

    #[test]
    fn compose_record() {
        let rec = record("example.com", b"\xc0\x00\x02\x01");
        let mut buf = WireBuffer::new();
        rec.compose_record(&mut buf).unwrap();
        assert_eq!(
            buf.as_slice(),
            b"\x07example\x03com\x00\
              \x00\x01\x00\x01\x00\x00\x0e\x10\
              \x00\x04\xc0\x00\x02\x01"
        );
        assert_eq!(rec.compose_len(), buf.len());
    }

    #[test]
    fn long_data() {
        assert!(UnknownRecord::new(
            Dname::root(),
            Rtype::TXT,
            Class::IN,
            0,
            vec![0; 0x1_0000],
        )
        .is_err());
        assert!(UnknownRecord::new(
            Dname::root(),
            Rtype::TXT,
            Class::IN,
            0,
            vec![0; 0xFFFF],
        )
        .is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(
            record("example.com", b"\xc0\x00\x02\x01").to_string(),
            "example.com. 3600 IN A \\# 4 c0 00 02 01"
        );
    }
}
