//! Creating data in wire format.

use super::name::Dname;
use core::convert::Infallible;
use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf, Truncate};
use std::vec::Vec;

//------------ WireBuffer ----------------------------------------------------

/// A growable buffer for wire-format data.
///
/// The buffer only ever grows at its end. Its length doubles as the write
/// position: anything appended goes right after what is already there.
/// Data can be removed again only by truncating the buffer back to a length
/// observed earlier via [`truncate`][Self::truncate].
///
/// Appending never fails. The buffer itself doesn’t enforce any limit on
/// its size, that is left to the [`MessageRenderer`].
///
/// [`MessageRenderer`]: super::renderer::MessageRenderer
#[derive(Clone, Default, Eq, PartialEq)]
pub struct WireBuffer {
    data: Vec<u8>,
}

impl WireBuffer {
    /// Creates a new, empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty buffer with room for `capacity` octets.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WireBuffer {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of octets written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of octets the buffer can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns the data written so far.
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Converts the buffer into the underlying octets vec.
    pub fn into_octets(self) -> Vec<u8> {
        self.data
    }

    /// Appends a single octet.
    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value)
    }

    /// Appends a 16 bit value in network byte order.
    pub fn write_u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_be_bytes())
    }

    /// Appends a 32 bit value in network byte order.
    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_be_bytes())
    }

    /// Appends an octets slice.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes)
    }

    /// Appends `len` zero octets.
    ///
    /// This reserves room for data that is only known later and will be
    /// filled in via [`write_u16_at`][Self::write_u16_at].
    pub fn skip(&mut self, len: usize) {
        self.data.resize(self.data.len() + len, 0)
    }

    /// Overwrites two already written octets at `pos` with `value`.
    ///
    /// Fails if the two octets starting at `pos` haven’t been written yet.
    pub fn write_u16_at(
        &mut self,
        pos: usize,
        value: u16,
    ) -> Result<(), ComposeError> {
        match pos.checked_add(2) {
            Some(end) if end <= self.data.len() => {
                self.data[pos..end].copy_from_slice(&value.to_be_bytes());
                Ok(())
            }
            _ => Err(ComposeError::Overrun),
        }
    }

    /// Truncates the buffer back to `mark` octets.
    ///
    /// Everything written after `mark` is discarded. The buffer never grows
    /// through this method: if `mark` is beyond the current length, it fails
    /// and leaves the buffer untouched.
    pub fn truncate(&mut self, mark: usize) -> Result<(), ComposeError> {
        if mark > self.data.len() {
            return Err(ComposeError::Overrun);
        }
        self.data.truncate(mark);
        Ok(())
    }

    /// Removes all data from the buffer.
    pub fn clear(&mut self) {
        self.data.clear()
    }
}

//--- From

impl From<Vec<u8>> for WireBuffer {
    fn from(data: Vec<u8>) -> Self {
        WireBuffer { data }
    }
}

impl From<WireBuffer> for Vec<u8> {
    fn from(buf: WireBuffer) -> Self {
        buf.into_octets()
    }
}

//--- AsRef and AsMut

impl AsRef<[u8]> for WireBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for WireBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }
}

//--- OctetsBuilder, Truncate, and Composer

impl OctetsBuilder for WireBuffer {
    type AppendError = Infallible;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.write_bytes(slice);
        Ok(())
    }
}

impl Truncate for WireBuffer {
    fn truncate(&mut self, len: usize) {
        self.data.truncate(len)
    }
}

impl Composer for WireBuffer {}

//--- Debug

impl fmt::Debug for WireBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WireBuffer")
            .field("len", &self.data.len())
            .field("data", &self.data.as_slice())
            .finish()
    }
}

//------------ Composer ------------------------------------------------------

/// A target for composing wire-format data that may compress names.
pub trait Composer: OctetsBuilder + AsRef<[u8]> + AsMut<[u8]> + Truncate {
    /// Appends a domain name using name compression if supported.
    ///
    /// Domain name compression attempts to lower the size of a DNS message
    /// by avoiding to include repeated domain name suffixes. Instead of
    /// adding the full suffix, a pointer to the location of the previous
    /// occurence is added. Because the composer needs to keep track of
    /// where names have been written, only some composers support this.
    ///
    /// The trait provides a default implementation which simply appends the
    /// name uncompressed.
    fn append_compressed_name(
        &mut self,
        name: &Dname,
    ) -> Result<(), Self::AppendError> {
        name.compose(self)
    }

    /// Returns whether the composer actually compresses names.
    fn can_compress(&self) -> bool {
        false
    }
}

impl Composer for Vec<u8> {}

//------------ Compose -------------------------------------------------------

/// A type that knows how to append itself in wire format.
pub trait Compose {
    /// The length of the wire format of all values of the type.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    const COMPOSE_LEN: u16 = 1;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&[*self])
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

//------------ compose functions ---------------------------------------------

/// Composes an octets sequence prefixed by its length as a 16 bit value.
///
/// Returns an error if the sequence is longer than 65,535 octets. Nothing
/// is appended in this case.
pub fn compose_u16_prefixed<Target: OctetsBuilder + ?Sized>(
    data: &[u8],
    target: &mut Target,
) -> Result<(), ComposeError> {
    let len = u16::try_from(data.len()).map_err(|_| ComposeError::LongData)?;
    len.compose(target)?;
    target.append_slice(data)?;
    Ok(())
}

//============ Error Types ===================================================

//------------ ComposeError --------------------------------------------------

/// An error happened while composing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeError {
    /// A length didn’t fit into its length field.
    LongData,

    /// The target couldn’t take any more data.
    ShortBuf,

    /// A position beyond the end of the written data was given.
    Overrun,

    /// The operation requires an empty target.
    NotEmpty,
}

impl<T: Into<ShortBuf>> From<T> for ComposeError {
    fn from(_: T) -> Self {
        ComposeError::ShortBuf
    }
}

//--- Display and Error

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::LongData => f.write_str("long data"),
            ComposeError::ShortBuf => ShortBuf.fmt(f),
            ComposeError::Overrun => {
                f.write_str("position beyond end of data")
            }
            ComposeError::NotEmpty => f.write_str("target not empty"),
        }
    }
}

impl std::error::Error for ComposeError {}

//============ Testing =======================================================
