//! Record data from [RFC 8945]: TSIG records.
//!
//! This RFC defines the TSIG record type used for signing DNS messages.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

use crate::base::iana::TsigRcode;
use crate::base::name::Dname;
use crate::base::record::LongRecordData;
use crate::base::wire::{compose_u16_prefixed, Compose, ComposeError};
use base64::{engine::general_purpose, Engine as _};
use core::fmt;
use octseq::builder::OctetsBuilder;
use std::vec::Vec;
use time::OffsetDateTime;

//------------ Tsig ----------------------------------------------------------

/// The record data of a TSIG record.
///
/// The algorithm name is always written in full, never compressed, and is
/// never used as a target for compressing other names.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Tsig {
    /// The signature algorithm as a domain name.
    algorithm: Dname,

    /// The Unix epoch time at which the signature was created.
    ///
    /// Note that this is an unsigned 48 bit value in wire format.
    time_signed: Time48,

    /// Seconds of error perimitted in time signed.
    fudge: u16,

    /// MAC.
    ///
    /// In wire format, consists of a unsigned 16 bit integer containing the
    /// length followed by that many octets of actual MAC.
    mac: Vec<u8>,

    /// Original message ID.
    original_id: u16,

    /// TSIG response code.
    error: TsigRcode,

    /// Other.
    ///
    /// This is normally empty unless a BADTIME error happened. In wire
    /// format, it is encoded as a unsigned 16 bit integer followed by that
    /// many octets.
    other: Vec<u8>,
}

impl Tsig {
    /// The length of the fixed-size fields of the record data.
    const FIXED_LEN: usize = 6 // time_signed
        + 2 // fudge
        + 2 // MAC length
        + 2 // original ID
        + 2 // error
        + 2; // other length

    /// Creates new TSIG record data from its components.
    ///
    /// See the access methods for an explanation of these components. The
    /// function will return an error if the wire format length of the record
    /// data would exceed 65,535 octets.
    pub fn new(
        algorithm: Dname,
        time_signed: Time48,
        fudge: u16,
        mac: Vec<u8>,
        original_id: u16,
        error: TsigRcode,
        other: Vec<u8>,
    ) -> Result<Self, LongRecordData> {
        LongRecordData::check_len(
            Self::FIXED_LEN
                + usize::from(algorithm.compose_len())
                + mac.len()
                + other.len(),
        )?;
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        })
    }

    /// Returns a reference to the algorithm name.
    ///
    /// TSIG encodes the algorithm used for keys and signatures as a domain
    /// name. It does, however, only use the format. No structure is used at
    /// all.
    pub fn algorithm(&self) -> &Dname {
        &self.algorithm
    }

    /// Returns the Unix time when the signature is created.
    pub fn time_signed(&self) -> Time48 {
        self.time_signed
    }

    /// Return the number of seconds of offset from signing time permitted.
    ///
    /// When a signature is checked, the local system time needs to be within
    /// this many seconds from `time_signed` to be accepted.
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// Returns an octet slice containing the MAC.
    pub fn mac(&self) -> &[u8] {
        &self.mac
    }

    /// Returns the length of the MAC.
    pub fn mac_size(&self) -> u16 {
        // Can’t overflow: checked in new.
        self.mac.len() as u16
    }

    /// Returns the original message ID.
    ///
    /// Since the message ID is part of the signature generation but may be
    /// changed for a forwarded message, it is included in the TSIG record.
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    /// Returns the TSIG error.
    pub fn error(&self) -> TsigRcode {
        self.error
    }

    /// Returns the other bytes.
    ///
    /// This field is only used for BADTIME errors to return the server time.
    /// Otherwise it is empty.
    pub fn other(&self) -> &[u8] {
        &self.other
    }

    /// Returns the length of the other bytes.
    pub fn other_len(&self) -> u16 {
        // Can’t overflow: checked in new.
        self.other.len() as u16
    }

    /// Returns the other bytes as the server time.
    ///
    /// If the other bytes field is exactly 6 bytes long, this methods
    /// returns it as the Unix time contained.
    pub fn other_time(&self) -> Option<Time48> {
        <[u8; 6]>::try_from(self.other.as_slice())
            .ok()
            .map(Time48::from_octets)
    }

    /// Returns whether the record is valid at the given time.
    ///
    /// The method checks whether the given time is within [`fudge`]
    /// seconds of the [`time_signed`].
    ///
    /// [`fudge`]: Self::fudge
    /// [`time_signed`]: Self::time_signed
    pub fn is_valid_at(&self, now: Time48) -> bool {
        now.eq_fudged(self.time_signed, self.fudge.into())
    }

    /// Returns whether the record is valid right now.
    pub fn is_valid_now(&self) -> bool {
        self.is_valid_at(Time48::now())
    }

    /// Returns the length of the record data in wire format.
    pub fn rdlen(&self) -> u16 {
        // Can’t overflow: checked in new.
        (Self::FIXED_LEN
            + usize::from(self.algorithm.compose_len())
            + self.mac.len()
            + self.other.len()) as u16
    }

    /// Appends the wire format of the record data to `target`.
    ///
    /// The algorithm name is always written uncompressed.
    pub fn compose_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.algorithm.compose(target)?;
        self.time_signed.compose(target)?;
        self.fudge.compose(target)?;
        compose_u16_prefixed(&self.mac, target)?;
        self.original_id.compose(target)?;
        self.error.compose(target)?;
        compose_u16_prefixed(&self.other, target)
    }

    /// Appends the record data prefixed with its length.
    pub fn compose_len_rdata<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        self.rdlen().compose(target)?;
        self.compose_rdata(target)
    }
}

//--- Display and Debug

impl fmt::Display for Tsig {
    /// Formats the record data in presentation format.
    ///
    /// The MAC and other data are given as their length followed by the
    /// data in Base 64. The other data is left out entirely if it is empty.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.algorithm.fmt_with_dot(),
            self.time_signed,
            self.fudge,
            self.mac.len(),
            general_purpose::STANDARD.encode(&self.mac),
            self.original_id,
            self.error,
            self.other.len(),
        )?;
        if !self.other.is_empty() {
            write!(f, " {}", general_purpose::STANDARD.encode(&self.other))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tsig")
            .field("algorithm", &self.algorithm)
            .field("time_signed", &self.time_signed)
            .field("fudge", &self.fudge)
            .field("mac", &self.mac.as_slice())
            .field("original_id", &self.original_id)
            .field("error", &self.error)
            .field("other", &self.other.as_slice())
            .finish()
    }
}

//------------ Time48 --------------------------------------------------------

/// A 48-bit Unix timestamp.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time48(u64);

impl Time48 {
    /// The largest representable time.
    pub const MAX: Time48 = Time48(0xFFFF_FFFF_FFFF);

    /// Returns the timestamp of the current moment.
    ///
    /// A clock set before the Unix epoch results in a time of zero.
    #[must_use]
    pub fn now() -> Time48 {
        let secs = OffsetDateTime::now_utc().unix_timestamp();
        match u64::try_from(secs) {
            Ok(secs) => Time48::try_from(secs).unwrap_or(Time48::MAX),
            Err(_) => Time48(0),
        }
    }

    /// Creates a value from its wire format.
    ///
    /// The octets contain the value in network byte order.
    #[must_use]
    pub fn from_octets(octets: [u8; 6]) -> Self {
        let mut buf = [0u8; 8];
        buf[2..].copy_from_slice(&octets);
        Time48(u64::from_be_bytes(buf))
    }

    /// Converts a value into its wire format.
    ///
    /// Returns the octets of the encoded value in network byte order.
    pub fn into_octets(self) -> [u8; 6] {
        let mut res = [0u8; 6];
        res.copy_from_slice(&self.0.to_be_bytes()[2..]);
        res
    }

    /// Returns whether the time is within a given period.
    ///
    /// Returns `true` iff `other` is at most `fudge` seconds before or after
    /// this value’s time.
    pub fn eq_fudged(self, other: Self, fudge: u64) -> bool {
        self.0.saturating_sub(fudge) <= other.0
            && self.0.saturating_add(fudge) >= other.0
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&self.into_octets())
    }
}

//--- TryFrom and From

impl TryFrom<u64> for Time48 {
    type Error = Time48RangeError;

    /// Creates a value from a 64 bit integer.
    ///
    /// Fails if any of the upper 16 bits of the argument are set.
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > Time48::MAX.0 {
            Err(Time48RangeError(()))
        } else {
            Ok(Time48(value))
        }
    }
}

impl From<Time48> for u64 {
    fn from(value: Time48) -> u64 {
        value.0
    }
}

//--- Display

impl fmt::Display for Time48 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

//------------ Time48RangeError ----------------------------------------------

/// A value was too large for a 48 bit timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Time48RangeError(());

impl fmt::Display for Time48RangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("time value exceeds 48 bits")
    }
}

impl std::error::Error for Time48RangeError {}

//============ Testing =======================================================
