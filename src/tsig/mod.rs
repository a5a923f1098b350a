//! Transaction signatures.
//!
//! TSIG, defined in [RFC 8945], authenticates DNS messages with a shared
//! secret. The signer calculates a MAC over the message and a few extra
//! values and appends it to the message in a TSIG record as the very last
//! record of the additional section.
//!
//! This module provides the [`TsigRecord`] in the form in which it is added
//! to a message. Calculating and checking the MAC happens elsewhere: this
//! module only needs the MAC as opaque octets.
//!
//! Both names of a TSIG record, its owner which is the name of the key and
//! the algorithm name in the record data, are always written in full. They
//! never use name compression and are never used as targets for compressing
//! names written later. This keeps the record independent of whatever else
//! is in the message, which is necessary since it is also fed into the MAC
//! calculation on its own.
//!
//! [RFC 8945]: https://tools.ietf.org/html/rfc8945

use crate::base::compress::write_name_uncompressed;
use crate::base::iana::{Class, Rtype};
use crate::base::name::Dname;
use crate::base::record::ComposeRecord;
use crate::base::renderer::MessageRenderer;
use crate::base::wire::{Compose, ComposeError, Composer, WireBuffer};
use crate::rdata::tsig::Tsig;
use core::fmt;
use core::str::FromStr;
use octseq::builder::Truncate;
use std::string::String;

//------------ Configuration Constants ---------------------------------------

/// The default number of seconds a signature time may differ from now.
///
/// This is the value recommended by RFC 8945.
pub const DEFAULT_FUDGE: u16 = 300;

//------------ TsigRecord ----------------------------------------------------

/// A complete TSIG record.
///
/// The record consists of the owner name, i.e., the name of the key used
/// for signing, and the [`Tsig`] record data. The type, class, and TTL of a
/// TSIG record are fixed: the class is always ANY and the TTL always zero.
///
/// A record is immutable. It can be added to any number of messages via
/// [`to_wire`][Self::to_wire] or written on its own via
/// [`to_wire_buffer`][Self::to_wire_buffer].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TsigRecord {
    /// The name of the key.
    owner: Dname,

    /// The record data.
    data: Tsig,
}

impl TsigRecord {
    /// The TTL of all TSIG records.
    pub const TTL: u32 = 0;

    /// Creates a new record from the key name and the record data.
    #[must_use]
    pub fn new(owner: Dname, data: Tsig) -> Self {
        TsigRecord { owner, data }
    }

    /// Returns the owner name of the record.
    pub fn owner(&self) -> &Dname {
        &self.owner
    }

    /// Returns the record data.
    pub fn data(&self) -> &Tsig {
        &self.data
    }

    /// Converts the record into its record data.
    pub fn into_data(self) -> Tsig {
        self.data
    }

    pub fn rtype(&self) -> Rtype {
        Rtype::TSIG
    }

    pub fn class(&self) -> Class {
        Class::ANY
    }

    pub fn ttl(&self) -> u32 {
        Self::TTL
    }

    /// Returns the length of the record in wire format.
    ///
    /// The length is calculated without rendering the record. Since the
    /// record never uses name compression, this is exactly the number of
    /// octets it will occupy in any message.
    pub fn length(&self) -> usize {
        usize::from(self.owner.compose_len())
            + usize::from(Rtype::COMPOSE_LEN)
            + usize::from(Class::COMPOSE_LEN)
            + usize::from(u32::COMPOSE_LEN)
            + usize::from(u16::COMPOSE_LEN)
            + usize::from(self.data.rdlen())
    }

    /// Adds the record to a message.
    ///
    /// Returns the number of records added: 1 if the record was added, 0
    /// if it didn’t fit into the length limit of the renderer. In the
    /// latter case, the renderer is marked as truncated.
    pub fn to_wire(
        &self,
        renderer: &mut MessageRenderer,
    ) -> Result<usize, ComposeError> {
        renderer.push(self)
    }

    /// Appends the record to a plain buffer.
    ///
    /// This neither involves name compression nor a length limit, so the
    /// record is always added and 1 is returned unless an error happens.
    /// In that case, the buffer is left as it was before.
    pub fn to_wire_buffer(
        &self,
        buffer: &mut WireBuffer,
    ) -> Result<usize, ComposeError> {
        let mark = buffer.len();
        match self.compose_record(buffer) {
            Ok(()) => Ok(1),
            Err(err) => {
                Truncate::truncate(buffer, mark);
                Err(err)
            }
        }
    }

    /// Returns the record in presentation format.
    ///
    /// This is the same as the output of the `Display` implementation,
    /// including the final line feed.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

//--- ComposeRecord

impl ComposeRecord for TsigRecord {
    fn compose_len(&self) -> usize {
        self.length()
    }

    fn compose_record<Target: Composer + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), ComposeError> {
        write_name_uncompressed(target, &self.owner)?;
        Rtype::TSIG.compose(target)?;
        Class::ANY.compose(target)?;
        Self::TTL.compose(target)?;
        self.data.compose_len_rdata(target)
    }
}

//--- Display

impl fmt::Display for TsigRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} {} {} {} {}",
            self.owner.fmt_with_dot(),
            Self::TTL,
            Class::ANY,
            Rtype::TSIG,
            self.data
        )
    }
}

//------------ Algorithm -----------------------------------------------------

/// The well-known TSIG algorithms.
///
/// TSIG identifies algorithms by domain name. These are the names
/// registered in the IANA TSIG Algorithm Names registry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    HmacMd5,
    GssTsig,
    HmacSha1,
    HmacSha224,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

impl Algorithm {
    const ALL: [Algorithm; 7] = [
        Algorithm::HmacMd5,
        Algorithm::GssTsig,
        Algorithm::HmacSha1,
        Algorithm::HmacSha224,
        Algorithm::HmacSha256,
        Algorithm::HmacSha384,
        Algorithm::HmacSha512,
    ];

    /// Creates a value from its domain name representation.
    ///
    /// Names are compared ignoring ASCII case. Returns `None` if the name
    /// doesn’t represent a known algorithm.
    pub fn from_dname(name: &Dname) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| {
            alg.into_wire_slice().eq_ignore_ascii_case(name.as_slice())
        })
    }

    /// Returns a octet slice with the wire-format domain name for this value.
    fn into_wire_slice(self) -> &'static [u8] {
        match self {
            Algorithm::HmacMd5 => b"\x08hmac-md5\x07sig-alg\x03reg\x03int\0",
            Algorithm::GssTsig => b"\x08gss-tsig\0",
            Algorithm::HmacSha1 => b"\x09hmac-sha1\0",
            Algorithm::HmacSha224 => b"\x0Bhmac-sha224\0",
            Algorithm::HmacSha256 => b"\x0Bhmac-sha256\0",
            Algorithm::HmacSha384 => b"\x0Bhmac-sha384\0",
            Algorithm::HmacSha512 => b"\x0Bhmac-sha512\0",
        }
    }

    /// Returns a domain name for this value.
    pub fn to_dname(self) -> Dname {
        unsafe { Dname::from_octets_unchecked(self.into_wire_slice().into()) }
    }

    /// Returns the name of the algorithm without the final dot.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::HmacMd5 => "hmac-md5.sig-alg.reg.int",
            Algorithm::GssTsig => "gss-tsig",
            Algorithm::HmacSha1 => "hmac-sha1",
            Algorithm::HmacSha224 => "hmac-sha224",
            Algorithm::HmacSha256 => "hmac-sha256",
            Algorithm::HmacSha384 => "hmac-sha384",
            Algorithm::HmacSha512 => "hmac-sha512",
        }
    }
}

//--- FromStr

impl FromStr for Algorithm {
    type Err = BadAlgorithm;

    /// Parses an algorithm name with or without the final dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = Dname::from_str(s).map_err(|_| BadAlgorithm(()))?;
        Self::from_dname(&name).ok_or(BadAlgorithm(()))
    }
}

//--- Display

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//------------ BadAlgorithm --------------------------------------------------

/// A name didn’t represent a well-known TSIG algorithm.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BadAlgorithm(());

impl fmt::Display for BadAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown TSIG algorithm")
    }
}

impl std::error::Error for BadAlgorithm {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::TsigRcode;
    use crate::rdata::tsig::Time48;

    fn record(other: Vec<u8>) -> TsigRecord {
        TsigRecord::new(
            Dname::from_str("key.example").unwrap(),
            Tsig::new(
                Algorithm::HmacSha256.to_dname(),
                Time48::try_from(1_700_000_000_u64).unwrap(),
                DEFAULT_FUDGE,
                vec![0x5a; 32],
                0x1234,
                TsigRcode::BADTIME,
                other,
            )
            .unwrap(),
        )
    }

    #[test]
    fn algorithm_names() {
        for alg in Algorithm::ALL {
            let name = alg.to_dname();
            assert_eq!(name.to_string(), alg.as_str());
            assert_eq!(Algorithm::from_dname(&name), Some(alg));
            assert_eq!(Algorithm::from_str(alg.as_str()), Ok(alg));
        }
        assert_eq!(
            Algorithm::from_str("HMAC-MD5.SIG-ALG.REG.INT."),
            Ok(Algorithm::HmacMd5)
        );
        assert_eq!(
            Algorithm::from_str("hmac-sha3"),
            Err(BadAlgorithm(()))
        );
        assert_eq!(Algorithm::from_str(""), Err(BadAlgorithm(())));
        assert_eq!(
            Algorithm::from_dname(&Dname::from_str("hmac-sha1.com").unwrap()),
            None
        );
    }

    #[test]
    fn to_wire_buffer() {
        let record = record(vec![0, 0, 0x65, 0x53, 0xf1, 0x00]);
        let mut buf = WireBuffer::new();
        buf.write_bytes(b"head");
        assert_eq!(record.to_wire_buffer(&mut buf), Ok(1));
        assert_eq!(buf.len(), 4 + record.length());
        assert_eq!(&buf.as_slice()[4..17], b"\x03key\x07example\x00");
        assert_eq!(&buf.as_slice()[17..25], b"\x00\xfa\x00\xff\0\0\0\0");
        assert_eq!(
            u16::from_be_bytes([buf.as_slice()[25], buf.as_slice()[26]]),
            record.data().rdlen()
        );
        assert_eq!(
            &buf.as_slice()[buf.len() - 8..],
            b"\x00\x06\x00\x00\x65\x53\xf1\x00"
        );
    }

    #[test]
    fn display_with_other() {
        assert_eq!(
            record(vec![0, 0, 0x65, 0x53, 0xf1, 0x00]).to_text(),
            "key.example. 0 ANY TSIG hmac-sha256. 1700000000 300 32 \
             WlpaWlpaWlpaWlpaWlpaWlpaWlpaWlpaWlpaWlpaWlo= 4660 BADTIME 6 \
             AABlU/EA\n"
        );
    }

    #[test]
    fn root_owner() {
        let record = TsigRecord::new(
            Dname::root(),
            Tsig::new(
                Algorithm::GssTsig.to_dname(),
                Time48::try_from(0_u64).unwrap(),
                0,
                Vec::new(),
                0,
                TsigRcode::NOERROR,
                Vec::new(),
            )
            .unwrap(),
        );
        assert_eq!(
            record.to_text(),
            ". 0 ANY TSIG gss-tsig. 0 0 0  0 NOERROR 0\n"
        );
        assert_eq!(record.length(), 1 + 10 + 10 + 16);
    }
}
