#![allow(dead_code)]

use domain_wire::base::iana::{Class, Rtype, TsigRcode};
use domain_wire::base::name::Dname;
use octseq::parse::{Parser, ShortInput};
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by domain-wire and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to see where names are compressed:
///   RUST_LOG=domain_wire::base::compress=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

//------------ Decoding ------------------------------------------------------

/// A record decoded from wire format.
///
/// Names must be uncompressed.
#[derive(Clone, Debug)]
pub struct DecodedRecord {
    pub owner: Dname,
    pub rtype: Rtype,
    pub class: Class,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// The fields of TSIG record data decoded from wire format.
#[derive(Clone, Debug)]
pub struct DecodedTsig {
    pub algorithm: Dname,
    pub time_signed: u64,
    pub fudge: u16,
    pub mac: Vec<u8>,
    pub original_id: u16,
    pub error: TsigRcode,
    pub other: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    ShortInput,
    CompressedName,
    BadName,
    TrailingData,
}

impl From<ShortInput> for DecodeError {
    fn from(_: ShortInput) -> Self {
        DecodeError::ShortInput
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Decodes a single record that must span all of `data`.
pub fn decode_record(data: &[u8]) -> Result<DecodedRecord, DecodeError> {
    let mut parser = Parser::from_ref(data);
    let owner = parse_name(&mut parser)?;
    let rtype = Rtype::from_int(parse_u16(&mut parser)?);
    let class = Class::from_int(parse_u16(&mut parser)?);
    let ttl = parse_u32(&mut parser)?;
    let rdlen = parse_u16(&mut parser)?;
    let rdata = parse_vec(&mut parser, rdlen.into())?;
    if parser.remaining() != 0 {
        return Err(DecodeError::TrailingData);
    }
    Ok(DecodedRecord {
        owner,
        rtype,
        class,
        ttl,
        rdata,
    })
}

/// Decodes TSIG record data that must span all of `data`.
pub fn decode_tsig(data: &[u8]) -> Result<DecodedTsig, DecodeError> {
    let mut parser = Parser::from_ref(data);
    let algorithm = parse_name(&mut parser)?;
    let mut time = [0u8; 8];
    parser.parse_buf(&mut time[2..])?;
    let fudge = parse_u16(&mut parser)?;
    let mac_size = parse_u16(&mut parser)?;
    let mac = parse_vec(&mut parser, mac_size.into())?;
    let original_id = parse_u16(&mut parser)?;
    let error = TsigRcode::from_int(parse_u16(&mut parser)?);
    let other_len = parse_u16(&mut parser)?;
    let other = parse_vec(&mut parser, other_len.into())?;
    if parser.remaining() != 0 {
        return Err(DecodeError::TrailingData);
    }
    Ok(DecodedTsig {
        algorithm,
        time_signed: u64::from_be_bytes(time),
        fudge,
        mac,
        original_id,
        error,
        other,
    })
}

/// Parses an uncompressed name.
///
/// Fails with `DecodeError::CompressedName` if a pointer is encountered.
fn parse_name(parser: &mut Parser<[u8]>) -> Result<Dname, DecodeError> {
    let mut octets = Vec::new();
    loop {
        let len = parser.parse_u8()?;
        if len & 0xC0 == 0xC0 {
            return Err(DecodeError::CompressedName);
        }
        octets.push(len);
        if len == 0 {
            break;
        }
        octets.extend_from_slice(&parse_vec(parser, len.into())?);
    }
    Dname::from_octets(octets).map_err(|_| DecodeError::BadName)
}

fn parse_u16(parser: &mut Parser<[u8]>) -> Result<u16, DecodeError> {
    let mut buf = [0u8; 2];
    parser.parse_buf(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

fn parse_u32(parser: &mut Parser<[u8]>) -> Result<u32, DecodeError> {
    let mut buf = [0u8; 4];
    parser.parse_buf(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn parse_vec(
    parser: &mut Parser<[u8]>,
    len: usize,
) -> Result<Vec<u8>, DecodeError> {
    let mut res = vec![0u8; len];
    parser.parse_buf(&mut res)?;
    Ok(res)
}
