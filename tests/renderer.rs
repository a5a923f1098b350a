mod common;

use std::str::FromStr;

use rstest::rstest;

use domain_wire::base::compress::CompressMode;
use domain_wire::base::iana::{Class, Rtype};
use domain_wire::base::name::Dname;
use domain_wire::base::record::{ComposeRecord, UnknownRecord};
use domain_wire::base::renderer::MessageRenderer;
use domain_wire::base::wire::{ComposeError, WireBuffer};

use crate::common::init_logging;

fn name(s: &str) -> Dname {
    Dname::from_str(s).unwrap()
}

fn a_record(owner: &str) -> UnknownRecord {
    UnknownRecord::new(
        name(owner),
        Rtype::A,
        Class::IN,
        3600,
        vec![192, 0, 2, 1],
    )
    .unwrap()
}

/// A message header with all fields zero.
fn header() -> WireBuffer {
    let mut buf = WireBuffer::with_capacity(512);
    buf.skip(12);
    buf
}

#[test]
fn fill_to_limit() {
    init_logging();
    let owners = [
        "example.com",
        "www.example.com",
        "mail.example.com",
        "example.org",
        "www.example.org",
        "ftp.example.com",
    ];

    let mut renderer = MessageRenderer::from_buffer(header());
    renderer.set_length_limit(100);
    let mut count = 0;
    for owner in owners {
        count += renderer.push(&a_record(owner)).unwrap();
        // The table never points beyond the message.
        if let Some(pos) = renderer.name_table().max_pos() {
            assert!(usize::from(pos) < renderer.len());
        }
        assert!(renderer.len() <= 100);
    }

    // 12 + 27 + 20 + 21 = 80. The fourth record needs 27 more octets and
    // is dropped, the fifth needs 31 and is dropped, too. The last needs
    // 20 and fits exactly.
    assert_eq!(count, 4);
    assert_eq!(renderer.len(), 100);
    assert!(renderer.is_truncated());
}

#[rstest]
#[case(CompressMode::CaseInsensitive, 27 + 16)]
#[case(CompressMode::CaseSensitive, 27 + 27)]
fn compress_modes(#[case] mode: CompressMode, #[case] len: usize) {
    init_logging();
    let mut renderer = MessageRenderer::new();
    renderer.set_compress_mode(mode).unwrap();
    renderer.push(&a_record("Example.COM")).unwrap();
    renderer.push(&a_record("example.com")).unwrap();
    assert_eq!(renderer.len(), len);
}

#[test]
fn compose_len_is_upper_bound() {
    let mut renderer = MessageRenderer::new();
    for owner in ["example.com", "www.example.com", "example.com"] {
        let record = a_record(owner);
        let before = renderer.len();
        renderer.push(&record).unwrap();
        assert!(renderer.len() - before <= record.compose_len());
    }
}

#[test]
fn truncate_and_reuse() {
    let mut renderer = MessageRenderer::new();
    renderer.push(&a_record("example.com")).unwrap();
    let mark = renderer.len();
    renderer.push(&a_record("www.example.org")).unwrap();
    renderer.truncate(mark).unwrap();
    assert_eq!(renderer.truncate(mark + 1), Err(ComposeError::Overrun));

    // example.org was dropped, so it is written in full again.
    renderer.push(&a_record("example.org")).unwrap();
    assert_eq!(renderer.len(), mark + 13 + 14);

    renderer.clear();
    renderer.push(&a_record("example.com")).unwrap();
    assert_eq!(renderer.len(), 27);
    assert_eq!(renderer.into_buffer().into_octets().len(), 27);
}
