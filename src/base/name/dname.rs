//! Uncompressed, absolute domain names.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::label::Label;
use core::str::FromStr;
use core::{fmt, hash};
use octseq::builder::OctetsBuilder;
use std::vec::Vec;

//------------ Dname ---------------------------------------------------------

/// An uncompressed, absolute domain name.
///
/// The type holds the wire-format representation of a domain name: a
/// sequence of labels, each preceded by its length octet, ending in the
/// root label. It is guaranteed to be valid, i.e., no label is longer than
/// 63 octets, there are no compression pointers, and the whole name is no
/// longer than 255 octets.
///
/// Names compare and hash ignoring ASCII case. If you need the exact
/// octets, use [`as_slice`][Self::as_slice].
///
/// A name can be created from its wire format via
/// [`from_octets`][Self::from_octets] or [`from_slice`][Self::from_slice],
/// from a sequence of labels via [`from_labels`][Self::from_labels], or
/// from its presentation format through the `FromStr` trait:
///
/// ```
/// use domain_wire::base::name::Dname;
///
/// let name: Dname = "www.example.com".parse().unwrap();
/// assert_eq!(name.as_slice(), b"\x03www\x07example\x03com\x00");
/// assert_eq!(name.to_string(), "www.example.com");
/// ```
#[derive(Clone)]
pub struct Dname(Vec<u8>);

/// # Creating Values
///
impl Dname {
    /// Names have a maximum length of 255 octets in wire format.
    pub const MAX_LEN: usize = 255;

    /// Creates a domain name from an octets vec without checking.
    ///
    /// # Safety
    ///
    /// The octets must contain a valid uncompressed absolute name.
    pub(crate) unsafe fn from_octets_unchecked(octets: Vec<u8>) -> Self {
        Dname(octets)
    }

    /// Creates a domain name from an octets vec.
    ///
    /// This will only succeed if `octets` contains a properly encoded
    /// absolute domain name in wire format without compression pointers.
    pub fn from_octets(octets: Vec<u8>) -> Result<Self, DnameError> {
        Self::check_slice(&octets)?;
        Ok(unsafe { Self::from_octets_unchecked(octets) })
    }

    /// Creates a domain name by copying the wire format in `slice`.
    pub fn from_slice(slice: &[u8]) -> Result<Self, DnameError> {
        Self::check_slice(slice)?;
        Ok(unsafe { Self::from_octets_unchecked(slice.into()) })
    }

    /// Creates the root name.
    #[must_use]
    pub fn root() -> Self {
        unsafe { Self::from_octets_unchecked(vec![0]) }
    }

    /// Creates a domain name from a sequence of labels.
    ///
    /// The labels are taken up to and excluding the first root label. The
    /// root label is always added at the end.
    pub fn from_labels<'a, I>(labels: I) -> Result<Self, DnameError>
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let mut octets = Vec::new();
        for label in labels {
            if label.is_root() {
                break;
            }
            if octets.len() + usize::from(label.compose_len()) + 1
                > Self::MAX_LEN
            {
                return Err(DnameError::LongName);
            }
            octets.push(label.len() as u8);
            octets.extend_from_slice(label.as_slice());
        }
        octets.push(0);
        Ok(unsafe { Self::from_octets_unchecked(octets) })
    }

    /// Checks whether `slice` is a valid uncompressed absolute name.
    fn check_slice(mut slice: &[u8]) -> Result<(), DnameError> {
        if slice.len() > Self::MAX_LEN {
            return Err(DnameError::LongName);
        }
        loop {
            let (&len, tail) = match slice.split_first() {
                Some(some) => some,
                None => return Err(DnameError::ShortInput),
            };
            match len {
                0 => {
                    if tail.is_empty() {
                        return Ok(());
                    } else {
                        return Err(DnameError::TrailingData);
                    }
                }
                1..=0x3F => {}
                0xC0..=0xFF => return Err(DnameError::CompressedName),
                _ => return Err(DnameError::BadLabel),
            }
            let len = usize::from(len);
            if tail.len() < len {
                return Err(DnameError::ShortInput);
            }
            slice = &tail[len..];
        }
    }
}

/// # Conversions
///
impl Dname {
    /// Returns a reference to the wire format of the name.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Converts the name into its underlying octets vec.
    pub fn into_octets(self) -> Vec<u8> {
        self.0
    }

    /// Returns a copy of the name with all ASCII letters lowercased.
    #[must_use]
    pub fn to_canonical(&self) -> Self {
        // Length octets are never ASCII letters, so this keeps the name
        // valid.
        unsafe { Self::from_octets_unchecked(self.0.to_ascii_lowercase()) }
    }
}

/// # Properties
///
impl Dname {
    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns the length of the name in uncompressed wire format.
    pub fn compose_len(&self) -> u16 {
        // Can’t overflow: a name is at most 255 octets long.
        self.0.len() as u16
    }

    /// Returns the number of labels in the name, including the root label.
    pub fn label_count(&self) -> usize {
        self.iter().count()
    }

    /// Returns whether two names are equal when ignoring ASCII case.
    ///
    /// This is the same as the `PartialEq` implementation and is provided
    /// for clarity at call sites where case may matter.
    pub fn name_eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

/// # Working with Labels
///
impl Dname {
    /// Returns an iterator over the labels of the name.
    ///
    /// The iterator starts with the leftmost label and ends with the root
    /// label.
    pub fn iter(&self) -> DnameIter {
        DnameIter::new(self.as_slice())
    }

    /// Returns an iterator over the suffixes of the name.
    ///
    /// The iterator yields the wire format of each suffix, starting with
    /// the complete name and ending with the root name. Each item is itself
    /// a valid uncompressed name. Its offset within the name is the
    /// difference between the name’s length and the suffix’s length.
    pub fn suffixes(&self) -> SuffixIter {
        SuffixIter::new(self.as_slice())
    }

    /// Returns the first label of the name.
    pub fn first(&self) -> &Label {
        match Label::split_from(self.as_slice()) {
            Some((label, _)) => label,
            None => Label::root(),
        }
    }

    /// Returns an object that displays the name with a final dot.
    ///
    /// The root name is displayed as a single dot in either case.
    pub fn fmt_with_dot(&self) -> impl fmt::Display + '_ {
        struct WithDot<'a>(&'a Dname);

        impl<'a> fmt::Display for WithDot<'a> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if self.0.is_root() {
                    f.write_str(".")
                } else {
                    write!(f, "{}.", self.0)
                }
            }
        }

        WithDot(self)
    }
}

/// # Composing
///
impl Dname {
    /// Appends the uncompressed wire format of the name to `target`.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(self.as_slice())
    }
}

//--- FromStr

impl FromStr for Dname {
    type Err = FromStrError;

    /// Parses a string into an absolute domain name.
    ///
    /// The name needs to be formatted in representation format, i.e., as a
    /// sequence of labels separated by dots. Within a label, a backslash
    /// followed by three decimal digits encodes the octet with that value
    /// and a backslash followed by any other printable character encodes
    /// that character. The final dot is optional. A single dot is the root
    /// name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Self::root());
        }
        let mut octets = Vec::with_capacity(s.len() + 2);
        let mut label = Vec::new();
        let mut trailing_dot = false;
        let mut chars = s.chars();
        while let Some(ch) = chars.next() {
            trailing_dot = false;
            match ch {
                '.' => {
                    push_label(&mut octets, &label)?;
                    label.clear();
                    trailing_dot = true;
                    continue;
                }
                '\\' => label.push(parse_escape(&mut chars)?),
                ch if ch.is_ascii_graphic() => label.push(ch as u8),
                ch => return Err(FromStrError::IllegalCharacter(ch)),
            }
            if label.len() > Label::MAX_LEN {
                return Err(FromStrError::LongLabel);
            }
        }
        if !trailing_dot {
            push_label(&mut octets, &label)?;
        }
        if octets.len() + 1 > Self::MAX_LEN {
            return Err(FromStrError::LongName);
        }
        octets.push(0);
        Ok(unsafe { Self::from_octets_unchecked(octets) })
    }
}

/// Appends a non-empty label to a name under construction.
fn push_label(octets: &mut Vec<u8>, label: &[u8]) -> Result<(), FromStrError> {
    if label.is_empty() {
        return Err(FromStrError::EmptyLabel);
    }
    if octets.len() + label.len() + 1 >= Dname::MAX_LEN {
        return Err(FromStrError::LongName);
    }
    octets.push(label.len() as u8);
    octets.extend_from_slice(label);
    Ok(())
}

/// Parses the rest of an escape sequence after the backslash.
fn parse_escape(
    chars: &mut impl Iterator<Item = char>,
) -> Result<u8, FromStrError> {
    let ch = chars.next().ok_or(FromStrError::UnexpectedEnd)?;
    if let Some(first) = ch.to_digit(10) {
        let mut value = first;
        for _ in 0..2 {
            let digit = chars
                .next()
                .ok_or(FromStrError::UnexpectedEnd)?
                .to_digit(10)
                .ok_or(FromStrError::IllegalEscape)?;
            value = value * 10 + digit;
        }
        u8::try_from(value).map_err(|_| FromStrError::IllegalEscape)
    } else if ch.is_ascii_graphic() || ch == ' ' {
        Ok(ch as u8)
    } else {
        Err(FromStrError::IllegalEscape)
    }
}

//--- AsRef

impl AsRef<[u8]> for Dname {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq and Eq

impl PartialEq for Dname {
    fn eq(&self, other: &Self) -> bool {
        self.name_eq(other)
    }
}

impl Eq for Dname {}

//--- Hash

impl hash::Hash for Dname {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for label in self.iter() {
            label.hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Dname {
    /// Formats the domain name.
    ///
    /// This will produce the domain name in ‘common display format’ without
    /// the trailing dot with the exception of a root name which will be
    /// printed as a single dot.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        let mut first = true;
        for label in self.iter() {
            if label.is_root() {
                break;
            }
            if first {
                first = false;
            } else {
                f.write_str(".")?;
            }
            label.fmt(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Dname {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Dname({})", self.fmt_with_dot())
    }
}

//------------ DnameIter -----------------------------------------------------

/// An iterator over the labels in an uncompressed name.
#[derive(Clone, Debug)]
pub struct DnameIter<'a> {
    slice: &'a [u8],
}

impl<'a> DnameIter<'a> {
    pub(super) fn new(slice: &'a [u8]) -> Self {
        DnameIter { slice }
    }
}

impl<'a> Iterator for DnameIter<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        let (label, tail) = Label::split_from(self.slice)?;
        self.slice = tail;
        Some(label)
    }
}

//------------ SuffixIter ----------------------------------------------------

/// An iterator over the wire format of the suffixes of a name.
#[derive(Clone, Debug)]
pub struct SuffixIter<'a> {
    slice: &'a [u8],
}

impl<'a> SuffixIter<'a> {
    pub(super) fn new(slice: &'a [u8]) -> Self {
        SuffixIter { slice }
    }
}

impl<'a> Iterator for SuffixIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let res = self.slice;
        let (_, tail) = Label::split_from(res)?;
        self.slice = tail;
        Some(res)
    }
}

//============ Error Types ===================================================

//------------ DnameError ----------------------------------------------------

/// A domain name wasn’t encoded correctly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DnameError {
    /// The encoding contained an unknown or disallowed label type.
    BadLabel,

    /// The encoding contained a compression pointer.
    CompressedName,

    /// The name was longer than 255 octets.
    LongName,

    /// There was more data after the root label was encountered.
    TrailingData,

    /// The input ended in the middle of a label.
    ShortInput,
}

//--- Display and Error

impl fmt::Display for DnameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DnameError::BadLabel => f.write_str("invalid label type"),
            DnameError::CompressedName => {
                f.write_str("compressed domain name")
            }
            DnameError::LongName => f.write_str("long domain name"),
            DnameError::TrailingData => f.write_str("trailing data"),
            DnameError::ShortInput => f.write_str("unexpected end of input"),
        }
    }
}

impl std::error::Error for DnameError {}

//------------ FromStrError --------------------------------------------------

/// An error happened while parsing a domain name from a string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// A label was empty.
    ///
    /// This happens for the empty string and for two dots in a row.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets.
    LongName,

    /// The string ended in the middle of an escape sequence.
    UnexpectedEnd,

    /// An escape sequence was invalid.
    IllegalEscape,

    /// A character was encountered that isn’t allowed in a name.
    ///
    /// Only printable ASCII characters are allowed unescaped.
    IllegalCharacter(char),
}

//--- Display and Error

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FromStrError::EmptyLabel => f.write_str("empty label"),
            FromStrError::LongLabel => f.write_str("long label"),
            FromStrError::LongName => f.write_str("long domain name"),
            FromStrError::UnexpectedEnd => {
                f.write_str("unexpected end of input")
            }
            FromStrError::IllegalEscape => {
                f.write_str("illegal escape sequence")
            }
            FromStrError::IllegalCharacter(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
        }
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::string::ToString;

    #[test]
    fn root() {
        let root = Dname::root();
        assert_eq!(root.as_slice(), b"\0");
        assert!(root.is_root());
        assert_eq!(root.compose_len(), 1);
        assert_eq!(root.label_count(), 1);
        assert_eq!(root.to_string(), ".");
        assert_eq!(root.fmt_with_dot().to_string(), ".");
        assert_eq!(Dname::from_str(".").unwrap(), root);
    }

    #[test]
    fn from_slice() {
        assert!(Dname::from_slice(b"\x03www\x07example\x03com\0").is_ok());
        assert_eq!(
            Dname::from_slice(b"\x03www\x07example\x03com"),
            Err(DnameError::ShortInput)
        );
        assert_eq!(
            Dname::from_slice(b"\x03www\x07exa"),
            Err(DnameError::ShortInput)
        );
        assert_eq!(
            Dname::from_slice(b"\x03www\xc0\x0c"),
            Err(DnameError::CompressedName)
        );
        assert_eq!(
            Dname::from_slice(b"\x03www\x41"),
            Err(DnameError::BadLabel)
        );
        assert_eq!(
            Dname::from_slice(b"\x03www\0\0"),
            Err(DnameError::TrailingData)
        );
        assert_eq!(Dname::from_slice(b""), Err(DnameError::ShortInput));

        // 127 two octet labels plus root is 255 octets.
        let mut slice = b"\x01a".repeat(127);
        slice.push(0);
        assert!(Dname::from_slice(&slice).is_ok());
        slice.insert(0, b'a');
        slice.insert(0, 1);
        assert_eq!(Dname::from_slice(&slice), Err(DnameError::LongName));
    }

    #[test]
    fn from_labels() {
        let name = Dname::from_labels([
            Label::from_slice(b"www").unwrap(),
            Label::from_slice(b"example").unwrap(),
            Label::root(),
        ])
        .unwrap();
        assert_eq!(name.as_slice(), b"\x03www\x07example\0");

        let label = Label::from_slice(&[b'x'; 63]).unwrap();
        assert_eq!(
            Dname::from_labels([label, label, label, label]),
            Err(DnameError::LongName)
        );
        assert!(Dname::from_labels([label, label, label]).is_ok());
    }

    #[test]
    fn from_str() {
        let name = Dname::from_str("www.example.com").unwrap();
        assert_eq!(name.as_slice(), b"\x03www\x07example\x03com\0");
        assert_eq!(Dname::from_str("www.example.com.").unwrap(), name);
        assert_eq!(
            Dname::from_str("a\\.b\\046c\\000").unwrap().as_slice(),
            b"\x06a.b.c\x00\0"
        );

        assert_eq!(Dname::from_str(""), Err(FromStrError::EmptyLabel));
        assert_eq!(Dname::from_str("a..b"), Err(FromStrError::EmptyLabel));
        assert_eq!(Dname::from_str(".a"), Err(FromStrError::EmptyLabel));
        assert_eq!(Dname::from_str("a\\"), Err(FromStrError::UnexpectedEnd));
        assert_eq!(Dname::from_str("a\\2"), Err(FromStrError::UnexpectedEnd));
        assert_eq!(
            Dname::from_str("a\\256"),
            Err(FromStrError::IllegalEscape)
        );
        assert_eq!(
            Dname::from_str("a\\1x3"),
            Err(FromStrError::IllegalEscape)
        );
        assert_eq!(
            Dname::from_str("a b"),
            Err(FromStrError::IllegalCharacter(' '))
        );
        assert_eq!(
            Dname::from_str("ä"),
            Err(FromStrError::IllegalCharacter('ä'))
        );
        assert_eq!(
            Dname::from_str(&"x".repeat(64)),
            Err(FromStrError::LongLabel)
        );
        assert!(Dname::from_str(&"x".repeat(63)).is_ok());

        let long = vec!["x".repeat(63); 4].join(".");
        assert_eq!(Dname::from_str(&long), Err(FromStrError::LongName));
        let fits = format!(
            "{}.{}",
            vec!["x".repeat(63); 3].join("."),
            "x".repeat(61)
        );
        assert_eq!(Dname::from_str(&fits).unwrap().compose_len(), 255);
    }

    #[test]
    fn display() {
        let name = Dname::from_str("www.Example.com.").unwrap();
        assert_eq!(name.to_string(), "www.Example.com");
        assert_eq!(name.fmt_with_dot().to_string(), "www.Example.com.");
        assert_eq!(format!("{:?}", name), "Dname(www.Example.com.)");
        assert_eq!(
            Dname::from_slice(b"\x03a.b\0").unwrap().to_string(),
            "a\\.b"
        );
    }

    #[test]
    fn eq_and_hash_ignore_case() {
        fn hash(name: &Dname) -> u64 {
            let mut hasher = DefaultHasher::new();
            name.hash(&mut hasher);
            hasher.finish()
        }

        let lower = Dname::from_str("www.example.com").unwrap();
        let upper = Dname::from_str("WWW.Example.COM").unwrap();
        assert_eq!(lower, upper);
        assert!(lower.name_eq(&upper));
        assert_eq!(hash(&lower), hash(&upper));
        assert_ne!(lower.as_slice(), upper.as_slice());
        assert_eq!(upper.to_canonical().as_slice(), lower.as_slice());
        assert_ne!(lower, Dname::from_str("www.example.org").unwrap());
    }

    #[test]
    fn iter_and_suffixes() {
        let name = Dname::from_str("www.example.com").unwrap();
        let labels: Vec<_> = name.iter().map(Label::as_slice).collect();
        assert_eq!(labels, [&b"www"[..], b"example", b"com", b""]);
        assert_eq!(name.label_count(), 4);
        assert_eq!(name.first().as_slice(), b"www");

        let suffixes: Vec<_> = name.suffixes().collect();
        assert_eq!(
            suffixes,
            [
                &b"\x03www\x07example\x03com\0"[..],
                b"\x07example\x03com\0",
                b"\x03com\0",
                b"\0",
            ]
        );
    }

    #[test]
    fn compose() {
        let name = Dname::from_str("example.com").unwrap();
        let mut buf = Vec::new();
        name.compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x07example\x03com\0");
        assert_eq!(usize::from(name.compose_len()), buf.len());
    }
}
