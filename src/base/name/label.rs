//! Domain name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use core::{cmp, fmt, hash, iter, mem, slice};
use octseq::builder::OctetsBuilder;

//------------ Label ---------------------------------------------------------

/// An octets slice with the content of a domain name label.
///
/// This is an unsized type wrapping the content of a valid label, i.e., up
/// to 63 octets of data. It only contains the label’s content, not the
/// length octet it is preceded by in wire format. As an unsized type, it
/// needs to be used behind some kind of pointer, most likely a reference.
///
/// Labels compare and hash ignoring ASCII case.
#[repr(transparent)]
pub struct Label([u8]);

/// # Creation
///
impl Label {
    /// Domain name labels have a maximum length of 63 octets.
    pub const MAX_LEN: usize = 63;

    /// Creates a label from the underlying slice without any checking.
    ///
    /// # Safety
    ///
    /// The `slice` must be at most 63 octets long.
    pub(super) unsafe fn from_slice_unchecked(slice: &[u8]) -> &Self {
        // SAFETY: Label has repr(transparent)
        mem::transmute(slice)
    }

    /// Returns a static reference to the root label.
    ///
    /// The root label is an empty label.
    #[must_use]
    pub fn root() -> &'static Self {
        unsafe { Self::from_slice_unchecked(b"") }
    }

    /// Converts an octets slice into a label.
    ///
    /// This will fail if the slice is longer than 63 octets.
    pub fn from_slice(slice: &[u8]) -> Result<&Self, LongLabelError> {
        if slice.len() > Label::MAX_LEN {
            Err(LongLabelError(()))
        } else {
            Ok(unsafe { Self::from_slice_unchecked(slice) })
        }
    }

    /// Splits a label off the beginning of a wire-format slice.
    ///
    /// Returns the label and the remainder of the slice or `None` if the
    /// slice doesn’t start with a complete normal label.
    pub(super) fn split_from(slice: &[u8]) -> Option<(&Self, &[u8])> {
        let (&len, tail) = slice.split_first()?;
        let len = usize::from(len);
        if len > Label::MAX_LEN || tail.len() < len {
            return None;
        }
        let (label, tail) = tail.split_at(len);
        Some((unsafe { Self::from_slice_unchecked(label) }, tail))
    }
}

/// # Content
///
impl Label {
    /// Returns a reference to the underlying octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Returns an iterator over the octets of the label.
    pub fn iter(&self) -> iter::Copied<slice::Iter<u8>> {
        self.as_slice().iter().copied()
    }

    /// Returns the length of the label’s content.
    ///
    /// This doesn’t include the length octet.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the label is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether this is the root label.
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the length of the composed version of the label.
    pub fn compose_len(&self) -> u16 {
        // Can’t overflow: a label is at most 63 octets long.
        self.len() as u16 + 1
    }

    /// Returns the label’s content converted to ASCII lowercase.
    pub fn to_canonical(&self) -> std::vec::Vec<u8> {
        self.0.to_ascii_lowercase()
    }

    /// Appends the wire format of the label to `target`.
    pub fn compose<Builder: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Builder,
    ) -> Result<(), Builder::AppendError> {
        target.append_slice(&[self.len() as u8])?;
        target.append_slice(self.as_slice())
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq and Eq

impl<T: AsRef<[u8]> + ?Sized> PartialEq<T> for Label {
    fn eq(&self, other: &T) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_ref())
    }
}

impl Eq for Label {}

//--- PartialOrd and Ord

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    /// Compares labels in canonical order, i.e., ignoring ASCII case.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.iter()
            .map(|ch| ch.to_ascii_lowercase())
            .cmp(other.iter().map(|ch| ch.to_ascii_lowercase()))
    }
}

//--- Hash

impl hash::Hash for Label {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Include the length in the hash so we can simply hash over the
        // labels when building a name’s hash.
        (self.len() as u8).hash(state);
        for ch in self.iter() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for ch in self.iter() {
            if ch == b' ' || ch == b'.' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                write!(f, "{}", (ch as char))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Label(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//============ Error Types ===================================================

//------------ LongLabelError ------------------------------------------------

/// A label was longer than the allowed 63 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongLabelError(());

//--- Display and Error

impl fmt::Display for LongLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long label")
    }
}

impl std::error::Error for LongLabelError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_slice() {
        let x = [0u8; 10];
        assert_eq!(Label::from_slice(&x[..]).unwrap().as_slice(), &x[..]);
        let x = [0u8; 63];
        assert_eq!(Label::from_slice(&x[..]).unwrap().as_slice(), &x[..]);
        let x = [0u8; 64];
        assert!(Label::from_slice(&x[..]).is_err());
    }

    #[test]
    fn split_from() {
        let (label, tail) = Label::split_from(b"\x03www\x07example").unwrap();
        assert_eq!(label.as_slice(), b"www");
        assert_eq!(tail, b"\x07example");

        // Truncated content and compression pointers aren’t labels.
        assert!(Label::split_from(b"\x07exa").is_none());
        assert!(Label::split_from(b"\xc0\x0c").is_none());
        assert!(Label::split_from(b"").is_none());
    }

    #[test]
    fn eq_ignores_case() {
        let lower = Label::from_slice(b"example").unwrap();
        let upper = Label::from_slice(b"ExAmPlE").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_canonical(), b"example");
        assert_ne!(lower, Label::from_slice(b"exampl").unwrap());
    }

    #[test]
    fn compose() {
        let mut buf = std::vec::Vec::new();
        Label::from_slice(b"www").unwrap().compose(&mut buf).unwrap();
        Label::root().compose(&mut buf).unwrap();
        assert_eq!(buf, b"\x03www\x00");
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", Label::from_slice(b"a.b\\c d\x7f").unwrap()),
            "a\\.b\\\\c\\ d\\127"
        );
    }
}
