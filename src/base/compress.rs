//! Domain name compression.
//!
//! Domain name compression lowers the size of a DNS message by replacing a
//! repeated name suffix with a two octet pointer to an earlier occurrence of
//! that suffix in the message. The pointer has its two top bits set and
//! carries the offset of the earlier occurrence in its remaining 14 bits.
//! Consequently, only names starting within the first 16384 octets of a
//! message can ever be pointed to.
//!
//! This module provides the [`NameTable`] that remembers where names have
//! been written as well as the two functions for writing names:
//! [`write_name_compressible`] consults and updates a table while
//! [`write_name_uncompressed`] always writes the complete name and never
//! touches a table.

use super::name::{Dname, Label};
use octseq::builder::OctetsBuilder;
use std::collections::HashMap;
use std::vec::Vec;
use tracing::trace;

//------------ CompressMode --------------------------------------------------

/// How the labels of names are matched against the table.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CompressMode {
    /// Labels match if they are equal when ignoring ASCII case.
    ///
    /// This is the default since that is how domain names compare.
    #[default]
    CaseInsensitive,

    /// Labels only match if they are exactly equal.
    ///
    /// This keeps the original case of all names in the message intact.
    CaseSensitive,
}

//------------ NameTable -----------------------------------------------------

/// A table of the positions of names previously written to a message.
///
/// The table records the offset of the first occurrence of each name and
/// each of its suffixes. Only offsets below 16384 are recorded since others
/// can’t be expressed by a compression pointer.
///
/// The table is a tree that follows the labels of the names from the root
/// towards the left. Each node stands for the name traced by the path from
/// the root to it and contains the position of that name in the message if
/// it has been written.
///
/// If the message is truncated, the table needs to be truncated at the same
/// position via [`truncate`][Self::truncate] so that it never refers to data
/// that is no longer there.
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    /// The node for the root name.
    start: Node,

    /// The number of names recorded.
    len: usize,

    /// How labels are matched.
    mode: CompressMode,
}

/// A node in the tree.
#[derive(Clone, Debug, Default)]
struct Node {
    /// The labels immediately to the left of this name and their nodes.
    parents: HashMap<Vec<u8>, Node>,

    /// The position of this name in the message.
    pos: Option<u16>,
}

impl NameTable {
    /// The first offset that cannot be a compression target.
    pub const MAX_POS: usize = 0x4000;

    /// Creates a new, empty, case-insensitive table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty table using the given mode.
    #[must_use]
    pub fn with_mode(mode: CompressMode) -> Self {
        NameTable {
            mode,
            ..Default::default()
        }
    }

    /// Returns the mode used for matching labels.
    pub fn mode(&self) -> CompressMode {
        self.mode
    }

    /// Returns the number of names recorded in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the position of the first occurrence of `name`.
    ///
    /// The root name is never recorded.
    pub fn get(&self, name: &Dname) -> Option<u16> {
        let labels = labels(name);
        match self.longest_suffix(&labels) {
            Some((0, pos)) => Some(pos),
            _ => None,
        }
    }

    /// Records `pos` as the position of `name` and all its suffixes.
    ///
    /// Names and suffixes already in the table keep their earlier
    /// position. If `pos` can’t be used in a compression pointer, nothing
    /// is recorded and `false` is returned.
    pub fn insert(&mut self, name: &Dname, pos: usize) -> bool {
        if pos >= Self::MAX_POS {
            return false;
        }
        let labels = labels(name);
        let mut pos = pos;
        for idx in 0..labels.len() {
            self.insert_labels(&labels[idx..], pos);
            pos += usize::from(labels[idx].compose_len());
            if pos >= Self::MAX_POS {
                break;
            }
        }
        true
    }

    /// Forgets all names recorded at or beyond `mark`.
    pub fn truncate(&mut self, mark: usize) {
        if mark >= Self::MAX_POS {
            return;
        }
        // Can’t truncate: mark is smaller than MAX_POS.
        self.len = self.start.drop_from(mark as u16);
    }

    /// Removes all names from the table.
    ///
    /// The mode of the table is kept.
    pub fn clear(&mut self) {
        self.start = Node::default();
        self.len = 0;
    }

    /// Returns the largest position recorded in the table.
    pub fn max_pos(&self) -> Option<u16> {
        self.start.max_pos()
    }

    /// Returns the key used for a label.
    fn key(&self, label: &Label) -> Vec<u8> {
        match self.mode {
            CompressMode::CaseInsensitive => label.to_canonical(),
            CompressMode::CaseSensitive => label.as_slice().into(),
        }
    }

    /// Finds the longest suffix of `labels` that is in the table.
    ///
    /// The labels are those of a name from left to right without the root
    /// label. Returns the index of the first label of the suffix and its
    /// position.
    fn longest_suffix(&self, labels: &[&Label]) -> Option<(usize, u16)> {
        let mut node = &self.start;
        let mut res = None;
        for (idx, label) in labels.iter().enumerate().rev() {
            node = match node.parents.get(&self.key(label)) {
                Some(node) => node,
                None => break,
            };
            if let Some(pos) = node.pos {
                res = Some((idx, pos))
            }
        }
        res
    }

    /// Records a single name given as its non-root labels.
    fn insert_labels(&mut self, labels: &[&Label], pos: usize) {
        debug_assert!(pos < Self::MAX_POS);
        if labels.is_empty() {
            return;
        }
        let keys: Vec<_> =
            labels.iter().map(|label| self.key(label)).collect();
        let mut node = &mut self.start;
        for key in keys.into_iter().rev() {
            node = node.parents.entry(key).or_default();
        }
        if node.pos.is_none() {
            node.pos = Some(pos as u16);
            self.len += 1;
        }
    }
}

impl Node {
    /// Drops all positions at or beyond `mark`.
    ///
    /// Removes nodes that neither have a position nor parents. Returns the
    /// number of positions remaining in this subtree.
    fn drop_from(&mut self, mark: u16) -> usize {
        let mut count = 0;
        self.parents.retain(|_, node| {
            count += node.drop_from(mark);
            node.pos.is_some() || !node.parents.is_empty()
        });
        match self.pos {
            Some(pos) if pos < mark => count + 1,
            _ => {
                self.pos = None;
                count
            }
        }
    }

    fn max_pos(&self) -> Option<u16> {
        self.parents
            .values()
            .filter_map(Node::max_pos)
            .chain(self.pos)
            .max()
    }
}

/// Returns the labels of a name without the root label.
fn labels(name: &Dname) -> Vec<&Label> {
    name.iter().take_while(|label| !label.is_root()).collect()
}

//------------ Writing Names -------------------------------------------------

/// Appends a name to `target` using name compression.
///
/// If a suffix of `name` has been recorded in `table`, only the labels
/// before that suffix are written, followed by a pointer to the suffix.
/// Otherwise the complete name is written. In either case, the positions of
/// all newly written suffixes are recorded in `table`.
///
/// The target’s current length is taken as the position in the message, so
/// `target` must contain the complete message from its start.
///
/// If appending fails, the table may contain positions beyond the end of
/// the target. Callers that continue using the target need to truncate both
/// back to a common mark.
pub fn write_name_compressible<Target>(
    target: &mut Target,
    table: &mut NameTable,
    name: &Dname,
) -> Result<(), Target::AppendError>
where
    Target: OctetsBuilder + AsRef<[u8]> + ?Sized,
{
    let labels = labels(name);
    let suffix = table.longest_suffix(&labels);
    let literal = match suffix {
        Some((idx, _)) => idx,
        None => labels.len(),
    };
    for idx in 0..literal {
        let pos = target.as_ref().len();
        if pos < NameTable::MAX_POS {
            table.insert_labels(&labels[idx..], pos);
        }
        labels[idx].compose(target)?;
    }
    match suffix {
        Some((_, pos)) => {
            trace!("Compressing name {name} with pointer to {pos}");
            target.append_slice(&(pos | 0xC000).to_be_bytes())
        }
        None => Label::root().compose(target),
    }
}

/// Appends the complete, uncompressed name to `target`.
///
/// This never consults or updates any name table. Names written this way
/// will not serve as targets for later compression pointers.
pub fn write_name_uncompressed<Target>(
    target: &mut Target,
    name: &Dname,
) -> Result<(), Target::AppendError>
where
    Target: OctetsBuilder + ?Sized,
{
    name.compose(target)
}

//============ Testing =======================================================
