//! Rendering messages within a length limit.
//!
//! The [`MessageRenderer`] combines a [`WireBuffer`] with a [`NameTable`]
//! and a length limit. Records are added via [`push`][MessageRenderer::push]
//! which either adds the complete record or, if the record would push the
//! message beyond its limit, nothing at all. In the latter case the
//! renderer remembers that the message has been truncated.

use super::compress::{
    write_name_compressible, write_name_uncompressed, CompressMode, NameTable,
};
use super::name::Dname;
use super::record::ComposeRecord;
use super::wire::{ComposeError, Composer, WireBuffer};
use core::convert::Infallible;
use octseq::builder::{OctetsBuilder, Truncate};
use tracing::debug;

//------------ MessageRenderer -----------------------------------------------

/// A buffer for a message that compresses names and enforces a length limit.
///
/// The renderer owns the buffer with the message data and the table of
/// names written through the compressible path. Both always describe the
/// same message: whenever data is removed from the end of the buffer, the
/// names recorded in that data are removed from the table, too.
///
/// Complete records are added through [`push`][Self::push]. If the message
/// is longer than the length limit afterwards, the record is removed again
/// and the renderer is marked as truncated. This mark stays until the
/// renderer is [cleared][Self::clear].
///
/// The renderer also implements [`Composer`], so anything that knows how to
/// compose itself can be written into it directly. Names written via
/// [`Composer::append_compressed_name`] use name compression.
#[derive(Clone, Debug)]
pub struct MessageRenderer {
    /// The message data.
    buffer: WireBuffer,

    /// The positions of names written so far.
    table: NameTable,

    /// The maximum length of the message.
    length_limit: usize,

    /// Whether a record has been dropped because of the length limit.
    truncated: bool,
}

/// # Creation and Configuration
///
impl MessageRenderer {
    /// Creates a new, empty renderer without a length limit.
    #[must_use]
    pub fn new() -> Self {
        Self::from_buffer(WireBuffer::new())
    }

    /// Creates a new renderer atop an existing buffer.
    ///
    /// The data already in `buffer` becomes the start of the message. Names
    /// in it will not be used for compression.
    #[must_use]
    pub fn from_buffer(buffer: WireBuffer) -> Self {
        MessageRenderer {
            buffer,
            table: NameTable::new(),
            length_limit: usize::MAX,
            truncated: false,
        }
    }

    /// Creates a new, empty renderer with the given length limit.
    #[must_use]
    pub fn with_limit(length_limit: usize) -> Self {
        let mut res = Self::new();
        res.set_length_limit(length_limit);
        res
    }

    /// Returns the current length limit.
    ///
    /// A renderer without a limit returns `usize::MAX`.
    pub fn length_limit(&self) -> usize {
        self.length_limit
    }

    /// Sets the length limit.
    ///
    /// The limit only applies to records pushed after this call. Data
    /// already in the message is kept even if it exceeds the new limit.
    pub fn set_length_limit(&mut self, length_limit: usize) {
        self.length_limit = length_limit
    }

    /// Returns how names are matched for compression.
    pub fn compress_mode(&self) -> CompressMode {
        self.table.mode()
    }

    /// Changes how names are matched for compression.
    ///
    /// The mode can only be changed while the renderer is empty. Otherwise
    /// the mode is left as it is and an error is returned.
    pub fn set_compress_mode(
        &mut self,
        mode: CompressMode,
    ) -> Result<(), ComposeError> {
        if !self.is_empty() {
            return Err(ComposeError::NotEmpty);
        }
        self.table = NameTable::with_mode(mode);
        Ok(())
    }

    /// Returns whether a record was dropped because of the length limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Marks the message as truncated.
    ///
    /// This can be used when content is left out for reasons other than
    /// the length limit.
    pub fn set_truncated(&mut self) {
        self.truncated = true
    }

    /// Resets the renderer so it can be used for a new message.
    ///
    /// This removes all data and names, clears the truncation mark, and
    /// restores the default length limit and compression mode.
    pub fn clear(&mut self) {
        debug!(
            "Clearing renderer with {} octets and {} names",
            self.buffer.len(),
            self.table.len()
        );
        self.buffer.clear();
        self.table = NameTable::new();
        self.length_limit = usize::MAX;
        self.truncated = false;
    }
}

/// # Access to the Message
///
impl MessageRenderer {
    /// Returns the length of the message so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns whether the message is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the message data.
    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Returns a reference to the underlying buffer.
    pub fn as_buffer(&self) -> &WireBuffer {
        &self.buffer
    }

    /// Returns a reference to the name table.
    pub fn name_table(&self) -> &NameTable {
        &self.table
    }

    /// Converts the renderer into the underlying buffer.
    pub fn into_buffer(self) -> WireBuffer {
        self.buffer
    }
}

/// # Writing
///
impl MessageRenderer {
    /// Appends a name.
    ///
    /// If `compress` is `true`, the name is written using name compression
    /// and recorded as a target for later names. Otherwise the full name is
    /// written and the name table is left alone.
    ///
    /// Names are not subject to the length limit.
    pub fn write_name(&mut self, name: &Dname, compress: bool) {
        let res = if compress {
            write_name_compressible(&mut self.buffer, &mut self.table, name)
        } else {
            write_name_uncompressed(&mut self.buffer, name)
        };
        infallible(res)
    }

    /// Appends a complete record.
    ///
    /// Returns the number of records added: 1 if the record was added and
    /// 0 if adding it would have exceeded the length limit. In the latter
    /// case, the message is left exactly as it was before the call and the
    /// renderer is marked as truncated. Records can still be pushed
    /// afterwards and are added if they fit but the mark stays.
    ///
    /// If composing the record fails, the message is equally restored and
    /// the error is returned.
    pub fn push<R: ComposeRecord + ?Sized>(
        &mut self,
        record: &R,
    ) -> Result<usize, ComposeError> {
        self.render(|target| record.compose_record(target))
    }

    /// Runs `op` and keeps what it wrote only if the message stays in limit.
    fn render<F>(&mut self, op: F) -> Result<usize, ComposeError>
    where
        F: FnOnce(&mut Self) -> Result<(), ComposeError>,
    {
        let mark = self.buffer.len();
        if let Err(err) = op(self) {
            self.rollback(mark);
            return Err(err);
        }
        if self.buffer.len() > self.length_limit {
            debug!(
                "Record of {} octets at {} exceeds length limit {}",
                self.buffer.len() - mark,
                mark,
                self.length_limit
            );
            self.rollback(mark);
            self.truncated = true;
            return Ok(0);
        }
        Ok(1)
    }

    /// Truncates the message to `mark` octets.
    ///
    /// All names recorded in the removed part are dropped from the name
    /// table. Fails if `mark` is beyond the end of the message.
    pub fn truncate(&mut self, mark: usize) -> Result<(), ComposeError> {
        self.buffer.truncate(mark)?;
        self.table.truncate(mark);
        Ok(())
    }

    /// Removes everything after `mark` from the buffer and the table.
    fn rollback(&mut self, mark: usize) {
        Truncate::truncate(&mut self.buffer, mark);
        self.table.truncate(mark);
    }
}

//--- Default

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

//--- AsRef and AsMut

impl AsRef<[u8]> for MessageRenderer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for MessageRenderer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut()
    }
}

//--- OctetsBuilder, Truncate, and Composer

impl OctetsBuilder for MessageRenderer {
    type AppendError = Infallible;

    fn append_slice(
        &mut self,
        slice: &[u8],
    ) -> Result<(), Self::AppendError> {
        self.buffer.append_slice(slice)
    }
}

impl Truncate for MessageRenderer {
    fn truncate(&mut self, len: usize) {
        if len < self.buffer.len() {
            self.rollback(len)
        }
    }
}

impl Composer for MessageRenderer {
    fn append_compressed_name(
        &mut self,
        name: &Dname,
    ) -> Result<(), Self::AppendError> {
        write_name_compressible(&mut self.buffer, &mut self.table, name)
    }

    fn can_compress(&self) -> bool {
        true
    }
}

//------------ Helpers -------------------------------------------------------

fn infallible(res: Result<(), Infallible>) {
    match res {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

//============ Testing =======================================================
