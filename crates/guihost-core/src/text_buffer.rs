//! Fixed-capacity text storage for text-input widgets.

use std::any::TypeId;
use std::ops::Range;

use egui::TextBuffer;

/// A UTF-8 text buffer that never grows beyond `N` bytes.
///
/// Inserts that would overflow are cut at the last character boundary that
/// still fits, so pasting or typing past the end silently drops the excess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTextBuffer<const N: usize> {
    text: String,
}

impl<const N: usize> FixedTextBuffer<N> {
    /// Maximum number of bytes the buffer holds.
    pub const CAPACITY: usize = N;

    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            text: String::with_capacity(N),
        }
    }

    /// Creates a buffer holding as much of `text` as fits.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.insert_text(text, 0);
        buffer
    }

    /// Current contents.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        N - self.text.len()
    }
}

/// Longest prefix of `text` of at most `max_bytes` that ends on a char boundary.
fn fitting_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(idx, _)| idx)
}

impl<const N: usize> TextBuffer for FixedTextBuffer<N> {
    fn is_mutable(&self) -> bool {
        true
    }

    fn as_str(&self) -> &str {
        &self.text
    }

    fn insert_text(&mut self, text: &str, char_index: usize) -> usize {
        let accepted = fitting_prefix(text, self.remaining());
        if accepted.len() < text.len() {
            log::trace!(
                "text buffer full ({N} bytes), dropped {} bytes",
                text.len() - accepted.len()
            );
        }
        let at = byte_index(&self.text, char_index);
        self.text.insert_str(at, accepted);
        accepted.chars().count()
    }

    fn delete_char_range(&mut self, char_range: Range<usize>) {
        if char_range.start >= char_range.end {
            return;
        }
        let start = byte_index(&self.text, char_range.start);
        let end = byte_index(&self.text, char_range.end);
        self.text.drain(start..end);
    }

    fn clear(&mut self) {
        self.text.clear();
    }

    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}
