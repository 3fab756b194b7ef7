//! Where a [ByteParser](crate::parser::ByteParser) reads its bytes from.
//!
//! - [ByteSource]: the cursor interface the parser is generic over
//! - [SliceByteSource]: cursor over a borrowed byte slice, e.g. one line of
//!   a tree stream

// =#========================================================================#=
// BYTE SOURCE (Trait)
// =#========================================================================#=
/// Forward-only cursor over bytes.
pub trait ByteSource {
    /// Current byte, `None` at end of data.
    fn peek(&self) -> Option<u8>;

    /// Current byte, advancing past it; `None` at end of data.
    fn next_byte(&mut self) -> Option<u8>;

    /// Up to `k` bytes from the current position, for error context.
    fn context(&self, k: usize) -> &[u8];

    /// Number of bytes consumed so far.
    fn position(&self) -> usize;

    fn is_eof(&self) -> bool {
        self.peek().is_none()
    }
}

// =#========================================================================#=
// SLICE BYTE SOURCE
// =#========================================================================#=
/// [ByteSource] over a borrowed slice; nothing is copied.
#[derive(Debug, Clone, Copy)]
pub struct SliceByteSource<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceByteSource<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

impl ByteSource for SliceByteSource<'_> {
    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline(always)]
    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn context(&self, k: usize) -> &[u8] {
        let rest = self.remaining();
        &rest[..k.min(rest.len())]
    }

    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
