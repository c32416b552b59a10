#![allow(missing_docs)]

//! Parse binary data
//!
//! Every structure in a font file is decoded through the types in this module. A `ReadScope` is
//! an immutable window onto the file buffer that remembers where it begins in the file, and a
//! `ReadCtxt` walks a scope sequentially. All reads are big-endian and bounds-checked: a read
//! that needs more bytes than remain fails with `ReadEof`, which converts into
//! `ParseError::BadEof` so that callers can tell truncation apart from every other failure.

use crate::binary::{U16Be, U32Be};
use crate::error::ParseError;
use crate::fixed::Fixed;
use crate::size;
use crate::tag::Tag;
use std::fmt;
use std::marker::PhantomData;

/// Returned when a read needs more bytes than remain in the scope.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadEof {}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReadScope<'a> {
    base: usize,
    data: &'a [u8],
}

#[derive(Clone)]
pub struct ReadCtxt<'a> {
    scope: ReadScope<'a>,
    offset: usize,
}

pub trait ReadBinary {
    type HostType<'a>: Sized; // default = Self

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError>;
}

/// Read will always succeed if sufficient bytes are available.
pub trait ReadUnchecked {
    type HostType: Sized; // default = Self

    /// The number of bytes consumed by `read_unchecked`.
    const SIZE: usize;

    /// Must read exactly `SIZE` bytes.
    /// Unsafe as it avoids per-byte bounds checking.
    unsafe fn read_unchecked<'a>(ctxt: &mut ReadCtxt<'a>) -> Self::HostType;
}

pub trait ReadFrom {
    type ReadType: ReadUnchecked;
    fn read_from(value: <Self::ReadType as ReadUnchecked>::HostType) -> Self;
}

impl<T> ReadUnchecked for T
where
    T: ReadFrom,
{
    type HostType = T;

    const SIZE: usize = T::ReadType::SIZE;

    unsafe fn read_unchecked<'a>(ctxt: &mut ReadCtxt<'a>) -> Self::HostType {
        let t = T::ReadType::read_unchecked(ctxt);
        T::read_from(t)
    }
}

impl<T> ReadBinary for T
where
    T: ReadUnchecked,
{
    type HostType<'a> = T::HostType;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        ctxt.check_avail(T::SIZE)?;
        // Safe because we have `SIZE` bytes available.
        Ok(unsafe { T::read_unchecked(ctxt) })
    }
}

/// A run of `length` fixed-size records, decoded on access.
#[derive(Clone)]
pub struct ReadArray<'a, T: ReadUnchecked> {
    scope: ReadScope<'a>,
    length: usize,
    phantom: PhantomData<T>,
}

pub struct ReadArrayIter<'a, T: ReadUnchecked> {
    scope: ReadScope<'a>,
    index: usize,
    length: usize,
    phantom: PhantomData<T>,
}

impl<'a> ReadScope<'a> {
    pub fn new(data: &'a [u8]) -> ReadScope<'a> {
        let base = 0;
        ReadScope { base, data }
    }

    /// Position of the start of this scope within the buffer it was created from.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Sub-scope starting at `offset`, empty if `offset` is past the end.
    pub fn offset(&self, offset: usize) -> ReadScope<'a> {
        let base = self.base + offset;
        let data = self.data.get(offset..).unwrap_or(&[]);
        ReadScope { base, data }
    }

    /// Sub-scope of exactly `length` bytes starting at `offset`.
    ///
    /// This is the random-access read: it has no cursor to move.
    pub fn offset_length(&self, offset: usize, length: usize) -> Result<ReadScope<'a>, ParseError> {
        if offset < self.data.len() || length == 0 {
            let data = self.data.get(offset..).unwrap_or(&[]);
            if length <= data.len() {
                let base = self.base + offset;
                let data = &data[0..length];
                Ok(ReadScope { base, data })
            } else {
                Err(ParseError::BadEof)
            }
        } else {
            Err(ParseError::BadOffset)
        }
    }

    pub fn ctxt(&self) -> ReadCtxt<'a> {
        ReadCtxt::new(*self)
    }

    pub fn read<T: ReadBinary>(&self) -> Result<T::HostType<'a>, ParseError> {
        self.ctxt().read::<T>()
    }
}

macro_rules! read_be {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self) -> Result<$ty, ReadEof> {
            self.check_avail(std::mem::size_of::<$ty>())?;
            // Safe because the bytes were checked as available above.
            Ok(<$ty>::from_be_bytes(unsafe { self.read_unchecked_bytes() }))
        }
    };
}

impl<'a> ReadCtxt<'a> {
    /// ReadCtxt is constructed by calling `ReadScope::ctxt`.
    fn new(scope: ReadScope<'a>) -> ReadCtxt<'a> {
        ReadCtxt { scope, offset: 0 }
    }

    /// Check a condition, returning `ParseError::BadVersion` if `false`.
    ///
    /// Intended for use in checking versions read from data. Example:
    ///
    /// ```
    /// use fontcheck::binary::read::ReadScope;
    /// use fontcheck::error::ParseError;
    ///
    /// let scope = ReadScope::new(&[0, 2]);
    /// let mut ctxt = scope.ctxt();
    /// let major_version = ctxt.read_u16be().expect("unable to read version");
    ///
    /// assert!(ctxt.check_version(major_version == 2).is_ok());
    /// assert_eq!(ctxt.check_version(major_version == 1), Err(ParseError::BadVersion));
    /// ```
    pub fn check_version(&self, cond: bool) -> Result<(), ParseError> {
        match cond {
            true => Ok(()),
            false => Err(ParseError::BadVersion),
        }
    }

    /// The scope from the current position to the end of the underlying scope.
    pub fn scope(&self) -> ReadScope<'a> {
        self.scope.offset(self.offset)
    }

    /// Number of bytes consumed so far, relative to the start of the scope.
    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn read<T: ReadBinary>(&mut self) -> Result<T::HostType<'a>, ParseError> {
        T::read(self)
    }

    pub fn remaining(&self) -> usize {
        self.scope.data.len().saturating_sub(self.offset)
    }

    pub(crate) fn check_avail(&self, length: usize) -> Result<(), ReadEof> {
        match self.offset.checked_add(length) {
            Some(endpos) if endpos <= self.scope.data.len() => Ok(()),
            _ => Err(ReadEof {}),
        }
    }

    /// Caller must have checked that `N` bytes are available.
    unsafe fn read_unchecked_bytes<const N: usize>(&mut self) -> [u8; N] {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.scope.data.get_unchecked(self.offset..self.offset + N));
        self.offset += N;
        bytes
    }

    read_be!(read_u8, u8);
    read_be!(read_i8, i8);
    read_be!(read_u16be, u16);
    read_be!(read_i16be, i16);
    read_be!(read_u32be, u32);
    read_be!(read_i32be, i32);
    read_be!(read_u64be, u64);
    read_be!(read_i64be, i64);

    pub fn read_tag(&mut self) -> Result<Tag, ReadEof> {
        self.read_u32be().map(Tag::from_u32)
    }

    pub fn read_fixed(&mut self) -> Result<Fixed, ReadEof> {
        self.read_u32be().map(Fixed::from_bits)
    }

    /// Skip `length` bytes, failing if fewer remain.
    pub fn skip(&mut self, length: usize) -> Result<(), ReadEof> {
        self.check_avail(length)?;
        self.offset += length;
        Ok(())
    }

    /// Read `length` records of `T`.
    ///
    /// The byte size is checked against what remains before anything is decoded, so an
    /// untrusted count can't cause a large allocation.
    pub fn read_array<T: ReadUnchecked>(
        &mut self,
        length: usize,
    ) -> Result<ReadArray<'a, T>, ParseError> {
        let byte_length = length.checked_mul(T::SIZE).ok_or(ParseError::BadEof)?;
        let scope = self.read_scope(byte_length)?;
        Ok(ReadArray {
            scope,
            length,
            phantom: PhantomData,
        })
    }

    pub fn read_scope(&mut self, length: usize) -> Result<ReadScope<'a>, ReadEof> {
        if let Ok(scope) = self.scope.offset_length(self.offset, length) {
            self.offset += length;
            Ok(scope)
        } else {
            Err(ReadEof {})
        }
    }
}

impl<'a, T: ReadUnchecked> ReadArray<'a, T> {
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The bytes backing this array.
    pub fn scope(&self) -> ReadScope<'a> {
        self.scope
    }

    pub fn get_item(&self, index: usize) -> Option<T::HostType> {
        if index < self.length {
            let mut ctxt = self.scope.offset(index * T::SIZE).ctxt();
            ctxt.check_avail(T::SIZE).ok()?;
            // Safe because we have `SIZE` bytes available.
            Some(unsafe { T::read_unchecked(&mut ctxt) })
        } else {
            None
        }
    }

    pub fn read_item(&self, index: usize) -> Result<T::HostType, ParseError> {
        self.get_item(index).ok_or(ParseError::BadIndex)
    }

    pub fn iter(&self) -> ReadArrayIter<'a, T> {
        ReadArrayIter {
            scope: self.scope,
            index: 0,
            length: self.length,
            phantom: PhantomData,
        }
    }

    pub fn to_vec(&self) -> Vec<T::HostType> {
        self.iter().collect()
    }
}

impl<'a, 'b, T: ReadUnchecked> IntoIterator for &'b ReadArray<'a, T> {
    type Item = T::HostType;
    type IntoIter = ReadArrayIter<'a, T>;
    fn into_iter(self) -> ReadArrayIter<'a, T> {
        self.iter()
    }
}

impl<'a, T: ReadUnchecked> Iterator for ReadArrayIter<'a, T> {
    type Item = T::HostType;

    fn next(&mut self) -> Option<T::HostType> {
        if self.index >= self.length {
            return None;
        }
        let mut ctxt = self.scope.offset(self.index * T::SIZE).ctxt();
        ctxt.check_avail(T::SIZE).ok()?;
        self.index += 1;
        // SAFETY: Ok because we have (at least) `SIZE` bytes available.
        Some(unsafe { T::read_unchecked(&mut ctxt) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.length - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, T: ReadUnchecked> ExactSizeIterator for ReadArrayIter<'a, T> {}

macro_rules! impl_read_unchecked {
    ($marker:ty, $host:ty, $size:expr) => {
        impl ReadUnchecked for $marker {
            type HostType = $host;

            const SIZE: usize = $size;

            unsafe fn read_unchecked<'a>(ctxt: &mut ReadCtxt<'a>) -> $host {
                <$host>::from_be_bytes(ctxt.read_unchecked_bytes())
            }
        }
    };
}

impl_read_unchecked!(U16Be, u16, size::U16);
impl_read_unchecked!(U32Be, u32, size::U32);

impl<T1, T2> ReadUnchecked for (T1, T2)
where
    T1: ReadUnchecked,
    T2: ReadUnchecked,
{
    type HostType = (T1::HostType, T2::HostType);

    const SIZE: usize = T1::SIZE + T2::SIZE;

    unsafe fn read_unchecked<'a>(ctxt: &mut ReadCtxt<'a>) -> Self::HostType {
        let t1 = T1::read_unchecked(ctxt);
        let t2 = T2::read_unchecked(ctxt);
        (t1, t2)
    }
}

impl<T1, T2, T3> ReadUnchecked for (T1, T2, T3)
where
    T1: ReadUnchecked,
    T2: ReadUnchecked,
    T3: ReadUnchecked,
{
    type HostType = (T1::HostType, T2::HostType, T3::HostType);

    const SIZE: usize = T1::SIZE + T2::SIZE + T3::SIZE;

    unsafe fn read_unchecked<'a>(ctxt: &mut ReadCtxt<'a>) -> Self::HostType {
        let t1 = T1::read_unchecked(ctxt);
        let t2 = T2::read_unchecked(ctxt);
        let t3 = T3::read_unchecked(ctxt);
        (t1, t2, t3)
    }
}

impl<'a, T> fmt::Debug for ReadArray<'a, T>
where
    T: ReadUnchecked,
    T::HostType: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_list().entries(self.iter()).finish()
    }
}
