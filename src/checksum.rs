#![deny(missing_docs)]

//! Table and whole-file checksums.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#calculating-checksums>

use std::num::Wrapping;

use byteorder::{BigEndian, ByteOrder};

use crate::binary::long_align;
use crate::binary::read::ReadScope;
use crate::error::ParseError;

/// `checkSumAdjustment` is this value minus the checksum of the whole file.
pub const CHECKSUM_ADJUSTMENT_MAGIC: u32 = 0xB1B0AFBA;

/// Offset of `checkSumAdjustment` within the `head` table.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// Checksums of a `head` table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct HeadChecksums {
    /// Checksum of the table with `checkSumAdjustment` taken as zero.
    pub table_checksum: u32,
    /// The `checkSumAdjustment` value the file should carry.
    pub check_sum_adjustment: u32,
}

/// Sum `data` as big-endian u32 words, continuing from `prior_sum`.
///
/// A trailing partial word is padded with zeros. The running sum is the left operand of every
/// addition, so checksumming two 4-byte aligned pieces in turn gives the checksum of their
/// concatenation.
pub fn checksum_continue(data: &[u8], prior_sum: u32) -> u32 {
    let mut chunks = data.chunks_exact(4);
    let mut sum = (&mut chunks).fold(Wrapping(prior_sum), |sum, word| {
        sum + Wrapping(BigEndian::read_u32(word))
    });
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut word = [0; 4];
        word[..tail.len()].copy_from_slice(tail);
        sum += Wrapping(BigEndian::read_u32(&word));
    }
    sum.0
}

/// Checksum of `data` on its own.
pub fn checksum(data: &[u8]) -> u32 {
    checksum_continue(data, 0)
}

/// Checksum of `length` bytes of `data` starting at `offset`, continuing from `prior_sum`.
///
/// Fails if the range is not within `data`.
pub fn checksum_range(
    data: &[u8],
    offset: usize,
    length: usize,
    prior_sum: u32,
) -> Result<u32, ParseError> {
    let range = ReadScope::new(data).offset_length(offset, length)?;
    Ok(checksum_continue(range.data(), prior_sum))
}

/// Compute the checksums of the `head` table at `offset`..`offset + length` of `file`.
///
/// Both values treat the table's `checkSumAdjustment` field as zero. The table is taken with
/// its padding to a 4-byte boundary, using the file's own pad bytes. The file sum is built from
/// the bytes before the table, the zeroed copy of the table and the bytes after it, without
/// copying the whole file. The copy is limited to the bytes `file` holds: anything the record
/// declares past the end of the file would add zero to either sum.
pub fn head_checksums(file: &[u8], offset: usize, length: usize) -> HeadChecksums {
    let start = offset.min(file.len());
    let available = &file[start..];
    let copy_length = long_align(length.min(available.len())).min(available.len());
    let mut table = available[..copy_length].to_vec();
    let adjustment_end = (CHECKSUM_ADJUSTMENT_OFFSET + 4).min(table.len());
    if let Some(field) = table.get_mut(CHECKSUM_ADJUSTMENT_OFFSET..adjustment_end) {
        field.fill(0);
    }

    let table_checksum = checksum(&table);

    let prefix = &file[..start];
    let suffix = &available[copy_length..];
    let file_sum = checksum_continue(prefix, 0);
    let file_sum = checksum_continue(&table, file_sum);
    let file_sum = checksum_continue(suffix, file_sum);

    HeadChecksums {
        table_checksum,
        check_sum_adjustment: CHECKSUM_ADJUSTMENT_MAGIC.wrapping_sub(file_sum),
    }
}
