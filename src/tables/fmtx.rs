//! `fmtx` font metrics table (Apple).
//!
//! <https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6fmtx.html>

use log::debug;

use crate::binary::read::ReadScope;
use crate::error::ParseError;
use crate::fixed::Fixed;
use crate::tables::{TableType, ValidationContext};
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationStatus};

/// Length of a version 2.0 table.
pub const TABLE_LENGTH: u32 = 16;

/// `fmtx` table
///
/// Names the glyph whose points give the font's metrics. Each metric field is a point number
/// in that glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FmtxTable {
    pub version: Fixed,
    pub glyph_index: u32,
    pub horizontal_before: u8,
    pub horizontal_after: u8,
    pub horizontal_caret_head: u8,
    pub horizontal_caret_base: u8,
    pub vertical_before: u8,
    pub vertical_after: u8,
    pub vertical_caret_head: u8,
    pub vertical_caret_base: u8,
}

impl TableType for FmtxTable {
    const TAG: Tag = tag::FMTX;

    fn read_table(
        scope: ReadScope<'_>,
        length: u32,
        status: &mut ValidationStatus,
    ) -> Result<Self, ParseError> {
        let mut ctxt = scope.ctxt();
        let version = ctxt.read_fixed()?;
        ctxt.check_version(version.mantissa() == 2)?;
        if version.table_version_minor() > 0 {
            status.insert(Issues::STRUCTURE_MINOR_VERSION_UNKNOWN);
        }
        if length < TABLE_LENGTH {
            status.insert(Issues::TABLE_LENGTH_TOO_SHORT);
        }

        Ok(FmtxTable {
            version,
            glyph_index: ctxt.read_u32be()?,
            horizontal_before: ctxt.read_u8()?,
            horizontal_after: ctxt.read_u8()?,
            horizontal_caret_head: ctxt.read_u8()?,
            horizontal_caret_base: ctxt.read_u8()?,
            vertical_before: ctxt.read_u8()?,
            vertical_after: ctxt.read_u8()?,
            vertical_caret_head: ctxt.read_u8()?,
            vertical_caret_base: ctxt.read_u8()?,
        })
    }

    fn validate_internal(
        &mut self,
        _context: &ValidationContext<'_, '_>,
        _status: &mut ValidationStatus,
    ) {
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if let Some(num_glyphs) = context.num_glyphs() {
            if self.glyph_index >= u32::from(num_glyphs) {
                debug!(
                    "fmtx glyph index {} with {} glyphs",
                    self.glyph_index, num_glyphs
                );
                status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::writer::{self, TtfType::*};

    #[test]
    fn test_read() {
        let data = writer::convert(&[
            UInt32(0x00020000),
            UInt32(7),
            UInt8(1),
            UInt8(2),
            UInt8(3),
            UInt8(4),
            UInt8(5),
            UInt8(6),
            UInt8(7),
            UInt8(8),
        ]);
        let mut status = ValidationStatus::partial();
        let fmtx = FmtxTable::read_table(ReadScope::new(&data), 16, &mut status).unwrap();

        assert!(!status.has_issues());
        assert_eq!(fmtx.glyph_index, 7);
        assert_eq!(fmtx.horizontal_before, 1);
        assert_eq!(fmtx.vertical_caret_base, 8);
    }

    #[test]
    fn test_version_gate() {
        let mut status = ValidationStatus::partial();
        let data = writer::convert(&[UInt32(0x00010000), UInt32(7), UInt32(0), UInt32(0)]);

        assert_eq!(
            FmtxTable::read_table(ReadScope::new(&data), 16, &mut status),
            Err(ParseError::BadVersion)
        );
    }
}
