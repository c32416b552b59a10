//! `maxp` maximum profile table.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/maxp>

use crate::binary::read::{ReadBinary, ReadCtxt, ReadScope};
use crate::error::ParseError;
use crate::fixed::Fixed;
use crate::tables::{TableType, ValidationContext};
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationStatus};

/// Length of a version 0.5 table.
pub const VERSION_0_5_LENGTH: u32 = 6;
/// Length of a version 1.0 table.
pub const VERSION_1_0_LENGTH: u32 = 32;

/// maxp - Maximum profile
///
/// This table establishes the memory requirements for this font. Fonts with CFF data must use
/// Version 0.5 of this table, specifying only the numGlyphs field. Fonts with TrueType outlines
/// must use Version 1.0 of this table, where all data is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaxpTable {
    pub version: Fixed,
    pub num_glyphs: u16,
    /// Extra fields, present if maxp table is version 1.0, absent if version 0.5.
    pub version1_sub_table: Option<MaxpVersion1SubTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaxpVersion1SubTable {
    /// Maximum points in a non-composite glyph.
    pub max_points: u16,
    /// Maximum contours in a non-composite glyph.
    pub max_contours: u16,
    /// Maximum points in a composite glyph.
    pub max_composite_points: u16,
    /// Maximum contours in a composite glyph.
    pub max_composite_contours: u16,
    /// 1 if instructions do not use the twilight zone (Z0), or 2 if instructions do use Z0; should
    /// be set to 2 in most cases.
    pub max_zones: u16,
    /// Maximum points used in Z0.
    pub max_twilight_points: u16,
    /// Number of Storage Area locations.
    pub max_storage: u16,
    /// Number of FDEFs, equal to the highest function number + 1.
    pub max_function_defs: u16,
    /// Number of IDEFs.
    pub max_instruction_defs: u16,
    /// Maximum stack depth across Font Program ('fpgm' table), CVT Program ('prep' table) and all
    /// glyph instructions (in the 'glyf' table).
    pub max_stack_elements: u16,
    /// Maximum byte count for glyph instructions.
    pub max_size_of_instructions: u16,
    /// Maximum number of components referenced at “top level” for any composite glyph.
    pub max_component_elements: u16,
    /// Maximum levels of recursion; 1 for simple components.
    pub max_component_depth: u16,
}

impl TableType for MaxpTable {
    const TAG: Tag = tag::MAXP;

    fn read_table(
        scope: ReadScope<'_>,
        length: u32,
        status: &mut ValidationStatus,
    ) -> Result<Self, ParseError> {
        let mut ctxt = scope.ctxt();
        let version = ctxt.read_fixed()?;
        let (highest_minor, min_length) = match version.mantissa() {
            0 => (5, VERSION_0_5_LENGTH),
            1 => (0, VERSION_1_0_LENGTH),
            _ => return Err(ParseError::BadVersion),
        };
        if version.table_version_minor() > highest_minor {
            status.insert(Issues::STRUCTURE_MINOR_VERSION_UNKNOWN);
        }
        if length < min_length {
            status.insert(Issues::TABLE_LENGTH_TOO_SHORT);
        }

        let num_glyphs = ctxt.read_u16be()?;
        let version1_sub_table = if version.mantissa() == 1 {
            Some(ctxt.read::<MaxpVersion1SubTable>()?)
        } else {
            None
        };
        Ok(MaxpTable {
            version,
            num_glyphs,
            version1_sub_table,
        })
    }

    fn validate_internal(
        &mut self,
        _context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if let Some(sub_table) = &self.version1_sub_table {
            if sub_table.max_zones != 1 && sub_table.max_zones != 2 {
                status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
            }
        }
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        let has_glyf = context.contains_table(tag::GLYF);
        let has_cff = context.contains_table(tag::CFF) || context.contains_table(tag::CFF2);
        let is_version1 = self.version1_sub_table.is_some();
        if (has_glyf && !is_version1) || (has_cff && is_version1) {
            status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
        }
    }
}

impl ReadBinary for MaxpVersion1SubTable {
    type HostType<'a> = Self;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        let max_points = ctxt.read_u16be()?;
        let max_contours = ctxt.read_u16be()?;
        let max_composite_points = ctxt.read_u16be()?;
        let max_composite_contours = ctxt.read_u16be()?;
        let max_zones = ctxt.read_u16be()?;
        let max_twilight_points = ctxt.read_u16be()?;
        let max_storage = ctxt.read_u16be()?;
        let max_function_defs = ctxt.read_u16be()?;
        let max_instruction_defs = ctxt.read_u16be()?;
        let max_stack_elements = ctxt.read_u16be()?;
        let max_size_of_instructions = ctxt.read_u16be()?;
        let max_component_elements = ctxt.read_u16be()?;
        let max_component_depth = ctxt.read_u16be()?;

        Ok(MaxpVersion1SubTable {
            max_points,
            max_contours,
            max_composite_points,
            max_composite_contours,
            max_zones,
            max_twilight_points,
            max_storage,
            max_function_defs,
            max_instruction_defs,
            max_stack_elements,
            max_size_of_instructions,
            max_component_elements,
            max_component_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::validate_alone;
    use crate::tests::writer::{self, TtfType::*};

    #[test]
    fn test_read_version_0_5() {
        let data = writer::convert(&[UInt32(0x00005000), UInt16(42)]);
        let mut status = ValidationStatus::partial();
        let maxp = MaxpTable::read_table(ReadScope::new(&data), 6, &mut status).unwrap();

        assert!(!status.has_issues());
        assert_eq!(maxp.num_glyphs, 42);
        assert_eq!(maxp.version.table_version_string(), "0.5");
        assert_eq!(maxp.version1_sub_table, None);
    }

    #[test]
    fn test_read_version_1_0() {
        let mut values = vec![UInt32(0x00010000), UInt16(3)];
        values.extend((1..=13).map(UInt16));
        let data = writer::convert(&values);
        let mut status = ValidationStatus::partial();
        let maxp = MaxpTable::read_table(ReadScope::new(&data), 32, &mut status).unwrap();

        assert!(!status.has_issues());
        let sub_table = maxp.version1_sub_table.unwrap();
        assert_eq!(sub_table.max_points, 1);
        assert_eq!(sub_table.max_zones, 5);
        assert_eq!(sub_table.max_component_depth, 13);
    }

    #[test]
    fn test_version_1_0_needs_all_fields() {
        let data = writer::convert(&[UInt32(0x00010000), UInt16(3)]);
        let mut status = ValidationStatus::partial();
        let result = MaxpTable::read_table(ReadScope::new(&data), 6, &mut status);

        assert_eq!(result, Err(ParseError::BadEof));
        assert!(status.contains(Issues::TABLE_LENGTH_TOO_SHORT));
    }

    #[test]
    fn test_versions() {
        let mut status = ValidationStatus::partial();
        let data = writer::convert(&[UInt32(0x00020000), UInt16(3)]);
        assert_eq!(
            MaxpTable::read_table(ReadScope::new(&data), 6, &mut status),
            Err(ParseError::BadVersion)
        );

        let data = writer::convert(&[UInt32(0x00006000), UInt16(3)]);
        MaxpTable::read_table(ReadScope::new(&data), 6, &mut status).unwrap();
        assert_eq!(status.issues(), Issues::STRUCTURE_MINOR_VERSION_UNKNOWN);
    }

    #[test]
    fn test_max_zones() {
        for (max_zones, invalid) in [(1, false), (2, false), (0, true), (3, true)] {
            let mut values = vec![UInt32(0x00010000), UInt16(3)];
            values.extend((1..=13).map(|field| UInt16(if field == 5 { max_zones } else { field })));
            let data = writer::convert(&values);
            let mut status = ValidationStatus::partial();
            let mut maxp = MaxpTable::read_table(ReadScope::new(&data), 32, &mut status).unwrap();
            validate_alone(&mut maxp, false, &mut status);

            assert_eq!(
                status.contains(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID),
                invalid,
                "maxZones {}",
                max_zones
            );
        }
    }
}
