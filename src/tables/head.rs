//! `head` font header table.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/head>

use std::convert::TryFrom;

use bitflags::bitflags;
use log::debug;

use crate::binary::read::ReadScope;
use crate::error::ParseError;
use crate::fixed::Fixed;
use crate::tables::{TableType, ValidationContext};
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationStatus};

/// Value of `magicNumber` in every valid `head` table.
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// Length of a version 1.0 table.
pub const TABLE_LENGTH: u32 = 54;

/// Seconds from 1904-01-01, where `LONGDATETIME` counts from, to the Unix epoch.
const LONG_DATE_TIME_EPOCH_OFFSET: i64 = 2_082_844_800;

/// Number of seconds since 12:00 midnight that started January 1st 1904 in GMT/UTC time zone.
pub type LongDateTime = i64;

bitflags! {
    /// `head` table `flags` field.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct HeadFlags: u16 {
        const BASELINE_AT_Y0 = 1 << 0;
        /// Relevant only for TrueType rasterizers.
        const LSB_AT_X0 = 1 << 1;
        const INSTRUCTIONS_DEPEND_ON_POINT_SIZE = 1 << 2;
        const FORCE_INTEGER_PPEM = 1 << 3;
        const INSTRUCTIONS_ALTER_ADVANCE = 1 << 4;
        /// Apple: laid out vertically. Should not be set in OpenType fonts.
        const VERTICAL_LAYOUT = 1 << 5;
        const RESERVED_6 = 1 << 6;
        /// Apple: requires layout for correct linguistic rendering.
        const REQUIRES_LAYOUT = 1 << 7;
        /// Apple: AAT font with default metamorphosis effects.
        const GX_METAMORPHOSIS = 1 << 8;
        /// Apple: contains strong right-to-left glyphs.
        const STRONG_RTL = 1 << 9;
        /// Apple: contains Indic-style rearrangement effects.
        const INDIC_REARRANGEMENT = 1 << 10;
        /// Font data is lossless after Agfa MicroType Express compression.
        const LOSSLESS = 1 << 11;
        /// Font converted to produce compatible metrics.
        const CONVERTED = 1 << 12;
        const CLEARTYPE_OPTIMIZED = 1 << 13;
        /// Last resort font.
        const LAST_RESORT = 1 << 14;
        const RESERVED_15 = 1 << 15;
    }
}

bitflags! {
    /// `head` table `macStyle` field.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct MacStyle: u16 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const OUTLINE = 1 << 3;
        const SHADOW = 1 << 4;
        const CONDENSED = 1 << 5;
        const EXTENDED = 1 << 6;
    }
}

impl HeadFlags {
    /// Bits that must be clear in an OpenType font.
    pub const INVALID: HeadFlags = HeadFlags::RESERVED_6
        .union(HeadFlags::REQUIRES_LAYOUT)
        .union(HeadFlags::GX_METAMORPHOSIS)
        .union(HeadFlags::STRONG_RTL)
        .union(HeadFlags::INDIC_REARRANGEMENT)
        .union(HeadFlags::RESERVED_15);
}

/// `fontDirectionHint`, deprecated and expected to be `2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontDirectionHint {
    /// Like -1 but also contains neutrals.
    StronglyRightToLeftWithNeutrals,
    StronglyRightToLeft,
    FullyMixed,
    StronglyLeftToRight,
    /// Like 1 but also contains neutrals.
    StronglyLeftToRightWithNeutrals,
}

/// <https://learn.microsoft.com/en-us/typography/opentype/spec/loca>
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexToLocFormat {
    /// Offsets are 16-bit. The actual local offset divided by 2 is stored.
    Short,
    /// Offsets are 32-bit. The actual local offset is stored.
    Long,
}

/// `head` table
///
/// Fields that are enumerations or bit sets keep their raw value, so that out of range values
/// survive reading and can be reported by validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeadTable {
    pub major_version: u16,
    pub minor_version: u16,
    pub font_revision: Fixed,
    pub check_sum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
    /// The `checkSumAdjustment` the file should have. Zero for a font in a collection.
    pub calculated_check_sum_adjustment: u32,
}

impl TryFrom<i16> for FontDirectionHint {
    type Error = ParseError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(FontDirectionHint::StronglyRightToLeftWithNeutrals),
            -1 => Ok(FontDirectionHint::StronglyRightToLeft),
            0 => Ok(FontDirectionHint::FullyMixed),
            1 => Ok(FontDirectionHint::StronglyLeftToRight),
            2 => Ok(FontDirectionHint::StronglyLeftToRightWithNeutrals),
            _ => Err(ParseError::BadValue),
        }
    }
}

impl TryFrom<i16> for IndexToLocFormat {
    type Error = ParseError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IndexToLocFormat::Short),
            1 => Ok(IndexToLocFormat::Long),
            _ => Err(ParseError::BadValue),
        }
    }
}

impl IndexToLocFormat {
    /// Size in bytes of one `loca` offset.
    pub fn offset_size(self) -> u64 {
        match self {
            IndexToLocFormat::Short => 2,
            IndexToLocFormat::Long => 4,
        }
    }
}

impl TableType for HeadTable {
    const TAG: Tag = tag::HEAD;

    fn read_table(
        scope: ReadScope<'_>,
        length: u32,
        status: &mut ValidationStatus,
    ) -> Result<Self, ParseError> {
        let mut ctxt = scope.ctxt();
        let major_version = ctxt.read_u16be()?;
        let minor_version = ctxt.read_u16be()?;
        ctxt.check_version(major_version == 1)?;
        if minor_version > 0 {
            status.insert(Issues::STRUCTURE_MINOR_VERSION_UNKNOWN);
        }
        if length < TABLE_LENGTH {
            status.insert(Issues::TABLE_LENGTH_TOO_SHORT);
        }

        Ok(HeadTable {
            major_version,
            minor_version,
            font_revision: ctxt.read_fixed()?,
            check_sum_adjustment: ctxt.read_u32be()?,
            magic_number: ctxt.read_u32be()?,
            flags: ctxt.read_u16be()?,
            units_per_em: ctxt.read_u16be()?,
            created: ctxt.read_i64be()?,
            modified: ctxt.read_i64be()?,
            x_min: ctxt.read_i16be()?,
            y_min: ctxt.read_i16be()?,
            x_max: ctxt.read_i16be()?,
            y_max: ctxt.read_i16be()?,
            mac_style: ctxt.read_u16be()?,
            lowest_rec_ppem: ctxt.read_u16be()?,
            font_direction_hint: ctxt.read_i16be()?,
            index_to_loc_format: ctxt.read_i16be()?,
            glyph_data_format: ctxt.read_i16be()?,
            calculated_check_sum_adjustment: 0,
        })
    }

    fn validate_internal(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if self.magic_number != MAGIC_NUMBER {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        let flags = self.head_flags();
        if context.is_variable_font() {
            if !flags.contains(HeadFlags::LSB_AT_X0) || flags.contains(HeadFlags::VERTICAL_LAYOUT)
            {
                status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            }
        } else if flags.contains(HeadFlags::VERTICAL_LAYOUT) {
            status.insert(Issues::STRUCTURE_FIELD_WARNINGS);
        }
        if flags.intersects(HeadFlags::INVALID) {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        if !self.units_per_em.is_power_of_two() {
            status.insert(Issues::STRUCTURE_FIELD_WARNINGS);
        }
        if !(16..=16384).contains(&self.units_per_em) {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        if MacStyle::from_bits(self.mac_style).is_none()
            || self.direction_hint().is_none()
            || self.loc_format().is_none()
            || self.glyph_data_format != 0
        {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        if !context.in_collection()
            && self.calculated_check_sum_adjustment != self.check_sum_adjustment
        {
            debug!(
                "checkSumAdjustment 0x{:08x}, calculated 0x{:08x}",
                self.check_sum_adjustment, self.calculated_check_sum_adjustment
            );
            status.insert(Issues::INVALID_CHECKSUM);
        }
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        let loca = context.table_length(tag::LOCA);
        if let (Some(loca_length), Some(num_glyphs), Some(format)) =
            (loca, context.num_glyphs(), self.loc_format())
        {
            let required = (u64::from(num_glyphs) + 1) * format.offset_size();
            if u64::from(loca_length) < required {
                debug!("'loca' is {} bytes, needs {}", loca_length, required);
                status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            }
        }
    }
}

impl HeadTable {
    /// The `flags` field, reserved bits included.
    pub fn head_flags(&self) -> HeadFlags {
        HeadFlags::from_bits_retain(self.flags)
    }

    /// The `macStyle` field, reserved bits dropped.
    pub fn style(&self) -> MacStyle {
        MacStyle::from_bits_truncate(self.mac_style)
    }

    pub fn is_bold(&self) -> bool {
        self.style().contains(MacStyle::BOLD)
    }

    pub fn is_italic(&self) -> bool {
        self.style().contains(MacStyle::ITALIC)
    }

    /// `fontDirectionHint`, if it is one of the defined values.
    pub fn direction_hint(&self) -> Option<FontDirectionHint> {
        FontDirectionHint::try_from(self.font_direction_hint).ok()
    }

    /// `indexToLocFormat`, if it is one of the defined values.
    pub fn loc_format(&self) -> Option<IndexToLocFormat> {
        IndexToLocFormat::try_from(self.index_to_loc_format).ok()
    }

    /// `created` as seconds relative to the Unix epoch.
    pub fn created_datetime(&self) -> i64 {
        self.created.saturating_sub(LONG_DATE_TIME_EPOCH_OFFSET)
    }

    /// `modified` as seconds relative to the Unix epoch.
    pub fn modified_datetime(&self) -> i64 {
        self.modified.saturating_sub(LONG_DATE_TIME_EPOCH_OFFSET)
    }
}
