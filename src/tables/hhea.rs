//! `hhea` horizontal header table.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/hhea>

use log::debug;

use crate::binary::read::ReadScope;
use crate::error::ParseError;
use crate::tables::{TableType, ValidationContext};
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationStatus};

/// Length of a version 1.0 table.
pub const TABLE_LENGTH: u32 = 36;

/// `hhea` horizontal header table
///
/// > This table contains information for horizontal layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HheaTable {
    pub major_version: u16,
    pub minor_version: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    /// Four reserved fields, all zero in a valid table.
    pub reserved: [i16; 4],
    pub metric_data_format: i16,
    pub num_h_metrics: u16,
}

impl TableType for HheaTable {
    const TAG: Tag = tag::HHEA;

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

        let ascender = ctxt.read_i16be()?;
        let descender = ctxt.read_i16be()?;
        let line_gap = ctxt.read_i16be()?;
        let advance_width_max = ctxt.read_u16be()?;
        let min_left_side_bearing = ctxt.read_i16be()?;
        let min_right_side_bearing = ctxt.read_i16be()?;
        let x_max_extent = ctxt.read_i16be()?;
        let caret_slope_rise = ctxt.read_i16be()?;
        let caret_slope_run = ctxt.read_i16be()?;
        let caret_offset = ctxt.read_i16be()?;
        let reserved = [
            ctxt.read_i16be()?,
            ctxt.read_i16be()?,
            ctxt.read_i16be()?,
            ctxt.read_i16be()?,
        ];
        let metric_data_format = ctxt.read_i16be()?;
        let num_h_metrics = ctxt.read_u16be()?;

        Ok(HheaTable {
            major_version,
            minor_version,
            ascender,
            descender,
            line_gap,
            advance_width_max,
            min_left_side_bearing,
            min_right_side_bearing,
            x_max_extent,
            caret_slope_rise,
            caret_slope_run,
            caret_offset,
            reserved,
            metric_data_format,
            num_h_metrics,
        })
    }

    fn validate_internal(
        &mut self,
        _context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if self.reserved.iter().any(|&field| field != 0) || self.metric_data_format != 0 {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        let Some(num_glyphs) = context.num_glyphs() else {
            return;
        };
        if self.num_h_metrics == 0 || self.num_h_metrics > num_glyphs {
            debug!(
                "numberOfHMetrics {} with {} glyphs",
                self.num_h_metrics, num_glyphs
            );
            status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            return;
        }
        if let Some(hmtx_length) = context.table_length(tag::HMTX) {
            let required = self.hmtx_length(num_glyphs);
            if u64::from(hmtx_length) < required {
                debug!("'hmtx' is {} bytes, needs {}", hmtx_length, required);
                status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            }
        }
    }
}

impl HheaTable {
    /// Bytes of `hmtx` needed for `num_glyphs` glyphs: one `longHorMetric` per metric and a
    /// left side bearing for each remaining glyph.
    pub fn hmtx_length(&self, num_glyphs: u16) -> u64 {
        let metrics = u64::from(self.num_h_metrics);
        let bearings = u64::from(num_glyphs).saturating_sub(metrics);
        4 * metrics + 2 * bearings
    }
}
