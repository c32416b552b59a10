//! `COLR` table parsing.
//!
//! Version 0 only: base glyph records and the layer records they point into. Colours come from
//! the `CPAL` table.
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/colr>

use log::debug;

use crate::binary::read::{ReadFrom, ReadScope, ReadUnchecked};
use crate::binary::U16Be;
use crate::error::ParseError;
use crate::tables::{TableType, ValidationContext};
use crate::tag::{self, Tag};
use crate::validation::{Issues, RecordStatus, ValidationLevel, ValidationStatus};
use crate::SafeFrom;

/// Length of the version 0 header.
pub const HEADER_LENGTH: u32 = 14;

/// `paletteIndex` that selects the text foreground colour.
pub const FOREGROUND_PALETTE_INDEX: u16 = 0xFFFF;

/// `COLR` Color Table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColrTable {
    pub version: u16,
    pub num_base_glyph_records: u16,
    /// Offset to baseGlyphRecords array, from beginning of COLR table.
    pub base_glyph_records_offset: u32,
    /// Offset to layerRecords array, from beginning of COLR table.
    pub layer_records_offset: u32,
    pub num_layer_records: u16,
    pub base_glyph_records: Vec<BaseGlyphRecord>,
    pub layer_records: Vec<LayerRecord>,
}

/// Base glyph record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseGlyphRecord {
    /// Glyph ID of the base glyph.
    pub glyph_id: u16,
    /// Index (base 0) into the layerRecords array.
    pub first_layer_index: u16,
    /// Number of color layers associated with this glyph.
    pub num_layers: u16,
    pub status: RecordStatus,
}

/// Layer record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRecord {
    /// Glyph ID of the glyph used for a given layer.
    ///
    /// The glyphID in a Layer record must be less than the numGlyphs value in the `maxp` table.
    pub glyph_id: u16,
    /// Index (base 0) for a palette entry in the `CPAL` table.
    ///
    /// The paletteIndex value must be less than the numPaletteEntries value in the `CPAL` table. A
    /// paletteIndex value of 0xFFFF is a special case, indicating that the text foreground color
    /// (as determined by the application) is to be used.
    pub palette_index: u16,
    pub status: RecordStatus,
}

impl ReadFrom for BaseGlyphRecord {
    type ReadType = (U16Be, U16Be, U16Be);

    fn read_from((glyph_id, first_layer_index, num_layers): (u16, u16, u16)) -> Self {
        BaseGlyphRecord {
            glyph_id,
            first_layer_index,
            num_layers,
            status: RecordStatus::PARTIAL_VALIDATION,
        }
    }
}

impl ReadFrom for LayerRecord {
    type ReadType = (U16Be, U16Be);

    fn read_from((glyph_id, palette_index): (u16, u16)) -> Self {
        LayerRecord {
            glyph_id,
            palette_index,
            status: RecordStatus::PARTIAL_VALIDATION,
        }
    }
}

/// Read `count` records at `offset` from the start of the table in `scope`.
///
/// The records are read even if they run past the declared table `length`, as long as the
/// file holds them.
fn read_records<T>(
    scope: ReadScope<'_>,
    offset: u32,
    count: u16,
    length: u32,
    status: &mut ValidationStatus,
) -> Result<Vec<T>, ParseError>
where
    T: ReadUnchecked<HostType = T>,
{
    if count == 0 || offset == 0 {
        return Ok(Vec::new());
    }
    let end = u64::from(offset) + u64::from(count) * T::SIZE as u64;
    if end > u64::from(length) {
        status.insert(Issues::TABLE_LENGTH_TOO_SHORT);
    }
    let records = scope
        .offset(usize::safe_from(offset))
        .ctxt()
        .read_array::<T>(usize::from(count))?;
    Ok(records.to_vec())
}

impl TableType for ColrTable {
    const TAG: Tag = tag::COLR;

    fn read_table(
        scope: ReadScope<'_>,
        length: u32,
        status: &mut ValidationStatus,
    ) -> Result<Self, ParseError> {
        let mut ctxt = scope.ctxt();
        let version = ctxt.read_u16be()?;
        // Later versions extend version 0, so its records can still be read.
        if version > 0 {
            status.insert(Issues::STRUCTURE_MINOR_VERSION_UNKNOWN);
        }
        if length < HEADER_LENGTH {
            status.insert(Issues::TABLE_LENGTH_TOO_SHORT);
        }
        let num_base_glyph_records = ctxt.read_u16be()?;
        let base_glyph_records_offset = ctxt.read_u32be()?;
        let layer_records_offset = ctxt.read_u32be()?;
        let num_layer_records = ctxt.read_u16be()?;

        let base_glyph_records = read_records(
            scope,
            base_glyph_records_offset,
            num_base_glyph_records,
            length,
            status,
        )?;
        let layer_records = read_records(
            scope,
            layer_records_offset,
            num_layer_records,
            length,
            status,
        )?;

        Ok(ColrTable {
            version,
            num_base_glyph_records,
            base_glyph_records_offset,
            layer_records_offset,
            num_layer_records,
            base_glyph_records,
            layer_records,
        })
    }

    fn validate_internal(
        &mut self,
        _context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if self.base_glyph_records.len() != usize::from(self.num_base_glyph_records)
            || self.layer_records.len() != usize::from(self.num_layer_records)
        {
            // A nonzero count with a null offset
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }
        let sorted = self
            .base_glyph_records
            .windows(2)
            .all(|pair| pair[0].glyph_id < pair[1].glyph_id);
        if !sorted {
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        let num_layer_records = u32::from(self.num_layer_records);
        for record in &mut self.base_glyph_records {
            let end = u32::from(record.first_layer_index) + u32::from(record.num_layers);
            if end > num_layer_records {
                record.status.insert(RecordStatus::INTERNAL_ERROR);
            }
        }
        self.finish_records(ValidationLevel::Simple, status);
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        if let Some(num_glyphs) = context.num_glyphs() {
            for record in &mut self.base_glyph_records {
                if record.glyph_id >= num_glyphs {
                    record.status.insert(RecordStatus::EXTERNAL_ERROR);
                }
            }
            for record in &mut self.layer_records {
                if record.glyph_id >= num_glyphs {
                    record.status.insert(RecordStatus::EXTERNAL_ERROR);
                }
            }
        }

        match context.cpal_num_palette_entries() {
            Some(num_palette_entries) => {
                for record in &mut self.layer_records {
                    if record.palette_index >= num_palette_entries
                        && record.palette_index != FOREGROUND_PALETTE_INDEX
                    {
                        record.status.insert(RecordStatus::EXTERNAL_ERROR);
                    }
                }
            }
            None => {
                debug!("COLR table without a readable CPAL table");
                status.insert(Issues::STRUCTURE_FIELDS_EXTERNALLY_INVALID);
            }
        }
        self.finish_records(ValidationLevel::Full, status);
    }
}

impl ColrTable {
    /// Mark every record as checked to `level` and take their issues into `status`.
    fn finish_records(&mut self, level: ValidationLevel, status: &mut ValidationStatus) {
        for record in &mut self.base_glyph_records {
            record.status.finish(level);
            status.merge_issues(ValidationStatus::from(record.status));
        }
        for record in &mut self.layer_records {
            record.status.finish(level);
            status.merge_issues(ValidationStatus::from(record.status));
        }
    }

    /// Find the base glyph record for `glyph_id`.
    pub fn base_glyph_record(&self, glyph_id: u16) -> Option<&BaseGlyphRecord> {
        self.base_glyph_records
            .binary_search_by(|base| base.glyph_id.cmp(&glyph_id))
            .ok()
            .and_then(|index| self.base_glyph_records.get(index))
    }

    /// The layers of a base glyph, bottom layer first.
    ///
    /// Returns `None` if the record points past the end of the layer records.
    pub fn layers(&self, base_glyph: &BaseGlyphRecord) -> Option<&[LayerRecord]> {
        let start = usize::from(base_glyph.first_layer_index);
        let end = start + usize::from(base_glyph.num_layers);
        self.layer_records.get(start..end)
    }
}
