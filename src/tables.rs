//! OpenType font table parsing and validation.
//!
//! This module holds the structures shared by every font in a file: the table directory
//! (`OffsetTable`) and its records, the collection header (`TtcHeader`) and `FontTable`, which
//! pairs a table record with the table's bytes, checksum and decoded body. Tables with a
//! dedicated decoder live in the submodules.

pub mod colr;
pub mod fmtx;
pub mod head;
pub mod hhea;
pub mod maxp;

use std::collections::hash_map::Entry;

use log::{debug, trace, warn};
use rustc_hash::FxHashMap;

use crate::binary::read::{ReadArray, ReadCtxt, ReadFrom, ReadScope};
use crate::binary::U32Be;
use crate::checksum;
use crate::error::{ParseError, Structure};
use crate::size;
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationLevel, ValidationStatus};
use crate::SafeFrom;

pub use colr::ColrTable;
pub use fmtx::FmtxTable;
pub use head::HeadTable;
pub use hhea::HheaTable;
pub use maxp::MaxpTable;

/// A table with its own decoder.
pub trait TableType: Sized {
    /// The tag the decoder reads.
    const TAG: Tag;

    /// Decode the table.
    ///
    /// `scope` starts at the table and runs to the end of the file; `length` is the length the
    /// table record declares. Flags found while reading are added to `status`.
    fn read_table(
        scope: ReadScope<'_>,
        length: u32,
        status: &mut ValidationStatus,
    ) -> Result<Self, ParseError>;

    /// Checks that need only the table's own bytes and the shape of the font.
    fn validate_internal(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    );

    /// Checks against sibling tables.
    fn validate_external(
        &mut self,
        _context: &ValidationContext<'_, '_>,
        _status: &mut ValidationStatus,
    ) {
    }
}

/// An entry in the Offset Table
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TableRecord {
    pub table_tag: Tag,
    pub checksum: u32,
    /// Offset from the beginning of the file.
    pub offset: u32,
    pub length: u32,
}

/// OpenType Offset Table
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>
#[derive(Clone, Debug)]
pub struct OffsetTable<'a> {
    pub sfnt_version: Tag,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
    pub table_records: ReadArray<'a, TableRecord>,
    table_index: FxHashMap<Tag, usize>,
    status: ValidationStatus,
    record_statuses: Vec<ValidationStatus>,
}

/// The `DSIG` fields of a version 2 collection header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DsigRecord {
    pub tag: Tag,
    pub length: u32,
    pub offset: u32,
}

/// TrueType collection header
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header>
#[derive(Clone, Debug)]
pub struct TtcHeader<'a> {
    pub ttc_tag: Tag,
    pub major_version: u16,
    pub minor_version: u16,
    pub num_fonts: u32,
    /// Offset of each font's table directory from the beginning of the file.
    pub offset_tables: ReadArray<'a, U32Be>,
    /// Present in version 2 headers, as read.
    pub dsig_record: Option<DsigRecord>,
    status: ValidationStatus,
}

/// A table of a font: its record, its bytes and, for supported tags, its decoded body.
#[derive(Clone, Debug)]
pub struct FontTable<'a> {
    record: TableRecord,
    scope: ReadScope<'a>,
    calculated_checksum: u32,
    data: Result<TableData, ParseError>,
    status: ValidationStatus,
}

/// Decoded table bodies.
#[derive(Clone, Debug, PartialEq)]
pub enum TableData {
    Head(HeadTable),
    Hhea(HheaTable),
    Maxp(MaxpTable),
    Fmtx(FmtxTable),
    Colr(ColrTable),
    /// A table without a decoder. Only its record and checksum are checked.
    Opaque,
}

/// What table validation can see of the rest of the font.
pub struct ValidationContext<'b, 'a> {
    scope: ReadScope<'a>,
    directory: &'b OffsetTable<'a>,
    in_collection: bool,
    num_glyphs: Option<u16>,
}

impl ReadFrom for TableRecord {
    type ReadType = ((Tag, U32Be), (U32Be, U32Be));

    fn read_from(((table_tag, checksum), (offset, length)): ((Tag, u32), (u32, u32))) -> Self {
        TableRecord {
            table_tag,
            checksum,
            offset,
            length,
        }
    }
}

impl TableRecord {
    pub fn read_table<'a>(&self, scope: &ReadScope<'a>) -> Result<ReadScope<'a>, ParseError> {
        let offset = usize::safe_from(self.offset);
        let length = usize::safe_from(self.length);
        scope.offset_length(offset, length)
    }

    /// Offset of the first byte after the table.
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.length)
    }

    /// Check the record against a file of `file_length` bytes.
    pub fn validate(&self, file_length: usize) -> ValidationStatus {
        let mut status = ValidationStatus::partial();
        let file_length = file_length as u64;
        if !tag::is_known_table(self.table_tag) {
            debug!("unknown table tag {:?}", self.table_tag);
            status.insert(Issues::UNKNOWN_TABLE_TAG);
        }
        if u64::from(self.offset) > file_length {
            status.insert(Issues::REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE);
        }
        if self.end() > file_length {
            status.insert(Issues::REFERENCED_STRUCTURE_LENGTH_OUT_OF_RANGE);
        }
        status.finish(ValidationLevel::Full);
        status
    }
}

/// `searchRange`, `entrySelector` and `rangeShift` for a directory of `num_tables` entries.
fn search_parameters(num_tables: u16) -> (u32, u32, u32) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = u16::BITS - 1 - num_tables.leading_zeros();
    let search_range = 16 << entry_selector;
    let range_shift = 16 * u32::from(num_tables) - search_range;
    (search_range, entry_selector, range_shift)
}

impl<'a> OffsetTable<'a> {
    /// Read the table directory at the start of `scope`.
    pub fn read(scope: ReadScope<'a>) -> Result<OffsetTable<'a>, ParseError> {
        let mut status = ValidationStatus::partial();
        match Self::read_directory(&mut scope.ctxt(), &mut status) {
            Ok(table) => Ok(table),
            Err(err) => {
                if err == ParseError::BadEof {
                    status.insert(
                        Issues::READ_TRUNCATED | Issues::OFFSET_TABLE_LENGTH_OUT_OF_RANGE,
                    );
                }
                warn!("unable to read table directory: {}", err);
                Err(ParseError::structure(Structure::OffsetTable, status, err))
            }
        }
    }

    fn read_directory(
        ctxt: &mut ReadCtxt<'a>,
        status: &mut ValidationStatus,
    ) -> Result<OffsetTable<'a>, ParseError> {
        let sfnt_version = ctxt.read_tag()?;
        if !tag::is_supported_sfnt_version(sfnt_version) {
            status.insert(Issues::SFNT_VERSION_NOT_SUPPORTED);
            return Err(ParseError::BadVersion);
        }
        let num_tables = ctxt.read_u16be()?;
        let search_range = ctxt.read_u16be()?;
        let entry_selector = ctxt.read_u16be()?;
        let range_shift = ctxt.read_u16be()?;
        let table_records = ctxt.read_array::<TableRecord>(usize::from(num_tables))?;

        let mut table_index = FxHashMap::default();
        for (index, record) in table_records.iter().enumerate() {
            match table_index.entry(record.table_tag) {
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
                Entry::Occupied(_) => {
                    debug!("duplicate table record for {:?}", record.table_tag);
                    status.insert(Issues::STRUCTURE_HAS_DUPLICATE_ENTRIES);
                }
            }
        }

        Ok(OffsetTable {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
            table_records,
            table_index,
            status: *status,
            record_statuses: Vec::new(),
        })
    }

    /// Check the search fields and every table record against a file of `file_length` bytes.
    pub fn validate(&mut self, file_length: usize) -> ValidationStatus {
        let mut status = self.status;
        let expected = search_parameters(self.num_tables);
        let actual = (
            u32::from(self.search_range),
            u32::from(self.entry_selector),
            u32::from(self.range_shift),
        );
        if actual != expected {
            debug!(
                "table directory search fields {:?}, expected {:?}",
                actual, expected
            );
            status.insert(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID);
        }

        self.record_statuses = self
            .table_records
            .iter()
            .map(|record| record.validate(file_length))
            .collect();
        if self.record_statuses.iter().any(ValidationStatus::has_issues) {
            status.insert(Issues::ISSUE_IN_CHILD_STRUCTURE);
        }

        status.finish(ValidationLevel::Full);
        self.status = status;
        status
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// The status of each table record from the last `validate`, in directory order.
    pub fn record_statuses(&self) -> &[ValidationStatus] {
        &self.record_statuses
    }

    /// Index of the first record for `tag`.
    pub fn get_table_index(&self, tag: Tag) -> Option<usize> {
        self.table_index.get(&tag).copied()
    }

    pub fn find_table_record(&self, tag: Tag) -> Option<TableRecord> {
        self.get_table_index(tag)
            .and_then(|index| self.table_records.get_item(index))
    }

    pub fn read_table(
        &self,
        scope: &ReadScope<'a>,
        tag: Tag,
    ) -> Result<Option<ReadScope<'a>>, ParseError> {
        if let Some(table_record) = self.find_table_record(tag) {
            let table = table_record.read_table(scope)?;
            Ok(Some(table))
        } else {
            Ok(None)
        }
    }
}

impl<'a> TtcHeader<'a> {
    /// Read the collection header at the start of the file `scope`.
    pub fn read(scope: ReadScope<'a>) -> Result<TtcHeader<'a>, ParseError> {
        let mut status = ValidationStatus::partial();
        match Self::read_header(&mut scope.ctxt(), &mut status) {
            Ok(header) => Ok(header),
            Err(err) => {
                match err {
                    ParseError::BadEof => status.insert(
                        Issues::READ_TRUNCATED | Issues::TTC_HEADER_LENGTH_OUT_OF_RANGE,
                    ),
                    ParseError::BadVersion => {
                        status.insert(Issues::STRUCTURE_VERSION_NOT_SUPPORTED)
                    }
                    _ => {}
                }
                warn!("unable to read collection header: {}", err);
                Err(ParseError::structure(Structure::TtcHeader, status, err))
            }
        }
    }

    fn read_header(
        ctxt: &mut ReadCtxt<'a>,
        status: &mut ValidationStatus,
    ) -> Result<TtcHeader<'a>, ParseError> {
        let ttc_tag = ctxt.read_tag()?;
        ctxt.check_version(ttc_tag == tag::TTCF)?;
        let major_version = ctxt.read_u16be()?;
        let minor_version = ctxt.read_u16be()?;
        ctxt.check_version(major_version == 1 || major_version == 2)?;
        let num_fonts = ctxt.read_u32be()?;
        let offset_tables = ctxt.read_array::<U32Be>(usize::safe_from(num_fonts))?;
        let dsig_record = if major_version == 2 {
            let tag = ctxt.read_tag()?;
            let length = ctxt.read_u32be()?;
            let offset = ctxt.read_u32be()?;
            Some(DsigRecord {
                tag,
                length,
                offset,
            })
        } else {
            None
        };

        Ok(TtcHeader {
            ttc_tag,
            major_version,
            minor_version,
            num_fonts,
            offset_tables,
            dsig_record,
            status: *status,
        })
    }

    /// `majorVersion` and `minorVersion` as one number, `0x00020000` for version 2.0.
    pub fn version(&self) -> u32 {
        u32::from(self.major_version) << 16 | u32::from(self.minor_version)
    }

    /// Number of bytes the header occupies.
    pub fn header_length(&self) -> u64 {
        let length = 12 + 4 * u64::from(self.num_fonts);
        if self.major_version == 2 {
            length + 12
        } else {
            length
        }
    }

    /// The digital signature, if the header points at one.
    ///
    /// A version 2 header with a zero `DSIG` length or offset has no signature.
    pub fn dsig(&self) -> Option<DsigRecord> {
        self.dsig_record
            .filter(|dsig| dsig.length != 0 && dsig.offset != 0)
    }

    pub fn has_dsig(&self) -> bool {
        self.dsig().is_some()
    }

    /// Check the font offsets and the digital signature fields against a file of
    /// `file_length` bytes.
    pub fn validate(&mut self, file_length: usize) -> ValidationStatus {
        let mut status = self.status;
        let file_length = file_length as u64;
        if self
            .offset_tables
            .iter()
            .any(|offset| u64::from(offset) > file_length)
        {
            status.insert(Issues::TTC_OFFSET_TABLE_OUT_OF_RANGE);
        }

        if let Some(dsig) = self.dsig_record {
            if dsig.length != 0 || dsig.offset != 0 {
                if dsig.length == 0 || dsig.offset == 0 || dsig.tag != tag::DSIG {
                    status.insert(Issues::TTC_HEADER_FIELDS_INVALID);
                }
                if u64::from(dsig.offset) > file_length {
                    status.insert(Issues::REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE);
                }
                if u64::from(dsig.offset) + u64::from(dsig.length) > file_length {
                    status.insert(Issues::REFERENCED_STRUCTURE_LENGTH_OUT_OF_RANGE);
                }
            }
        }

        status.finish(ValidationLevel::Full);
        self.status = status;
        status
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }
}

fn read_decoded<T: TableType>(
    file: ReadScope<'_>,
    record: &TableRecord,
    status: &mut ValidationStatus,
) -> Result<T, ParseError> {
    debug_assert_eq!(record.table_tag, T::TAG);
    let scope = file.offset(usize::safe_from(record.offset));
    T::read_table(scope, record.length, status).map_err(|err| {
        match err {
            ParseError::BadEof => status.insert(Issues::READ_TRUNCATED),
            ParseError::BadVersion => status.insert(Issues::STRUCTURE_VERSION_NOT_SUPPORTED),
            _ => {}
        }
        warn!("unable to read '{}' table: {}", T::TAG, err);
        ParseError::structure(Structure::Table(T::TAG), *status, err)
    })
}

impl<'a> FontTable<'a> {
    /// Read the table `record` points at in `file`, the scope of the whole file.
    ///
    /// This doesn't fail: a table that can't be decoded keeps the error in place of its body.
    pub fn read(file: ReadScope<'a>, record: TableRecord, in_collection: bool) -> FontTable<'a> {
        let mut status = ValidationStatus::partial();
        let offset = usize::safe_from(record.offset);
        let length = usize::safe_from(record.length);

        if offset > file.data().len() || (offset == file.data().len() && length != 0) {
            debug!(
                "'{}' table offset {} is past the end of the file",
                record.table_tag, record.offset
            );
            status.insert(Issues::STRUCTURE_OFFSET_OUT_OF_RANGE);
            let err = ParseError::structure(
                Structure::Table(record.table_tag),
                status,
                ParseError::BadOffset,
            );
            return FontTable {
                record,
                scope: file.offset(offset),
                calculated_checksum: 0,
                data: Err(err),
                status,
            };
        }

        let scope = match file.offset_length(offset, length) {
            Ok(scope) => scope,
            Err(_) => {
                status.insert(Issues::STRUCTURE_LENGTH_OUT_OF_RANGE);
                file.offset(offset)
            }
        };

        let head_checksums = if record.table_tag != tag::HEAD {
            None
        } else if in_collection {
            Some(checksum::HeadChecksums::default())
        } else {
            Some(checksum::head_checksums(file.data(), offset, length))
        };
        let calculated_checksum = match head_checksums {
            Some(sums) => sums.table_checksum,
            None => checksum::checksum(scope.data()),
        };
        let compare_checksum = !(in_collection && record.table_tag == tag::HEAD);
        if compare_checksum && calculated_checksum != record.checksum {
            debug!(
                "'{}' table checksum 0x{:08x}, record has 0x{:08x}",
                record.table_tag, calculated_checksum, record.checksum
            );
            status.insert(Issues::INVALID_CHECKSUM);
        }

        if tag::is_supported_table(record.table_tag) {
            trace!("reading '{}' table", record.table_tag);
        } else {
            trace!("keeping '{}' table as opaque bytes", record.table_tag);
        }
        let data = match record.table_tag {
            tag::HEAD => read_decoded::<HeadTable>(file, &record, &mut status).map(|mut head| {
                head.calculated_check_sum_adjustment =
                    head_checksums.map_or(0, |sums| sums.check_sum_adjustment);
                TableData::Head(head)
            }),
            tag::HHEA => read_decoded(file, &record, &mut status).map(TableData::Hhea),
            tag::MAXP => read_decoded(file, &record, &mut status).map(TableData::Maxp),
            tag::FMTX => read_decoded(file, &record, &mut status).map(TableData::Fmtx),
            tag::COLR => read_decoded(file, &record, &mut status).map(TableData::Colr),
            _ => Ok(TableData::Opaque),
        };

        FontTable {
            record,
            scope,
            calculated_checksum,
            data,
            status,
        }
    }

    /// Run the checks for `level`, returning the table's new status.
    pub fn validate(
        &mut self,
        level: ValidationLevel,
        context: &ValidationContext<'_, 'a>,
    ) -> ValidationStatus {
        let mut status = self.status;
        if let Ok(data) = &mut self.data {
            data.validate_internal(context, &mut status);
            if level == ValidationLevel::Full {
                data.validate_external(context, &mut status);
            }
        }
        status.finish(level);
        self.status = status;
        status
    }

    pub fn record(&self) -> TableRecord {
        self.record
    }

    pub fn tag(&self) -> Tag {
        self.record.table_tag
    }

    /// The table's bytes, cut short if the record runs past the end of the file.
    pub fn scope(&self) -> ReadScope<'a> {
        self.scope
    }

    /// The checksum of the table's bytes.
    ///
    /// For `head` this is taken with `checkSumAdjustment` as zero, and is zero when the font is
    /// part of a collection.
    pub fn calculated_checksum(&self) -> u32 {
        self.calculated_checksum
    }

    /// The decoded body, or the error that stopped it being read.
    pub fn data(&self) -> Result<&TableData, ParseError> {
        self.data.as_ref().map_err(Clone::clone)
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }
}

impl TableData {
    fn validate_internal(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        match self {
            TableData::Head(table) => table.validate_internal(context, status),
            TableData::Hhea(table) => table.validate_internal(context, status),
            TableData::Maxp(table) => table.validate_internal(context, status),
            TableData::Fmtx(table) => table.validate_internal(context, status),
            TableData::Colr(table) => table.validate_internal(context, status),
            TableData::Opaque => {}
        }
    }

    fn validate_external(
        &mut self,
        context: &ValidationContext<'_, '_>,
        status: &mut ValidationStatus,
    ) {
        match self {
            TableData::Head(table) => table.validate_external(context, status),
            TableData::Hhea(table) => table.validate_external(context, status),
            TableData::Maxp(table) => table.validate_external(context, status),
            TableData::Fmtx(table) => table.validate_external(context, status),
            TableData::Colr(table) => table.validate_external(context, status),
            TableData::Opaque => {}
        }
    }
}

impl<'b, 'a> ValidationContext<'b, 'a> {
    pub(crate) fn new(
        scope: ReadScope<'a>,
        directory: &'b OffsetTable<'a>,
        in_collection: bool,
        num_glyphs: Option<u16>,
    ) -> ValidationContext<'b, 'a> {
        ValidationContext {
            scope,
            directory,
            in_collection,
            num_glyphs,
        }
    }

    pub fn contains_table(&self, tag: Tag) -> bool {
        self.directory.get_table_index(tag).is_some()
    }

    pub fn table_record(&self, tag: Tag) -> Option<TableRecord> {
        self.directory.find_table_record(tag)
    }

    /// Declared length of the `tag` table.
    pub fn table_length(&self, tag: Tag) -> Option<u32> {
        self.table_record(tag).map(|record| record.length)
    }

    pub fn in_collection(&self) -> bool {
        self.in_collection
    }

    /// A font with `fvar` and either `gvar` or `CFF2`.
    pub fn is_variable_font(&self) -> bool {
        self.contains_table(tag::FVAR)
            && (self.contains_table(tag::GVAR) || self.contains_table(tag::CFF2))
    }

    /// `numGlyphs` from `maxp`, if it was decoded.
    pub fn num_glyphs(&self) -> Option<u16> {
        self.num_glyphs
    }

    /// `numPaletteEntries` from the `CPAL` header.
    pub fn cpal_num_palette_entries(&self) -> Option<u16> {
        let cpal = self.directory.read_table(&self.scope, tag::CPAL).ok()??;
        let mut ctxt = cpal.ctxt();
        ctxt.skip(size::U16).ok()?;
        ctxt.read_u16be().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag;
    use crate::tests::writer::{self, TtfType::*};

    fn directory_bytes(
        num_tables: u16,
        search: (u16, u16, u16),
        records: &[TableRecord],
    ) -> Vec<u8> {
        let mut data = vec![
            TableTag(tag::TRUETYPE),
            UInt16(num_tables),
            UInt16(search.0),
            UInt16(search.1),
            UInt16(search.2),
        ];
        for record in records {
            data.extend([
                TableTag(record.table_tag),
                UInt32(record.checksum),
                UInt32(record.offset),
                UInt32(record.length),
            ]);
        }
        writer::convert(&data)
    }

    fn record(tag: Tag, offset: u32, length: u32) -> TableRecord {
        TableRecord {
            table_tag: tag,
            checksum: 0,
            offset,
            length,
        }
    }

    #[test]
    fn test_search_parameters() {
        assert_eq!(search_parameters(0), (0, 0, 0));
        assert_eq!(search_parameters(1), (16, 0, 0));
        assert_eq!(search_parameters(6), (64, 2, 32));
        assert_eq!(search_parameters(15), (0x80, 3, 0x70));
        assert_eq!(search_parameters(16), (256, 4, 0));
        assert_eq!(search_parameters(u16::MAX), (0x80000, 15, 0x7FFF0));
    }

    #[test]
    fn test_duplicate_tags_index_first() {
        let records = [
            record(tag::HEAD, 44, 0),
            record(tag::MAXP, 44, 0),
            record(tag::HEAD, 44, 0),
        ];
        let data = directory_bytes(3, (32, 1, 16), &records);
        let directory = OffsetTable::read(ReadScope::new(&data)).unwrap();

        assert_eq!(directory.get_table_index(tag::HEAD), Some(0));
        assert_eq!(directory.get_table_index(tag::MAXP), Some(1));
        assert_eq!(directory.get_table_index(tag::NAME), None);
        assert_eq!(directory.table_records.len(), 3);
        assert!(directory
            .status()
            .contains(Issues::STRUCTURE_HAS_DUPLICATE_ENTRIES));
    }

    #[test]
    fn test_search_fields_mismatch() {
        let data = directory_bytes(1, (32, 0, 0), &[record(tag::HEAD, 28, 0)]);
        let mut directory = OffsetTable::read(ReadScope::new(&data)).unwrap();
        let status = directory.validate(data.len());

        assert!(status.contains(Issues::STRUCTURE_FIELDS_INTERNALLY_INVALID));
        assert!(!status.contains(Issues::ISSUE_IN_CHILD_STRUCTURE));
    }

    #[test]
    fn test_record_issues_reach_directory() {
        let records = [record(tag!(b"zzzz"), 44, 0), record(tag::HEAD, 40, 100)];
        let data = directory_bytes(2, (32, 1, 0), &records);
        let mut directory = OffsetTable::read(ReadScope::new(&data)).unwrap();
        let status = directory.validate(data.len());

        assert!(status.contains(Issues::ISSUE_IN_CHILD_STRUCTURE));
        let statuses = directory.record_statuses();
        assert_eq!(statuses[0].issues(), Issues::UNKNOWN_TABLE_TAG);
        assert_eq!(
            statuses[1].issues(),
            Issues::REFERENCED_STRUCTURE_LENGTH_OUT_OF_RANGE
        );
    }

    #[test]
    fn test_truncated_records() {
        let mut data = directory_bytes(2, (32, 1, 0), &[record(tag::HEAD, 0, 0)]);
        data.truncate(data.len() - 1);

        let err = OffsetTable::read(ReadScope::new(&data)).unwrap_err();
        let status = err.status().unwrap();

        assert!(err.is_truncated());
        assert!(status.contains(Issues::READ_TRUNCATED | Issues::OFFSET_TABLE_LENGTH_OUT_OF_RANGE));
    }

    #[test]
    fn test_unsupported_sfnt_version() {
        let data = writer::convert(&[
            TableTag(tag!(b"wOFF")),
            UInt16(0),
            UInt16(0),
            UInt16(0),
            UInt16(0),
        ]);

        let err = OffsetTable::read(ReadScope::new(&data)).unwrap_err();

        assert!(err.is_unknown_version());
        assert!(err
            .status()
            .unwrap()
            .contains(Issues::SFNT_VERSION_NOT_SUPPORTED));
    }

    #[test]
    fn test_table_record_validate() {
        let status = record(tag::GLYF, 100, 28).validate(128);
        assert!(status.is_valid());

        let status = record(tag::GLYF, 129, 0).validate(128);
        assert!(status.contains(Issues::REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE));

        let status = record(tag::GLYF, u32::MAX, u32::MAX).validate(128);
        assert!(status.contains(
            Issues::REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE
                | Issues::REFERENCED_STRUCTURE_LENGTH_OUT_OF_RANGE
        ));
    }

    #[test]
    fn test_ttc_header_v2() {
        let data = writer::convert(&[
            TableTag(tag::TTCF),
            UInt16(2),
            UInt16(0),
            UInt32(2),
            UInt32(32),
            UInt32(48),
            TableTag(tag::DSIG),
            UInt32(8),
            UInt32(64),
        ]);
        let mut header = TtcHeader::read(ReadScope::new(&data)).unwrap();

        assert_eq!(header.version(), 0x00020000);
        assert_eq!(header.header_length(), 32);
        assert_eq!(header.offset_tables.to_vec(), vec![32, 48]);
        assert!(header.has_dsig());

        let status = header.validate(data.len());
        assert!(status.contains(Issues::TTC_OFFSET_TABLE_OUT_OF_RANGE));
        assert!(status.contains(Issues::REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE));
        assert!(!status.contains(Issues::TTC_HEADER_FIELDS_INVALID));
    }

    #[test]
    fn test_ttc_header_partial_dsig() {
        let data = writer::convert(&[
            TableTag(tag::TTCF),
            UInt16(2),
            UInt16(0),
            UInt32(0),
            TableTag(tag!(b"DSIX")),
            UInt32(0),
            UInt32(16),
        ]);
        let mut header = TtcHeader::read(ReadScope::new(&data)).unwrap();

        assert!(!header.has_dsig());
        assert!(header
            .validate(1024)
            .contains(Issues::TTC_HEADER_FIELDS_INVALID));
    }

    #[test]
    fn test_ttc_header_missing_dsig_bytes() {
        let data = writer::convert(&[TableTag(tag::TTCF), UInt16(2), UInt16(0), UInt32(0)]);

        let err = TtcHeader::read(ReadScope::new(&data)).unwrap_err();

        assert!(err.is_truncated());
        assert!(err
            .status()
            .unwrap()
            .contains(Issues::TTC_HEADER_LENGTH_OUT_OF_RANGE));
    }

    #[test]
    fn test_ttc_header_bad_major_version() {
        let data = writer::convert(&[TableTag(tag::TTCF), UInt16(3), UInt16(0), UInt32(0)]);
        let err = TtcHeader::read(ReadScope::new(&data)).unwrap_err();

        assert!(err.is_unknown_version());
    }

    #[test]
    fn test_font_table_out_of_range() {
        let data = [0u8; 16];
        let table = FontTable::read(ReadScope::new(&data), record(tag::HHEA, 17, 4), false);

        assert!(table.status().contains(Issues::STRUCTURE_OFFSET_OUT_OF_RANGE));
        assert_eq!(table.data().unwrap_err().root_cause(), &ParseError::BadOffset);

        let table = FontTable::read(ReadScope::new(&data), record(tag::NAME, 8, 12), false);
        assert!(table.status().contains(Issues::STRUCTURE_LENGTH_OUT_OF_RANGE));
        assert_eq!(table.scope().data().len(), 8);
        assert_eq!(table.data(), Ok(&TableData::Opaque));
    }

    #[test]
    fn test_font_table_checksum() {
        let data = [0, 0, 0, 1, 0, 0, 0, 2, 0xAB];
        let mut good = record(tag::NAME, 0, 9);
        good.checksum = 0xAB00_0003;
        let table = FontTable::read(ReadScope::new(&data), good, false);

        assert_eq!(table.calculated_checksum(), 0xAB00_0003);
        assert!(!table.status().has_issues());

        let bad = record(tag::NAME, 0, 9);
        let table = FontTable::read(ReadScope::new(&data), bad, false);
        assert!(table.status().contains(Issues::INVALID_CHECKSUM));
    }
}
