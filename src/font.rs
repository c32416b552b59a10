//! A single font resource: its table directory and tables.

use log::warn;

use crate::binary::read::ReadScope;
use crate::error::{ParseError, Structure};
use crate::tables::{
    ColrTable, FmtxTable, FontTable, HeadTable, HheaTable, MaxpTable, OffsetTable, TableData,
    ValidationContext,
};
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationLevel, ValidationStatus};

/// A font resource within a file.
///
/// Every table named in the directory is read when the font is. A table that can't be decoded
/// doesn't stop the others being read: it keeps the error in place of its body.
#[derive(Clone, Debug)]
pub struct Font<'a> {
    scope: ReadScope<'a>,
    offset: usize,
    ttc_index: Option<u32>,
    offset_table: OffsetTable<'a>,
    tables: Vec<FontTable<'a>>,
    status: ValidationStatus,
}

impl<'a> Font<'a> {
    /// Read the font whose table directory is at `offset` in the file `scope`.
    ///
    /// `ttc_index` is the font's position in its collection, `None` for a font file.
    pub fn read(
        scope: ReadScope<'a>,
        offset: usize,
        ttc_index: Option<u32>,
    ) -> Result<Font<'a>, ParseError> {
        let structure = Structure::Font(ttc_index);
        let mut status = ValidationStatus::partial();
        if offset >= scope.data().len() {
            warn!("{} offset {} is past the end of the file", structure, offset);
            status.insert(Issues::STRUCTURE_OFFSET_OUT_OF_RANGE);
            return Err(ParseError::structure(
                structure,
                status,
                ParseError::BadOffset,
            ));
        }

        let offset_table = match OffsetTable::read(scope.offset(offset)) {
            Ok(offset_table) => offset_table,
            Err(err) => {
                if let Some(directory) = err.status() {
                    status.merge_issues(directory);
                }
                return Err(ParseError::structure(structure, status, err));
            }
        };
        status.merge_issues(offset_table.status());

        let in_collection = ttc_index.is_some();
        let tables = offset_table
            .table_records
            .iter()
            .map(|record| FontTable::read(scope, record, in_collection))
            .collect();

        Ok(Font {
            scope,
            offset,
            ttc_index,
            offset_table,
            tables,
            status,
        })
    }

    /// Validate the directory and every table, returning the font's new status.
    ///
    /// The font's status holds the issues of the directory and of all its tables. The status of
    /// each table is kept with the table too, see `table_statuses`.
    pub fn validate(&mut self, level: ValidationLevel) -> ValidationStatus {
        let mut status = self.status;
        status.merge_issues(self.offset_table.validate(self.scope.data().len()));

        let num_glyphs = self.num_glyphs();
        let in_collection = self.ttc_index.is_some();
        let context =
            ValidationContext::new(self.scope, &self.offset_table, in_collection, num_glyphs);
        for table in &mut self.tables {
            status.merge_issues(table.validate(level, &context));
        }

        status.finish(level);
        self.status = status;
        status
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// The status of each table, in directory order.
    pub fn table_statuses(&self) -> Vec<(Tag, ValidationStatus)> {
        self.tables
            .iter()
            .map(|table| (table.tag(), table.status()))
            .collect()
    }

    /// Offset of the font's table directory in the file.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn ttc_index(&self) -> Option<u32> {
        self.ttc_index
    }

    pub fn is_in_collection(&self) -> bool {
        self.ttc_index.is_some()
    }

    pub fn offset_table(&self) -> &OffsetTable<'a> {
        &self.offset_table
    }

    pub fn sfnt_version(&self) -> Tag {
        self.offset_table.sfnt_version
    }

    /// Every table, one for each table record, in directory order.
    pub fn tables(&self) -> &[FontTable<'a>] {
        &self.tables
    }

    pub fn contains_table(&self, tag: Tag) -> bool {
        self.offset_table.get_table_index(tag).is_some()
    }

    /// The table with `tag`. If the tag occurs more than once this is the first.
    pub fn try_get_table(&self, tag: Tag) -> Option<&FontTable<'a>> {
        self.offset_table
            .get_table_index(tag)
            .and_then(|index| self.tables.get(index))
    }

    /// A font with `fvar` and either `gvar` or `CFF2`.
    pub fn is_variable_font(&self) -> bool {
        self.contains_table(tag::FVAR)
            && (self.contains_table(tag::GVAR) || self.contains_table(tag::CFF2))
    }

    /// `numGlyphs` from `maxp`, if there is a readable `maxp` table.
    pub fn num_glyphs(&self) -> Option<u16> {
        self.maxp_table().ok()?.map(|maxp| maxp.num_glyphs)
    }

    pub fn head_table(&self) -> Result<Option<&HeadTable>, ParseError> {
        self.decoded_table(tag::HEAD, |data| match data {
            TableData::Head(table) => Some(table),
            _ => None,
        })
    }

    pub fn hhea_table(&self) -> Result<Option<&HheaTable>, ParseError> {
        self.decoded_table(tag::HHEA, |data| match data {
            TableData::Hhea(table) => Some(table),
            _ => None,
        })
    }

    pub fn maxp_table(&self) -> Result<Option<&MaxpTable>, ParseError> {
        self.decoded_table(tag::MAXP, |data| match data {
            TableData::Maxp(table) => Some(table),
            _ => None,
        })
    }

    pub fn fmtx_table(&self) -> Result<Option<&FmtxTable>, ParseError> {
        self.decoded_table(tag::FMTX, |data| match data {
            TableData::Fmtx(table) => Some(table),
            _ => None,
        })
    }

    pub fn colr_table(&self) -> Result<Option<&ColrTable>, ParseError> {
        self.decoded_table(tag::COLR, |data| match data {
            TableData::Colr(table) => Some(table),
            _ => None,
        })
    }

    fn decoded_table<T>(
        &self,
        tag: Tag,
        select: impl Fn(&TableData) -> Option<&T>,
    ) -> Result<Option<&T>, ParseError> {
        match self.try_get_table(tag) {
            Some(table) => Ok(select(table.data()?)),
            None => Ok(None),
        }
    }
}
