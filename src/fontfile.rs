//! Top-level font file reading.

use log::warn;

use crate::binary::read::{ReadBinary, ReadCtxt, ReadScope};
use crate::error::{ParseError, Structure};
use crate::font::Font;
use crate::tables::TtcHeader;
use crate::tag::{self, Tag};
use crate::validation::{Issues, ValidationLevel, ValidationStatus};
use crate::SafeFrom;

/// An OpenType font file or font collection.
///
/// Reading a file reads every font in it and runs the simple checks. Call `validate` with
/// `ValidationLevel::Full` to check the tables against each other too.
#[derive(Clone, Debug)]
pub struct FontFile<'a> {
    scope: ReadScope<'a>,
    sfnt_version: Tag,
    ttc_header: Option<TtcHeader<'a>>,
    fonts: Vec<Font<'a>>,
    status: ValidationStatus,
}

impl ReadBinary for FontFile<'_> {
    type HostType<'a> = FontFile<'a>;

    fn read<'a>(ctxt: &mut ReadCtxt<'a>) -> Result<Self::HostType<'a>, ParseError> {
        let scope = ctxt.scope();
        let mut status = ValidationStatus::partial();

        let sfnt_version = match ctxt.read_tag() {
            Ok(tag) => tag,
            Err(err) => {
                warn!("font file is too short to hold a tag");
                status.insert(Issues::READ_TRUNCATED);
                return Err(ParseError::structure(Structure::File, status, err.into()));
            }
        };

        let (ttc_header, fonts) = if sfnt_version == tag::TTCF {
            let header = TtcHeader::read(scope).map_err(|err| {
                if let Some(header) = err.status() {
                    status.merge_issues(header);
                }
                ParseError::structure(Structure::File, status, err)
            })?;
            let fonts = read_collection_fonts(scope, &header, &mut status)?;
            (Some(header), fonts)
        } else if tag::is_supported_sfnt_version(sfnt_version) {
            let font = Font::read(scope, 0, None).map_err(|err| {
                if let Some(font) = err.status() {
                    status.merge_issues(font);
                }
                ParseError::structure(Structure::File, status, err)
            })?;
            (None, vec![font])
        } else {
            warn!("unsupported font format {:?}", sfnt_version);
            return Err(ParseError::UnsupportedFormat(sfnt_version));
        };

        let mut file = FontFile {
            scope,
            sfnt_version,
            ttc_header,
            fonts,
            status,
        };
        file.validate(ValidationLevel::Simple);
        Ok(file)
    }
}

fn read_collection_fonts<'a>(
    scope: ReadScope<'a>,
    header: &TtcHeader<'a>,
    status: &mut ValidationStatus,
) -> Result<Vec<Font<'a>>, ParseError> {
    (0..header.num_fonts)
        .zip(header.offset_tables.iter())
        .map(|(index, offset)| {
            Font::read(scope, usize::safe_from(offset), Some(index)).map_err(|err| {
                if let Some(font) = err.status() {
                    status.merge_issues(font);
                }
                if *err.root_cause() == ParseError::BadOffset {
                    status.insert(Issues::TTC_OFFSET_TABLE_OUT_OF_RANGE);
                }
                ParseError::structure(Structure::File, *status, err)
            })
        })
        .collect()
}

impl<'a> FontFile<'a> {
    /// Run the checks for `level` on the collection header and every font.
    ///
    /// A collection reports a font with issues as `ISSUE_IN_CHILD_STRUCTURE`. A single font
    /// passes its own issues up to the file.
    pub fn validate(&mut self, level: ValidationLevel) -> ValidationStatus {
        let mut status = self.status;
        let file_length = self.scope.data().len();
        if let Some(header) = &mut self.ttc_header {
            status.merge_issues(header.validate(file_length));
        }

        let is_collection = self.ttc_header.is_some();
        for font in &mut self.fonts {
            let font_status = font.validate(level);
            if !is_collection {
                status.merge_issues(font_status);
            } else if font_status.has_issues() {
                status.insert(Issues::ISSUE_IN_CHILD_STRUCTURE);
            }
        }

        status.finish(level);
        self.status = status;
        status
    }

    /// The font at `index`, `ParseError::BadIndex` if there isn't one.
    pub fn font(&self, index: usize) -> Result<&Font<'a>, ParseError> {
        self.fonts.get(index).ok_or(ParseError::BadIndex)
    }

    pub fn fonts(&self) -> &[Font<'a>] {
        &self.fonts
    }

    pub fn num_fonts(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_collection(&self) -> bool {
        self.ttc_header.is_some()
    }

    /// The tag at the start of the file: `ttcf` for a collection, otherwise the font's sfnt
    /// version.
    pub fn sfnt_version(&self) -> Tag {
        self.sfnt_version
    }

    pub fn ttc_header(&self) -> Option<&TtcHeader<'a>> {
        self.ttc_header.as_ref()
    }

    /// Length of the file in bytes.
    pub fn length(&self) -> usize {
        self.scope.data().len()
    }

    pub fn scope(&self) -> ReadScope<'a> {
        self.scope
    }

    pub fn status(&self) -> ValidationStatus {
        self.status
    }

    /// The status of each font, in file order.
    pub fn font_statuses(&self) -> Vec<ValidationStatus> {
        self.fonts.iter().map(Font::status).collect()
    }
}
