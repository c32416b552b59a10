//! Four byte tags identifying tables, sfnt versions and collections.

use crate::binary::read::ReadFrom;
use crate::binary::U32Be;
use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Generate a 4-byte font table tag from byte string
///
/// Example:
///
/// ```
/// use fontcheck::tag;
/// use fontcheck::tag::Tag;
///
/// assert_eq!(tag!(b"glyf"), Tag::from_u32(0x676C7966));
/// ```
#[macro_export]
macro_rules! tag {
    ($w:expr) => {
        $crate::tag::Tag::new(*$w)
    };
}

/// A 4-byte identifier, compared byte for byte.
///
/// A `Tag` can be built from bytes, a string or a big-endian `u32`, and compares equal to each
/// of those representations when they hold the same four bytes. An absent tag is modelled with
/// `Option<Tag>`: two `None`s are equal and `None` never equals `Some`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tag([u8; 4]);

impl Tag {
    pub const fn new(bytes: [u8; 4]) -> Tag {
        Tag(bytes)
    }

    /// Build a tag from a byte slice.
    ///
    /// Fewer than four bytes are padded with zero, extra bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Tag {
        let mut tag = [0; 4];
        let len = bytes.len().min(4);
        tag[..len].copy_from_slice(&bytes[..len]);
        Tag(tag)
    }

    pub const fn from_u32(value: u32) -> Tag {
        Tag(value.to_be_bytes())
    }

    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// A copy of the four raw bytes.
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }

    /// Build a tag from a string of up to four characters.
    ///
    /// Short strings are padded with spaces. Characters above U+00FF can't be represented in
    /// a byte and are rejected with `ParseError::BadValue`, as are strings longer than four
    /// characters.
    pub fn from_string(s: &str) -> Result<Tag, ParseError> {
        let mut tag = [b' '; 4];
        for (index, c) in s.chars().enumerate() {
            let slot = tag.get_mut(index).ok_or(ParseError::BadValue)?;
            *slot = u8::try_from(u32::from(c))?;
        }
        Ok(Tag(tag))
    }
}

impl FromStr for Tag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::from_string(s)
    }
}

impl From<u32> for Tag {
    fn from(value: u32) -> Self {
        Tag::from_u32(value)
    }
}

impl From<[u8; 4]> for Tag {
    fn from(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }
}

impl From<Tag> for u32 {
    fn from(tag: Tag) -> Self {
        tag.to_u32()
    }
}

impl ReadFrom for Tag {
    type ReadType = U32Be;

    fn read_from(value: u32) -> Self {
        Tag::from_u32(value)
    }
}

impl PartialEq<u32> for Tag {
    fn eq(&self, other: &u32) -> bool {
        self.0 == other.to_be_bytes()
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.0 == *other
    }
}

impl PartialEq<[u8]> for Tag {
    fn eq(&self, other: &[u8]) -> bool {
        self.0[..] == *other
    }
}

impl PartialEq<&[u8]> for Tag {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0[..] == **other
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        let mut chars = other.chars();
        let same = self
            .0
            .iter()
            .all(|&b| chars.next().map_or(false, |c| u32::from(c) == u32::from(b)));
        same && chars.next().is_none()
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl fmt::Display for Tag {
    // Each byte is its own code point, so 0x80-0xFF come out as Latin-1 characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.0.iter().copied().map(char::from).collect();
        f.write_str(&s)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            write!(f, "Tag({:?})", self.to_string())
        } else {
            write!(f, "Tag(0x{:08x})", self.to_u32())
        }
    }
}

/// sfnt version for TrueType outlines, 1.0 as 16.16 fixed-point.
pub const TRUETYPE: Tag = Tag::from_u32(0x00010000);
/// sfnt version for fonts with CFF data.
pub const OTTO: Tag = tag!(b"OTTO");
/// Apple's sfnt version for TrueType outlines.
pub const TRUE: Tag = tag!(b"true");
/// Apple's sfnt version for PostScript Type 1 data; recognised but not supported.
pub const TYP1: Tag = tag!(b"typ1");
/// Tag at the start of a font collection.
pub const TTCF: Tag = tag!(b"ttcf");

pub const ACNT: Tag = tag!(b"acnt");
pub const ANKR: Tag = tag!(b"ankr");
pub const AVAR: Tag = tag!(b"avar");
pub const BASE: Tag = tag!(b"BASE");
pub const BDAT: Tag = tag!(b"bdat");
pub const BHED: Tag = tag!(b"bhed");
pub const BLOC: Tag = tag!(b"bloc");
pub const BSLN: Tag = tag!(b"bsln");
pub const CBDT: Tag = tag!(b"CBDT");
pub const CBLC: Tag = tag!(b"CBLC");
pub const CFF: Tag = tag!(b"CFF ");
pub const CFF2: Tag = tag!(b"CFF2");
pub const CMAP: Tag = tag!(b"cmap");
pub const COLR: Tag = tag!(b"COLR");
pub const CPAL: Tag = tag!(b"CPAL");
pub const CVAR: Tag = tag!(b"cvar");
pub const CVT: Tag = tag!(b"cvt ");
pub const DSIG: Tag = tag!(b"DSIG");
pub const EBDT: Tag = tag!(b"EBDT");
pub const EBLC: Tag = tag!(b"EBLC");
pub const EBSC: Tag = tag!(b"EBSC");
pub const FDSC: Tag = tag!(b"fdsc");
pub const FEAT: Tag = tag!(b"feat");
pub const FEAT_GRAPHITE: Tag = tag!(b"Feat");
pub const FMTX: Tag = tag!(b"fmtx");
pub const FOND: Tag = tag!(b"fond");
pub const FPGM: Tag = tag!(b"fpgm");
pub const FVAR: Tag = tag!(b"fvar");
pub const GASP: Tag = tag!(b"gasp");
pub const GCID: Tag = tag!(b"gcid");
pub const GDEF: Tag = tag!(b"GDEF");
pub const GLAT: Tag = tag!(b"Glat");
pub const GLOC: Tag = tag!(b"Gloc");
pub const GLYF: Tag = tag!(b"glyf");
pub const GPOS: Tag = tag!(b"GPOS");
pub const GSUB: Tag = tag!(b"GSUB");
pub const GVAR: Tag = tag!(b"gvar");
pub const HDMX: Tag = tag!(b"hdmx");
pub const HEAD: Tag = tag!(b"head");
pub const HHEA: Tag = tag!(b"hhea");
pub const HMTX: Tag = tag!(b"hmtx");
pub const HSTY: Tag = tag!(b"hsty");
pub const HVAR: Tag = tag!(b"HVAR");
pub const JSTF: Tag = tag!(b"JSTF");
pub const JUST: Tag = tag!(b"just");
pub const KERN: Tag = tag!(b"kern");
pub const KERX: Tag = tag!(b"kerx");
pub const LCAR: Tag = tag!(b"lcar");
pub const LOCA: Tag = tag!(b"loca");
pub const LTAG: Tag = tag!(b"ltag");
pub const LTSH: Tag = tag!(b"LTSH");
pub const MATH: Tag = tag!(b"MATH");
pub const MAXP: Tag = tag!(b"maxp");
pub const MERG: Tag = tag!(b"MERG");
pub const META: Tag = tag!(b"meta");
pub const MORT: Tag = tag!(b"mort");
pub const MORX: Tag = tag!(b"morx");
pub const MVAR: Tag = tag!(b"MVAR");
pub const NAME: Tag = tag!(b"name");
pub const OPBD: Tag = tag!(b"opbd");
pub const OS_2: Tag = tag!(b"OS/2");
pub const PCLT: Tag = tag!(b"PCLT");
pub const POST: Tag = tag!(b"post");
pub const PREP: Tag = tag!(b"prep");
pub const PROP: Tag = tag!(b"prop");
pub const SBIX: Tag = tag!(b"sbix");
pub const SILE: Tag = tag!(b"Sile");
pub const SILF: Tag = tag!(b"Silf");
pub const SILL: Tag = tag!(b"Sill");
pub const STAT: Tag = tag!(b"STAT");
pub const SVG: Tag = tag!(b"SVG ");
pub const TRAK: Tag = tag!(b"trak");
pub const TSI0: Tag = tag!(b"TSI0");
pub const TSI1: Tag = tag!(b"TSI1");
pub const TSI2: Tag = tag!(b"TSI2");
pub const TSI3: Tag = tag!(b"TSI3");
pub const TSI5: Tag = tag!(b"TSI5");
pub const TSIB: Tag = tag!(b"TSIB");
pub const TSIC: Tag = tag!(b"TSIC");
pub const TSID: Tag = tag!(b"TSID");
pub const TSIJ: Tag = tag!(b"TSIJ");
pub const TSIP: Tag = tag!(b"TSIP");
pub const TSIS: Tag = tag!(b"TSIS");
pub const TSIV: Tag = tag!(b"TSIV");
pub const VDMX: Tag = tag!(b"VDMX");
pub const VHEA: Tag = tag!(b"vhea");
pub const VMTX: Tag = tag!(b"vmtx");
pub const VORG: Tag = tag!(b"VORG");
pub const VVAR: Tag = tag!(b"VVAR");
pub const XREF: Tag = tag!(b"xref");
pub const ZAPF: Tag = tag!(b"Zapf");

/// Every table tag registered by OpenType, Apple Advanced Typography, Graphite, and the
/// VOLT/VTT source tables.
pub static KNOWN_TABLE_TAGS: &[Tag] = &[
    ACNT, ANKR, AVAR, BASE, BDAT, BHED, BLOC, BSLN, CBDT, CBLC, CFF, CFF2, CMAP, COLR, CPAL,
    CVAR, CVT, DSIG, EBDT, EBLC, EBSC, FDSC, FEAT, FEAT_GRAPHITE, FMTX, FOND, FPGM, FVAR, GASP,
    GCID, GDEF, GLAT, GLOC, GLYF, GPOS, GSUB, GVAR, HDMX, HEAD, HHEA, HMTX, HSTY, HVAR, JSTF,
    JUST, KERN, KERX, LCAR, LOCA, LTAG, LTSH, MATH, MAXP, MERG, META, MORT, MORX, MVAR, NAME,
    OPBD, OS_2, PCLT, POST, PREP, PROP, SBIX, SILE, SILF, SILL, STAT, SVG, TRAK, TSI0, TSI1,
    TSI2, TSI3, TSI5, TSIB, TSIC, TSID, TSIJ, TSIP, TSIS, TSIV, VDMX, VHEA, VMTX, VORG, VVAR,
    XREF, ZAPF,
];

/// Tables with a dedicated decoder. Everything else is kept as opaque bytes.
pub static SUPPORTED_TABLE_TAGS: &[Tag] = &[HEAD, HHEA, MAXP, FMTX, COLR];

pub fn is_known_table(tag: Tag) -> bool {
    KNOWN_TABLE_TAGS.contains(&tag)
}

pub fn is_supported_table(tag: Tag) -> bool {
    SUPPORTED_TABLE_TAGS.contains(&tag)
}

/// Whether `tag` names an sfnt resource this crate can read.
///
/// `ttcf` is not one of these: it only appears at the very start of a collection file.
pub fn is_supported_sfnt_version(tag: Tag) -> bool {
    tag == TRUETYPE || tag == OTTO || tag == TRUE
}
