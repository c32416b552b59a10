//! Shared test code.

include!("../tests/common.rs");

use crate::binary::read::ReadScope;
use crate::tables::{OffsetTable, TableType, ValidationContext};
use crate::validation::ValidationStatus;

/// Run the simple checks on `table` as if it were in a font with no other tables.
pub fn validate_alone<T: TableType>(
    table: &mut T,
    in_collection: bool,
    status: &mut ValidationStatus,
) {
    use writer::TtfType::*;

    let data = writer::convert(&[TrueTypeMagic, UInt16(0), UInt16(0), UInt16(0), UInt16(0)]);
    let scope = ReadScope::new(&data);
    let directory = OffsetTable::read(scope).unwrap();
    let context = ValidationContext::new(scope, &directory, in_collection, None);
    table.validate_internal(&context, status);
}

pub(crate) mod writer {
    //! Testing utilities.

    // The writer module is derived from ttf-parser, licenced under Apache-2.0.
    // https://github.com/RazrFalcon/ttf-parser/blob/439aaaebd50eb8aed66302e3c1b51fae047f85b2/src/writer.rs

    #[allow(missing_debug_implementations)]
    #[derive(Clone, Copy)]
    pub enum TtfType {
        Raw(&'static [u8]),
        TrueTypeMagic,
        OpenTypeMagic,
        FontCollectionMagic,
        UInt8(u8),
        Int16(i16),
        UInt16(u16),
        UInt32(u32),
        Int64(i64),
        TableTag(crate::tag::Tag),
    }

    pub fn convert(values: &[TtfType]) -> Vec<u8> {
        let mut data = Vec::with_capacity(256);
        for v in values {
            convert_type(*v, &mut data);
        }

        data
    }

    fn convert_type(value: TtfType, data: &mut Vec<u8>) {
        match value {
            TtfType::Raw(bytes) => {
                data.extend_from_slice(bytes);
            }
            TtfType::TrueTypeMagic => {
                data.extend_from_slice(&[0x00, 0x01, 0x00, 0x00]);
            }
            TtfType::OpenTypeMagic => {
                data.extend_from_slice(&[0x4F, 0x54, 0x54, 0x4F]);
            }
            TtfType::FontCollectionMagic => {
                data.extend_from_slice(&[0x74, 0x74, 0x63, 0x66]);
            }
            TtfType::UInt8(n) => {
                data.extend_from_slice(&u8::to_be_bytes(n));
            }
            TtfType::Int16(n) => {
                data.extend_from_slice(&i16::to_be_bytes(n));
            }
            TtfType::UInt16(n) => {
                data.extend_from_slice(&u16::to_be_bytes(n));
            }
            TtfType::UInt32(n) => {
                data.extend_from_slice(&u32::to_be_bytes(n));
            }
            TtfType::Int64(n) => {
                data.extend_from_slice(&i64::to_be_bytes(n));
            }
            TtfType::TableTag(tag) => {
                data.extend_from_slice(&tag.bytes());
            }
        }
    }
}
