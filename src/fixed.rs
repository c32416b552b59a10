//! 16.16 fixed-point numbers.

use crate::binary::read::ReadFrom;
use crate::binary::U32Be;
use std::fmt;

/// 32-bit signed fixed-point number (16.16)
///
/// Some tables store their version number in this type but do not mean a fraction: version
/// 0.5 of `maxp` is stored as `0x00005000`, not `0x00008000`. The `table_version_*` methods
/// give that reading, where the minor version is the top nibble of the fraction.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Fixed(i32);

impl Fixed {
    pub const fn new(mantissa: i16, fraction: u16) -> Fixed {
        Fixed(((mantissa as i32) << 16) | fraction as i32)
    }

    /// Reinterpret the bits of `value`, no scaling.
    pub const fn from_bits(value: u32) -> Fixed {
        Fixed(value as i32)
    }

    pub const fn from_be_bytes(bytes: [u8; 4]) -> Fixed {
        Fixed(i32::from_be_bytes(bytes))
    }

    pub const fn to_bits(self) -> u32 {
        self.0 as u32
    }

    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// The signed integer part.
    pub const fn mantissa(self) -> i16 {
        (self.0 >> 16) as i16
    }

    /// The unsigned fraction part, in 65536ths.
    pub const fn fraction(self) -> u16 {
        self.0 as u16
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.mantissa()) + f64::from(self.fraction()) / 65536.0
    }

    /// Minor version in a version-style value: the top nibble of the fraction.
    pub const fn table_version_minor(self) -> u16 {
        self.fraction() >> 12
    }

    pub fn table_version_f64(self) -> f64 {
        f64::from(self.mantissa()) + f64::from(self.table_version_minor()) / 10.0
    }

    pub fn table_version_string(self) -> String {
        self.table_version_f64().to_string()
    }
}

impl ReadFrom for Fixed {
    type ReadType = U32Be;

    fn read_from(value: u32) -> Self {
        Fixed::from_bits(value)
    }
}

impl From<Fixed> for f32 {
    fn from(value: Fixed) -> f32 {
        (f64::from(value.0) / 65536.0) as f32
    }
}

impl From<Fixed> for f64 {
    fn from(value: Fixed) -> f64 {
        value.to_f64()
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed(0x{:08x})", self.to_bits())
    }
}
