#![warn(rust_2018_idioms)]

//! # Font validation
//!
//! `fontcheck` reads OpenType, TrueType and OpenType collection files from an in-memory buffer
//! and checks them against the format. Reading a file gives a [`FontFile`] made of [`Font`]s,
//! each holding its tables. Every structure records what was found wrong with it in a
//! [`ValidationStatus`](validation::ValidationStatus), so a damaged file can still be inspected.
//!
//! ```no_run
//! use fontcheck::binary::read::ReadScope;
//! use fontcheck::validation::ValidationLevel;
//! use fontcheck::FontFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let buffer = std::fs::read("Example.ttf")?;
//! let mut file = ReadScope::new(&buffer).read::<FontFile<'_>>()?;
//! let status = file.validate(ValidationLevel::Full);
//! println!("valid: {}", status.is_valid());
//! # Ok(())
//! # }
//! ```

/// Reading of binary data.
pub mod binary;
/// Checksum calculation routines.
pub mod checksum;
pub mod error;
pub mod fixed;
pub mod font;
pub mod fontfile;
pub mod size;
pub mod tables;
pub mod tag;
/// Shared test code.
#[cfg(test)]
pub mod tests;
pub mod validation;

pub use font::Font;
pub use fontfile::FontFile;

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("fontcheck only supports 32-bit and 64-bit targets");

/// Infallible conversion for values that fit the target's pointer width.
pub trait SafeFrom<T> {
    fn safe_from(value: T) -> Self;
}

impl SafeFrom<u32> for usize {
    fn safe_from(value: u32) -> Self {
        // Targets narrower than 32 bits are rejected above.
        value as usize
    }
}
