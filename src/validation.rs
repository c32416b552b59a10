//! Validation state of parsed structures.
//!
//! Every structure carries a `ValidationStatus`: how far its checking has got (`Completion`) and
//! the set of problems found so far (`Issues`). Issues only accumulate. Checking runs at one of
//! two levels: `ValidationLevel::Simple` looks only at the structure's own bytes, and
//! `ValidationLevel::Full` also compares it with the other tables in the font.
//!
//! Records that occur in bulk (one per glyph, say) use the one-byte `RecordStatus` instead, which
//! maps onto the same bit positions through `RecordStatus::to_file_bits`.
//!
//! The packed 64-bit form returned by `ValidationStatus::bits` uses these positions:
//!
//! | bit | meaning |
//! |---|---|
//! | `0x0000_0001` | partial validation |
//! | `0x0000_0002` | internal validation only |
//! | `0x0000_0004` ... `0x0080_0000` | `Issues` |
//! | `0x8000_0000` | valid |

use bitflags::bitflags;

bitflags! {
    /// Problems found while reading or validating a structure.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Issues: u64 {
        /// The data ended before the structure was completely read.
        const READ_TRUNCATED = 0x04;
        /// The sfnt version tag is not one this crate reads.
        const SFNT_VERSION_NOT_SUPPORTED = 0x08;
        const TTC_HEADER_LENGTH_OUT_OF_RANGE = 0x10;
        const TTC_HEADER_FIELDS_INVALID = 0x20;
        /// A collection points at a font directory past the end of the file.
        const TTC_OFFSET_TABLE_OUT_OF_RANGE = 0x40;
        const OFFSET_TABLE_LENGTH_OUT_OF_RANGE = 0x80;
        /// Reserved for directory field errors in packed statuses. Never set by this crate: a
        /// directory whose searchRange, entrySelector or rangeShift disagree with the table count
        /// gets `STRUCTURE_FIELDS_INTERNALLY_INVALID`.
        const OFFSET_TABLE_FIELDS_INVALID = 0x100;
        /// The declared length is shorter than the header for the declared version.
        const TABLE_LENGTH_TOO_SHORT = 0x200;
        const STRUCTURE_OFFSET_OUT_OF_RANGE = 0x400;
        const STRUCTURE_LENGTH_OUT_OF_RANGE = 0x800;
        const STRUCTURE_VERSION_NOT_SUPPORTED = 0x1000;
        /// Minor versions only add fields, so an unknown one is read as the latest known.
        const STRUCTURE_MINOR_VERSION_UNKNOWN = 0x2000;
        const STRUCTURE_FIELD_WARNINGS = 0x4000;
        /// A field contradicts the format or another field of the same structure.
        const STRUCTURE_FIELDS_INTERNALLY_INVALID = 0x8000;
        /// A field contradicts another structure, usually a sibling table.
        const STRUCTURE_FIELDS_EXTERNALLY_INVALID = 0x1_0000;
        const STRUCTURE_HAS_DUPLICATE_ENTRIES = 0x2_0000;
        const REFERENCED_STRUCTURE_OFFSET_OUT_OF_RANGE = 0x4_0000;
        const REFERENCED_STRUCTURE_LENGTH_OUT_OF_RANGE = 0x8_0000;
        const UNKNOWN_TABLE_TAG = 0x10_0000;
        /// One of the structures this one contains has issues of its own.
        const ISSUE_IN_CHILD_STRUCTURE = 0x40_0000;
        const INVALID_CHECKSUM = 0x80_0000;
    }
}

bitflags! {
    /// Compact status for records that occur in bulk.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RecordStatus: u8 {
        const PARTIAL_VALIDATION = 0x01;
        const INTERNAL_VALIDATION_ONLY = 0x02;
        const READ_TRUNCATED = 0x04;
        const FIELD_WARNING = 0x08;
        const OFFSET_OUT_OF_RANGE = 0x10;
        /// Invalid with respect to the record itself or its containing table.
        const INTERNAL_ERROR = 0x20;
        /// Invalid with respect to another table.
        const EXTERNAL_ERROR = 0x40;
        const VALID = 0x80;
    }
}

const PARTIAL_BIT: u64 = 0x01;
const INTERNAL_ONLY_BIT: u64 = 0x02;
const VALID_BIT: u64 = 0x8000_0000;

/// How much checking a structure has been through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Completion {
    #[default]
    NotValidated,
    /// Only the checks possible while reading have run.
    Partial,
    /// Every check that needs nothing outside the structure has run.
    InternalOnly,
    /// All checks have run.
    Complete,
}

/// Which checks `validate` should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationLevel {
    /// Checks that need only the structure's own bytes.
    Simple,
    /// Simple checks plus checks against sibling structures.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValidationStatus {
    completion: Completion,
    issues: Issues,
}

impl ValidationStatus {
    pub fn new() -> ValidationStatus {
        ValidationStatus::default()
    }

    /// The status of a structure that has just been read.
    pub fn partial() -> ValidationStatus {
        ValidationStatus {
            completion: Completion::Partial,
            issues: Issues::empty(),
        }
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn issues(&self) -> Issues {
        self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn contains(&self, issues: Issues) -> bool {
        self.issues.contains(issues)
    }

    /// All checks have run and none of them found anything.
    pub fn is_valid(&self) -> bool {
        self.completion == Completion::Complete && self.issues.is_empty()
    }

    pub fn insert(&mut self, issues: Issues) {
        self.issues |= issues;
    }

    /// Take on the issues of `other`, leaving completion alone.
    pub fn merge_issues(&mut self, other: ValidationStatus) {
        self.issues |= other.issues;
    }

    pub fn set_completion(&mut self, completion: Completion) {
        self.completion = completion;
    }

    /// Mark the checks for `level` as done.
    pub fn finish(&mut self, level: ValidationLevel) {
        self.completion = match level {
            ValidationLevel::Simple => Completion::InternalOnly,
            ValidationLevel::Full => Completion::Complete,
        };
    }

    /// Pack into the 64-bit form described in the module documentation.
    pub fn bits(&self) -> u64 {
        let completion = match self.completion {
            Completion::NotValidated => 0,
            Completion::Partial => PARTIAL_BIT,
            Completion::InternalOnly => INTERNAL_ONLY_BIT,
            Completion::Complete if self.issues.is_empty() => VALID_BIT,
            Completion::Complete => 0,
        };
        completion | self.issues.bits()
    }

    /// Unpack the 64-bit form. Unknown bits are dropped.
    ///
    /// With no completion bit set, a value with issues is taken to be fully checked: that is
    /// how a structure that failed its checks packs.
    pub fn from_bits(bits: u64) -> ValidationStatus {
        let issues = Issues::from_bits_truncate(bits);
        let completion = if bits & PARTIAL_BIT != 0 {
            Completion::Partial
        } else if bits & INTERNAL_ONLY_BIT != 0 {
            Completion::InternalOnly
        } else if bits & VALID_BIT != 0 || !issues.is_empty() {
            Completion::Complete
        } else {
            Completion::NotValidated
        };
        ValidationStatus { completion, issues }
    }
}

impl From<RecordStatus> for ValidationStatus {
    fn from(status: RecordStatus) -> Self {
        ValidationStatus::from_bits(status.to_file_bits())
    }
}

impl RecordStatus {
    /// Map onto the bit positions of `ValidationStatus::bits`.
    pub fn to_file_bits(self) -> u64 {
        let bits = u64::from(self.bits());
        let same = RecordStatus::PARTIAL_VALIDATION
            | RecordStatus::INTERNAL_VALIDATION_ONLY
            | RecordStatus::READ_TRUNCATED;
        let shifts = [
            (RecordStatus::FIELD_WARNING, 11),
            (RecordStatus::OFFSET_OUT_OF_RANGE, 14),
            (RecordStatus::INTERNAL_ERROR, 10),
            (RecordStatus::EXTERNAL_ERROR, 10),
            (RecordStatus::VALID, 24),
        ];
        shifts
            .iter()
            .fold(bits & u64::from(same.bits()), |acc, &(flag, shift)| {
                acc | ((bits & u64::from(flag.bits())) << shift)
            })
    }

    pub fn has_errors(self) -> bool {
        self.intersects(
            RecordStatus::READ_TRUNCATED
                | RecordStatus::FIELD_WARNING
                | RecordStatus::OFFSET_OUT_OF_RANGE
                | RecordStatus::INTERNAL_ERROR
                | RecordStatus::EXTERNAL_ERROR,
        )
    }

    /// Record status equivalent of `ValidationStatus::finish`.
    pub fn finish(&mut self, level: ValidationLevel) {
        self.remove(
            RecordStatus::PARTIAL_VALIDATION
                | RecordStatus::INTERNAL_VALIDATION_ONLY
                | RecordStatus::VALID,
        );
        match level {
            ValidationLevel::Simple => self.insert(RecordStatus::INTERNAL_VALIDATION_ONLY),
            ValidationLevel::Full if !self.has_errors() => self.insert(RecordStatus::VALID),
            ValidationLevel::Full => {}
        }
    }
}
