use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("cannot determine integer width: first record is {size} bytes, expected 40 (4-byte integers) or 64 (8-byte integers)")]
    UnknownIntegerWidth { size: u32 },

    #[error("record `{record}`: expected {expected} fields, decoded {got}")]
    FieldCountMismatch {
        record: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("truncated input at byte {at}, need {needed} bytes")]
    Truncated { at: u64, needed: usize },

    #[error("bad record marker at byte {at}: leading {leading}, trailing {trailing}")]
    BadRecordMarker { at: u64, leading: u32, trailing: u32 },

    #[error("spinor info block is {actual} bytes, expected {expected}")]
    SpinorBlockLength { expected: usize, actual: usize },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("rename table for {point_group} has {available} entries, need {needed}")]
    RenameTableTooSmall {
        point_group: &'static str,
        needed: usize,
        available: usize,
    },
}
