use thiserror_no_std::Error;
use xym_buffer::CursorError;
use xym_fields::FieldArrayError;

/// Every way deserializing a transaction can fail.
///
/// Mirrors the status taxonomy the parser's entry contract promises: a
/// short read is always [`ParseError::NotEnoughData`], a structurally
/// invalid value (unknown type tag, nested aggregate, malformed enum) is
/// always [`ParseError::InvalidData`], and array overflow is always
/// [`ParseError::TooManyFields`]. Callers needing an APDU status word apply
/// their own masking on top of this distinction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A cursor read ran off the end of the buffer.
    #[error("not enough data")]
    NotEnoughData,
    /// A value was structurally invalid: an unknown type tag, a forbidden
    /// nested aggregate, an out-of-range enum, or a length that does not
    /// account for the bytes actually available.
    #[error("invalid transaction data")]
    InvalidData,
    /// The field array reached [`xym_fields::MAX_FIELD_COUNT`].
    #[error("too many transaction fields")]
    TooManyFields,
}

impl From<CursorError> for ParseError {
    fn from(err: CursorError) -> Self {
        match err {
            CursorError::NotEnoughData => ParseError::NotEnoughData,
            CursorError::InvalidBip32PathLength => ParseError::InvalidData,
        }
    }
}

impl From<FieldArrayError> for ParseError {
    fn from(err: FieldArrayError) -> Self {
        match err {
            FieldArrayError::NotEnoughData => ParseError::NotEnoughData,
            FieldArrayError::TooManyFields => ParseError::TooManyFields,
        }
    }
}

/// [`Option::ok_or`] specialized to the common "a `take` returned `None`"
/// shape every per-type parser reduces to at its very first read.
pub(crate) trait OptionExt<T> {
    fn ok_or_short_read(self) -> Result<T, ParseError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_short_read(self) -> Result<T, ParseError> {
        self.ok_or(ParseError::NotEnoughData)
    }
}
