//! The field record and field array data model used to drive on-screen
//! transaction review.
//!
//! A [`FieldRecord`] never owns its bytes: it borrows a subslice of the
//! scratch area the deserializer walked to produce it, so the compiler (not
//! convention) enforces that no field record can outlive the buffer it
//! points into. [`FieldArray`] is the bounded, append-only sequence of
//! records that the deserializer builds and the UI driver later iterates in
//! the same order.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

use thiserror_no_std::Error;

/// Default capacity of a [`FieldArray`]: large enough for the biggest
/// display-worthy aggregate transaction in the corpus this design is based
/// on (a multisig modification nested inside an aggregate bonded, in
/// practice tops out in the high thirties).
pub const MAX_FIELD_COUNT: usize = 48;

/// Errors produced while appending to a [`FieldArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldArrayError {
    /// The array is already at [`MAX_FIELD_COUNT`].
    #[error("too many transaction fields")]
    TooManyFields,
    /// The data pointer being appended came from a failed cursor read.
    #[error("not enough data")]
    NotEnoughData,
}

/// Semantic role of a field, keyed for the formatter's label table.
///
/// Variants are grouped by the data type they're displayed with, mirroring
/// the field-id convention of the source implementation this is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum FieldId {
    /// Multisig modification: minimum-removal delta.
    MultisigMinRemovalDelta,
    /// Multisig modification: minimum-approval delta.
    MultisigMinApprovalDelta,
    /// Count of mosaics attached to a transfer.
    MosaicCount,
    /// Namespace registration type (root vs. sub).
    NamespaceRegistrationType,
    /// Account restriction variant (address / mosaic / operation).
    AccountRestrictionVariant,
    /// Transfer message type byte.
    MessageType,
    /// Mosaic supply change action (increase / decrease).
    MosaicSupplyChangeAction,
    /// Count of multisig cosignatory additions.
    MultisigAdditionsCount,
    /// Count of multisig cosignatory deletions.
    MultisigDeletionsCount,
    /// Mosaic flag: supply mutable.
    MosaicSupplyMutableFlag,
    /// Mosaic flag: transferable.
    MosaicTransferableFlag,
    /// Mosaic flag: restrictable.
    MosaicRestrictableFlag,
    /// Account restriction flag: operation (block vs. allow).
    RestrictionOperationFlag,
    /// Account restriction flag: direction (incoming vs. outgoing).
    RestrictionDirectionFlag,
    /// Account restriction flag: variant-specific type bit.
    RestrictionTypeFlag,
    /// Mosaic divisibility.
    MosaicDivisibility,
    /// Alias action (link / unlink).
    AliasAction,
    /// Key link action (link / unlink).
    LinkAction,
    /// Supply-change action, displayed identically to
    /// [`FieldId::MosaicSupplyChangeAction`] but attached to a mosaic
    /// supply change transaction rather than a raw action byte.
    SupplyChangeAction,
    /// Outer transaction type tag.
    TransactionType,
    /// Inner transaction type tag (inside an aggregate).
    InnerTransactionType,
    /// Transaction fee, in the native mosaic.
    Fee,
    /// Namespace duration (root registration) or lock duration.
    Duration,
    /// Namespace parent id (sub registration).
    ParentId,
    /// Namespace id.
    NamespaceId,
    /// Mosaic id.
    MosaicId,
    /// Mosaic supply change amount.
    MosaicSupplyChangeAmount,
    /// Voting key link start epoch.
    VotingKeyStart,
    /// Voting key link end epoch.
    VotingKeyEnd,
    /// Metadata scoped key.
    MetadataKey,
    /// Metadata value-size delta.
    MetadataValueSizeDelta,
    /// Recipient address of a transfer.
    RecipientAddress,
    /// A free-form or harvesting-delegation message.
    Message,
    /// Namespace name.
    NamespaceName,
    /// An address appearing in a multisig or restriction list.
    Address,
    /// Aggregate transaction hash (the binding commitment a cosigner signs).
    AggregateTxHash,
    /// Lock transaction hash (hash lock / fund lock).
    LockTransactionHash,
    /// Linked public key (key link, voting key link).
    PublicKey,
    /// Locked mosaic quantity.
    LockQuantity,
    /// Mosaic amount (transfer, supply change).
    Amount,
    /// Notice shown when a transfer carries exactly one non-native mosaic.
    UnknownMosaicNotice,
    /// Count of account restriction entry additions.
    RestrictionAdditionsCount,
    /// Count of account restriction entry deletions.
    RestrictionDeletionsCount,
    /// Account operation restriction: the restricted entity-type tag.
    RestrictionOperationType,
}

/// Data-type tag of a field, drawn from a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DataType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// 32-byte hash.
    Hash256,
    /// 32-byte Ed25519/secp256k1 public key.
    PublicKey,
    /// 24-byte Symbol address.
    Address,
    /// A (mosaic id, amount) pair, rendered with the mosaic's divisibility.
    MosaicCurrency,
    /// The transaction fee, always denominated in the native mosaic.
    XymFee,
    /// UTF-8 plain-text message bytes.
    MessageUtf8,
    /// Message bytes rendered as hex (persistent delegated harvesting).
    MessageHex,
    /// Arbitrary ASCII-filtered string (namespace name, metadata value).
    Str,
}

/// A single field destined for on-screen review.
///
/// The record borrows its bytes from the scratch area the deserializer
/// walked; it does not own them, and cannot outlive them.
#[derive(Debug, Clone, Copy)]
pub struct FieldRecord<'a> {
    id: FieldId,
    data_type: DataType,
    data: &'a [u8],
}

impl<'a> FieldRecord<'a> {
    /// The field's semantic role.
    #[inline]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// The field's display data-type tag.
    #[inline]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Number of bytes backing this field.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this field carries zero bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The field's raw bytes, borrowed from the scratch area.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// A bounded, append-only, ordered sequence of [`FieldRecord`]s.
///
/// `N` is the capacity; [`MAX_FIELD_COUNT`] is the capacity used by the
/// on-device session. Append order defines on-screen review order and is
/// contractual: callers must not reorder records after appending.
#[derive(Debug)]
pub struct FieldArray<'a, const N: usize = MAX_FIELD_COUNT> {
    records: [Option<FieldRecord<'a>>; N],
    len: usize,
}

impl<'a, const N: usize> FieldArray<'a, N> {
    /// An empty field array.
    #[inline]
    pub const fn new() -> Self {
        Self { records: [None; N], len: 0 }
    }

    /// Number of records appended so far.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no records have been appended.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The array's fixed capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append a field whose bytes were obtained from a cursor read.
    ///
    /// `data` is `None` when the originating cursor read failed (a null
    /// pointer in the source design this mirrors); that case is reported as
    /// [`FieldArrayError::NotEnoughData`] rather than silently dropped, so a
    /// short read can never produce a truncated-but-successful field array.
    pub fn append(
        &mut self,
        id: FieldId,
        data_type: DataType,
        data: Option<&'a [u8]>,
    ) -> Result<(), FieldArrayError> {
        let data = data.ok_or(FieldArrayError::NotEnoughData)?;
        if self.len >= N {
            return Err(FieldArrayError::TooManyFields);
        }
        self.records[self.len] = Some(FieldRecord { id, data_type, data });
        self.len += 1;
        Ok(())
    }

    /// Iterate the appended records in append order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRecord<'a>> {
        self.records[..self.len].iter().map(|r| r.as_ref().expect("within len"))
    }
}

impl<'a, const N: usize> Default for FieldArray<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn append_in_order_and_overflow() {
        let mut arr: FieldArray<'_, 2> = FieldArray::new();
        arr.append(FieldId::MosaicId, DataType::Uint64, Some(&[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();
        arr.append(FieldId::Amount, DataType::Uint64, Some(&[0; 8])).unwrap();
        assert_eq!(
            arr.append(FieldId::Fee, DataType::XymFee, Some(&[0; 8])),
            Err(FieldArrayError::TooManyFields)
        );
        assert_eq!(arr.len(), 2);
        let ids: Vec<FieldId> = arr.iter().map(|r| r.id()).collect();
        assert_eq!(ids, std::vec![FieldId::MosaicId, FieldId::Amount]);
    }

    #[test]
    fn append_null_read_is_not_enough_data() {
        let mut arr: FieldArray<'_, 4> = FieldArray::new();
        assert_eq!(
            arr.append(FieldId::Amount, DataType::Uint64, None),
            Err(FieldArrayError::NotEnoughData)
        );
        assert_eq!(arr.len(), 0);
    }

    #[test]
    fn records_borrow_from_the_original_slice() {
        let scratch = [9u8, 9, 9, 9, 9, 9, 9, 9];
        let mut arr: FieldArray<'_, 4> = FieldArray::new();
        arr.append(FieldId::MosaicId, DataType::Uint64, Some(&scratch)).unwrap();
        let record = arr.iter().next().unwrap();
        assert_eq!(record.data(), &scratch);
        assert_eq!(record.len(), 8);
    }
}
