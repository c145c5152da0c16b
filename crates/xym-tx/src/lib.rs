//! Type-dispatched recursive-descent deserializer over the Symbol
//! transaction wire format.
//!
//! [`parse`] is the sole entry point: it reads the common header, decides
//! the signing length (the aggregate cosigner/originator asymmetry lives
//! here and nowhere else), reads the fee envelope for standalone
//! transactions, and dispatches to the per-type parser in [`parsers`]. Every
//! parser borrows from the same input slice it was given, so the returned
//! [`ParsedTransaction`] cannot outlive the raw bytes it was parsed from.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

mod error;
mod parsers;

pub mod network;
pub mod tx_type;

pub use error::ParseError;
pub use network::NetworkConfig;
pub use tx_type::TxType;

use error::OptionExt;
use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

/// 32-byte generation hash + 1-byte version + 1-byte network + 2-byte type.
const COMMON_HEADER_LEN: usize = 36;

/// 8-byte max fee + 8-byte deadline, present after the common header of
/// every standalone (non-inner) transaction.
const FEE_ENVELOPE_LEN: usize = 16;

/// Bytes an aggregate originator signs: the common header through the
/// aggregate's own inner-transaction hash, not including the inner
/// transactions or cosignatures that follow.
const AGGREGATE_ORIGINATOR_SIGNING_LENGTH: usize = 84;

/// A cosigner signs only the 32-byte aggregate hash.
const AGGREGATE_COSIGNER_SIGNING_LENGTH: usize = 32;

/// The outcome of a successful [`parse`]: the ordered field array ready for
/// on-screen review, and the count of leading bytes of the input that the
/// signing operation must cover.
#[derive(Debug)]
pub struct ParsedTransaction<'a> {
    pub fields: FieldArray<'a>,
    pub signing_length: usize,
}

/// Parse `raw` — a complete, concatenated transaction payload — against
/// `network`.
///
/// Precondition the caller is expected to uphold: `raw.len() >=
/// COMMON_HEADER_LEN`; a shorter buffer is reported as
/// [`ParseError::NotEnoughData`] rather than panicking.
pub fn parse<'a>(raw: &'a [u8], network: &NetworkConfig) -> Result<ParsedTransaction<'a>, ParseError> {
    if raw.len() < COMMON_HEADER_LEN {
        return Err(ParseError::NotEnoughData);
    }
    let mut cursor = Cursor::new(raw);
    let generation_hash = cursor.take(32).ok_or_short_read()?;
    cursor.seek(1)?; // version: not displayed
    cursor.seek(1)?; // network: not displayed, assumed to match `network`
    let type_tag = cursor.take(2).ok_or_short_read()?;
    let tag_value = u16::from_le_bytes([type_tag[0], type_tag[1]]);
    let tx_type = TxType::try_from(tag_value).map_err(|_| ParseError::InvalidData)?;

    let mut fields = FieldArray::new();

    if tx_type.is_aggregate() && generation_hash != network.generation_hash().as_slice() {
        // Cosigning: the first 32 bytes are the aggregate hash being
        // cosigned, not a generation hash. No further structure is present
        // to parse, and no Transaction Type or Fee field is appended — the
        // binding commitment is the only thing on screen.
        fields.append(FieldId::AggregateTxHash, DataType::Hash256, Some(generation_hash))?;
        return Ok(ParsedTransaction { fields, signing_length: AGGREGATE_COSIGNER_SIGNING_LENGTH });
    }

    fields.append(FieldId::TransactionType, DataType::Uint16, Some(type_tag))?;

    let signing_length =
        if tx_type.is_aggregate() { AGGREGATE_ORIGINATOR_SIGNING_LENGTH } else { raw.len() };

    let fee = cursor.take(FEE_ENVELOPE_LEN / 2).ok_or_short_read()?;
    cursor.seek(FEE_ENVELOPE_LEN / 2)?; // deadline: not displayed

    dispatch(tx_type, &mut cursor, &mut fields, network)?;

    fields.append(FieldId::Fee, DataType::XymFee, Some(fee))?;

    Ok(ParsedTransaction { fields, signing_length })
}

/// Route a known type tag to its per-type parser. Shared by the top-level
/// [`parse`] entry point and the inner-transaction loop inside an
/// aggregate; the aggregate parser itself guards against being called
/// again (no nested aggregates) before reaching here.
pub(crate) fn dispatch<'a>(
    tx_type: TxType,
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    network: &NetworkConfig,
) -> Result<(), ParseError> {
    match tx_type {
        TxType::Transfer => parsers::transfer::parse(cursor, fields, network),
        TxType::NamespaceRegistration => parsers::namespace::parse(cursor, fields, network),
        TxType::AddressAlias => parsers::alias::address(cursor, fields, network),
        TxType::MosaicAlias => parsers::alias::mosaic(cursor, fields, network),
        TxType::MosaicDefinition => parsers::mosaic::definition(cursor, fields, network),
        TxType::MosaicSupplyChange => parsers::mosaic::supply_change(cursor, fields, network),
        TxType::MultisigAccountModification => parsers::multisig::parse(cursor, fields, network),
        TxType::AggregateComplete | TxType::AggregateBonded => {
            parsers::aggregate::parse(cursor, fields, network)
        }
        TxType::HashLock => parsers::lock::hash_lock(cursor, fields, network),
        TxType::SecretLock => parsers::lock::secret_lock(cursor, fields, network),
        TxType::SecretProof => parsers::lock::secret_proof(cursor, fields, network),
        TxType::AccountMetadata => parsers::metadata::account(cursor, fields, network),
        TxType::MosaicMetadata => parsers::metadata::mosaic(cursor, fields, network),
        TxType::NamespaceMetadata => parsers::metadata::namespace(cursor, fields, network),
        TxType::AccountAddressRestriction => parsers::restriction::address(cursor, fields, network),
        TxType::AccountMosaicRestriction => parsers::restriction::mosaic(cursor, fields, network),
        TxType::AccountOperationRestriction => parsers::restriction::operation(cursor, fields, network),
        TxType::AccountKeyLink => parsers::key_link::account(cursor, fields, network),
        TxType::NodeKeyLink => parsers::key_link::node(cursor, fields, network),
        TxType::VrfKeyLink => parsers::key_link::vrf(cursor, fields, network),
        TxType::VotingKeyLink => parsers::key_link::voting(cursor, fields, network),
    }
}

#[cfg(test)]
extern crate std;
