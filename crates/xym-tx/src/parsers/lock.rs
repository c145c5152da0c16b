use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Fund (hash) lock. Header: u64 mosaic id, u64 amount, u64 block
/// duration, 32-byte aggregate-bonded hash. Append as lock quantity,
/// duration, transaction hash.
pub(crate) fn hash_lock<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let quantity = cursor.take(16).ok_or_short_read()?;
    let duration = cursor.take(8).ok_or_short_read()?;
    let hash = cursor.take(32).ok_or_short_read()?;

    fields.append(FieldId::LockQuantity, DataType::MosaicCurrency, Some(quantity))?;
    fields.append(FieldId::Duration, DataType::Uint64, Some(duration))?;
    fields.append(FieldId::LockTransactionHash, DataType::Hash256, Some(hash))?;
    Ok(())
}

/// Supplemented from the original source: not named in the on-screen-review
/// design this module implements, but present in the system it was
/// distilled from. Header: u64 mosaic id, u64 amount, u64 duration, u8
/// hash algorithm, 32-byte secret, 24-byte recipient address.
pub(crate) fn secret_lock<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let quantity = cursor.take(16).ok_or_short_read()?;
    let duration = cursor.take(8).ok_or_short_read()?;
    cursor.seek(1)?; // hash algorithm: not displayed
    let secret = cursor.take(32).ok_or_short_read()?;
    let recipient = cursor.take(24).ok_or_short_read()?;

    fields.append(FieldId::LockQuantity, DataType::MosaicCurrency, Some(quantity))?;
    fields.append(FieldId::Duration, DataType::Uint64, Some(duration))?;
    fields.append(FieldId::RecipientAddress, DataType::Address, Some(recipient))?;
    fields.append(FieldId::LockTransactionHash, DataType::Hash256, Some(secret))?;
    Ok(())
}

/// Supplemented from the original source, see [`secret_lock`]. Header: u8
/// hash algorithm, 32-byte secret, 24-byte recipient address, u16 proof
/// size, then `proof-size` bytes.
pub(crate) fn secret_proof<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    cursor.seek(1)?; // hash algorithm: not displayed
    let secret = cursor.take(32).ok_or_short_read()?;
    let recipient = cursor.take(24).ok_or_short_read()?;
    let proof_size = cursor.take(2).ok_or_short_read()?;
    let proof_size = u16::from_le_bytes([proof_size[0], proof_size[1]]) as usize;
    let proof = cursor.take(proof_size).ok_or_short_read()?;

    fields.append(FieldId::RecipientAddress, DataType::Address, Some(recipient))?;
    fields.append(FieldId::LockTransactionHash, DataType::Hash256, Some(secret))?;
    fields.append(FieldId::Message, DataType::MessageHex, Some(proof))?;
    Ok(())
}
