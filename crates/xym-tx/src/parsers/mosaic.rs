use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

const FLAG_SUPPLY_MUTABLE: u8 = 1 << 0;
const FLAG_TRANSFERABLE: u8 = 1 << 1;
const FLAG_RESTRICTABLE: u8 = 1 << 2;

/// Header: u64 id, u64 duration, u32 nonce, u8 flags, u8 divisibility.
pub(crate) fn definition<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let id = cursor.take(8).ok_or_short_read()?;
    let duration = cursor.take(8).ok_or_short_read()?;
    cursor.seek(4)?; // nonce: not displayed
    let flags = cursor.take(1).ok_or_short_read()?[0];
    let divisibility = cursor.take(1).ok_or_short_read()?;

    fields.append(FieldId::MosaicId, DataType::Uint64, Some(id))?;
    fields.append(FieldId::MosaicDivisibility, DataType::Uint8, Some(divisibility))?;
    fields.append(FieldId::Duration, DataType::Uint64, Some(duration))?;
    fields.append(
        FieldId::MosaicTransferableFlag,
        DataType::Uint8,
        Some(bit_slice(flags, FLAG_TRANSFERABLE)),
    )?;
    fields.append(
        FieldId::MosaicSupplyMutableFlag,
        DataType::Uint8,
        Some(bit_slice(flags, FLAG_SUPPLY_MUTABLE)),
    )?;
    fields.append(
        FieldId::MosaicRestrictableFlag,
        DataType::Uint8,
        Some(bit_slice(flags, FLAG_RESTRICTABLE)),
    )?;
    Ok(())
}

/// Header: u64 id, u64 amount, u8 action.
pub(crate) fn supply_change<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let id = cursor.take(8).ok_or_short_read()?;
    let amount = cursor.take(8).ok_or_short_read()?;
    let action = cursor.take(1).ok_or_short_read()?;

    fields.append(FieldId::MosaicId, DataType::Uint64, Some(id))?;
    fields.append(FieldId::MosaicSupplyChangeAction, DataType::Uint8, Some(action))?;
    fields.append(FieldId::MosaicSupplyChangeAmount, DataType::Uint64, Some(amount))?;
    Ok(())
}

/// A single flag bit rendered as its own one-byte field, `0` or `1`.
fn bit_slice(flags: u8, mask: u8) -> &'static [u8] {
    if flags & mask != 0 {
        &[1]
    } else {
        &[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_appends_flags_in_the_documented_order() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&1u64.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        data.push(FLAG_TRANSFERABLE | FLAG_RESTRICTABLE);
        data.push(6);
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        definition(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![
                FieldId::MosaicId,
                FieldId::MosaicDivisibility,
                FieldId::Duration,
                FieldId::MosaicTransferableFlag,
                FieldId::MosaicSupplyMutableFlag,
                FieldId::MosaicRestrictableFlag,
            ]
        );
        let mut records = fields.iter();
        records.next();
        records.next();
        records.next();
        assert_eq!(records.next().unwrap().data(), &[1]);
        assert_eq!(records.next().unwrap().data(), &[0]);
        assert_eq!(records.next().unwrap().data(), &[1]);
    }
}
