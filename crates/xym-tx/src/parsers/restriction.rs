use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Flags bit layout: not specified numerically by the design this is
/// grounded on beyond "three flag-bit views"; documented in `DESIGN.md`.
const FLAG_OPERATION: u16 = 1 << 0;
const FLAG_DIRECTION: u16 = 1 << 1;
const FLAG_TYPE: u16 = 1 << 2;

enum Variant {
    Address,
    Mosaic,
    Operation,
}

/// Header: u16 flags, u8 additions-count, u8 deletions-count, 4 reserved;
/// then additions and deletions, each entry sized by `variant`.
fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    variant: Variant,
) -> Result<(), ParseError> {
    let flags_bytes = cursor.take(2).ok_or_short_read()?;
    let flags = u16::from_le_bytes([flags_bytes[0], flags_bytes[1]]);
    let additions_count = cursor.take(1).ok_or_short_read()?;
    let deletions_count = cursor.take(1).ok_or_short_read()?;
    cursor.seek(4)?;

    let (entry_len, entry_id, entry_type) = match variant {
        Variant::Address => (24, FieldId::Address, DataType::Address),
        Variant::Mosaic => (8, FieldId::MosaicId, DataType::Uint64),
        Variant::Operation => (2, FieldId::RestrictionOperationType, DataType::Uint16),
    };

    fields.append(FieldId::RestrictionAdditionsCount, DataType::Uint8, Some(additions_count))?;
    for _ in 0..additions_count[0] {
        let entry = cursor.take(entry_len).ok_or_short_read()?;
        fields.append(entry_id, entry_type, Some(entry))?;
    }
    fields.append(FieldId::RestrictionDeletionsCount, DataType::Uint8, Some(deletions_count))?;
    for _ in 0..deletions_count[0] {
        let entry = cursor.take(entry_len).ok_or_short_read()?;
        fields.append(entry_id, entry_type, Some(entry))?;
    }

    fields.append(
        FieldId::RestrictionOperationFlag,
        DataType::Uint8,
        Some(bit_slice(flags, FLAG_OPERATION)),
    )?;
    if !matches!(variant, Variant::Mosaic) {
        fields.append(
            FieldId::RestrictionDirectionFlag,
            DataType::Uint8,
            Some(bit_slice(flags, FLAG_DIRECTION)),
        )?;
    }
    fields.append(
        FieldId::RestrictionTypeFlag,
        DataType::Uint8,
        Some(bit_slice(flags, FLAG_TYPE)),
    )?;
    Ok(())
}

fn bit_slice(flags: u16, mask: u16) -> &'static [u8] {
    if flags & mask != 0 {
        &[1]
    } else {
        &[0]
    }
}

pub(crate) fn address<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, Variant::Address)
}

pub(crate) fn mosaic<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, Variant::Mosaic)
}

pub(crate) fn operation<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, Variant::Operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mosaic_variant_omits_the_direction_flag() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&0u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&[0u8; 4]);
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        mosaic(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert!(!ids.contains(&FieldId::RestrictionDirectionFlag));
        assert_eq!(
            ids,
            std::vec![
                FieldId::RestrictionAdditionsCount,
                FieldId::RestrictionDeletionsCount,
                FieldId::RestrictionOperationFlag,
                FieldId::RestrictionTypeFlag,
            ]
        );
    }

    #[test]
    fn address_variant_includes_the_direction_flag() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&0u16.to_le_bytes());
        data.push(0);
        data.push(0);
        data.extend_from_slice(&[0u8; 4]);
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        address(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert!(ids.contains(&FieldId::RestrictionDirectionFlag));
    }
}
