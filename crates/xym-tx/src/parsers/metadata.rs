use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Shared shape: 24-byte target address, u64 scoped-metadata-key, an
/// optional u64 target id (absent for account metadata), i16
/// value-size-delta, u16 value-size, then `value-size` bytes.
fn parse_shared<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    target_id_field: Option<FieldId>,
) -> Result<(), ParseError> {
    let target_address = cursor.take(24).ok_or_short_read()?;
    let scoped_key = cursor.take(8).ok_or_short_read()?;
    let target_id = match target_id_field {
        Some(_) => Some(cursor.take(8).ok_or_short_read()?),
        None => None,
    };
    let value_size_delta = cursor.take(2).ok_or_short_read()?;
    let value_size = cursor.take(2).ok_or_short_read()?;
    let value_size = u16::from_le_bytes([value_size[0], value_size[1]]) as usize;
    let value = cursor.take(value_size).ok_or_short_read()?;

    fields.append(FieldId::Address, DataType::Address, Some(target_address))?;
    if let (Some(field_id), Some(id)) = (target_id_field, target_id) {
        fields.append(field_id, DataType::Uint64, Some(id))?;
    }
    fields.append(FieldId::MetadataKey, DataType::Uint64, Some(scoped_key))?;
    fields.append(FieldId::Message, DataType::MessageUtf8, Some(value))?;
    fields.append(
        FieldId::MetadataValueSizeDelta,
        DataType::Int16,
        Some(value_size_delta),
    )?;
    Ok(())
}

pub(crate) fn account<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse_shared(cursor, fields, None)
}

pub(crate) fn mosaic<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse_shared(cursor, fields, Some(FieldId::MosaicId))
}

pub(crate) fn namespace<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse_shared(cursor, fields, Some(FieldId::NamespaceId))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(target_id: Option<u64>, value: &[u8]) -> std::vec::Vec<u8> {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&[1u8; 24]);
        data.extend_from_slice(&42u64.to_le_bytes());
        if let Some(id) = target_id {
            data.extend_from_slice(&id.to_le_bytes());
        }
        data.extend_from_slice(&3i16.to_le_bytes());
        data.extend_from_slice(&(value.len() as u16).to_le_bytes());
        data.extend_from_slice(value);
        data
    }

    #[test]
    fn account_metadata_has_no_target_id_field() {
        let data = build(None, b"hello");
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        account(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![FieldId::Address, FieldId::MetadataKey, FieldId::Message, FieldId::MetadataValueSizeDelta]
        );
    }

    #[test]
    fn mosaic_metadata_includes_the_mosaic_id_field() {
        let data = build(Some(99), b"v");
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        mosaic(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![
                FieldId::Address,
                FieldId::MosaicId,
                FieldId::MetadataKey,
                FieldId::Message,
                FieldId::MetadataValueSizeDelta,
            ]
        );
    }
}
