use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Header: u8 alias action, u64 namespace id, then the aliased target —
/// a 24-byte address for `ADDRESS_ALIAS`, an 8-byte mosaic id for
/// `MOSAIC_ALIAS`.
fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    target_len: usize,
    target_id: FieldId,
    target_type: DataType,
) -> Result<(), ParseError> {
    let action = cursor.take(1).ok_or_short_read()?;
    let namespace_id = cursor.take(8).ok_or_short_read()?;
    let target = cursor.take(target_len).ok_or_short_read()?;

    fields.append(FieldId::AliasAction, DataType::Uint8, Some(action))?;
    fields.append(FieldId::NamespaceId, DataType::Uint64, Some(namespace_id))?;
    fields.append(target_id, target_type, Some(target))?;
    Ok(())
}

pub(crate) fn address<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, 24, FieldId::Address, DataType::Address)
}

pub(crate) fn mosaic<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, 8, FieldId::MosaicId, DataType::Uint64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_alias_appends_action_then_namespace_then_address() {
        let mut data = std::vec::Vec::new();
        data.push(1);
        data.extend_from_slice(&9u64.to_le_bytes());
        data.extend_from_slice(&[5u8; 24]);
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        address(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(ids, std::vec![FieldId::AliasAction, FieldId::NamespaceId, FieldId::Address]);
    }
}
