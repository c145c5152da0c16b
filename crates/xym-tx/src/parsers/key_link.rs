use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Open question: the design this is grounded on mentions one key-link
/// variant reserving 7 trailing bytes without naming which; this
/// implementation reserves them on the VRF key link, documented in
/// `DESIGN.md`.
const VRF_TRAILING_RESERVED: usize = 7;

/// 32-byte linked public key, u8 link action. Append action then key.
fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    trailing_reserved: usize,
) -> Result<(), ParseError> {
    let key = cursor.take(32).ok_or_short_read()?;
    let action = cursor.take(1).ok_or_short_read()?;
    cursor.seek(trailing_reserved)?;

    fields.append(FieldId::LinkAction, DataType::Uint8, Some(action))?;
    fields.append(FieldId::PublicKey, DataType::PublicKey, Some(key))?;
    Ok(())
}

pub(crate) fn account<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, 0)
}

pub(crate) fn node<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, 0)
}

pub(crate) fn vrf<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    parse(cursor, fields, VRF_TRAILING_RESERVED)
}

/// 32-byte key, u32 start-point, u32 end-point, u8 action. Append action,
/// start, end, key.
pub(crate) fn voting<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let key = cursor.take(32).ok_or_short_read()?;
    let start = cursor.take(4).ok_or_short_read()?;
    let end = cursor.take(4).ok_or_short_read()?;
    let action = cursor.take(1).ok_or_short_read()?;

    fields.append(FieldId::LinkAction, DataType::Uint8, Some(action))?;
    fields.append(FieldId::VotingKeyStart, DataType::Uint32, Some(start))?;
    fields.append(FieldId::VotingKeyEnd, DataType::Uint32, Some(end))?;
    fields.append(FieldId::PublicKey, DataType::PublicKey, Some(key))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vrf_link_advances_past_its_trailing_reserved_bytes() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&[3u8; 32]);
        data.push(1);
        data.extend_from_slice(&[0u8; VRF_TRAILING_RESERVED]);
        data.extend_from_slice(&[9u8; 4]); // sentinel beyond the record
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        vrf(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        assert_eq!(cursor.rest(), &[9u8; 4]);
    }

    #[test]
    fn voting_key_link_order_is_action_start_end_key() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&[3u8; 32]);
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&100u32.to_le_bytes());
        data.push(1);
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        voting(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![FieldId::LinkAction, FieldId::VotingKeyStart, FieldId::VotingKeyEnd, FieldId::PublicKey]
        );
    }
}
