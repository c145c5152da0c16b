use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;
use crate::tx_type::TxType;

/// Size of the fixed-layout header preceding each inner transaction inside
/// an aggregate: u32 size, 4 reserved, 32-byte signer public key, 4
/// reserved, u8 version, u8 network, u16 type.
const INNER_HEADER_LEN: usize = 48;

/// Header: 32-byte inner-transaction hash, u32 payload size, 4 reserved.
///
/// Only ever invoked in originator mode — the cosigner short-circuit that
/// reports a bare hash and a 32-byte signing length is handled before
/// dispatch reaches here, so the hash appended below is always the
/// header's own, never the scratch area's leading 32 bytes.
pub(crate) fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    net: &NetworkConfig,
) -> Result<(), ParseError> {
    let tx_hash = cursor.take(32).ok_or_short_read()?;
    let payload_size = cursor.take(4).ok_or_short_read()?;
    let payload_size = u32::from_le_bytes([
        payload_size[0],
        payload_size[1],
        payload_size[2],
        payload_size[3],
    ]) as usize;
    cursor.seek(4)?;

    fields.append(FieldId::AggregateTxHash, DataType::Hash256, Some(tx_hash))?;

    let payload = cursor.take(payload_size).ok_or_short_read()?;
    let mut inner = Cursor::new(payload);
    while inner.remaining() > 0 {
        inner.seek(4)?; // inner size: recomputed by the caller, not displayed
        inner.seek(4)?; // reserved
        inner.seek(32)?; // signer public key: not displayed pre-resolution
        inner.seek(4)?; // reserved
        inner.seek(1)?; // version
        inner.seek(1)?; // network
        let type_tag = inner.take(2).ok_or_short_read()?;
        let tag_value = u16::from_le_bytes([type_tag[0], type_tag[1]]);
        let inner_type = TxType::try_from(tag_value).map_err(|_| ParseError::InvalidData)?;
        if inner_type.is_aggregate() {
            return Err(ParseError::InvalidData);
        }

        fields.append(FieldId::InnerTransactionType, DataType::Uint16, Some(type_tag))?;
        crate::dispatch(inner_type, &mut inner, fields, net)?;
        inner.align_to(8)?;
    }
    Ok(())
}
