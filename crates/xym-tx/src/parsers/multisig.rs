use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

/// Header: i8 min-removal-delta, i8 min-approval-delta, u8 additions-count,
/// u8 deletions-count, 4 reserved; then `additions` addresses, then
/// `deletions` addresses.
///
/// Field append order differs from header read order: counts and address
/// lists come first, the two deltas are appended last.
pub(crate) fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let min_removal_delta = cursor.take(1).ok_or_short_read()?;
    let min_approval_delta = cursor.take(1).ok_or_short_read()?;
    let additions_count = cursor.take(1).ok_or_short_read()?;
    let deletions_count = cursor.take(1).ok_or_short_read()?;
    cursor.seek(4)?;

    fields.append(FieldId::MultisigAdditionsCount, DataType::Uint8, Some(additions_count))?;
    for _ in 0..additions_count[0] {
        let address = cursor.take(24).ok_or_short_read()?;
        fields.append(FieldId::Address, DataType::Address, Some(address))?;
    }
    fields.append(FieldId::MultisigDeletionsCount, DataType::Uint8, Some(deletions_count))?;
    for _ in 0..deletions_count[0] {
        let address = cursor.take(24).ok_or_short_read()?;
        fields.append(FieldId::Address, DataType::Address, Some(address))?;
    }
    fields.append(
        FieldId::MultisigMinApprovalDelta,
        DataType::Int8,
        Some(min_approval_delta),
    )?;
    fields.append(
        FieldId::MultisigMinRemovalDelta,
        DataType::Int8,
        Some(min_removal_delta),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_counts_and_lists_before_deltas() {
        let mut data = std::vec::Vec::new();
        data.push(0); // min removal delta
        data.push(1); // min approval delta
        data.push(1); // additions count
        data.push(0); // deletions count
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&[7u8; 24]); // one addition address

        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        parse(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![
                FieldId::MultisigAdditionsCount,
                FieldId::Address,
                FieldId::MultisigDeletionsCount,
                FieldId::MultisigMinApprovalDelta,
                FieldId::MultisigMinRemovalDelta,
            ]
        );
    }
}
