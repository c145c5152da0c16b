use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::{NetworkConfig, NATIVE_MOSAIC_ID};

/// Message-type byte denoting a persistent delegated harvesting message,
/// whose body is never UTF-8 and is always rendered as hex.
const PERSISTENT_DELEGATED_HARVESTING: u8 = 0xFE;

/// Header: 24-byte recipient, u16 message size, u8 mosaic count, 5 reserved.
pub(crate) fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    net: &NetworkConfig,
) -> Result<(), ParseError> {
    let recipient = cursor.take(24).ok_or_short_read()?;
    let message_size_bytes = cursor.take(2).ok_or_short_read()?;
    let message_size = u16::from_le_bytes([message_size_bytes[0], message_size_bytes[1]]) as usize;
    let mosaic_count_byte = cursor.take(1).ok_or_short_read()?;
    let mosaic_count = mosaic_count_byte[0] as usize;
    cursor.seek(5)?;

    // A recipient beginning with the network's own address byte is a plain
    // 24-byte address; any other leading byte means the next 8 bytes are a
    // namespace-alias id instead (a namespace-linked recipient rather than a
    // raw account address), and the remaining bytes are reserved padding.
    if recipient[0] == net.network_byte() {
        fields.append(FieldId::RecipientAddress, DataType::Address, Some(recipient))?;
    } else {
        fields.append(FieldId::RecipientAddress, DataType::Uint64, Some(&recipient[1..9]))?;
    }

    // Every (id, amount) pair is read as one contiguous 16-byte take so the
    // appended field borrows a single slice spanning both halves.
    let mut mosaics: [Option<&'a [u8]>; xym_fields::MAX_FIELD_COUNT] =
        [None; xym_fields::MAX_FIELD_COUNT];
    if mosaic_count > mosaics.len() {
        return Err(ParseError::InvalidData);
    }
    for slot in mosaics.iter_mut().take(mosaic_count) {
        *slot = Some(cursor.take(16).ok_or_short_read()?);
    }

    let first_id = mosaics[0].map(|pair| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&pair[0..8]);
        u64::from_le_bytes(buf)
    });
    let single_native_mosaic = mosaic_count == 1 && first_id == Some(NATIVE_MOSAIC_ID);

    // Open question (a): suppress the mosaic-count field only for a single
    // native-mosaic transfer; every other arity, including a single foreign
    // mosaic, still shows the count.
    if !single_native_mosaic {
        fields.append(FieldId::MosaicCount, DataType::Uint8, Some(mosaic_count_byte))?;
    }
    if mosaic_count == 1 && !single_native_mosaic {
        fields.append(FieldId::UnknownMosaicNotice, DataType::Str, Some(&[][..]))?;
    }
    for slot in mosaics.iter().take(mosaic_count) {
        let pair = slot.expect("every slot below mosaic_count was filled above");
        fields.append(FieldId::Amount, DataType::MosaicCurrency, Some(pair))?;
    }

    if message_size == 0 {
        fields.append(FieldId::Message, DataType::MessageUtf8, Some(&[][..]))?;
        return Ok(());
    }
    let message_type = cursor.take(1).ok_or_short_read()?;
    fields.append(FieldId::MessageType, DataType::Uint8, Some(message_type))?;
    let body = cursor.take(message_size - 1).ok_or_short_read()?;
    if message_type[0] == PERSISTENT_DELEGATED_HARVESTING {
        // Open question: always emit three pagination-sized hex chunks
        // rather than one, matching the small-screen convention.
        let chunk = body.len().div_ceil(3);
        for i in 0..3 {
            let start = (i * chunk).min(body.len());
            let end = ((i + 1) * chunk).min(body.len());
            fields.append(FieldId::Message, DataType::MessageHex, Some(&body[start..end]))?;
        }
    } else {
        fields.append(FieldId::Message, DataType::MessageUtf8, Some(body))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(recipient_first_byte: u8, mosaics: &[(u64, u64)], message: &[u8]) -> std::vec::Vec<u8> {
        let mut buf = std::vec::Vec::new();
        let mut recipient = [0u8; 24];
        recipient[0] = recipient_first_byte;
        buf.extend_from_slice(&recipient);
        let message_size = if message.is_empty() { 0 } else { message.len() + 1 };
        buf.extend_from_slice(&(message_size as u16).to_le_bytes());
        buf.push(mosaics.len() as u8);
        buf.extend_from_slice(&[0u8; 5]);
        for (id, amount) in mosaics {
            buf.extend_from_slice(&id.to_le_bytes());
            buf.extend_from_slice(&amount.to_le_bytes());
        }
        if !message.is_empty() {
            buf.push(0); // plain-text message type
            buf.extend_from_slice(message);
        }
        buf
    }

    #[test]
    fn single_native_mosaic_suppresses_the_count_field() {
        let data = build(0x98, &[(NATIVE_MOSAIC_ID, 45_000_000)], b"hi");
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        parse(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert!(!ids.contains(&FieldId::MosaicCount));
        assert!(!ids.contains(&FieldId::UnknownMosaicNotice));
        assert_eq!(
            ids,
            std::vec![
                FieldId::RecipientAddress,
                FieldId::Amount,
                FieldId::MessageType,
                FieldId::Message,
            ]
        );
    }

    #[test]
    fn single_foreign_mosaic_shows_count_and_notice() {
        let data = build(0x98, &[(0x5E62_990D_CAC5_B21A, 45_000_000)], b"");
        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        parse(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let ids: std::vec::Vec<_> = fields.iter().map(|f| f.id()).collect();
        assert_eq!(
            ids,
            std::vec![
                FieldId::RecipientAddress,
                FieldId::MosaicCount,
                FieldId::UnknownMosaicNotice,
                FieldId::Amount,
                FieldId::Message,
            ]
        );
    }

    #[test]
    fn harvesting_message_always_splits_into_three_hex_fields() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&[0u8; 24]);
        let payload = b"01020304050607";
        data.extend_from_slice(&((payload.len() + 1) as u16).to_le_bytes());
        data.push(0);
        data.extend_from_slice(&[0u8; 5]);
        data.push(PERSISTENT_DELEGATED_HARVESTING);
        data.extend_from_slice(payload);

        let mut cursor = Cursor::new(&data);
        let mut fields: FieldArray<'_> = FieldArray::new();
        parse(&mut cursor, &mut fields, &NetworkConfig::TESTNET).unwrap();
        let hex_fields = fields.iter().filter(|f| f.data_type() == DataType::MessageHex).count();
        assert_eq!(hex_fields, 3);
    }
}
