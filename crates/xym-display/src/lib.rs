//! Pure `format(field) -> (label, value)` mapping from a parsed field record
//! to the two strings an on-screen review driver shows a user.
//!
//! Labels are a static lookup keyed on [`FieldId`]; values are rendered per
//! [`DataType`], with a handful of field ids overlaying a more specific
//! rendering (multisig deltas, boolean flags, labelled enumerants) on top of
//! their underlying integer type. This is the one crate in the workspace
//! that owns heap-allocated strings — every other crate borrows from the
//! scratch area it was given.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use xym_fields::{DataType, FieldId, FieldRecord};
use xym_tx::network::{NATIVE_DIVISIBILITY, NATIVE_MOSAIC_ID};
use xym_tx::{NetworkConfig, TxType};

/// Longest display value this formatter will ever produce; message and
/// string fields are truncated to `MAX_FIELD_LEN - 1` so a trailing
/// continuation indicator always fits on a fixed-width review screen.
pub const MAX_FIELD_LEN: usize = 32;

/// Format a field record for on-screen review.
///
/// `network` is threaded through for [`DataType::MosaicCurrency`] even
/// though the native mosaic id happens to be shared by both networks today
/// — keeping the parameter here means a future per-network id doesn't
/// change this function's signature.
pub fn format(field: &FieldRecord<'_>, network: &NetworkConfig) -> (&'static str, String) {
    let label = label(field.id());
    let value = render(field, network);
    let value = if value.is_empty() { " ".to_string() } else { value };
    (label, value)
}

fn label(id: FieldId) -> &'static str {
    use FieldId::*;
    match id {
        TransactionType => "Transaction Type",
        InnerTransactionType => "Inner TX Type",
        Fee => "Fee",
        Duration => "Duration",
        ParentId => "Parent Id",
        NamespaceId => "Namespace Id",
        MosaicId => "Mosaic Id",
        MosaicSupplyChangeAmount => "Amount",
        VotingKeyStart => "Voting Key Start",
        VotingKeyEnd => "Voting Key End",
        MetadataKey => "Scoped Key",
        MetadataValueSizeDelta => "Value Size Change",
        RecipientAddress => "Recipient",
        Message => "Message",
        NamespaceName => "Namespace Name",
        Address => "Address",
        AggregateTxHash => "Agg. Tx Hash",
        LockTransactionHash => "Secret/Hash",
        PublicKey => "Public Key",
        LockQuantity => "Quantity",
        Amount => "Amount",
        UnknownMosaicNotice => "Unknown Mosaic",
        RestrictionAdditionsCount => "Additions Count",
        RestrictionDeletionsCount => "Deletions Count",
        RestrictionOperationType => "Restricted Type",
        MultisigMinRemovalDelta => "Min Removal Delta",
        MultisigMinApprovalDelta => "Min Approval Delta",
        MosaicCount => "Mosaic Count",
        NamespaceRegistrationType => "Registration Type",
        AccountRestrictionVariant => "Restriction Variant",
        MessageType => "Message Type",
        MosaicSupplyChangeAction | SupplyChangeAction => "Action",
        MultisigAdditionsCount => "Additions",
        MultisigDeletionsCount => "Deletions",
        MosaicSupplyMutableFlag => "Supply Mutable",
        MosaicTransferableFlag => "Transferable",
        MosaicRestrictableFlag => "Restrictable",
        RestrictionOperationFlag => "Operation",
        RestrictionDirectionFlag => "Direction",
        RestrictionTypeFlag => "Restriction Type",
        MosaicDivisibility => "Divisibility",
        AliasAction | LinkAction => "Action",
        #[allow(unreachable_patterns)]
        _ => "Unknown Field",
    }
}

fn render(field: &FieldRecord<'_>, network: &NetworkConfig) -> String {
    let data = field.data();
    match field.data_type() {
        DataType::Int8 => render_int8(field.id(), data),
        DataType::Uint8 => render_uint8(field.id(), data),
        DataType::Uint16 => render_uint16(field.id(), data),
        DataType::Uint32 => decimal_u32(data).to_string(),
        DataType::Uint64 => render_uint64(field.id(), data),
        DataType::Int16 => render_int16(field.id(), data),
        DataType::Int32 => decimal_i32(data).to_string(),
        DataType::Int64 => decimal_i64(data).to_string(),
        DataType::Hash256 | DataType::PublicKey => hex::encode_upper(data),
        DataType::Address => base32_encode(data),
        DataType::MosaicCurrency => mosaic_currency(data, network),
        DataType::XymFee => xym_amount(decimal_u64(data)),
        DataType::MessageUtf8 => ascii_filter(data),
        DataType::MessageHex => hex_message(data),
        DataType::Str => ascii_filter(data),
    }
}

fn render_int8(id: FieldId, data: &[u8]) -> String {
    let v = data[0] as i8;
    match id {
        FieldId::MultisigMinApprovalDelta | FieldId::MultisigMinRemovalDelta => multisig_delta(v),
        _ => format!("{v}"),
    }
}

fn multisig_delta(v: i8) -> String {
    match v.cmp(&0) {
        core::cmp::Ordering::Greater => format!("Add {v} address(es)"),
        core::cmp::Ordering::Less => format!("Remove {} address(es)", -(v as i16)),
        core::cmp::Ordering::Equal => "Not change".to_string(),
    }
}

fn render_uint8(id: FieldId, data: &[u8]) -> String {
    let v = data[0];
    match id {
        FieldId::MessageType => message_type_label(v).to_string(),
        FieldId::AliasAction | FieldId::LinkAction => link_action_label(v).to_string(),
        FieldId::NamespaceRegistrationType => registration_type_label(v).to_string(),
        FieldId::MosaicSupplyChangeAction | FieldId::SupplyChangeAction => supply_change_label(v).to_string(),
        FieldId::MosaicSupplyMutableFlag
        | FieldId::MosaicTransferableFlag
        | FieldId::MosaicRestrictableFlag
        | FieldId::RestrictionOperationFlag
        | FieldId::RestrictionDirectionFlag
        | FieldId::RestrictionTypeFlag => yes_no(v != 0).to_string(),
        _ => format!("{v}"),
    }
}

fn render_uint16(id: FieldId, data: &[u8]) -> String {
    let v = u16::from_le_bytes([data[0], data[1]]);
    match id {
        FieldId::TransactionType | FieldId::InnerTransactionType => tx_type_label(v).to_string(),
        _ => format!("{v}"),
    }
}

fn render_int16(id: FieldId, data: &[u8]) -> String {
    let v = i16::from_le_bytes([data[0], data[1]]);
    match id {
        FieldId::MetadataValueSizeDelta => value_size_delta(v),
        _ => format!("{v}"),
    }
}

fn value_size_delta(v: i16) -> String {
    match v.cmp(&0) {
        core::cmp::Ordering::Greater => format!("Increase {v} byte(s)"),
        core::cmp::Ordering::Less => format!("Decrease {} byte(s)", -(v as i32)),
        core::cmp::Ordering::Equal => "Not change".to_string(),
    }
}

fn render_uint64(id: FieldId, data: &[u8]) -> String {
    let v = decimal_u64(data);
    match id {
        FieldId::Duration => duration_label(v),
        _ => hex::encode_upper(data.iter().rev().copied().collect::<alloc::vec::Vec<u8>>()),
    }
}

fn duration_label(blocks: u64) -> String {
    const BLOCKS_PER_DAY: u64 = 2880;
    const BLOCKS_PER_HOUR: u64 = 120;
    const BLOCKS_PER_MINUTE: u64 = 2;
    if blocks == 0 {
        return "Unlimited".to_string();
    }
    let days = blocks / BLOCKS_PER_DAY;
    let remainder = blocks % BLOCKS_PER_DAY;
    let hours = remainder / BLOCKS_PER_HOUR;
    let remainder = remainder % BLOCKS_PER_HOUR;
    let minutes = remainder / BLOCKS_PER_MINUTE;
    format!("{days}d {hours}h {minutes}m")
}

fn message_type_label(v: u8) -> &'static str {
    match v {
        0 => "Plain text",
        1 => "Encrypted text",
        0xFE => "Persistent harvesting delegation",
        _ => "Unknown",
    }
}

fn link_action_label(v: u8) -> &'static str {
    match v {
        0 => "Unlink",
        1 => "Link",
        _ => "Unknown",
    }
}

fn registration_type_label(v: u8) -> &'static str {
    match v {
        0 => "Root namespace",
        1 => "Sub namespace",
        _ => "Unknown",
    }
}

fn supply_change_label(v: u8) -> &'static str {
    match v {
        0 => "Decrease",
        1 => "Increase",
        _ => "Unknown",
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

fn tx_type_label(tag: u16) -> &'static str {
    let Ok(tx_type) = TxType::try_from(tag) else {
        return "Unknown";
    };
    match tx_type {
        TxType::Transfer => "Transfer",
        TxType::NamespaceRegistration => "Register Namespace",
        TxType::AddressAlias => "Address Alias",
        TxType::MosaicAlias => "Mosaic Alias",
        TxType::MosaicDefinition => "Mosaic definition",
        TxType::MosaicSupplyChange => "Mosaic Supply Change",
        TxType::MultisigAccountModification => "Modify Multisig Account",
        TxType::AggregateComplete => "Aggregate Complete",
        TxType::AggregateBonded => "Aggregate Bonded",
        TxType::HashLock => "Hash Lock",
        TxType::SecretLock => "Secret Lock",
        TxType::SecretProof => "Secret Proof",
        TxType::AccountMetadata => "Account Metadata",
        TxType::MosaicMetadata => "Mosaic Metadata",
        TxType::NamespaceMetadata => "Namespace Metadata",
        TxType::AccountAddressRestriction => "Account Address Restriction",
        TxType::AccountMosaicRestriction => "Account Mosaic Restriction",
        TxType::AccountOperationRestriction => "Account Operation Restriction",
        TxType::AccountKeyLink => "Account Key Link",
        TxType::NodeKeyLink => "Node Key Link",
        TxType::VrfKeyLink => "Vrf Key Link",
        TxType::VotingKeyLink => "Voting Key Link",
        #[allow(unreachable_patterns)]
        _ => "Unknown",
    }
}

fn mosaic_currency(data: &[u8], network: &NetworkConfig) -> String {
    let _ = network;
    let id = u64::from_le_bytes(data[0..8].try_into().expect("8 bytes"));
    let amount = u64::from_le_bytes(data[8..16].try_into().expect("8 bytes"));
    if id == NATIVE_MOSAIC_ID {
        xym_amount(amount)
    } else {
        format!("{amount} micro 0x{id:016X}")
    }
}

fn xym_amount(raw: u64) -> String {
    let scale = 10u64.pow(NATIVE_DIVISIBILITY as u32);
    let whole = raw / scale;
    let fraction = raw % scale;
    if fraction == 0 {
        format!("{whole} XYM")
    } else {
        format!("{whole}.{fraction:0width$} XYM", width = NATIVE_DIVISIBILITY as usize)
    }
}

fn ascii_filter(data: &[u8]) -> String {
    let mut out = String::new();
    for &byte in data.iter().take(MAX_FIELD_LEN - 1) {
        if (32..=126).contains(&byte) {
            out.push(byte as char);
        } else {
            out.push('?');
        }
    }
    out
}

fn hex_message(data: &[u8]) -> String {
    let cap_bytes = (MAX_FIELD_LEN - 1) / 2;
    let truncated = &data[..data.len().min(cap_bytes)];
    hex::encode_upper(truncated)
}

fn decimal_u32(data: &[u8]) -> u32 {
    u32::from_le_bytes(data.try_into().expect("4 bytes"))
}

fn decimal_u64(data: &[u8]) -> u64 {
    u64::from_le_bytes(data.try_into().expect("8 bytes"))
}

fn decimal_i32(data: &[u8]) -> i32 {
    i32::from_le_bytes(data.try_into().expect("4 bytes"))
}

fn decimal_i64(data: &[u8]) -> i64 {
    i64::from_le_bytes(data.try_into().expect("8 bytes"))
}

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// RFC 4648 base32 without padding. Used for Symbol addresses (24 raw
/// bytes in, 39 characters out); written by hand rather than pulled from an
/// external crate because every other byte-to-wire encoding in this
/// workspace (hex literals, cursor reads) is already hand-rolled over
/// `core` primitives, and this one is small enough to match that idiom.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::new();
    let mut buffer: u64 = 0;
    let mut bits_in_buffer: u32 = 0;
    for &byte in data {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let index = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            out.push(BASE32_ALPHABET[index] as char);
        }
        buffer &= (1u64 << bits_in_buffer) - 1;
    }
    if bits_in_buffer > 0 {
        let index = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        out.push(BASE32_ALPHABET[index] as char);
    }
    out
}

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests {
    use super::*;
    use xym_fields::FieldArray;

    fn one_field<'a>(id: FieldId, data_type: DataType, data: &'a [u8]) -> FieldArray<'a, 1> {
        let mut arr: FieldArray<'_, 1> = FieldArray::new();
        arr.append(id, data_type, Some(data)).unwrap();
        arr
    }

    #[test]
    fn zero_duration_is_unlimited() {
        let data = 0u64.to_le_bytes();
        let arr = one_field(FieldId::Duration, DataType::Uint64, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "Unlimited");
    }

    #[test]
    fn duration_renders_days_hours_minutes() {
        let blocks = 2880 * 2 + 120 * 3 + 2 * 4;
        let data = blocks.to_le_bytes();
        let arr = one_field(FieldId::Duration, DataType::Uint64, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "2d 3h 4m");
    }

    #[test]
    fn multisig_delta_overlays_sign() {
        let data = [2i8 as u8];
        let arr = one_field(FieldId::MultisigMinApprovalDelta, DataType::Int8, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "Add 2 address(es)");

        let data = [(-3i8) as u8];
        let arr = one_field(FieldId::MultisigMinRemovalDelta, DataType::Int8, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "Remove 3 address(es)");
    }

    #[test]
    fn native_mosaic_renders_as_xym_with_canonical_divisibility() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&NATIVE_MOSAIC_ID.to_le_bytes());
        data.extend_from_slice(&1_500_000u64.to_le_bytes());
        let arr = one_field(FieldId::Amount, DataType::MosaicCurrency, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "1.500000 XYM");
    }

    #[test]
    fn foreign_mosaic_renders_with_hex_id_and_micro_prefix() {
        let mut data = std::vec::Vec::new();
        data.extend_from_slice(&0x1122_3344_5566_7788u64.to_le_bytes());
        data.extend_from_slice(&7u64.to_le_bytes());
        let arr = one_field(FieldId::Amount, DataType::MosaicCurrency, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "7 micro 0x1122334455667788");
    }

    #[test]
    fn address_base32_encodes_to_39_characters() {
        let data = [0x98u8; 24];
        let arr = one_field(FieldId::RecipientAddress, DataType::Address, &data);
        let (label, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(label, "Recipient");
        assert_eq!(value.len(), 39);
    }

    #[test]
    fn message_filters_non_printable_bytes_to_question_marks() {
        let data = [b'h', b'i', 0x00, 0x7F, b'!'];
        let arr = one_field(FieldId::Message, DataType::MessageUtf8, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "hi??!");
    }

    #[test]
    fn message_is_capped_at_max_field_len_minus_one() {
        let data = [b'a'; MAX_FIELD_LEN + 10];
        let arr = one_field(FieldId::Message, DataType::MessageUtf8, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value.len(), MAX_FIELD_LEN - 1);
    }

    #[test]
    fn empty_message_renders_as_a_single_space() {
        let arr = one_field(FieldId::Message, DataType::MessageUtf8, &[]);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, " ");
    }

    #[test]
    fn flag_fields_render_yes_or_no() {
        let arr = one_field(FieldId::MosaicTransferableFlag, DataType::Uint8, &[1]);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "Yes");

        let arr = one_field(FieldId::MosaicTransferableFlag, DataType::Uint8, &[0]);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "No");
    }

    #[test]
    fn transaction_type_renders_its_labelled_enumerant() {
        let data = xym_tx::tx_type::wire::TRANSFER.to_le_bytes();
        let arr = one_field(FieldId::TransactionType, DataType::Uint16, &data);
        let (label, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(label, "Transaction Type");
        assert_eq!(value, "Transfer");
    }

    #[test]
    fn unknown_transaction_type_tag_renders_unknown() {
        let data = 0xFFFFu16.to_le_bytes();
        let arr = one_field(FieldId::TransactionType, DataType::Uint16, &data);
        let (_, value) = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        assert_eq!(value, "Unknown");
    }

    proptest::proptest! {
        #[test]
        fn formatting_never_panics_on_arbitrary_message_bytes(data: std::vec::Vec<u8>) {
            let arr = one_field(FieldId::Message, DataType::MessageUtf8, &data);
            let _ = format(arr.iter().next().unwrap(), &NetworkConfig::TESTNET);
        }
    }
}
