use xym_buffer::Cursor;
use xym_fields::{DataType, FieldArray, FieldId};

use crate::error::{OptionExt, ParseError};
use crate::network::NetworkConfig;

const REGISTRATION_TYPE_ROOT: u8 = 0;
const REGISTRATION_TYPE_SUB: u8 = 1;

/// Header: u64 duration-or-parent-id, u64 namespace-id, u8 registration
/// type, u8 name-size, then `name-size` raw bytes.
///
/// The namespace id itself is consumed but never displayed.
pub(crate) fn parse<'a>(
    cursor: &mut Cursor<'a>,
    fields: &mut FieldArray<'a>,
    _net: &NetworkConfig,
) -> Result<(), ParseError> {
    let duration_or_parent_id = cursor.take(8).ok_or_short_read()?;
    let _namespace_id = cursor.take(8).ok_or_short_read()?;
    let registration_type = cursor.take(1).ok_or_short_read()?;
    let name_size = cursor.take(1).ok_or_short_read()?[0] as usize;
    let name = cursor.take(name_size).ok_or_short_read()?;

    match registration_type[0] {
        REGISTRATION_TYPE_ROOT | REGISTRATION_TYPE_SUB => {}
        _ => return Err(ParseError::InvalidData),
    }

    fields.append(
        FieldId::NamespaceRegistrationType,
        DataType::Uint8,
        Some(registration_type),
    )?;
    fields.append(FieldId::NamespaceName, DataType::Str, Some(name))?;
    let field_id = if registration_type[0] == REGISTRATION_TYPE_ROOT {
        FieldId::Duration
    } else {
        FieldId::ParentId
    };
    fields.append(field_id, DataType::Uint64, Some(duration_or_parent_id))?;
    Ok(())
}
