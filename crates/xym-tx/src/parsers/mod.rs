//! One module per transaction family, each exposing a `parse` (or
//! variant-named) function with the uniform signature
//! `fn(&mut Cursor<'a>, &mut FieldArray<'a>, &NetworkConfig) -> Result<(), ParseError>`.
//! [`crate::dispatch`] is the sole caller; nothing here reads the fee
//! envelope or decides the signing length — that is the top-level
//! entry point's job.

pub(crate) mod aggregate;
pub(crate) mod alias;
pub(crate) mod key_link;
pub(crate) mod lock;
pub(crate) mod metadata;
pub(crate) mod mosaic;
pub(crate) mod multisig;
pub(crate) mod namespace;
pub(crate) mod restriction;
pub(crate) mod transfer;
