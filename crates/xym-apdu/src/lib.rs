//! The CLA/INS/P1/P2/Lc/data command envelope, the instruction set, and the
//! two-byte status word every response ends with.
//!
//! This crate knows nothing about transaction parsing; it is the thin
//! plumbing layer the session sits on top of, mirroring the role the
//! teacher's signer transports play relative to its signer logic.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

use thiserror_no_std::Error;

/// Instruction class every command must carry; anything else is rejected
/// at the framing boundary before any session state is touched.
pub const CLA: u8 = 0xE0;

/// `SIGN_TX` P1 bit: `0` = first frame of a signing sequence, `1` =
/// continuation of one already in progress.
pub const P1_SIGN_ORDER: u8 = 0b0000_0001;
/// `SIGN_TX` P1 bit: set when more frames follow this one.
pub const P1_SIGN_MORE: u8 = 0b0000_0010;

/// `GET_PUBLIC_KEY` P1 bit: ask the user to confirm the address on-screen.
pub const P1_GET_PUBLIC_KEY_CONFIRM: u8 = 0b0000_0001;

/// P2 bit selecting the secp256k1 curve. Mutually exclusive with
/// [`P2_ED25519`]; exactly one must be set.
pub const P2_SECP256K1: u8 = 0b0000_0001;
/// P2 bit selecting the Ed25519 curve. Mutually exclusive with
/// [`P2_SECP256K1`]; exactly one must be set.
pub const P2_ED25519: u8 = 0b0000_0010;

/// Instruction codes recognized by the command dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Instruction {
    /// Public key of the corresponding BIP32 path.
    GetPublicKey = 0x02,
    /// Sign a transaction, framed across one or more packets.
    SignTx = 0x04,
    /// Application version.
    GetVersion = 0x06,
}

impl TryFrom<u8> for Instruction {
    type Error = ApduError;

    fn try_from(ins: u8) -> Result<Self, Self::Error> {
        match ins {
            0x02 => Ok(Instruction::GetPublicKey),
            0x04 => Ok(Instruction::SignTx),
            0x06 => Ok(Instruction::GetVersion),
            _ => Err(ApduError::UnknownInstruction),
        }
    }
}

/// A parsed command envelope: a five-byte header (CLA, INS, P1, P2, Lc)
/// followed by `Lc` bytes of data, borrowed from the transport's own frame
/// buffer.
#[derive(Debug, Clone, Copy)]
pub struct Command<'a> {
    pub ins: Instruction,
    pub p1: u8,
    pub p2: u8,
    pub data: &'a [u8],
}

impl<'a> Command<'a> {
    /// Parse a raw frame. Checks the CLA and Lc/data-length agreement, but
    /// not P1/P2 bit validity — that is instruction-specific and left to
    /// the caller.
    pub fn parse(raw: &'a [u8]) -> Result<Self, ApduError> {
        let [cla, ins, p1, p2, lc, rest @ ..] = raw else {
            return Err(ApduError::WrongApduDataLength);
        };
        if *cla != CLA {
            return Err(ApduError::UnknownInstructionClass);
        }
        let ins = Instruction::try_from(*ins)?;
        let lc = *lc as usize;
        if rest.len() != lc {
            return Err(ApduError::WrongApduDataLength);
        }
        Ok(Command { ins, p1: *p1, p2: *p2, data: rest })
    }
}

/// Every status word the device can reply with. Variant order mirrors
/// `§6` of the design this implements; [`ApduError::status_word`] is the
/// single place that maps a variant back to its two-byte wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApduError {
    #[error("no apdu received")]
    NoApduReceived,
    #[error("address rejected")]
    AddressRejected,
    #[error("transaction rejected")]
    TransactionRejected,
    #[error("invalid public key length")]
    InvalidPublicKeyLength,
    #[error("invalid bip32 path length")]
    InvalidBip32PathLength,
    #[error("invalid signing packet order")]
    InvalidSigningPacketOrder,
    #[error("wrong apdu data length")]
    WrongApduDataLength,
    #[error("invalid p1 or p2")]
    InvalidP1OrP2,
    #[error("unknown instruction")]
    UnknownInstruction,
    #[error("unknown instruction class")]
    UnknownInstructionClass,
    #[error("signing data too large")]
    SigningDataTooLarge,
    #[error("too many transaction fields")]
    TooManyTransactionFields,
    #[error("invalid transaction data")]
    InvalidTransactionData,
    #[error("wrong response length")]
    WrongResponseLength,
}

impl ApduError {
    /// The two-byte big-endian status word this error is masked to on the
    /// wire.
    pub const fn status_word(&self) -> u16 {
        match self {
            ApduError::NoApduReceived => 0x6982,
            ApduError::AddressRejected => 0x6985,
            ApduError::TransactionRejected => 0x6986,
            ApduError::InvalidPublicKeyLength => 0x6A80,
            ApduError::InvalidBip32PathLength => 0x6A81,
            ApduError::InvalidSigningPacketOrder => 0x6A82,
            ApduError::WrongApduDataLength => 0x6A87,
            ApduError::InvalidP1OrP2 => 0x6B00,
            ApduError::UnknownInstruction => 0x6D00,
            ApduError::UnknownInstructionClass => 0x6E00,
            ApduError::SigningDataTooLarge => 0x6700,
            ApduError::TooManyTransactionFields => 0x6701,
            ApduError::InvalidTransactionData => 0x6702,
            ApduError::WrongResponseLength => 0xB000,
        }
    }
}

/// The status word for a successful response with no error.
pub const OK: u16 = 0x9000;

/// Upper bound on a response's payload: largest real payload is a public
/// key plus its derived address plus a chain code, well under this.
pub const MAX_RESPONSE_LEN: usize = 128;

/// An outgoing reply: payload bytes followed by the two-byte status word
/// every response ends with.
#[derive(Debug, Clone)]
pub struct Response {
    pub data: heapless::Vec<u8, MAX_RESPONSE_LEN>,
    pub status: u16,
}

impl Response {
    pub fn ok(data: heapless::Vec<u8, MAX_RESPONSE_LEN>) -> Self {
        Response { data, status: OK }
    }

    pub fn error(err: ApduError) -> Self {
        Response { data: heapless::Vec::new(), status: err.status_word() }
    }
}

/// The framed byte transport spec treats as an external collaborator: hand
/// it a raw command frame, get a raw response frame back. No real transport
/// is implemented in this workspace; an in-memory test harness is the only
/// in-tree user.
pub trait ApduTransport {
    fn exchange(&mut self, command: &[u8]) -> Response;
}

#[cfg(test)]
extern crate std;
