//! The owned session object the command dispatcher drives: scratch buffer,
//! BIP32 path, curve selector, and the three-state packet-assembly state
//! machine, wired to a [`SigningBackend`].
//!
//! Everything the original design kept as process-wide globals lives here as
//! fields of [`Session`] instead, the same way the teacher's `provider::builder`
//! composes fillers and layers behind a single entry-point value rather than
//! module-level statics. A field array borrowed from the scratch area is
//! never stored back onto `Session` — it is handed to the caller as part of
//! [`Outcome::AwaitingReview`] and must be dropped before the next call, which
//! is exactly the "yields without replying" suspension point the design
//! describes: the borrow checker enforces it instead of documentation.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

use heapless::Vec as HVec;
use tracing::{debug, warn};
use xym_apdu::{
    ApduError, Command, Instruction, Response, MAX_RESPONSE_LEN, P1_SIGN_MORE, P1_SIGN_ORDER,
    P2_ED25519, P2_SECP256K1,
};
use xym_buffer::{Cursor, CursorError, MAX_BIP32_PATH};
use xym_crypto::SigningBackend;
use xym_tx::{NetworkConfig, ParseError, ParsedTransaction};

/// Capacity of the raw-transaction scratch area. A few kilobytes covers every
/// aggregate transaction this device is expected to review on-screen; a host
/// attempting to stream more than this is rejected as [`ApduError::SigningDataTooLarge`].
pub const MAX_RAW_TX: usize = 4096;

const HARDENED_BIT: u32 = 1 << 31;

/// App semver reported by `GET_VERSION`; bumped by hand alongside the
/// workspace version in the root `Cargo.toml`.
const APP_VERSION: (u8, u8, u8) = (0, 1, 0);

/// The curve a signing key was requested under. Symbol accounts are always
/// Ed25519; `Secp256k1` is accepted at the envelope-validation level (the
/// P2 bits are generic across instruction-set siblings) but this backend has
/// no secp256k1 implementation, so a request for it is refused once past
/// that check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Secp256k1,
    Ed25519,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignState {
    Idle,
    WaitingForMore,
    PendingReview,
}

/// The typed continuation value a UI driver produces once it has walked the
/// field array handed to it in [`Outcome::AwaitingReview`]. Replaces the
/// `on_confirm`/`on_reject` callback pair with a single value consumed by
/// [`Session::resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Approve,
    Reject,
}

/// What a command produced: either an immediate reply, or a parsed
/// transaction awaiting the UI driver's review before [`Session::resume`]
/// is called.
#[derive(Debug)]
pub enum Outcome<'a> {
    Reply(Response),
    AwaitingReview(ParsedTransaction<'a>),
}

/// Owned session state: scratch area, BIP32 path, curve, sign-state, and the
/// signing backend used to derive keys from the path. Single-threaded
/// cooperative use only; there is no interior mutability anywhere in this
/// type, matching the concurrency model's "only the state machine writes the
/// scratch" invariant.
pub struct Session<B: SigningBackend> {
    backend: B,
    scratch: [u8; MAX_RAW_TX],
    len: usize,
    path: [u32; MAX_BIP32_PATH],
    path_len: usize,
    curve: Curve,
    sign_state: SignState,
    signing_length: usize,
    last_ins: Option<u8>,
}

impl<B: SigningBackend> Session<B> {
    pub const fn new(backend: B) -> Self {
        Session {
            backend,
            scratch: [0u8; MAX_RAW_TX],
            len: 0,
            path: [0u32; MAX_BIP32_PATH],
            path_len: 0,
            curve: Curve::Ed25519,
            sign_state: SignState::Idle,
            signing_length: 0,
            last_ins: None,
        }
    }

    /// Zero the scratch area and return to `IDLE`. Does not touch `last_ins`
    /// — that field tracks command history across resets by design.
    fn reset(&mut self) {
        for byte in self.scratch.iter_mut() {
            *byte = 0;
        }
        self.len = 0;
        self.path = [0u32; MAX_BIP32_PATH];
        self.path_len = 0;
        self.curve = Curve::Ed25519;
        self.sign_state = SignState::Idle;
        self.signing_length = 0;
    }

    fn append_payload(&mut self, data: &[u8]) -> Result<(), ApduError> {
        let end = self.len.checked_add(data.len()).ok_or(ApduError::SigningDataTooLarge)?;
        if end > MAX_RAW_TX {
            return Err(ApduError::SigningDataTooLarge);
        }
        self.scratch[self.len..end].copy_from_slice(data);
        self.len = end;
        Ok(())
    }

    /// Dispatch a raw command frame. Runs the instruction-change guard
    /// before anything else: a different instruction byte than the previous
    /// command unconditionally resets the scratch, closing the
    /// instruction-change attack where a host interleaves an unrelated
    /// command into a `SIGN_TX` sequence to smuggle bytes through.
    pub fn handle_command<'a>(&'a mut self, raw: &[u8]) -> Outcome<'a> {
        let cmd = match Command::parse(raw) {
            Ok(cmd) => cmd,
            Err(err) => return Outcome::Reply(Response::error(err)),
        };

        let ins_byte = cmd.ins as u8;
        if self.last_ins != Some(ins_byte) {
            if self.last_ins.is_some() {
                warn!(ins = ins_byte, "instruction changed mid-sequence, resetting scratch");
            }
            self.reset();
        }
        self.last_ins = Some(ins_byte);
        debug!(ins = ins_byte, p1 = cmd.p1, p2 = cmd.p2, "dispatching command");

        match cmd.ins {
            Instruction::SignTx => self.handle_sign_tx(cmd),
            Instruction::GetPublicKey => Outcome::Reply(self.handle_get_public_key(cmd)),
            Instruction::GetVersion => Outcome::Reply(handle_get_version()),
        }
    }

    fn curve_from_p2(p2: u8) -> Result<Curve, ApduError> {
        match (p2 & P2_SECP256K1 != 0, p2 & P2_ED25519 != 0) {
            (true, false) => Ok(Curve::Secp256k1),
            (false, true) => Ok(Curve::Ed25519),
            _ => Err(ApduError::InvalidP1OrP2),
        }
    }

    fn handle_sign_tx<'a>(&'a mut self, cmd: Command<'_>) -> Outcome<'a> {
        let is_subsequent = cmd.p1 & P1_SIGN_ORDER != 0;
        let more = cmd.p1 & P1_SIGN_MORE != 0;

        let valid_transition = matches!(
            (self.sign_state, is_subsequent),
            (SignState::Idle, false) | (SignState::WaitingForMore, true)
        );
        if !valid_transition {
            warn!(subsequent = is_subsequent, "sign_tx frame out of order");
            self.reset();
            return Outcome::Reply(Response::error(ApduError::InvalidSigningPacketOrder));
        }

        if is_subsequent {
            if let Err(err) = self.append_payload(cmd.data) {
                self.reset();
                return Outcome::Reply(Response::error(err));
            }
        } else {
            let curve = match Self::curve_from_p2(cmd.p2) {
                Ok(curve) => curve,
                Err(err) => {
                    self.reset();
                    return Outcome::Reply(Response::error(err));
                }
            };
            let mut cursor = Cursor::new(cmd.data);
            let (path, path_len) = match cursor.take_bip32_path() {
                Ok(p) => p,
                Err(err) => {
                    self.reset();
                    return Outcome::Reply(Response::error(mask_cursor_error(err)));
                }
            };
            let rest = cursor.rest();
            self.reset();
            self.path = path;
            self.path_len = path_len;
            self.curve = curve;
            if let Err(err) = self.append_payload(rest) {
                self.reset();
                return Outcome::Reply(Response::error(err));
            }
        }

        if more {
            self.sign_state = SignState::WaitingForMore;
            return Outcome::Reply(Response::ok(HVec::new()));
        }

        self.finalize()
    }

    fn finalize<'a>(&'a mut self) -> Outcome<'a> {
        self.sign_state = SignState::PendingReview;

        let coin_type = if self.path_len > 1 { self.path[1] & !HARDENED_BIT } else { 0 };
        let network = NetworkConfig::from_coin_type(coin_type);

        match xym_tx::parse(&self.scratch[..self.len], &network) {
            Ok(parsed) => {
                self.signing_length = parsed.signing_length;
                debug!(
                    field_count = parsed.fields.len(),
                    signing_length = self.signing_length,
                    "transaction parsed, awaiting review"
                );
                Outcome::AwaitingReview(parsed)
            }
            Err(err) => {
                let status = mask_parse_error(err);
                warn!(status = status.status_word(), "transaction parse failed");
                self.reset();
                Outcome::Reply(Response::error(status))
            }
        }
    }

    /// Consume the UI driver's decision. Only valid while `PENDING_REVIEW`;
    /// any other state resets and reports [`ApduError::InvalidSigningPacketOrder`]
    /// without touching the signing backend.
    pub fn resume(&mut self, action: Action) -> Response {
        match action {
            Action::Approve => {
                if self.sign_state != SignState::PendingReview {
                    self.reset();
                    return Response::error(ApduError::InvalidSigningPacketOrder);
                }
                if !matches!(self.curve, Curve::Ed25519) {
                    self.reset();
                    return Response::error(ApduError::InvalidP1OrP2);
                }
                let key = match self.backend.derive(&self.path[..self.path_len]) {
                    Ok(key) => key,
                    Err(_) => {
                        self.reset();
                        return Response::error(ApduError::InvalidBip32PathLength);
                    }
                };
                let signature = key.sign(&self.scratch[..self.signing_length]);
                drop(key); // zeroized by `PrivateKeyMaterial`'s `ZeroizeOnDrop` before the reply is built
                debug!(signing_length = self.signing_length, "transaction approved and signed");
                let mut data: HVec<u8, MAX_RESPONSE_LEN> = HVec::new();
                let _ = data.extend_from_slice(&signature.0);
                self.reset();
                Response::ok(data)
            }
            Action::Reject => {
                debug!("transaction rejected by user");
                self.reset();
                Response::error(ApduError::TransactionRejected)
            }
        }
    }

    fn handle_get_public_key(&mut self, cmd: Command<'_>) -> Response {
        let curve = match Self::curve_from_p2(cmd.p2) {
            Ok(curve) => curve,
            Err(err) => return Response::error(err),
        };
        if !matches!(curve, Curve::Ed25519) {
            return Response::error(ApduError::InvalidP1OrP2);
        }

        let mut cursor = Cursor::new(cmd.data);
        let (path, path_len) = match cursor.take_bip32_path() {
            Ok(p) => p,
            Err(err) => return Response::error(mask_cursor_error(err)),
        };
        let network_byte = match cursor.take_u8() {
            Some(b) => b,
            None => return Response::error(ApduError::WrongApduDataLength),
        };

        let key = match self.backend.derive(&path[..path_len]) {
            Ok(key) => key,
            Err(_) => return Response::error(ApduError::InvalidBip32PathLength),
        };
        let public = key.public_key();
        let address = xym_crypto::address_from_public_key(&public, network_byte);
        drop(key);

        let mut data: HVec<u8, MAX_RESPONSE_LEN> = HVec::new();
        let _ = data.extend_from_slice(&public.0);
        let _ = data.extend_from_slice(&address);
        Response::ok(data)
    }
}

fn handle_get_version() -> Response {
    let mut data: HVec<u8, MAX_RESPONSE_LEN> = HVec::new();
    let _ = data.extend_from_slice(&[0x00, APP_VERSION.0, APP_VERSION.1, APP_VERSION.2]);
    Response::ok(data)
}

fn mask_cursor_error(err: CursorError) -> ApduError {
    match err {
        CursorError::NotEnoughData => ApduError::WrongApduDataLength,
        CursorError::InvalidBip32PathLength => ApduError::InvalidBip32PathLength,
    }
}

fn mask_parse_error(err: ParseError) -> ApduError {
    match err {
        ParseError::NotEnoughData | ParseError::InvalidData => ApduError::InvalidTransactionData,
        ParseError::TooManyFields => ApduError::TooManyTransactionFields,
    }
}

#[cfg(test)]
extern crate std;
