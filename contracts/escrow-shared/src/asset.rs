//! Classification of addresses handed to the factory and the beacon.
//!
//! Deposit tokens and logic references must both be contracts; an account
//! key in either slot is rejected before any call is made to it.

use soroban_sdk::Address;

use crate::Error;

const STRKEY_LEN: usize = 56;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressKind {
    /// `G...` key.
    Account,
    /// `C...` key.
    Contract,
}

/// Reads the kind of `address` from the version byte of its strkey.
pub fn kind_of(address: &Address) -> Option<AddressKind> {
    let strkey = address.to_string();
    if strkey.len() as usize != STRKEY_LEN {
        return None;
    }

    let mut bytes = [0u8; STRKEY_LEN];
    strkey.copy_into_slice(&mut bytes);
    match bytes[0] {
        b'G' => Some(AddressKind::Account),
        b'C' => Some(AddressKind::Contract),
        _ => None,
    }
}

pub fn is_contract_address(address: &Address) -> bool {
    kind_of(address) == Some(AddressKind::Contract)
}

/// Rejects a deposit token handle that is not a contract.
pub fn validate_token(token: &Address) -> Result<(), Error> {
    if !is_contract_address(token) {
        return Err(Error::InvalidAsset);
    }
    Ok(())
}
