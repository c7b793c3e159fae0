//! # Reentrancy Guard Module
//!
//! Blocks nested entry into the state-changing functions of an escrow
//! instance. Every protected call holds a flag in instance storage from the
//! moment it loads state until its last outbound transfer has returned.
//!
//! ## Security Notes
//!
//! - Returning `Err(..)` from a `#[contractimpl]` function reverts state, so
//!   early error returns after `acquire` cannot leave the guard stuck.
//! - The same key protects all entry points, so re-entry through a different
//!   function is rejected as well.

use super::DataKey;
use escrow_shared::Error;
use soroban_sdk::Env;

pub fn acquire(env: &Env) -> Result<(), Error> {
    if env.storage().instance().has(&DataKey::ReentrancyGuard) {
        return Err(Error::ReentrantCall);
    }
    env.storage()
        .instance()
        .set(&DataKey::ReentrancyGuard, &true);
    Ok(())
}

/// Must be called before returning from every protected function on the
/// success path.
pub fn release(env: &Env) {
    env.storage().instance().remove(&DataKey::ReentrancyGuard);
}

#[cfg(test)]
pub fn is_active(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::ReentrancyGuard)
}
