//! # Bounty Beacon
//!
//! Behavior registry shared by every escrow instance. The beacon names the
//! logic contract that all instances delegate to; instances read it on every
//! state-changing call, so an upgrade here changes the behavior of existing
//! and future instances at once, with no per-instance migration.
//!
//! ```text
//!   bounty #1 ──┐
//!   bounty #2 ──┼── implementation() ──> beacon ──> logic vN
//!   bounty #N ──┘
//! ```
//!
//! ## Security Model
//! - A single admin may replace the implementation or hand over the role.
//! - Every upgrade target must be a contract that answers the logic
//!   interface's `version()`; anything else is rejected, never silently
//!   accepted.
//! - The previous implementation is kept for rollback through a regular
//!   `upgrade` call.

#![no_std]

mod events;

use escrow_shared::{asset, BountyLogicClient, Error};
use events::{emit_admin_transferred, emit_upgraded, AdminTransferred, Upgraded};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Implementation,
    PreviousImplementation,
    /// Version label of the current implementation
    Version,
}

#[contract]
pub struct BountyBeaconContract;

/// Checks that `candidate` is a logic contract and returns the version it
/// reports.
fn logic_version(env: &Env, candidate: &Address) -> Result<u32, Error> {
    if !asset::is_contract_address(candidate) {
        return Err(Error::InvalidImplementation);
    }
    match BountyLogicClient::new(env, candidate).try_version() {
        Ok(Ok(version)) => Ok(version),
        _ => Err(Error::InvalidImplementation),
    }
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    if *caller != admin {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

#[contractimpl]
impl BountyBeaconContract {
    pub fn init(env: Env, admin: Address, implementation: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        let version = logic_version(&env, &implementation)?;

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::Implementation, &implementation);
        env.storage().instance().set(&DataKey::Version, &version);
        Ok(())
    }

    /// Logic contract every escrow instance currently delegates to.
    pub fn implementation(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Implementation)
            .ok_or(Error::NotInitialized)
    }

    pub fn previous_implementation(env: Env) -> Option<Address> {
        env.storage()
            .instance()
            .get(&DataKey::PreviousImplementation)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn version(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Version).unwrap_or(0)
    }

    /// Replaces the shared implementation.
    ///
    /// `new_version` overrides the version label recorded for the new
    /// implementation; when `None` the label reported by the logic is used.
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the admin
    /// * `InvalidImplementation` - target is not a logic contract
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_implementation: Address,
        new_version: Option<u32>,
    ) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        let reported = logic_version(&env, &new_implementation)?;

        let previous: Address = env
            .storage()
            .instance()
            .get(&DataKey::Implementation)
            .ok_or(Error::NotInitialized)?;
        let version = new_version.unwrap_or(reported);

        env.storage()
            .instance()
            .set(&DataKey::PreviousImplementation, &previous);
        env.storage()
            .instance()
            .set(&DataKey::Implementation, &new_implementation);
        env.storage().instance().set(&DataKey::Version, &version);

        emit_upgraded(
            &env,
            Upgraded {
                previous,
                implementation: new_implementation,
                version,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        emit_admin_transferred(
            &env,
            AdminTransferred {
                previous: caller,
                admin: new_admin,
            },
        );
        Ok(())
    }
}
