//! # Bounty Deployer
//!
//! Deploys the instance/vault pair for each new bounty from uploaded Wasm.
//! The factory never embeds contract code; it asks this contract for a
//! fresh, uninitialized pair and wires it up itself.
//!
//! The Wasm hashes held here only decide the code of *future* instances.
//! Behavior of every instance, old or new, comes from the beacon.

#![no_std]

use escrow_shared::{Error, InstanceDeployerInterface, InstancePair};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env};

/// Salt byte 0 is a domain tag so one caller salt yields two addresses.
const BOUNTY_TAG: u8 = 0x00;
const VAULT_TAG: u8 = 0x01;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Factory,
    BountyWasm,
    VaultWasm,
}

#[contract]
pub struct BountyDeployerContract;

fn tagged(env: &Env, salt: &BytesN<32>, tag: u8) -> BytesN<32> {
    let mut raw = salt.to_array();
    raw[0] = tag;
    BytesN::from_array(env, &raw)
}

fn check_hash(hash: &BytesN<32>) -> Result<(), Error> {
    if hash.to_array() == [0u8; 32] {
        return Err(Error::InvalidWasmHash);
    }
    Ok(())
}

fn wasm_hash(env: &Env, key: DataKey) -> Result<BytesN<32>, Error> {
    env.storage()
        .instance()
        .get(&key)
        .ok_or(Error::NotInitialized)
}

#[contractimpl]
impl BountyDeployerContract {
    pub fn init(
        env: Env,
        admin: Address,
        factory: Address,
        bounty_wasm: BytesN<32>,
        vault_wasm: BytesN<32>,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        check_hash(&bounty_wasm)?;
        check_hash(&vault_wasm)?;

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Factory, &factory);
        env.storage().instance().set(&DataKey::BountyWasm, &bounty_wasm);
        env.storage().instance().set(&DataKey::VaultWasm, &vault_wasm);
        Ok(())
    }

    /// Rotates the code used for instances deployed from now on.
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the admin
    /// * `InvalidWasmHash` - either hash is all zeroes
    pub fn update_wasm(
        env: Env,
        caller: Address,
        bounty_wasm: BytesN<32>,
        vault_wasm: BytesN<32>,
    ) -> Result<(), Error> {
        caller.require_auth();
        if caller != Self::admin(env.clone())? {
            return Err(Error::Unauthorized);
        }
        check_hash(&bounty_wasm)?;
        check_hash(&vault_wasm)?;

        env.storage().instance().set(&DataKey::BountyWasm, &bounty_wasm);
        env.storage().instance().set(&DataKey::VaultWasm, &vault_wasm);
        env.events()
            .publish((symbol_short!("wasm"), caller), (bounty_wasm, vault_wasm));
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn factory(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Factory)
            .ok_or(Error::NotInitialized)
    }

    pub fn bounty_wasm(env: Env) -> Result<BytesN<32>, Error> {
        wasm_hash(&env, DataKey::BountyWasm)
    }

    pub fn vault_wasm(env: Env) -> Result<BytesN<32>, Error> {
        wasm_hash(&env, DataKey::VaultWasm)
    }
}

#[contractimpl]
impl InstanceDeployerInterface for BountyDeployerContract {
    /// Deploys one bounty and its vault. Factory only.
    fn deploy_instance(env: Env, caller: Address, salt: BytesN<32>) -> Result<InstancePair, Error> {
        caller.require_auth();
        if caller != Self::factory(env.clone())? {
            return Err(Error::Unauthorized);
        }

        let bounty_wasm = wasm_hash(&env, DataKey::BountyWasm)?;
        let vault_wasm = wasm_hash(&env, DataKey::VaultWasm)?;

        let bounty = env
            .deployer()
            .with_current_contract(tagged(&env, &salt, BOUNTY_TAG))
            .deploy(bounty_wasm);
        let vault = env
            .deployer()
            .with_current_contract(tagged(&env, &salt, VAULT_TAG))
            .deploy(vault_wasm);

        Ok(InstancePair { bounty, vault })
    }
}

#[cfg(all(test, feature = "wasm-tests"))]
mod test_wasm;
