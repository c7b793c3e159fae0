//! # Bounty Factory
//!
//! Entry point of the platform. A founder calls [`BountyFactoryContract::create_bounty`]
//! to open a new bounty; the factory deploys a fresh instance/vault pair,
//! binds it to the shared beacon, moves the founder's deposit into the new
//! vault and records the instance in the factory store.
//!
//! ## Architecture
//!
//! ```text
//!                   ┌──────────────┐
//!   founder ──────> │   Factory    │ ── push ──> FactoryStore
//!                   └──────┬───────┘
//!             deploy_instance
//!                          v
//!                   ┌──────────────┐  implementation()  ┌────────┐
//!                   │ Bounty  N    │ ─────────────────> │ Beacon │
//!                   │  └ Vault N   │                    └────────┘
//!                   └──────────────┘
//! ```
//!
//! ## Upgrades
//!
//! The factory's own code is replaced with [`BountyFactoryContract::upgrade`]. That
//! never touches the store, the beacon, or any created bounty: existing
//! instances change behavior only through the beacon.
//!
//! ## Deposit Assets
//!
//! - `DepositAsset::Native`: `provided_native_value` must equal the
//!   founder's deposit; funds move with a founder-authorized transfer on the
//!   native asset contract.
//! - `DepositAsset::Token(address)`: `provided_native_value` must be zero;
//!   funds move with `transfer_from` against the allowance the founder
//!   granted to the factory.

#![no_std]

mod events;
mod monitoring;

use escrow_shared::{
    asset, BountyInitClient, DepositAsset, Error, FactoryStoreClient, InstanceDeployerClient,
    Parameters, VaultClient,
};
use events::{
    emit_bounty_created, emit_factory_upgraded, emit_ownership_transferred, BountyCreated,
    FactoryUpgraded, OwnershipTransferred,
};
pub use monitoring::{Analytics, HealthStatus};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, BytesN, Env, Vec,
};

/// Version label of this factory build.
pub const FACTORY_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Owner,
    Beacon,
    Store,
    Deployer,
    NativeAsset,
    Nonce,
    Version,
}

#[contract]
pub struct BountyFactoryContract;

fn forward<T, C, I>(res: Result<Result<T, C>, Result<Error, I>>) -> Result<T, Error> {
    match res {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::LogicCallFailed),
    }
}

fn config(env: &Env, key: DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&key)
        .ok_or(Error::NotInitialized)
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != config(env, DataKey::Owner)? {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Salt for the next instance. Byte 0 stays free for the deployer's domain
/// tag; the creation nonce fills the last eight bytes.
fn next_salt(env: &Env) -> BytesN<32> {
    let nonce: u64 = env.storage().instance().get(&DataKey::Nonce).unwrap_or(0);
    env.storage().instance().set(&DataKey::Nonce, &(nonce + 1));

    let mut raw = [0u8; 32];
    raw[24..].copy_from_slice(&nonce.to_be_bytes());
    BytesN::from_array(env, &raw)
}

#[contractimpl]
impl BountyFactoryContract {
    /// Wires the factory to its collaborators and takes ownership of the
    /// store.
    ///
    /// # Arguments
    /// * `owner` - may upgrade the factory and transfer ownership
    /// * `beacon` - behavior registry every new bounty is bound to
    /// * `store` - uninitialized factory store
    /// * `deployer` - produces instance/vault pairs
    /// * `native_asset` - the network's native asset contract
    pub fn init(
        env: Env,
        owner: Address,
        beacon: Address,
        store: Address,
        deployer: Address,
        native_asset: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        asset::validate_token(&native_asset)?;

        forward(FactoryStoreClient::new(&env, &store).try_init(&env.current_contract_address()))?;

        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Beacon, &beacon);
        env.storage().instance().set(&DataKey::Store, &store);
        env.storage().instance().set(&DataKey::Deployer, &deployer);
        env.storage()
            .instance()
            .set(&DataKey::NativeAsset, &native_asset);
        env.storage()
            .instance()
            .set(&DataKey::Version, &FACTORY_VERSION);
        Ok(())
    }

    /// Opens a new bounty funded by `founder`.
    ///
    /// All checks run before anything is deployed or moved, so a rejected
    /// call leaves no partial bounty behind.
    ///
    /// # Returns
    /// Address of the new bounty instance.
    ///
    /// # Errors
    /// * `DeadlineExpired` - `apply_deadline` is not after the current time
    /// * `InvalidAmount` - a negative amount
    /// * `InvalidAsset` - token handle is not a contract
    /// * `InvalidValueSent` - native value does not match the asset rules
    /// * `InsufficientBalance` - founder holds less than the deposit
    /// * `InsufficientAllowance` - founder's allowance to the factory is too low
    pub fn create_bounty(
        env: Env,
        founder: Address,
        deposit_asset: DepositAsset,
        founder_deposit_amount: i128,
        applicant_deposit_min_amount: i128,
        apply_deadline: u64,
        provided_native_value: i128,
    ) -> Result<Address, Error> {
        founder.require_auth();

        if apply_deadline <= env.ledger().timestamp() {
            return Err(Error::DeadlineExpired);
        }
        if founder_deposit_amount < 0
            || applicant_deposit_min_amount < 0
            || provided_native_value < 0
        {
            return Err(Error::InvalidAmount);
        }

        let factory = env.current_contract_address();
        let (deposit_token, is_native) = match deposit_asset {
            DepositAsset::Native => {
                if provided_native_value != founder_deposit_amount {
                    return Err(Error::InvalidValueSent);
                }
                (config(&env, DataKey::NativeAsset)?, true)
            }
            DepositAsset::Token(address) => {
                asset::validate_token(&address)?;
                if provided_native_value != 0 {
                    return Err(Error::InvalidValueSent);
                }
                (address, false)
            }
        };

        let token_client = token::Client::new(&env, &deposit_token);
        if founder_deposit_amount > 0 {
            if token_client.balance(&founder) < founder_deposit_amount {
                return Err(Error::InsufficientBalance);
            }
            if !is_native && token_client.allowance(&founder, &factory) < founder_deposit_amount {
                return Err(Error::InsufficientAllowance);
            }
        }

        let salt = next_salt(&env);
        let deployer = config(&env, DataKey::Deployer)?;
        let pair = forward(
            InstanceDeployerClient::new(&env, &deployer).try_deploy_instance(&factory, &salt),
        )?;

        forward(VaultClient::new(&env, &pair.vault).try_init(&pair.bounty, &deposit_token))?;

        if founder_deposit_amount > 0 {
            if is_native {
                token_client.transfer(&founder, &pair.vault, &founder_deposit_amount);
            } else {
                token_client.transfer_from(&factory, &founder, &pair.vault, &founder_deposit_amount);
            }
        }

        let parameters = Parameters {
            deposit_token,
            deposit_token_is_native: is_native,
            founder_deposit_amount,
            applicant_deposit_min_amount,
            apply_deadline,
        };
        let beacon = config(&env, DataKey::Beacon)?;
        forward(BountyInitClient::new(&env, &pair.bounty).try_init(
            &factory,
            &founder,
            &parameters,
            &pair.vault,
            &beacon,
            &founder_deposit_amount,
        ))?;

        let store = config(&env, DataKey::Store)?;
        let index = forward(FactoryStoreClient::new(&env, &store).try_push(&factory, &pair.bounty))?;

        emit_bounty_created(
            &env,
            BountyCreated {
                founder: founder.clone(),
                bounty: pair.bounty.clone(),
                vault: pair.vault,
                index,
            },
        );
        monitoring::track_creation(&env, &founder);
        Ok(pair.bounty)
    }

    // ========================================================================
    // Registry views
    // ========================================================================

    /// Every bounty created so far, oldest first.
    pub fn children(env: Env) -> Result<Vec<Address>, Error> {
        let store = config(&env, DataKey::Store)?;
        Ok(FactoryStoreClient::new(&env, &store).children())
    }

    pub fn is_child(env: Env, address: Address) -> Result<bool, Error> {
        let store = config(&env, DataKey::Store)?;
        Ok(FactoryStoreClient::new(&env, &store).contains(&address))
    }

    pub fn children_count(env: Env) -> Result<u32, Error> {
        let store = config(&env, DataKey::Store)?;
        Ok(FactoryStoreClient::new(&env, &store).len())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Owner)
    }

    pub fn beacon(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Beacon)
    }

    pub fn store(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Store)
    }

    pub fn deployer(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Deployer)
    }

    pub fn native_asset(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::NativeAsset)
    }

    // ========================================================================
    // Administration
    // ========================================================================

    pub fn get_version(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Version).unwrap_or(0)
    }

    /// Replaces the factory's own code. The store, the beacon and every
    /// created bounty are left as they are.
    ///
    /// # Arguments
    /// * `new_wasm_hash` - hash of the uploaded factory Wasm
    /// * `new_version` - version label to record; defaults to the current
    ///   label plus one
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the owner
    /// * `InvalidWasmHash` - hash is all zeroes
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
        new_version: Option<u32>,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if new_wasm_hash.to_array() == [0u8; 32] {
            return Err(Error::InvalidWasmHash);
        }

        let previous_version = Self::get_version(env.clone());
        let version = new_version.unwrap_or(previous_version.saturating_add(1));
        env.storage().instance().set(&DataKey::Version, &version);

        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());

        emit_factory_upgraded(
            &env,
            FactoryUpgraded {
                wasm_hash: new_wasm_hash,
                previous_version,
                version,
            },
        );
        monitoring::track_operation(&env, symbol_short!("upgrade"), caller);
        Ok(())
    }

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::Owner, &new_owner);
        emit_ownership_transferred(
            &env,
            OwnershipTransferred {
                previous: caller.clone(),
                owner: new_owner,
            },
        );
        monitoring::track_operation(&env, symbol_short!("owner"), caller);
        Ok(())
    }

    // ========================================================================
    // Monitoring
    // ========================================================================

    pub fn health_check(env: Env) -> HealthStatus {
        let version = Self::get_version(env.clone());
        monitoring::health_check(&env, version)
    }

    pub fn get_analytics(env: Env) -> Analytics {
        monitoring::get_analytics(&env)
    }
}
