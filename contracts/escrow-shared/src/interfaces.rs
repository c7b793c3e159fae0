//! Cross-contract call interfaces.
//!
//! Each trait generates a typed client (`*Client`) used by the calling
//! contract. Implementations live in their own crates so that callers never
//! link another contract's code.

use soroban_sdk::{contractclient, Address, BytesN, Env, Symbol, Vec};

use crate::{BountyState, CallContext, Error, InstancePair, Outcome, Parameters};

/// Behavior shared by every escrow instance through the beacon.
///
/// Implementations are stateless: they receive the instance state and return
/// the next one. Adding a method here is a breaking change for deployed
/// instances; new behavior is exposed through `extension` instead.
#[contractclient(name = "BountyLogicClient")]
pub trait BountyLogicInterface {
    fn version(env: Env) -> u32;

    fn deposit(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error>;

    fn apply_for(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error>;

    fn approve_applicant(
        env: Env,
        state: BountyState,
        ctx: CallContext,
        applicant: Address,
    ) -> Result<Outcome, Error>;

    fn release(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error>;

    fn release_my_deposit(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error>;

    fn extension(
        env: Env,
        state: BountyState,
        ctx: CallContext,
        function: Symbol,
        args: Vec<i128>,
    ) -> Result<Outcome, Error>;
}

/// Custody unit bound to exactly one escrow instance.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn init(env: Env, owner: Address, token: Address) -> Result<(), Error>;

    /// Pull `amount` from `from` into the vault. Owner only.
    fn deposit(env: Env, from: Address, amount: i128) -> Result<(), Error>;

    /// Pay `amount` out of the vault to `to`. Owner only.
    fn withdraw(env: Env, to: Address, amount: i128) -> Result<(), Error>;

    fn balance(env: Env) -> Result<i128, Error>;

    fn owner(env: Env) -> Result<Address, Error>;

    fn token(env: Env) -> Result<Address, Error>;
}

/// Read side of the behavior registry, as seen by escrow instances.
#[contractclient(name = "BeaconClient")]
pub trait BeaconInterface {
    fn implementation(env: Env) -> Result<Address, Error>;
}

/// One-shot initializer of a freshly deployed escrow instance.
#[contractclient(name = "BountyInitClient")]
pub trait BountyInitInterface {
    fn init(
        env: Env,
        factory: Address,
        founder: Address,
        parameters: Parameters,
        vault: Address,
        beacon: Address,
        founder_deposit: i128,
    ) -> Result<(), Error>;
}

/// Append-only list of created instances, writable by its owner only.
#[contractclient(name = "FactoryStoreClient")]
pub trait FactoryStoreInterface {
    fn init(env: Env, owner: Address) -> Result<(), Error>;

    fn push(env: Env, caller: Address, child: Address) -> Result<u32, Error>;

    fn children(env: Env) -> Vec<Address>;

    fn len(env: Env) -> u32;

    fn contains(env: Env, child: Address) -> bool;
}

/// Produces a fresh, uninitialized instance/vault pair for the factory.
#[contractclient(name = "InstanceDeployerClient")]
pub trait InstanceDeployerInterface {
    fn deploy_instance(env: Env, caller: Address, salt: BytesN<32>) -> Result<InstancePair, Error>;
}
