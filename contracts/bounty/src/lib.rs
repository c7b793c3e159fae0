//! # Bounty Escrow Instance
//!
//! One deployed `BountyContract` per bounty. The instance owns the bounty's
//! state and its vault binding but carries no escrow rules of its own: every
//! state-changing call is forwarded to the logic contract currently named by
//! the beacon, so replacing the beacon's implementation changes the behavior
//! of all existing instances at once.
//!
//! ## Call Flow
//!
//! ```text
//! caller ──> BountyContract ──implementation()──> Beacon
//!                 │
//!                 ├──(state, ctx)──> Logic ──> Outcome
//!                 │
//!                 ├── custody checks, commit state
//!                 ├── vault.deposit / vault.withdraw
//!                 └── publish records
//! ```
//!
//! ## Security Model
//!
//! - Logic contracts are stateless and never hold funds. Whatever a logic
//!   version returns is checked against the custody rules in [`invariants`]
//!   before anything is written or transferred.
//! - State is committed before funds move; a failed transfer reverts the
//!   whole transaction.
//! - All state-changing entry points share one reentrancy guard.

#![no_std]

mod events;
mod invariants;
mod reentrancy_guard;

use escrow_shared::{
    ApplicantRecord, BeaconClient, BountyInitInterface, BountyLogicClient, BountyState,
    BountyStatus, CallContext, Error, Outcome, Parameters, Role, VaultClient,
};
use events::BountyInitialized;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol, Vec};

const STATE_TTL: u32 = 17280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Factory,
    Beacon,
    Vault,
    State,
    ReentrancyGuard,
}

/// Maps the result of a `try_*` cross-contract call onto the shared error
/// set. Errors returned by the callee pass through unchanged.
fn forward<T, C, I>(res: Result<Result<T, C>, Result<Error, I>>) -> Result<T, Error> {
    match res {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(err)) => Err(err),
        _ => Err(Error::LogicCallFailed),
    }
}

fn load_state(env: &Env) -> Result<BountyState, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

fn save_state(env: &Env, state: &BountyState) {
    env.storage().persistent().set(&DataKey::State, state);
    env.storage()
        .persistent()
        .extend_ttl(&DataKey::State, STATE_TTL, STATE_TTL);
}

fn config(env: &Env, key: DataKey) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&key)
        .ok_or(Error::NotInitialized)
}

fn current_logic(env: &Env) -> Result<Address, Error> {
    let beacon = config(env, DataKey::Beacon)?;
    forward(BeaconClient::new(env, &beacon).try_implementation())
}

/// Runs one state-changing operation through the current logic.
///
/// `call` performs the logic invocation; everything around it (guard,
/// authorization, custody checks, commit, transfers, records) is identical
/// for every operation.
fn run<F>(env: &Env, caller: &Address, call: F) -> Result<Outcome, Error>
where
    F: FnOnce(&BountyLogicClient<'_>, &BountyState, &CallContext) -> Result<Outcome, Error>,
{
    reentrancy_guard::acquire(env)?;
    caller.require_auth();

    let state = load_state(env)?;
    let logic_id = current_logic(env)?;
    let logic = BountyLogicClient::new(env, &logic_id);
    let ctx = CallContext {
        caller: caller.clone(),
        now: env.ledger().timestamp(),
    };

    let outcome = call(&logic, &state, &ctx)?;
    invariants::check_transition(env, &state, &ctx, &outcome)?;

    // EFFECTS
    save_state(env, &outcome.state);

    // INTERACTIONS
    let vault_id = config(env, DataKey::Vault)?;
    let vault = VaultClient::new(env, &vault_id);
    if outcome.inflow > 0 {
        forward(vault.try_deposit(caller, &outcome.inflow))?;
    }
    for payout in outcome.payouts.iter() {
        forward(vault.try_withdraw(&payout.to, &payout.amount))?;
    }

    let balance = forward(vault.try_balance())?;
    invariants::assert_covered(&outcome.state, balance);

    events::publish_all(env, &outcome.events);
    reentrancy_guard::release(env);
    Ok(outcome)
}

#[contract]
pub struct BountyContract;

#[contractimpl]
impl BountyInitInterface for BountyContract {
    /// Binds a freshly deployed instance to its factory, founder, vault and
    /// beacon. Only the factory that deployed the instance may call it, and
    /// only once. `founder_deposit` is the amount the factory has moved into
    /// the vault in the same transaction.
    fn init(
        env: Env,
        factory: Address,
        founder: Address,
        parameters: Parameters,
        vault: Address,
        beacon: Address,
        founder_deposit: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Factory) {
            return Err(Error::AlreadyInitialized);
        }
        factory.require_auth();

        if parameters.apply_deadline <= env.ledger().timestamp() {
            return Err(Error::DeadlineExpired);
        }
        if founder_deposit < 0
            || parameters.founder_deposit_amount < 0
            || parameters.applicant_deposit_min_amount < 0
        {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&DataKey::Factory, &factory);
        env.storage().instance().set(&DataKey::Beacon, &beacon);
        env.storage().instance().set(&DataKey::Vault, &vault);

        let state = BountyState::new(&env, founder.clone(), parameters.clone(), founder_deposit);
        save_state(&env, &state);

        events::emit_bounty_initialized(
            &env,
            BountyInitialized {
                factory,
                founder,
                vault,
                parameters,
            },
        );
        Ok(())
    }
}

#[contractimpl]
impl BountyContract {
    // ========================================================================
    // Escrow operations (delegated to the current logic)
    // ========================================================================

    /// Founder adds `amount` to their deposit.
    pub fn deposit(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_deposit(state, ctx, &amount))
        })?;
        Ok(())
    }

    /// Stakes `amount` as an application. Repeated calls accumulate.
    pub fn apply_for(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_apply_for(state, ctx, &amount))
        })?;
        Ok(())
    }

    pub fn approve_applicant(env: Env, caller: Address, applicant: Address) -> Result<(), Error> {
        run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_approve_applicant(state, ctx, &applicant))
        })?;
        Ok(())
    }

    /// Founder closes the bounty and pays out the releasable deposits.
    pub fn release(env: Env, caller: Address) -> Result<(), Error> {
        run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_release(state, ctx))
        })?;
        Ok(())
    }

    pub fn release_my_deposit(env: Env, caller: Address) -> Result<(), Error> {
        run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_release_my_deposit(state, ctx))
        })?;
        Ok(())
    }

    /// Invokes an operation that only newer logic versions know about.
    ///
    /// # Returns
    /// The scalar result reported by the logic.
    pub fn call_ext(
        env: Env,
        caller: Address,
        function: Symbol,
        args: Vec<i128>,
    ) -> Result<i128, Error> {
        let outcome = run(&env, &caller, |logic, state, ctx| {
            forward(logic.try_extension(state, ctx, &function, &args))
        })?;
        Ok(outcome.value)
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn parameters(env: Env) -> Result<Parameters, Error> {
        Ok(load_state(&env)?.parameters)
    }

    pub fn founder(env: Env) -> Result<Address, Error> {
        Ok(load_state(&env)?.founder)
    }

    pub fn founder_deposit(env: Env) -> Result<i128, Error> {
        Ok(load_state(&env)?.founder_deposit)
    }

    pub fn applicant(env: Env, identity: Address) -> Result<Option<ApplicantRecord>, Error> {
        Ok(load_state(&env)?.applicants.get(identity))
    }

    /// Every identity that has applied, approved or not.
    pub fn applicants(env: Env) -> Result<Vec<Address>, Error> {
        Ok(load_state(&env)?.applicants.keys())
    }

    pub fn applicant_total(env: Env) -> Result<i128, Error> {
        Ok(load_state(&env)?.applicant_total)
    }

    pub fn status(env: Env) -> Result<BountyStatus, Error> {
        Ok(load_state(&env)?.status)
    }

    /// Relationship of `identity` to this bounty.
    pub fn role_of(env: Env, identity: Address) -> Result<Role, Error> {
        Ok(load_state(&env)?.role_of(&identity))
    }

    pub fn state(env: Env) -> Result<BountyState, Error> {
        load_state(&env)
    }

    pub fn vault(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Vault)
    }

    pub fn vault_balance(env: Env) -> Result<i128, Error> {
        let vault = config(&env, DataKey::Vault)?;
        forward(VaultClient::new(&env, &vault).try_balance())
    }

    pub fn beacon(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Beacon)
    }

    pub fn factory(env: Env) -> Result<Address, Error> {
        config(&env, DataKey::Factory)
    }

    /// Logic contract currently serving this instance.
    pub fn logic(env: Env) -> Result<Address, Error> {
        current_logic(&env)
    }
}

#[cfg(test)]
mod test_custody_guard;
#[cfg(test)]
mod test_upgrade;
