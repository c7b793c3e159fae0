//! # Bounty Logic (v1)
//!
//! The escrow state machine shared by every bounty instance through the
//! beacon. The contract is stateless: each entry point receives the calling
//! instance's `BountyState` and returns an `Outcome` that the instance
//! validates, commits and executes against its own vault.
//!
//! ## Lifecycle
//!
//! ```text
//!  (uninitialized) ──init──> Active ──release──> Finalized
//!                              │                    │
//!            deposit, apply_for, approve      approve, release_my_deposit
//! ```
//!
//! Within `Active`, the application window (`now <= apply_deadline`) gates
//! `apply_for` and approvals gate `release_my_deposit`.
//!
//! Later logic versions reuse [`machine`] for the operations they keep and
//! add new ones behind `extension`.

#![no_std]

pub mod machine;

use escrow_shared::{BountyLogicInterface, BountyState, CallContext, Error, Outcome};
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

/// Version reported to the beacon.
pub const LOGIC_VERSION: u32 = 1;

#[contract]
pub struct BountyLogicContract;

#[contractimpl]
impl BountyLogicInterface for BountyLogicContract {
    fn version(_env: Env) -> u32 {
        LOGIC_VERSION
    }

    fn deposit(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error> {
        machine::deposit(&env, state, &ctx, amount)
    }

    fn apply_for(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error> {
        machine::apply_for(&env, state, &ctx, amount)
    }

    fn approve_applicant(
        env: Env,
        state: BountyState,
        ctx: CallContext,
        applicant: Address,
    ) -> Result<Outcome, Error> {
        machine::approve_applicant(&env, state, &ctx, applicant)
    }

    fn release(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error> {
        machine::release(&env, state, &ctx)
    }

    fn release_my_deposit(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error> {
        machine::release_my_deposit(&env, state, &ctx)
    }

    fn extension(
        _env: Env,
        _state: BountyState,
        _ctx: CallContext,
        _function: Symbol,
        _args: Vec<i128>,
    ) -> Result<Outcome, Error> {
        Err(Error::UnsupportedOperation)
    }
}
