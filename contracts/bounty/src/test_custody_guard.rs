//! Outcomes from a faulty or hostile logic version are rejected before any
//! state is written or any funds move.

use crate::test::{BountySetup, FOUNDER_DEPOSIT, MIN_STAKE};
use bounty_logic::machine;
use escrow_shared::{
    BountyLogicInterface, BountyState, BountyStatus, CallContext, Error, Outcome, Payout,
};
use soroban_sdk::{contract, contractimpl, testutils::Address as _, Address, Env, Symbol, Vec};

#[contract]
pub struct RogueLogic;

#[contractimpl]
impl BountyLogicInterface for RogueLogic {
    fn version(_env: Env) -> u32 {
        99
    }

    /// Lowers the applicant minimum while topping up.
    fn deposit(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error> {
        let mut outcome = machine::deposit(&env, state, &ctx, amount)?;
        outcome.state.parameters.applicant_deposit_min_amount = 0;
        Ok(outcome)
    }

    /// Records the stake without pulling it into the vault.
    fn apply_for(env: Env, state: BountyState, ctx: CallContext, amount: i128) -> Result<Outcome, Error> {
        let mut outcome = machine::apply_for(&env, state, &ctx, amount)?;
        outcome.inflow = 0;
        Ok(outcome)
    }

    fn approve_applicant(
        env: Env,
        state: BountyState,
        ctx: CallContext,
        applicant: Address,
    ) -> Result<Outcome, Error> {
        machine::approve_applicant(&env, state, &ctx, applicant)
    }

    /// Pays the founder twice.
    fn release(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error> {
        let mut outcome = machine::release(&env, state.clone(), &ctx)?;
        outcome.payouts.push_back(Payout {
            to: state.founder.clone(),
            amount: state.founder_deposit,
        });
        Ok(outcome)
    }

    /// Pays any caller out of the founder's deposit.
    fn release_my_deposit(env: Env, state: BountyState, ctx: CallContext) -> Result<Outcome, Error> {
        let mut state = state;
        state.founder_deposit -= 1;
        let mut outcome = Outcome::quiet(&env, state);
        outcome.payouts.push_back(Payout {
            to: ctx.caller,
            amount: 1,
        });
        Ok(outcome)
    }

    /// Reopens a finalized bounty.
    fn extension(
        env: Env,
        state: BountyState,
        _ctx: CallContext,
        _function: Symbol,
        _args: Vec<i128>,
    ) -> Result<Outcome, Error> {
        let mut state = state;
        state.status = BountyStatus::Active;
        Ok(Outcome::quiet(&env, state))
    }
}

fn install_rogue(setup: &BountySetup) {
    let rogue = setup.env.register_contract(None, RogueLogic);
    setup.beacon.upgrade(&setup.beacon_admin, &rogue, &None);
}

#[test]
fn test_parameter_change_rejected() {
    let setup = BountySetup::new();
    install_rogue(&setup);
    setup.token_admin.mint(&setup.founder, &100);

    assert_eq!(
        setup.bounty.try_deposit(&setup.founder, &100),
        Err(Ok(Error::InvalidTransition))
    );
    assert_eq!(setup.bounty.parameters(), setup.parameters());
    assert_eq!(setup.bounty.vault_balance(), FOUNDER_DEPOSIT);
}

#[test]
fn test_unfunded_stake_rejected() {
    let setup = BountySetup::new();
    install_rogue(&setup);
    let applicant = setup.funded(MIN_STAKE);

    assert_eq!(
        setup.bounty.try_apply_for(&applicant, &MIN_STAKE),
        Err(Ok(Error::InvalidTransition))
    );
    assert_eq!(setup.bounty.applicant(&applicant), None);
    assert_eq!(setup.token.balance(&applicant), MIN_STAKE);
}

#[test]
fn test_overpayment_rejected() {
    let setup = BountySetup::new();
    let applicant = setup.funded(MIN_STAKE);
    setup.bounty.apply_for(&applicant, &MIN_STAKE);
    install_rogue(&setup);

    assert_eq!(
        setup.bounty.try_release(&setup.founder),
        Err(Ok(Error::InvalidTransition))
    );
    assert_eq!(setup.bounty.status(), BountyStatus::Active);
    assert_eq!(setup.bounty.vault_balance(), FOUNDER_DEPOSIT + MIN_STAKE);
    assert_eq!(setup.token.balance(&setup.founder), 0);
}

#[test]
fn test_payout_to_stranger_rejected() {
    let setup = BountySetup::new();
    install_rogue(&setup);
    let stranger = Address::generate(&setup.env);

    assert_eq!(
        setup.bounty.try_release_my_deposit(&stranger),
        Err(Ok(Error::InvalidTransition))
    );
    assert_eq!(setup.token.balance(&stranger), 0);
    assert_eq!(setup.bounty.founder_deposit(), FOUNDER_DEPOSIT);
}

#[test]
fn test_reopening_finalized_bounty_rejected() {
    let setup = BountySetup::new();
    setup.bounty.release(&setup.founder);
    install_rogue(&setup);

    let res = setup.bounty.try_call_ext(
        &setup.founder,
        &Symbol::new(&setup.env, "reopen"),
        &Vec::new(&setup.env),
    );
    assert_eq!(res, Err(Ok(Error::InvalidTransition)));
    assert_eq!(setup.bounty.status(), BountyStatus::Finalized);
}

mod shift {
    use bounty_logic::machine;
    use escrow_shared::{BountyLogicInterface, BountyState, CallContext, Error, Outcome};
    use soroban_sdk::{contract, contractimpl, Address, Env, Symbol, Vec};

    /// Keeps every aggregate intact but hands an applicant's stake to the
    /// founder when the applicant is approved.
    #[contract]
    pub struct ShiftLogic;

    #[contractimpl]
    impl BountyLogicInterface for ShiftLogic {
        fn version(_env: Env) -> u32 {
            98
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
            let mut outcome = machine::approve_applicant(&env, state, &ctx, applicant.clone())?;
            let state = &mut outcome.state;
            if let Some(mut record) = state.applicants.get(applicant.clone()) {
                state.founder_deposit += record.deposit;
                state.applicant_total -= record.deposit;
                record.deposit = 0;
                state.applicants.set(applicant, record);
            }
            Ok(outcome)
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
}

#[test]
fn test_balance_shift_between_identities_rejected() {
    let setup = BountySetup::new();
    let applicant = setup.funded(MIN_STAKE);
    setup.bounty.apply_for(&applicant, &MIN_STAKE);

    let shift = setup.env.register_contract(None, shift::ShiftLogic);
    setup.beacon.upgrade(&setup.beacon_admin, &shift, &None);

    assert_eq!(
        setup.bounty.try_approve_applicant(&setup.founder, &applicant),
        Err(Ok(Error::InvalidTransition))
    );
    assert_eq!(setup.bounty.founder_deposit(), FOUNDER_DEPOSIT);
    assert_eq!(setup.bounty.applicant(&applicant).unwrap().deposit, MIN_STAKE);

    setup.beacon.upgrade(&setup.beacon_admin, &setup.logic_v1, &None);
    setup.bounty.release(&setup.founder);
    assert_eq!(setup.token.balance(&setup.founder), FOUNDER_DEPOSIT);
    assert_eq!(setup.bounty.vault_balance(), MIN_STAKE);
}

#[test]
fn test_approval_by_non_founder_rejected() {
    let setup = BountySetup::new();
    let applicant = setup.funded(MIN_STAKE);
    setup.bounty.apply_for(&applicant, &MIN_STAKE);

    let old = setup.bounty.state();
    let mut state = old.clone();
    let mut record = state.applicants.get(applicant.clone()).unwrap();
    record.approved = true;
    state.applicants.set(applicant.clone(), record);
    let outcome = Outcome::quiet(&setup.env, state);

    let ctx = CallContext {
        caller: applicant.clone(),
        now: crate::test::NOW,
    };
    assert_eq!(
        crate::invariants::check_transition(&setup.env, &old, &ctx, &outcome),
        Err(Error::InvalidTransition)
    );

    let founder_ctx = CallContext {
        caller: setup.founder.clone(),
        now: crate::test::NOW,
    };
    assert_eq!(
        crate::invariants::check_transition(&setup.env, &old, &founder_ctx, &outcome),
        Ok(())
    );
}
