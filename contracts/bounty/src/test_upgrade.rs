//! Behavior upgrades through the beacon reach every existing instance.

use crate::test::{BountySetup, FOUNDER_DEPOSIT, MIN_STAKE};
use crate::{BountyContract, BountyContractClient};
use bounty_logic::machine;
use escrow_shared::{
    events::ExtensionRecord, BountyEvent, BountyLogicInterface, BountyState, CallContext, Error,
    Outcome,
};
use soroban_sdk::{
    contract, contractimpl, testutils::Address as _, vec, Address, Env, Symbol, Vec,
};
use vault::{VaultContract, VaultContractClient};

/// Second logic generation: v1 rules plus a stored marker.
#[contract]
pub struct BountyLogicV2;

fn marker(env: &Env) -> Symbol {
    Symbol::new(env, "upgraded")
}

#[contractimpl]
impl BountyLogicInterface for BountyLogicV2 {
    fn version(_env: Env) -> u32 {
        2
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
        env: Env,
        state: BountyState,
        ctx: CallContext,
        function: Symbol,
        args: Vec<i128>,
    ) -> Result<Outcome, Error> {
        let mut state = state;
        if function == Symbol::new(&env, "set_upgrade") {
            let value = args.get(0).ok_or(Error::InvalidAmount)?;
            state.ext.set(marker(&env), value);
            let mut outcome = Outcome::quiet(&env, state);
            outcome.value = value;
            outcome.events.push_back(BountyEvent::Extension(ExtensionRecord {
                caller: ctx.caller,
                function,
                value,
            }));
            return Ok(outcome);
        }
        if function == Symbol::new(&env, "is_upgraded") {
            let value = state.ext.get(marker(&env)).unwrap_or(0);
            let mut outcome = Outcome::quiet(&env, state);
            outcome.value = value;
            return Ok(outcome);
        }
        Err(Error::UnsupportedOperation)
    }
}

fn second_instance<'a>(setup: &BountySetup<'a>) -> BountyContractClient<'a> {
    let vault_id = setup.env.register_contract(None, VaultContract);
    let vault = VaultContractClient::new(&setup.env, &vault_id);
    let bounty_id = setup.env.register_contract(None, BountyContract);
    let bounty = BountyContractClient::new(&setup.env, &bounty_id);
    setup.open(&bounty, &vault);
    bounty
}

#[test]
fn test_upgrade_reaches_existing_instances() {
    let setup = BountySetup::new();
    let env = &setup.env;
    let first = &setup.bounty;
    let second = second_instance(&setup);
    let set_upgrade = Symbol::new(env, "set_upgrade");
    let is_upgraded = Symbol::new(env, "is_upgraded");

    assert_eq!(
        first.try_call_ext(&setup.founder, &is_upgraded, &Vec::new(env)),
        Err(Ok(Error::UnsupportedOperation))
    );

    let logic_v2 = env.register_contract(None, BountyLogicV2);
    setup.beacon.upgrade(&setup.beacon_admin, &logic_v2, &None);
    assert_eq!(setup.beacon.version(), 2);
    assert_eq!(first.logic(), logic_v2);
    assert_eq!(second.logic(), logic_v2);

    first.call_ext(&setup.founder, &set_upgrade, &vec![env, 100_i128]);
    second.call_ext(&setup.founder, &set_upgrade, &vec![env, 1_000_i128]);

    assert_eq!(first.call_ext(&setup.founder, &is_upgraded, &Vec::new(env)), 100);
    assert_eq!(second.call_ext(&setup.founder, &is_upgraded, &Vec::new(env)), 1_000);
}

#[test]
fn test_state_survives_upgrade() {
    let setup = BountySetup::new();
    let applicant = setup.funded(MIN_STAKE);
    setup.bounty.apply_for(&applicant, &MIN_STAKE);

    let logic_v2 = setup.env.register_contract(None, BountyLogicV2);
    setup.beacon.upgrade(&setup.beacon_admin, &logic_v2, &None);

    assert_eq!(setup.bounty.founder_deposit(), FOUNDER_DEPOSIT);
    assert_eq!(setup.bounty.applicant(&applicant).unwrap().deposit, MIN_STAKE);

    setup.bounty.approve_applicant(&setup.founder, &applicant);
    setup.bounty.release(&setup.founder);
    assert_eq!(setup.token.balance(&applicant), MIN_STAKE);
    assert_eq!(setup.bounty.vault_balance(), 0);
}

#[test]
fn test_non_admin_cannot_upgrade_behavior() {
    let setup = BountySetup::new();
    let logic_v2 = setup.env.register_contract(None, BountyLogicV2);
    let outsider = Address::generate(&setup.env);

    assert_eq!(
        setup.beacon.try_upgrade(&outsider, &logic_v2, &None),
        Err(Ok(Error::Unauthorized))
    );
    assert_eq!(setup.bounty.logic(), setup.logic_v1);
}

#[test]
fn test_rollback_restores_previous_behavior() {
    let setup = BountySetup::new();
    let env = &setup.env;
    let logic_v2 = env.register_contract(None, BountyLogicV2);
    setup.beacon.upgrade(&setup.beacon_admin, &logic_v2, &None);
    setup.bounty.call_ext(
        &setup.founder,
        &Symbol::new(env, "set_upgrade"),
        &vec![env, 7_i128],
    );

    let previous = setup.beacon.previous_implementation().unwrap();
    setup.beacon.upgrade(&setup.beacon_admin, &previous, &None);

    assert_eq!(setup.bounty.logic(), setup.logic_v1);
    assert_eq!(
        setup.bounty.try_call_ext(
            &setup.founder,
            &Symbol::new(env, "is_upgraded"),
            &Vec::new(env)
        ),
        Err(Ok(Error::UnsupportedOperation))
    );
    // ext data written by v2 is kept for a later re-upgrade
    assert_eq!(setup.bounty.state().ext.get(Symbol::new(env, "upgraded")), Some(7));
}
