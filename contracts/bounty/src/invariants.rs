//! Custody rules enforced by the instance on every outcome, whatever logic
//! version produced it.
//!
//! Balances are checked per identity, not just in aggregate: a logic
//! version may never move tracked value from one identity to another. For
//! every identity the change in its tracked balance plus whatever it was
//! paid must equal what it put in during this call, and only the caller
//! puts anything in.

use escrow_shared::{BountyState, CallContext, Error, Outcome};
use soroban_sdk::{Address, Env, Map};

fn paid_to(outcome: &Outcome, who: &Address) -> Option<i128> {
    let mut total: i128 = 0;
    for payout in outcome.payouts.iter() {
        if payout.to == *who {
            total = total.checked_add(payout.amount)?;
        }
    }
    Some(total)
}

/// Balance held in the vault on behalf of `who`.
fn tracked_of(state: &BountyState, who: &Address) -> i128 {
    if *who == state.founder {
        return state.founder_deposit;
    }
    state
        .applicants
        .get(who.clone())
        .map(|record| record.deposit)
        .unwrap_or(0)
}

fn may_receive(state: &BountyState, who: &Address) -> bool {
    if *who == state.founder {
        return true;
    }
    state
        .applicants
        .get(who.clone())
        .map(|record| record.approved)
        .unwrap_or(false)
}

/// Applicant records may only be added; approval may only be granted by the
/// founder and never withdrawn.
fn check_records(old: &BountyState, new: &BountyState, ctx: &CallContext) -> Result<(), Error> {
    if new.applicants.contains_key(new.founder.clone()) {
        return Err(Error::InvalidTransition);
    }
    for (identity, record) in new.applicants.iter() {
        if record.applicant != identity || record.deposit < 0 {
            return Err(Error::InvalidTransition);
        }
    }
    for (identity, before) in old.applicants.iter() {
        let after = new
            .applicants
            .get(identity)
            .ok_or(Error::InvalidTransition)?;
        if before.approved && !after.approved {
            return Err(Error::InvalidTransition);
        }
        if !before.approved && after.approved && ctx.caller != old.founder {
            return Err(Error::InvalidTransition);
        }
    }
    for (identity, record) in new.applicants.iter() {
        if !old.applicants.contains_key(identity) && record.approved {
            return Err(Error::InvalidTransition);
        }
    }
    Ok(())
}

/// Validates `outcome` against the state it was computed from.
///
/// # Errors
/// `InvalidTransition` when any custody rule is broken.
pub(crate) fn check_transition(
    env: &Env,
    old: &BountyState,
    ctx: &CallContext,
    outcome: &Outcome,
) -> Result<(), Error> {
    let new = &outcome.state;

    if new.parameters != old.parameters || new.founder != old.founder {
        return Err(Error::InvalidTransition);
    }
    if old.is_finalized() && !new.is_finalized() {
        return Err(Error::InvalidTransition);
    }
    if new.founder_deposit < 0 || new.applicant_total < 0 || outcome.inflow < 0 {
        return Err(Error::InvalidTransition);
    }
    if new.recorded_applicant_total() != Some(new.applicant_total) {
        return Err(Error::InvalidTransition);
    }
    new.tracked_total().ok_or(Error::InvalidTransition)?;
    check_records(old, new, ctx)?;

    for payout in outcome.payouts.iter() {
        if payout.amount <= 0 || !may_receive(new, &payout.to) {
            return Err(Error::InvalidTransition);
        }
    }

    let mut identities: Map<Address, bool> = Map::new(env);
    identities.set(old.founder.clone(), true);
    identities.set(ctx.caller.clone(), true);
    for identity in old.applicants.keys().iter() {
        identities.set(identity, true);
    }
    for identity in new.applicants.keys().iter() {
        identities.set(identity, true);
    }

    for identity in identities.keys().iter() {
        let delta = tracked_of(new, &identity)
            .checked_sub(tracked_of(old, &identity))
            .ok_or(Error::InvalidTransition)?;
        let paid = paid_to(outcome, &identity).ok_or(Error::InvalidTransition)?;
        let put_in = if identity == ctx.caller {
            outcome.inflow
        } else {
            0
        };
        if delta.checked_add(paid) != Some(put_in) {
            return Err(Error::InvalidTransition);
        }
    }
    Ok(())
}

/// Tracked balances must always be covered by what the vault actually holds.
pub(crate) fn assert_covered(state: &BountyState, vault_balance: i128) {
    let tracked = match state.tracked_total() {
        Some(total) => total,
        None => panic!("Invariant violated: tracked total overflow"),
    };
    if tracked > vault_balance {
        panic!("Invariant violated: tracked balances exceed vault balance");
    }
}
