//! Pure state transitions of the v1 escrow state machine.
//!
//! Every function takes the instance state by value and returns the
//! `Outcome` to commit. Nothing here touches storage or moves funds; the
//! calling instance does both after validating the outcome.

use escrow_shared::{
    events::{ApplyRecord, ApproveRecord, DepositRecord, ReleaseRecord},
    ApplicantRecord, BountyEvent, BountyState, BountyStatus, CallContext, Error, Outcome, Payout,
};
use soroban_sdk::{Address, Env};

fn ensure_active(state: &BountyState) -> Result<(), Error> {
    if state.is_finalized() {
        return Err(Error::AlreadyFinalized);
    }
    Ok(())
}

fn ensure_founder(state: &BountyState, ctx: &CallContext) -> Result<(), Error> {
    if ctx.caller != state.founder {
        return Err(Error::NotFounder);
    }
    Ok(())
}

fn ensure_tracked_total(state: &BountyState) -> Result<(), Error> {
    state.tracked_total().ok_or(Error::InvalidAmount)?;
    Ok(())
}

/// Founder tops up their own deposit.
///
/// # Errors
/// `AlreadyFinalized`, `NotFounder`, `ZeroAmount`, `InvalidAmount`
pub fn deposit(
    env: &Env,
    mut state: BountyState,
    ctx: &CallContext,
    amount: i128,
) -> Result<Outcome, Error> {
    ensure_active(&state)?;
    ensure_founder(&state, ctx)?;
    if amount == 0 {
        return Err(Error::ZeroAmount);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }

    state.founder_deposit = state
        .founder_deposit
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    ensure_tracked_total(&state)?;

    let record = DepositRecord {
        founder: ctx.caller.clone(),
        amount_added: amount,
        new_total: state.founder_deposit,
    };
    let mut outcome = Outcome::quiet(env, state);
    outcome.inflow = amount;
    outcome.events.push_back(BountyEvent::Deposit(record));
    Ok(outcome)
}

/// Any identity other than the founder stakes `amount` while the
/// application window is open. Repeated applications accumulate, and the
/// applicant minimum is checked against the running total rather than each
/// top-up.
///
/// # Errors
/// `AlreadyFinalized`, `Unauthorized` (founder), `DeadlinePassed`,
/// `InvalidAmount`, `AlreadyApproved`, `BelowMinimum`, `ZeroAmount`
pub fn apply_for(
    env: &Env,
    mut state: BountyState,
    ctx: &CallContext,
    amount: i128,
) -> Result<Outcome, Error> {
    ensure_active(&state)?;
    if ctx.caller == state.founder {
        return Err(Error::Unauthorized);
    }
    if ctx.now > state.parameters.apply_deadline {
        return Err(Error::DeadlinePassed);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }

    let applicant = ctx.caller.clone();
    let mut record = state
        .applicants
        .get(applicant.clone())
        .unwrap_or(ApplicantRecord {
            applicant: applicant.clone(),
            deposit: 0,
            approved: false,
        });
    if record.approved {
        return Err(Error::AlreadyApproved);
    }

    // The minimum applies to the identity's accumulated stake.
    let staked = record
        .deposit
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    if staked < state.parameters.applicant_deposit_min_amount {
        return Err(Error::BelowMinimum);
    }
    if amount == 0 {
        return Err(Error::ZeroAmount);
    }

    record.deposit = staked;
    state.applicant_total = state
        .applicant_total
        .checked_add(amount)
        .ok_or(Error::InvalidAmount)?;
    ensure_tracked_total(&state)?;
    state.applicants.set(applicant.clone(), record.clone());

    let event = ApplyRecord {
        applicant,
        amount_added: amount,
        applicant_total: record.deposit,
        vault_applicant_total: state.applicant_total,
    };
    let mut outcome = Outcome::quiet(env, state);
    outcome.inflow = amount;
    outcome.events.push_back(BountyEvent::Apply(event));
    Ok(outcome)
}

/// Founder approves an applicant. Approving twice is a no-op and publishes
/// nothing. Allowed after finalization so a stake can always be unlocked.
///
/// # Errors
/// `NotFounder`, `NotAnApplicant`
pub fn approve_applicant(
    env: &Env,
    mut state: BountyState,
    ctx: &CallContext,
    applicant: Address,
) -> Result<Outcome, Error> {
    ensure_founder(&state, ctx)?;
    let mut record = state
        .applicants
        .get(applicant.clone())
        .ok_or(Error::NotAnApplicant)?;
    if record.approved {
        return Ok(Outcome::quiet(env, state));
    }

    record.approved = true;
    state.applicants.set(applicant.clone(), record);

    let event = ApproveRecord {
        approver: ctx.caller.clone(),
        applicant,
    };
    let mut outcome = Outcome::quiet(env, state);
    outcome.events.push_back(BountyEvent::Approve(event));
    Ok(outcome)
}

/// Founder closes the bounty: the founder's deposit goes back to the
/// founder, every approved applicant gets their own stake back, and the
/// instance becomes `Finalized`. Unapproved stakes stay in the vault.
///
/// # Errors
/// `NotFounder`, `AlreadyFinalized`
pub fn release(env: &Env, mut state: BountyState, ctx: &CallContext) -> Result<Outcome, Error> {
    ensure_founder(&state, ctx)?;
    ensure_active(&state)?;

    let mut outcome = Outcome::quiet(env, state.clone());

    if state.founder_deposit > 0 {
        let amount = state.founder_deposit;
        state.founder_deposit = 0;
        push_payout(&mut outcome, state.founder.clone(), amount);
    }

    let applicants = state.applicants.clone();
    for (identity, mut record) in applicants.iter() {
        if !record.approved || record.deposit == 0 {
            continue;
        }
        let amount = record.deposit;
        record.deposit = 0;
        state.applicant_total = state
            .applicant_total
            .checked_sub(amount)
            .ok_or(Error::InvalidAmount)?;
        state.applicants.set(identity.clone(), record);
        push_payout(&mut outcome, identity, amount);
    }

    state.status = BountyStatus::Finalized;
    outcome.state = state;
    Ok(outcome)
}

/// An approved applicant withdraws their own stake, before or after the
/// bounty is finalized.
///
/// # Errors
/// `NotAnApplicant`, `NotApproved`, `NothingToRelease`
pub fn release_my_deposit(
    env: &Env,
    mut state: BountyState,
    ctx: &CallContext,
) -> Result<Outcome, Error> {
    let applicant = ctx.caller.clone();
    let mut record = state
        .applicants
        .get(applicant.clone())
        .ok_or(Error::NotAnApplicant)?;
    if !record.approved {
        return Err(Error::NotApproved);
    }
    if record.deposit == 0 {
        return Err(Error::NothingToRelease);
    }

    let amount = record.deposit;
    record.deposit = 0;
    state.applicant_total = state
        .applicant_total
        .checked_sub(amount)
        .ok_or(Error::InvalidAmount)?;
    state.applicants.set(applicant.clone(), record);

    let mut outcome = Outcome::quiet(env, state);
    push_payout(&mut outcome, applicant, amount);
    Ok(outcome)
}

fn push_payout(outcome: &mut Outcome, to: Address, amount: i128) {
    outcome.payouts.push_back(Payout {
        to: to.clone(),
        amount,
    });
    outcome
        .events
        .push_back(BountyEvent::Release(ReleaseRecord { to, amount }));
}
