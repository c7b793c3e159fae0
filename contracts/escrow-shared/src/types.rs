use soroban_sdk::{contracttype, Address, Env, Map, Symbol, Vec};

use crate::events::BountyEvent;

/// Asset a bounty is denominated in, as requested at creation time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DepositAsset {
    /// The network's native unit (held through its Stellar Asset Contract)
    Native,
    /// Any SEP-41 token contract
    Token(Address),
}

/// Creation parameters. Written once by `init`, never modified afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parameters {
    /// Token contract the vault holds; for native bounties this is the
    /// native asset contract.
    pub deposit_token: Address,
    pub deposit_token_is_native: bool,
    pub founder_deposit_amount: i128,
    pub applicant_deposit_min_amount: i128,
    /// Last ledger timestamp (inclusive) at which `apply_for` is accepted
    pub apply_deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplicantRecord {
    pub applicant: Address,
    pub deposit: i128,
    pub approved: bool,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BountyStatus {
    Active,
    Finalized,
}

/// Relationship of an identity to one bounty (`whoAmI` lookup).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Founder,
    Applicant,
    ApprovedApplicant,
    Stranger,
}

/// Complete persistent state of one escrow instance.
///
/// Owned by the instance, interpreted by the current logic module.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyState {
    pub parameters: Parameters,
    pub founder: Address,
    /// Founder's tracked, not yet released deposit
    pub founder_deposit: i128,
    pub applicants: Map<Address, ApplicantRecord>,
    /// Sum of all applicant deposits still tracked by the vault
    pub applicant_total: i128,
    pub status: BountyStatus,
    /// Additive storage for fields introduced by later logic versions
    pub ext: Map<Symbol, i128>,
}

impl BountyState {
    pub fn new(env: &Env, founder: Address, parameters: Parameters, founder_deposit: i128) -> Self {
        Self {
            parameters,
            founder,
            founder_deposit,
            applicants: Map::new(env),
            applicant_total: 0,
            status: BountyStatus::Active,
            ext: Map::new(env),
        }
    }

    pub fn role_of(&self, identity: &Address) -> Role {
        if *identity == self.founder {
            return Role::Founder;
        }
        match self.applicants.get(identity.clone()) {
            Some(record) if record.approved => Role::ApprovedApplicant,
            Some(_) => Role::Applicant,
            None => Role::Stranger,
        }
    }

    /// Founder deposit plus applicant deposits; `None` on overflow.
    pub fn tracked_total(&self) -> Option<i128> {
        self.founder_deposit.checked_add(self.applicant_total)
    }

    /// Sum of the individual applicant records; `None` on overflow.
    pub fn recorded_applicant_total(&self) -> Option<i128> {
        let mut total: i128 = 0;
        for (_, record) in self.applicants.iter() {
            total = total.checked_add(record.deposit)?;
        }
        Some(total)
    }

    pub fn is_finalized(&self) -> bool {
        self.status == BountyStatus::Finalized
    }
}

/// Who is calling and when, as observed by the instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CallContext {
    pub caller: Address,
    pub now: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub to: Address,
    pub amount: i128,
}

/// Result of one logic invocation.
///
/// The instance commits `state`, pulls `inflow` from the caller into the
/// vault, pays every entry of `payouts` out of the vault and publishes
/// `events`. `value` is the return value of extension operations.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub state: BountyState,
    pub inflow: i128,
    pub payouts: Vec<Payout>,
    pub events: Vec<BountyEvent>,
    pub value: i128,
}

impl Outcome {
    /// An outcome that moves no funds and publishes nothing.
    pub fn quiet(env: &Env, state: BountyState) -> Self {
        Self {
            state,
            inflow: 0,
            payouts: Vec::new(env),
            events: Vec::new(env),
            value: 0,
        }
    }

    pub fn total_payouts(&self) -> Option<i128> {
        let mut total: i128 = 0;
        for payout in self.payouts.iter() {
            total = total.checked_add(payout.amount)?;
        }
        Some(total)
    }
}

/// Addresses of a freshly deployed escrow instance and its vault.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstancePair {
    pub bounty: Address,
    pub vault: Address,
}
