//! Records produced by logic modules and published by the escrow instance.

use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRecord {
    pub founder: Address,
    pub amount_added: i128,
    pub new_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApplyRecord {
    pub applicant: Address,
    pub amount_added: i128,
    pub applicant_total: i128,
    /// Sum of every applicant's tracked deposit after this application
    pub vault_applicant_total: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApproveRecord {
    pub approver: Address,
    pub applicant: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReleaseRecord {
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionRecord {
    pub caller: Address,
    pub function: Symbol,
    pub value: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BountyEvent {
    Deposit(DepositRecord),
    Apply(ApplyRecord),
    Approve(ApproveRecord),
    Release(ReleaseRecord),
    Extension(ExtensionRecord),
}
