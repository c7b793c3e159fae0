//! # Escrow Shared Schema
//!
//! Types and call interfaces shared by every contract of the bounty escrow
//! platform. Nothing in this crate is a contract; it is the fixed contract
//! between the instance storage (`bounty`), the replaceable logic modules
//! (`bounty-logic` and its successors), and the registries around them.
//!
//! ## Layout compatibility
//!
//! `BountyState` and everything reachable from it is persisted by every
//! escrow instance and handed to whichever logic module the beacon names.
//! Successive logic versions may only evolve it additively:
//!
//! - never reorder, rename or retype an existing field;
//! - new scalar fields go into `BountyState::ext` under a new symbol;
//! - new error codes are appended to [`Error`].

#![no_std]

pub mod asset;
mod error;
pub mod events;
mod interfaces;
mod types;

pub use error::Error;
pub use events::{ApplyRecord, ApproveRecord, BountyEvent, DepositRecord, ExtensionRecord, ReleaseRecord};
pub use interfaces::{
    BeaconClient, BeaconInterface, BountyInitClient, BountyInitInterface, BountyLogicClient,
    BountyLogicInterface, FactoryStoreClient, FactoryStoreInterface, InstanceDeployerClient,
    InstanceDeployerInterface, VaultClient, VaultInterface,
};
pub use types::{
    ApplicantRecord, BountyState, BountyStatus, CallContext, DepositAsset, InstancePair, Outcome,
    Parameters, Payout, Role,
};
