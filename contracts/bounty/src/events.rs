use escrow_shared::{BountyEvent, Parameters};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyInitialized {
    pub factory: Address,
    pub founder: Address,
    pub vault: Address,
    pub parameters: Parameters,
}

pub fn emit_bounty_initialized(env: &Env, event: BountyInitialized) {
    let topics = (symbol_short!("init"), event.founder.clone());
    env.events().publish(topics, event);
}

/// Publishes the records returned by the logic module from the instance's
/// own address.
pub fn publish_all(env: &Env, records: &Vec<BountyEvent>) {
    for record in records.iter() {
        match record {
            BountyEvent::Deposit(r) => {
                env.events()
                    .publish((symbol_short!("deposit"), r.founder.clone()), r);
            }
            BountyEvent::Apply(r) => {
                env.events()
                    .publish((symbol_short!("apply"), r.applicant.clone()), r);
            }
            BountyEvent::Approve(r) => {
                env.events()
                    .publish((symbol_short!("approve"), r.applicant.clone()), r);
            }
            BountyEvent::Release(r) => {
                env.events()
                    .publish((symbol_short!("release"), r.to.clone()), r);
            }
            BountyEvent::Extension(r) => {
                env.events()
                    .publish((symbol_short!("ext"), r.function.clone()), r);
            }
        }
    }
}
