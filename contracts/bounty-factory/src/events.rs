use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountyCreated {
    pub founder: Address,
    pub bounty: Address,
    pub vault: Address,
    pub index: u32,
}

pub fn emit_bounty_created(env: &Env, event: BountyCreated) {
    let topics = (symbol_short!("created"), event.founder.clone());
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactoryUpgraded {
    pub wasm_hash: BytesN<32>,
    pub previous_version: u32,
    pub version: u32,
}

pub fn emit_factory_upgraded(env: &Env, event: FactoryUpgraded) {
    env.events().publish((symbol_short!("upgrade"),), event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub previous: Address,
    pub owner: Address,
}

pub fn emit_ownership_transferred(env: &Env, event: OwnershipTransferred) {
    env.events().publish((symbol_short!("owner"),), event);
}
