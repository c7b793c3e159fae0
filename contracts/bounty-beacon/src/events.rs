use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Upgraded {
    pub previous: Address,
    pub implementation: Address,
    pub version: u32,
    pub timestamp: u64,
}

pub fn emit_upgraded(env: &Env, event: Upgraded) {
    let topics = (symbol_short!("upgraded"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferred {
    pub previous: Address,
    pub admin: Address,
}

pub fn emit_admin_transferred(env: &Env, event: AdminTransferred) {
    let topics = (symbol_short!("admin"),);
    env.events().publish(topics, event);
}
