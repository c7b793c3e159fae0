//! Operation counters for the factory, published as `("metric", "op")`
//! records and readable on-chain.
//!
//! Only successful operations are counted: a failed call rolls back its
//! storage writes along with everything else.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

#[contracttype]
#[derive(Clone)]
enum MetricKey {
    OperationCount,
    LastOperation,
    BountiesCreated,
    UniqueFounders,
    Founder(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationMetric {
    pub operation: Symbol,
    pub caller: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub last_operation: u64,
    pub total_operations: u64,
    pub contract_version: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Analytics {
    pub operation_count: u64,
    pub bounties_created: u64,
    pub unique_founders: u64,
}

fn read(env: &Env, key: &MetricKey) -> u64 {
    env.storage().persistent().get(key).unwrap_or(0)
}

fn bump(env: &Env, key: &MetricKey) {
    let next = read(env, key).saturating_add(1);
    env.storage().persistent().set(key, &next);
}

pub fn track_operation(env: &Env, operation: Symbol, caller: Address) {
    bump(env, &MetricKey::OperationCount);
    let now = env.ledger().timestamp();
    env.storage()
        .persistent()
        .set(&MetricKey::LastOperation, &now);

    env.events().publish(
        (symbol_short!("metric"), symbol_short!("op")),
        OperationMetric {
            operation,
            caller,
            timestamp: now,
        },
    );
}

/// Counts one created bounty and, the first time `founder` is seen, one
/// new founder.
pub fn track_creation(env: &Env, founder: &Address) {
    bump(env, &MetricKey::BountiesCreated);
    let key = MetricKey::Founder(founder.clone());
    if !env.storage().persistent().has(&key) {
        env.storage().persistent().set(&key, &true);
        bump(env, &MetricKey::UniqueFounders);
    }
    track_operation(env, symbol_short!("create"), founder.clone());
}

pub fn health_check(env: &Env, contract_version: u32) -> HealthStatus {
    HealthStatus {
        is_healthy: true,
        last_operation: read(env, &MetricKey::LastOperation),
        total_operations: read(env, &MetricKey::OperationCount),
        contract_version,
    }
}

pub fn get_analytics(env: &Env) -> Analytics {
    Analytics {
        operation_count: read(env, &MetricKey::OperationCount),
        bounties_created: read(env, &MetricKey::BountiesCreated),
        unique_founders: read(env, &MetricKey::UniqueFounders),
    }
}
