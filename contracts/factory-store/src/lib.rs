//! # Factory Store
//!
//! Append-only registry of every escrow instance the factory has created.
//! The store is a separate contract so the factory's code can be replaced
//! without moving or re-indexing the list.
//!
//! Children are kept in persistent buckets of [`PAGE_SIZE`] addresses, so a
//! listing reads one storage entry per bucket it overlaps. A membership flag
//! per address keeps `contains` to a single lookup. Callers with large
//! registries should walk them with `children_page`. Only the owner (the
//! factory) may append; reads are open.

#![no_std]

use escrow_shared::{Error, FactoryStoreInterface};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Vec};

const ENTRY_TTL: u32 = 17280;

/// Children per storage bucket.
pub const PAGE_SIZE: u32 = 64;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Owner,
    Count,
    /// bucket number -> up to `PAGE_SIZE` children, in creation order
    Page(u32),
    /// child address -> present
    Known(Address),
}

#[contract]
pub struct FactoryStoreContract;

fn count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Count).unwrap_or(0)
}

fn bucket(env: &Env, page: u32) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Page(page))
        .unwrap_or(Vec::new(env))
}

#[contractimpl]
impl FactoryStoreInterface for FactoryStoreContract {
    fn init(env: Env, owner: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Count, &0u32);
        Ok(())
    }

    /// Appends `child` and returns its index.
    ///
    /// # Errors
    /// * `NotOwner` - caller is not the registered owner
    fn push(env: Env, caller: Address, child: Address) -> Result<u32, Error> {
        caller.require_auth();
        let owner: Address = env
            .storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)?;
        if caller != owner {
            return Err(Error::NotOwner);
        }

        let index = count(&env);
        let page = index / PAGE_SIZE;
        let mut children = bucket(&env, page);
        children.push_back(child.clone());

        let page_key = DataKey::Page(page);
        let known_key = DataKey::Known(child.clone());
        env.storage().persistent().set(&page_key, &children);
        env.storage().persistent().set(&known_key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&page_key, ENTRY_TTL, ENTRY_TTL);
        env.storage()
            .persistent()
            .extend_ttl(&known_key, ENTRY_TTL, ENTRY_TTL);
        env.storage().instance().set(&DataKey::Count, &(index + 1));

        env.events().publish((symbol_short!("push"), owner), (index, child));
        Ok(index)
    }

    /// All children in creation order.
    fn children(env: Env) -> Vec<Address> {
        Self::children_page(env.clone(), 0, count(&env))
    }

    fn len(env: Env) -> u32 {
        count(&env)
    }

    fn contains(env: Env, child: Address) -> bool {
        env.storage().persistent().has(&DataKey::Known(child))
    }
}

#[contractimpl]
impl FactoryStoreContract {
    /// Children at indices `start..start + limit`, clipped to the list.
    /// Only the buckets overlapping the range are read.
    pub fn children_page(env: Env, start: u32, limit: u32) -> Vec<Address> {
        let mut out = Vec::new(&env);
        let end = start.saturating_add(limit).min(count(&env));
        if start >= end {
            return out;
        }

        for page in (start / PAGE_SIZE)..=((end - 1) / PAGE_SIZE) {
            let first = page * PAGE_SIZE;
            let children = bucket(&env, page);
            let from = start.max(first) - first;
            let to = (end - first).min(children.len());
            for offset in from..to {
                if let Some(child) = children.get(offset) {
                    out.push_back(child);
                }
            }
        }
        out
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }
}
