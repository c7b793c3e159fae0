//! # Vault
//!
//! Custody unit for a single escrow instance. The vault holds the instance's
//! funds in one token (the native asset contract or a SEP-41 token) and moves
//! them only when its owner, the escrow instance, authorizes the call.
//!
//! Keeping custody in a separate contract means the escrow logic can be
//! replaced through the beacon without ever shipping code that embeds
//! balances. The vault keeps no bookkeeping of its own: its balance is the
//! token balance held at its address.

#![no_std]

use escrow_shared::{Error, VaultInterface};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Owner,
    Token,
}

#[contract]
pub struct VaultContract;

fn owner_of(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

fn token_of(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

fn check_amount(amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::ZeroAmount);
    }
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

#[contractimpl]
impl VaultInterface for VaultContract {
    /// Binds the vault to its owning instance and token. Called once by the
    /// factory in the same transaction that deploys the pair.
    fn init(env: Env, owner: Address, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Token, &token);
        Ok(())
    }

    fn deposit(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        let owner = owner_of(&env)?;
        owner.require_auth();
        check_amount(amount)?;

        let client = token::Client::new(&env, &token_of(&env)?);
        client.transfer(&from, &env.current_contract_address(), &amount);

        env.events()
            .publish((symbol_short!("v_in"), owner), (from, amount));
        Ok(())
    }

    fn withdraw(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        let owner = owner_of(&env)?;
        owner.require_auth();
        check_amount(amount)?;

        let client = token::Client::new(&env, &token_of(&env)?);
        if client.balance(&env.current_contract_address()) < amount {
            return Err(Error::InsufficientFunds);
        }
        client.transfer(&env.current_contract_address(), &to, &amount);

        env.events()
            .publish((symbol_short!("v_out"), owner), (to, amount));
        Ok(())
    }

    fn balance(env: Env) -> Result<i128, Error> {
        let client = token::Client::new(&env, &token_of(&env)?);
        Ok(client.balance(&env.current_contract_address()))
    }

    fn owner(env: Env) -> Result<Address, Error> {
        owner_of(&env)
    }

    fn token(env: Env) -> Result<Address, Error> {
        token_of(&env)
    }
}
