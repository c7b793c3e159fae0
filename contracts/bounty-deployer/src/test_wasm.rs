//! Deployment from uploaded Wasm. Build the contracts first:
//!
//! ```text
//! cargo build --target wasm32-unknown-unknown --release
//! cargo test -p bounty-deployer --features wasm-tests
//! ```

use super::*;
use escrow_shared::VaultClient;
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env};

const BOUNTY_WASM: &[u8] =
    include_bytes!("../../../target/wasm32-unknown-unknown/release/bounty.wasm");
const VAULT_WASM: &[u8] =
    include_bytes!("../../../target/wasm32-unknown-unknown/release/vault.wasm");

struct WasmSetup<'a> {
    env: Env,
    factory: Address,
    deployer: BountyDeployerContractClient<'a>,
}

impl<'a> WasmSetup<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let bounty_wasm = env.deployer().upload_contract_wasm(BOUNTY_WASM);
        let vault_wasm = env.deployer().upload_contract_wasm(VAULT_WASM);

        let admin = Address::generate(&env);
        let factory = Address::generate(&env);
        let deployer_id = env.register_contract(None, BountyDeployerContract);
        let deployer = BountyDeployerContractClient::new(&env, &deployer_id);
        deployer.init(&admin, &factory, &bounty_wasm, &vault_wasm);

        Self {
            env,
            factory,
            deployer,
        }
    }

    fn salt(&self, nonce: u8) -> BytesN<32> {
        let mut raw = [0u8; 32];
        raw[31] = nonce;
        BytesN::from_array(&self.env, &raw)
    }
}

#[test]
fn test_deploy_instance_lands_at_tagged_addresses() {
    let setup = WasmSetup::new();
    let salt = setup.salt(1);

    let pair = setup.deployer.deploy_instance(&setup.factory, &salt);
    assert_ne!(pair.bounty, pair.vault);

    let expected_bounty = setup
        .env
        .deployer()
        .with_address(setup.deployer.address.clone(), tagged(&setup.env, &salt, BOUNTY_TAG))
        .deployed_address();
    let expected_vault = setup
        .env
        .deployer()
        .with_address(setup.deployer.address.clone(), tagged(&setup.env, &salt, VAULT_TAG))
        .deployed_address();
    assert_eq!(pair.bounty, expected_bounty);
    assert_eq!(pair.vault, expected_vault);

    let next = setup.deployer.deploy_instance(&setup.factory, &setup.salt(2));
    assert_ne!(next.bounty, pair.bounty);
    assert_ne!(next.vault, pair.vault);
}

#[test]
fn test_deployed_vault_is_uninitialized() {
    let setup = WasmSetup::new();
    let pair = setup.deployer.deploy_instance(&setup.factory, &setup.salt(1));
    let token = setup
        .env
        .register_stellar_asset_contract_v2(Address::generate(&setup.env))
        .address();

    let vault = VaultClient::new(&setup.env, &pair.vault);
    assert_eq!(vault.try_owner(), Err(Ok(Error::NotInitialized)));

    vault.init(&pair.bounty, &token);
    assert_eq!(vault.owner(), pair.bounty);
    assert_eq!(vault.token(), token);
    assert_eq!(vault.balance(), 0);
}

#[test]
fn test_same_salt_cannot_deploy_twice() {
    let setup = WasmSetup::new();
    let salt = setup.salt(7);
    setup.deployer.deploy_instance(&setup.factory, &salt);

    assert!(setup
        .deployer
        .try_deploy_instance(&setup.factory, &salt)
        .is_err());
}
