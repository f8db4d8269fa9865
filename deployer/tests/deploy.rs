mod fake_chain;

use std::path::PathBuf;

use bech32::{Bech32, Hrp};
use common::CodeIds;
use deployer::{
    secrets::{BENEFICIARY_ADDRESS, MNEMONIC},
    steps, DeployError, Secrets,
};
use fake_chain::{
    deployer_address, instantiate_requests, secrets, test_inputs, Call, FakeChain, DUEL_WASM,
    TEST_MNEMONIC, TOKEN_WASM,
};

#[tokio::test]
async fn deploys_token_then_duel_platform() {
    let chain = FakeChain::new();
    let inputs = test_inputs("end-to-end");

    let deployment = deployer::deploy(&chain, &inputs, &secrets()).await.unwrap();

    let token = &deployment.contracts.token;
    let duel = &deployment.contracts.duel;
    assert_eq!(token.contract_address, "archway1contract1");
    assert_eq!(duel.contract_address, "archway1contract2");
    assert_eq!(deployment.code_ids, CodeIds { token: 42, duel: 42 });

    let calls = chain.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(
        calls[0],
        Call::Connect {
            address: deployer_address()
        }
    );
    assert_eq!(calls[1], Call::Upload(TOKEN_WASM.to_vec()));
    assert!(matches!(&calls[2], Call::Instantiate(r) if r.label == "EDT_init"));
    assert_eq!(calls[3], Call::Upload(DUEL_WASM.to_vec()));
    assert!(matches!(&calls[4], Call::Instantiate(r) if r.label == "Enigma_init"));

    let requests = instantiate_requests(&calls);
    let duel_msg = &requests[1].msg;
    assert_eq!(duel_msg["enigma_token_duel"], token.contract_address.as_str());
    assert_eq!(duel_msg["admin"], deployer_address().as_str());
    assert_eq!(duel_msg["fee"], "100000000");
    assert_eq!(requests[1].memo, "Instantiating the enigma duel platform");
}

#[tokio::test]
async fn token_init_message_matches_inputs() {
    let chain = FakeChain::new();
    let inputs = test_inputs("token-msg");

    deployer::deploy(&chain, &inputs, &secrets()).await.unwrap();

    let requests = instantiate_requests(&chain.calls());
    let token = &requests[0];
    assert_eq!(token.code_id, 42);
    assert_eq!(token.memo, "Instantiating the EDT token");
    assert_eq!(token.funds, inputs.token.funds);
    assert_eq!(token.msg["symbol"], "EDT");
    assert_eq!(token.msg["decimals"], 9);
    assert_eq!(
        token.msg["initial_balances"][0]["address"],
        deployer_address().as_str()
    );
    assert_eq!(token.msg["mint"]["minter"], deployer_address().as_str());
}

#[tokio::test]
async fn each_contract_is_instantiated_from_its_own_code() {
    let chain = FakeChain::new().with_code_ids([Some(7), Some(8)]);
    let inputs = test_inputs("own-code");

    let deployment = deployer::deploy(&chain, &inputs, &secrets()).await.unwrap();

    assert_eq!(deployment.code_ids, CodeIds { token: 7, duel: 8 });

    let requests = instantiate_requests(&chain.calls());
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].code_id, 7);
    assert_eq!(requests[1].code_id, 8);
    assert_ne!(requests[0].msg, requests[1].msg);
}

#[tokio::test]
async fn zero_code_id_is_reported_as_failure() {
    let chain = FakeChain::new().with_code_ids([Some(0)]);
    let inputs = test_inputs("zero-code-id");

    let result = deployer::deploy(&chain, &inputs, &secrets()).await;

    assert!(matches!(result, Err(DeployError::Chain(_))));
    let calls = chain.calls();
    assert_eq!(calls.len(), 2);
    assert!(instantiate_requests(&calls).is_empty());
}

#[tokio::test]
async fn missing_code_id_is_reported_as_failure() {
    let chain = FakeChain::new().with_code_ids([None]);
    let inputs = test_inputs("missing-code-id");

    let result = deployer::deploy(&chain, &inputs, &secrets()).await;

    assert!(matches!(result, Err(DeployError::Chain(_))));
    assert!(instantiate_requests(&chain.calls()).is_empty());
}

#[tokio::test]
async fn failed_duel_upload_leaves_token_deployed() {
    let chain = FakeChain::new().with_code_ids([Some(7), Some(0)]);
    let inputs = test_inputs("duel-upload-fails");

    let result = deployer::deploy(&chain, &inputs, &secrets()).await;

    assert!(matches!(result, Err(DeployError::Chain(_))));
    let calls = chain.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3], Call::Upload(DUEL_WASM.to_vec()));

    let requests = instantiate_requests(&calls);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].code_id, 7);
}

#[tokio::test]
async fn unreachable_endpoint_stops_before_any_upload() {
    let chain = FakeChain::unreachable();
    let inputs = test_inputs("unreachable");

    let result = deployer::deploy(&chain, &inputs, &secrets()).await;

    assert!(matches!(result, Err(DeployError::Network(_))));
    assert_eq!(
        chain.calls(),
        vec![Call::Connect {
            address: deployer_address()
        }]
    );
}

#[tokio::test]
async fn missing_mnemonic_fails_before_connecting() {
    let chain = FakeChain::new();
    let inputs = test_inputs("no-mnemonic");

    let result = deployer::deploy(&chain, &inputs, &Secrets::default()).await;

    assert!(matches!(result, Err(DeployError::Credential(_))));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn malformed_mnemonic_fails_before_connecting() {
    let chain = FakeChain::new();
    let inputs = test_inputs("bad-mnemonic");
    let secrets = Secrets::from_vars([(MNEMONIC, "definitely not a seed phrase")]);

    let result = deployer::deploy(&chain, &inputs, &secrets).await;

    assert!(matches!(result, Err(DeployError::Credential(_))));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn missing_artifact_is_an_io_error() {
    let chain = FakeChain::new();
    let mut inputs = test_inputs("missing-artifact");
    inputs.token.artifact = PathBuf::from("does/not/exist/test_edt.wasm");

    let result = deployer::deploy(&chain, &inputs, &secrets()).await;

    assert!(matches!(result, Err(DeployError::Io { .. })));
    assert_eq!(chain.calls().len(), 1);
}

#[tokio::test]
async fn beneficiary_receives_initial_token_balance() {
    let beneficiary = bech32::encode::<Bech32>(Hrp::parse("archway").unwrap(), &[9u8; 20]).unwrap();
    let chain = FakeChain::new();
    let inputs = test_inputs("beneficiary");
    let secrets = Secrets::from_vars([
        (MNEMONIC, TEST_MNEMONIC.to_string()),
        (BENEFICIARY_ADDRESS, beneficiary.clone()),
    ]);

    deployer::deploy(&chain, &inputs, &secrets).await.unwrap();

    let requests = instantiate_requests(&chain.calls());
    assert_eq!(
        requests[0].msg["initial_balances"][0]["address"],
        beneficiary.as_str()
    );
    assert_eq!(requests[0].msg["mint"]["minter"], deployer_address().as_str());
}

#[tokio::test]
async fn invalid_beneficiary_fails_before_connecting() {
    let chain = FakeChain::new();
    let inputs = test_inputs("bad-beneficiary");
    let secrets = Secrets::from_vars([
        (MNEMONIC, TEST_MNEMONIC),
        (BENEFICIARY_ADDRESS, "cosmos1notarchway"),
    ]);

    let result = deployer::deploy(&chain, &inputs, &secrets).await;

    assert!(matches!(result, Err(DeployError::Config(_))));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn staged_steps_store_both_codes_before_instantiating() {
    let chain = FakeChain::new().with_code_ids([Some(11), Some(12)]);
    let inputs = test_inputs("staged");

    let signer = deployer::connect(&chain, &inputs.network, &secrets()).await.unwrap();
    let code_ids = steps::store_codes(&signer, &inputs).await.unwrap();
    let contracts = steps::instantiate_contracts(&signer, &inputs, code_ids, None)
        .await
        .unwrap();

    assert_eq!(code_ids, CodeIds { token: 11, duel: 12 });

    let calls = chain.calls();
    assert_eq!(calls[1], Call::Upload(TOKEN_WASM.to_vec()));
    assert_eq!(calls[2], Call::Upload(DUEL_WASM.to_vec()));

    let requests = instantiate_requests(&calls);
    assert_eq!(requests[0].code_id, 11);
    assert_eq!(requests[1].code_id, 12);
    assert_eq!(
        requests[1].msg["enigma_token_duel"],
        contracts.token.contract_address.as_str()
    );

    let outputs = contracts.outputs();
    assert_eq!(outputs.token, "archway1contract1");
    assert_eq!(outputs.duel, "archway1contract2");
}
