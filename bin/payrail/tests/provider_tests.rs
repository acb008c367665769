mod common;

use payrail_core::providers::retry::RetryPolicy;
use payrail_core::providers::xpress::XpressWallet;
use payrail_core::providers::WalletProvider;
use payrail_primitives::error::ProviderError;
use payrail_primitives::models::{
    CurrencyCode, KycStatus, NewProviderCustomer, ProviderTransferRequest, TransactionStatus,
    TransferDestination, WalletType,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_adapter(server: &MockServer, max_attempts: u32) -> XpressWallet {
    let config = common::test_config(&server.uri()).xpress_details;
    XpressWallet::new(reqwest::Client::new(), &config, RetryPolicy::new(max_attempts))
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({"email": "ops@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "refreshToken": "refresh_1",
            "expiresIn": 1500
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn authenticates_once_and_reuses_the_token() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("GET"))
        .and(path("/transfer/banks"))
        .and(header("X-Access-Token", "tok_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "banks": [
                {"name": "Guaranty Trust Bank", "sortCode": "000013"},
                {"name": "Access Bank", "sortCode": "000014"}
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);

    let first = adapter.list_banks().await.unwrap();
    let second = adapter.list_banks().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].bank_code, "000013");
    assert_eq!(second[1].name, "Access Bank");
}

#[tokio::test]
async fn rotated_tokens_from_response_headers_are_picked_up() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    // First call succeeds but rotates the token via the echoed header.
    Mock::given(method("GET"))
        .and(path("/wallet/w_1/balance"))
        .and(header("X-Access-Token", "tok_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Access-Token", "tok_2")
                .set_body_json(json!({
                    "wallet": {
                        "id": "w_1",
                        "customerId": "cus_1",
                        "availableBalance": 150.25,
                        "bookedBalance": 150.25
                    }
                })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wallet/w_1/balance"))
        .and(header("X-Access-Token", "tok_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wallet": {
                "id": "w_1",
                "customerId": "cus_1",
                "availableBalance": 140.0,
                "bookedBalance": 150.25
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);

    let first = adapter.get_balance("w_1").await.unwrap();
    assert_eq!(first.available, 15025);

    let second = adapter.get_balance("w_1").await.unwrap();
    assert_eq!(second.available, 14000);
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("GET"))
        .and(path("/transfer/banks"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "upstream down"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transfer/banks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "banks": [{"name": "Guaranty Trust Bank", "sortCode": "000013"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 2);
    let banks = adapter.list_banks().await.unwrap();
    assert_eq!(banks.len(), 1);
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("GET"))
        .and(path("/wallet/w_1/balance"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    let err = adapter.get_balance("w_1").await.unwrap_err();
    assert!(matches!(err, ProviderError::Authentication(msg) if msg == "invalid token"));
}

#[tokio::test]
async fn revoked_tokens_are_dropped_and_the_next_call_reauthenticates() {
    let server = MockServer::start().await;

    // First login issues tok_1; once the partner revokes it, the next
    // login hands out a working tok_2.
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_1",
            "refreshToken": "refresh_1",
            "expiresIn": 1500
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_2",
            "refreshToken": "refresh_2",
            "expiresIn": 1500
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transfer/banks"))
        .and(header("X-Access-Token", "tok_1"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "token revoked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/transfer/banks"))
        .and(header("X-Access-Token", "tok_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "banks": [{"name": "Guaranty Trust Bank", "sortCode": "000013"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);

    let err = adapter.list_banks().await.unwrap_err();
    assert!(matches!(err, ProviderError::Authentication(msg) if msg == "token revoked"));

    // The stale session must not be replayed.
    let banks = adapter.list_banks().await.unwrap();
    assert_eq!(banks[0].bank_code, "000013");
}

#[tokio::test]
async fn insufficient_funds_rejections_are_classified() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("POST"))
        .and(path("/transfer/bank/customer"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Insufficient wallet balance"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    let err = adapter
        .initiate_transfer(&ProviderTransferRequest {
            source_customer_id: "cus_1".into(),
            destination: TransferDestination::Bank {
                bank_code: "000013".into(),
                account_number: "0123456789".into(),
                account_name: "Ada Obi".into(),
            },
            amount: 10_000_000,
            reference: "pyr_overdrawn001".into(),
            narration: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::InsufficientFunds(_)));
}

#[tokio::test]
async fn bank_transfer_sends_partner_payload_and_maps_the_result() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("POST"))
        .and(path("/transfer/bank/customer"))
        .and(body_partial_json(json!({
            "customerId": "cus_1",
            "sortCode": "000013",
            "accountNumber": "0123456789",
            "amount": 500.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transaction": {
                "transactionId": "txn_9",
                "reference": "pyr_rent00000001",
                "amount": 500.0,
                "charges": 10.0,
                "responseCode": "00"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    let txn = adapter
        .initiate_transfer(&ProviderTransferRequest {
            source_customer_id: "cus_1".into(),
            destination: TransferDestination::Bank {
                bank_code: "000013".into(),
                account_number: "0123456789".into(),
                account_name: "Ada Obi".into(),
            },
            amount: 50_000,
            reference: "pyr_rent00000001".into(),
            narration: Some("rent".into()),
        })
        .await
        .unwrap();

    assert_eq!(txn.provider_transaction_id.as_deref(), Some("txn_9"));
    assert_eq!(txn.amount, 50_000);
    assert_eq!(txn.fee, 1_000);
    assert_eq!(txn.total, 51_000);
    assert_eq!(txn.status, TransactionStatus::Completed);
}

#[tokio::test]
async fn wallet_transfer_routes_by_customer_ids() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("POST"))
        .and(path("/transfer/wallet"))
        .and(body_partial_json(json!({
            "fromCustomerId": "cus_src",
            "toCustomerId": "cus_dst",
            "amount": 150.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transaction": {
                "reference": "pyr_p2p000000001",
                "amount": 150.0,
                "status": "pending"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    let txn = adapter
        .initiate_transfer(&ProviderTransferRequest {
            source_customer_id: "cus_src".into(),
            destination: TransferDestination::Wallet {
                customer_id: Some("cus_dst".into()),
            },
            amount: 15_000,
            reference: "pyr_p2p000000001".into(),
            narration: None,
        })
        .await
        .unwrap();

    assert_eq!(txn.status, TransactionStatus::Pending);
    assert_eq!(txn.amount, 15_000);
}

#[tokio::test]
async fn combined_create_returns_customer_and_wallet() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("POST"))
        .and(path("/customer/wallet"))
        .and(body_partial_json(json!({
            "firstName": "Ada",
            "bvn": "12345678901",
            "currency": "NGN"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customer": {
                "id": "cus_new",
                "firstName": "Ada",
                "lastName": "Obi",
                "tier": 0
            },
            "wallet": {
                "id": "w_new",
                "customerId": "cus_new",
                "availableBalance": 0.0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    assert!(adapter.supports_combined_create());

    let (customer, wallet) = adapter
        .create_customer_wallet(
            &NewProviderCustomer {
                first_name: "Ada".into(),
                last_name: "Obi".into(),
                email: "ada@example.com".into(),
                phone_number: "+2348012345678".into(),
                identity_number: "12345678901".into(),
                date_of_birth: None,
            },
            CurrencyCode::NGN,
        )
        .await
        .unwrap();

    assert_eq!(customer.provider_customer_id, "cus_new");
    assert_eq!(customer.kyc_status, KycStatus::Pending);
    assert_eq!(customer.kyc_tier, 0);
    assert_eq!(wallet.provider_wallet_id, "w_new");
    assert_eq!(wallet.wallet_type, WalletType::Customer);
    assert_eq!(wallet.currency, CurrencyCode::NGN);
}

#[tokio::test]
async fn account_validation_is_a_read_with_query_parameters() {
    let server = MockServer::start().await;
    mount_login(&server, "tok_1").await;

    Mock::given(method("GET"))
        .and(path("/transfer/account/details"))
        .and(query_param("sortCode", "000013"))
        .and(query_param("accountNumber", "0123456789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": {
                "accountName": "Ada Obi",
                "accountNumber": "0123456789",
                "sortCode": "000013"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = build_adapter(&server, 3);
    let account = adapter.validate_account("000013", "0123456789").await.unwrap();

    assert_eq!(account.account_name, "Ada Obi");
    assert_eq!(account.bank_code, "000013");
}
