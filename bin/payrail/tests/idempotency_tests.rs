mod common;

use axum_test::TestServer;
use diesel::prelude::*;
use http::StatusCode;
use payrail_core::app_state::AppState;
use payrail_core::repositories::transaction_repository::TransactionRepository;
use payrail_primitives::models::{
    CurrencyCode, CustomerStatus, DestinationType, KycStatus, NewCustomer, NewTransaction,
    NewWallet, TransactionStatus, WalletStatus, WalletType,
};
use serde_json::json;
use serial_test::serial;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seed_wallet(conn: &mut PgConnection) -> Uuid {
    use payrail_primitives::schema::{customers, wallets};

    let customer_id: Uuid = diesel::insert_into(customers::table)
        .values(NewCustomer {
            provider: "xpress",
            provider_customer_id: "cus_1",
            user_id: Uuid::new_v4(),
            first_name: "Ada",
            last_name: "Obi",
            email: "ada@example.com",
            phone_number: "+2348012345678",
            kyc_status: KycStatus::Verified,
            kyc_tier: 1,
            status: CustomerStatus::Active,
        })
        .returning(customers::id)
        .get_result(conn)
        .expect("Failed to seed customer");

    diesel::insert_into(wallets::table)
        .values(NewWallet {
            provider: "xpress",
            provider_wallet_id: "wal_1",
            customer_id,
            currency: CurrencyCode::NGN,
            wallet_type: WalletType::Customer,
            status: WalletStatus::Active,
            available_balance: 1_000_000,
            ledger_balance: 1_000_000,
            reserved_balance: 0,
            balance_refreshed_at: None,
        })
        .returning(wallets::id)
        .get_result(conn)
        .expect("Failed to seed wallet")
}

fn txn_row(wallet_id: Uuid) -> NewTransaction<'static> {
    NewTransaction {
        provider: "xpress",
        provider_transaction_id: Some("txn_1"),
        reference: "pyr_unique000001",
        wallet_id,
        destination_type: DestinationType::Bank,
        destination_id: "0123456789",
        destination_bank_code: Some("000013"),
        destination_account_name: Some("Ada Obi"),
        amount: 50_000,
        fee: 1_000,
        total: 51_000,
        currency: CurrencyCode::NGN,
        status: TransactionStatus::Completed,
        narration: None,
    }
}

#[tokio::test]
#[serial]
async fn duplicate_transfer_reference_is_rejected_before_the_provider() {
    let pool = common::create_live_db_pool();
    let Ok(mut conn) = pool.get() else {
        eprintln!("Skipping: test database unavailable");
        return;
    };
    common::run_test_migrations(&mut conn);
    common::cleanup_test_db(&mut conn);
    let wallet_id = seed_wallet(&mut conn);
    drop(conn);

    let mock = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok_1",
            "refreshToken": "refresh_1",
            "expiresIn": 1500
        })))
        .mount(&mock)
        .await;

    // Exactly one outbound transfer: the repeat must stop at the local
    // reference check.
    Mock::given(method("POST"))
        .and(path("/transfer/bank/customer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transaction": {
                "transactionId": "txn_1",
                "reference": "pyr_dup00000001",
                "amount": 500.0,
                "charges": 10.0,
                "responseCode": "00"
            }
        })))
        .expect(1)
        .mount(&mock)
        .await;

    std::env::set_var("APP_ENV", "test");
    let state = AppState::new(pool, common::test_config(&mock.uri()))
        .expect("Failed to build test AppState");
    let server = TestServer::new(common::create_test_app(state.clone())).unwrap();

    let body = json!({
        "wallet_id": wallet_id,
        "amount": 50_000,
        "destination_type": "bank",
        "account_number": "0123456789",
        "account_name": "Ada Obi",
        "bank_code": "000013",
        "reference": "pyr_dup00000001"
    });

    let first = server.post("/api/transfers").json(&body).await;
    first.assert_status(StatusCode::CREATED);

    let second = server.post("/api/transfers").json(&body).await;
    second.assert_status(StatusCode::CONFLICT);
    let envelope: serde_json::Value = second.json();
    assert_eq!(envelope["success"], json!(false));

    let mut conn = state.db.get().expect("Failed to get DB connection");
    use payrail_primitives::schema::transactions;
    let count: i64 = transactions::table
        .filter(transactions::reference.eq("pyr_dup00000001"))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
#[serial]
fn reference_unique_constraint_backstops_the_precheck() {
    let pool = common::create_live_db_pool();
    let Ok(mut conn) = pool.get() else {
        eprintln!("Skipping: test database unavailable");
        return;
    };
    common::run_test_migrations(&mut conn);
    common::cleanup_test_db(&mut conn);
    let wallet_id = seed_wallet(&mut conn);

    TransactionRepository::insert(&mut conn, txn_row(wallet_id))
        .expect("First insert should succeed");

    let err = TransactionRepository::insert(&mut conn, txn_row(wallet_id)).unwrap_err();
    let (status, _message): (StatusCode, String) = err.into();
    assert_eq!(status, StatusCode::CONFLICT);
}
