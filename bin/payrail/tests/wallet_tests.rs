mod common;

use diesel::prelude::*;
use payrail_core::repositories::wallet_repository::WalletRepository;
use payrail_primitives::models::{
    CurrencyCode, CustomerStatus, KycStatus, NewCustomer, NewWallet, WalletStatus, WalletType,
};
use serial_test::serial;
use uuid::Uuid;

fn seed_customer(conn: &mut PgConnection) -> Uuid {
    use payrail_primitives::schema::customers;

    diesel::insert_into(customers::table)
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
        .expect("Failed to seed customer")
}

#[test]
#[serial]
fn negative_balances_are_rejected_by_the_store() {
    let pool = common::create_live_db_pool();
    let Ok(mut conn) = pool.get() else {
        eprintln!("Skipping: test database unavailable");
        return;
    };
    common::run_test_migrations(&mut conn);
    common::cleanup_test_db(&mut conn);
    let customer_id = seed_customer(&mut conn);

    let result = WalletRepository::insert(
        &mut conn,
        NewWallet {
            provider: "xpress",
            provider_wallet_id: "wal_neg",
            customer_id,
            currency: CurrencyCode::NGN,
            wallet_type: WalletType::Customer,
            status: WalletStatus::Active,
            available_balance: -1,
            ledger_balance: 0,
            reserved_balance: 0,
            balance_refreshed_at: None,
        },
    );

    assert!(result.is_err());
}
