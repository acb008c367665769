use crate::handlers::{
    all_banks::__path_all_banks, create_customer::__path_create_customer,
    create_customer_wallet::__path_create_customer_wallet, create_wallet::__path_create_wallet,
    customer_wallets::__path_customer_wallets, get_balance::__path_get_balance,
    get_customer::__path_get_customer, get_customer::__path_sync_customer,
    get_transaction::__path_get_transaction, get_wallet::__path_get_wallet,
    health::__path_health_check, resolve_account::__path_resolve_account,
    transaction_history::__path_transaction_history, transfer::__path_transfer,
    xpress_webhook::__path_xpress_webhook,
};
use payrail_primitives::models::{
    CreateCustomerRequest, CreateCustomerWalletRequest, CreateWalletRequest, TransferRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check, create_customer, get_customer, sync_customer,
        create_customer_wallet, create_wallet, get_wallet, customer_wallets,
        get_balance, transfer, get_transaction, transaction_history,
        all_banks, resolve_account, xpress_webhook
    ),
    components(schemas(
        CreateCustomerRequest,
        CreateCustomerWalletRequest,
        CreateWalletRequest,
        TransferRequest
    )),
    tags(
        (name = "Customers", description = "Provider customer lifecycle"),
        (name = "Wallets", description = "Wallet creation and balances"),
        (name = "Transfers", description = "Transfer initiation and history"),
        (name = "Banks", description = "Bank directory and account resolution"),
        (name = "Webhooks", description = "Partner callbacks"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
