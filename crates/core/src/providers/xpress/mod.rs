//! Reference adapter for the Xpress partner API.
//!
//! The partner's vocabulary diverges from the internal model in ways that
//! are easy to get wrong: its "sort code" is the internal bank code, and it
//! routes transfers by customer id where the internal model is keyed by
//! wallet. Everything crossing this module is translated through `mapping`.

pub mod mapping;
pub mod types;

use crate::providers::client::{AuthScheme, ProviderHttpClient};
use crate::providers::retry::RetryPolicy;
use crate::providers::WalletProvider;
use async_trait::async_trait;
use payrail_primitives::error::ProviderError;
use payrail_primitives::models::{
    CurrencyCode, CustomerSearch, HistoryQuery, NewProviderCustomer, Paginated, ProviderBank,
    ProviderCustomer, ProviderCustomerUpdate, ProviderTransaction, ProviderTransferRequest,
    ProviderWallet, ResolvedAccount, TransferDestination, WalletBalance, XpressInfo,
};
use reqwest::{Client, Method};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use types::{XpressAccount, XpressBank, XpressCustomer, XpressPageMeta, XpressTransaction,
    XpressWalletData};

pub const PROVIDER_NAME: &str = "xpress";

const AUTH_SCHEME: AuthScheme = AuthScheme {
    login_path: "/auth/login",
    refresh_path: "/auth/refresh/token",
    access_header: "X-Access-Token",
    refresh_header: "X-Refresh-Token",
};

pub struct XpressWallet {
    client: ProviderHttpClient,
}

impl XpressWallet {
    pub fn new(http: Client, config: &XpressInfo, retry: RetryPolicy) -> Self {
        let login_body = json!({
            "email": config.account_email,
            "password": config.account_password.expose_secret(),
        });

        Self {
            client: ProviderHttpClient::new(
                http,
                &config.api_url,
                AUTH_SCHEME,
                login_body,
                config.token_ttl_secs,
                retry,
            ),
        }
    }
}

/// Pull a named object out of a partner response envelope.
fn extract<T: DeserializeOwned>(value: &Value, key: &str) -> Result<T, ProviderError> {
    let node = value.get(key).cloned().ok_or_else(|| {
        ProviderError::api(
            "invalid_response",
            502,
            format!("Provider response missing `{}`", key),
            Some(value.clone()),
        )
    })?;

    serde_json::from_value(node).map_err(|e| {
        ProviderError::api(
            "invalid_response",
            502,
            format!("Malformed `{}` in provider response: {}", key, e),
            Some(value.clone()),
        )
    })
}

fn customer_body(req: &NewProviderCustomer) -> Value {
    json!({
        "firstName": req.first_name,
        "lastName": req.last_name,
        "email": req.email,
        "phoneNumber": req.phone_number,
        "bvn": req.identity_number,
        "dateOfBirth": req.date_of_birth,
    })
}

/// Customer-to-customer transfer payload. The partner requires both sides'
/// customer ids, so a wallet destination without one is a caller error
/// raised before anything touches the network.
fn build_wallet_transfer(req: &ProviderTransferRequest) -> Result<Value, ProviderError> {
    let TransferDestination::Wallet { customer_id } = &req.destination else {
        return Err(ProviderError::Validation(
            "Destination is not a wallet".into(),
        ));
    };

    let to_customer_id = customer_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ProviderError::Validation(
                "Destination customer id is required for wallet-to-wallet transfers".into(),
            )
        })?;

    Ok(json!({
        "fromCustomerId": req.source_customer_id,
        "toCustomerId": to_customer_id,
        "amount": mapping::major_units(req.amount),
        "reference": req.reference,
        "narration": req.narration,
    }))
}

/// Customer-to-bank transfer payload. The internal bank code goes out under
/// the partner's name for it, `sortCode`.
fn build_bank_transfer(req: &ProviderTransferRequest) -> Result<Value, ProviderError> {
    let TransferDestination::Bank {
        bank_code,
        account_number,
        account_name,
    } = &req.destination
    else {
        return Err(ProviderError::Validation(
            "Destination is not a bank account".into(),
        ));
    };

    Ok(json!({
        "customerId": req.source_customer_id,
        "sortCode": bank_code,
        "accountNumber": account_number,
        "accountName": account_name,
        "amount": mapping::major_units(req.amount),
        "reference": req.reference,
        "narration": req.narration,
    }))
}

#[async_trait]
impl WalletProvider for XpressWallet {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn supports_combined_create(&self) -> bool {
        true
    }

    async fn authenticate(&self) -> Result<(), ProviderError> {
        self.client.authenticate().await
    }

    async fn create_customer(
        &self,
        req: &NewProviderCustomer,
    ) -> Result<ProviderCustomer, ProviderError> {
        let resp = self
            .client
            .request(Method::POST, "/customer", &[], Some(&customer_body(req)))
            .await?;
        Ok(mapping::map_customer(extract::<XpressCustomer>(
            &resp, "customer",
        )?))
    }

    async fn get_customer(
        &self,
        provider_customer_id: &str,
    ) -> Result<ProviderCustomer, ProviderError> {
        let resp = self
            .client
            .request(
                Method::GET,
                &format!("/customer/{}", provider_customer_id),
                &[],
                None,
            )
            .await?;
        Ok(mapping::map_customer(extract::<XpressCustomer>(
            &resp, "customer",
        )?))
    }

    async fn update_customer(
        &self,
        provider_customer_id: &str,
        update: &ProviderCustomerUpdate,
    ) -> Result<ProviderCustomer, ProviderError> {
        let body = json!({
            "email": update.email,
            "phoneNumber": update.phone_number,
        });
        let resp = self
            .client
            .request(
                Method::PUT,
                &format!("/customer/{}", provider_customer_id),
                &[],
                Some(&body),
            )
            .await?;
        Ok(mapping::map_customer(extract::<XpressCustomer>(
            &resp, "customer",
        )?))
    }

    async fn search_customers(
        &self,
        search: &CustomerSearch,
    ) -> Result<Paginated<ProviderCustomer>, ProviderError> {
        let query = [
            ("page", search.page.max(1).to_string()),
            ("perPage", search.per_page.max(1).to_string()),
            ("search", search.query.clone()),
        ];
        let resp = self
            .client
            .request(Method::GET, "/customers", &query, None)
            .await?;

        let customers: Vec<XpressCustomer> = extract(&resp, "customers")?;
        let meta: XpressPageMeta = extract(&resp, "metadata").unwrap_or_default();

        Ok(Paginated {
            items: customers.into_iter().map(mapping::map_customer).collect(),
            page: meta.page.unwrap_or(search.page),
            per_page: meta.per_page.unwrap_or(search.per_page),
            total: meta.total,
        })
    }

    async fn find_customer_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<ProviderCustomer>, ProviderError> {
        let query = [("phoneNumber", phone_number.to_string())];
        match self
            .client
            .request(Method::GET, "/customer/phone", &query, None)
            .await
        {
            Ok(resp) => Ok(Some(mapping::map_customer(extract::<XpressCustomer>(
                &resp, "customer",
            )?))),
            // The partner signals no-match as a client error.
            Err(ProviderError::Validation(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_wallet(
        &self,
        provider_customer_id: &str,
        currency: CurrencyCode,
    ) -> Result<ProviderWallet, ProviderError> {
        let body = json!({
            "customerId": provider_customer_id,
            "currency": currency.to_string(),
        });
        let resp = self
            .client
            .request(Method::POST, "/wallet", &[], Some(&body))
            .await?;
        Ok(mapping::map_wallet(extract::<XpressWalletData>(
            &resp, "wallet",
        )?))
    }

    async fn create_customer_wallet(
        &self,
        req: &NewProviderCustomer,
        currency: CurrencyCode,
    ) -> Result<(ProviderCustomer, ProviderWallet), ProviderError> {
        let mut body = customer_body(req);
        body["currency"] = json!(currency.to_string());

        let resp = self
            .client
            .request(Method::POST, "/customer/wallet", &[], Some(&body))
            .await?;

        let customer = mapping::map_customer(extract::<XpressCustomer>(&resp, "customer")?);
        let wallet = mapping::map_wallet(extract::<XpressWalletData>(&resp, "wallet")?);
        Ok((customer, wallet))
    }

    async fn get_wallet(&self, provider_wallet_id: &str) -> Result<ProviderWallet, ProviderError> {
        let resp = self
            .client
            .request(
                Method::GET,
                &format!("/wallet/{}", provider_wallet_id),
                &[],
                None,
            )
            .await?;
        Ok(mapping::map_wallet(extract::<XpressWalletData>(
            &resp, "wallet",
        )?))
    }

    async fn list_wallets(
        &self,
        provider_customer_id: &str,
    ) -> Result<Vec<ProviderWallet>, ProviderError> {
        let query = [("customerId", provider_customer_id.to_string())];
        let resp = self
            .client
            .request(Method::GET, "/wallets", &query, None)
            .await?;
        let wallets: Vec<XpressWalletData> = extract(&resp, "wallets")?;
        Ok(wallets.into_iter().map(mapping::map_wallet).collect())
    }

    async fn get_balance(&self, provider_wallet_id: &str) -> Result<WalletBalance, ProviderError> {
        let resp = self
            .client
            .request(
                Method::GET,
                &format!("/wallet/{}/balance", provider_wallet_id),
                &[],
                None,
            )
            .await?;
        let wallet = mapping::map_wallet(extract::<XpressWalletData>(&resp, "wallet")?);
        Ok(WalletBalance {
            available: wallet.available_balance,
            ledger: wallet.ledger_balance,
            reserved: wallet.reserved_balance,
            currency: wallet.currency,
        })
    }

    async fn initiate_transfer(
        &self,
        req: &ProviderTransferRequest,
    ) -> Result<ProviderTransaction, ProviderError> {
        let (path, body) = match &req.destination {
            TransferDestination::Wallet { .. } => {
                ("/transfer/wallet", build_wallet_transfer(req)?)
            }
            TransferDestination::Bank { .. } => {
                ("/transfer/bank/customer", build_bank_transfer(req)?)
            }
        };

        let resp = self
            .client
            .request(Method::POST, path, &[], Some(&body))
            .await?;
        Ok(mapping::map_transaction(extract::<XpressTransaction>(
            &resp,
            "transaction",
        )?))
    }

    async fn get_transaction(
        &self,
        reference: &str,
    ) -> Result<ProviderTransaction, ProviderError> {
        let resp = self
            .client
            .request(
                Method::GET,
                &format!("/transaction/{}", reference),
                &[],
                None,
            )
            .await?;
        Ok(mapping::map_transaction(extract::<XpressTransaction>(
            &resp,
            "transaction",
        )?))
    }

    async fn transaction_history(
        &self,
        query: &HistoryQuery,
    ) -> Result<Paginated<ProviderTransaction>, ProviderError> {
        let mut params = vec![
            ("page", query.page.max(1).to_string()),
            ("perPage", query.per_page.max(1).to_string()),
        ];
        if let Some(from) = query.from {
            params.push(("from", from.to_rfc3339()));
        }
        if let Some(to) = query.to {
            params.push(("to", to.to_rfc3339()));
        }
        if let Some(customer_id) = &query.customer_id {
            params.push(("customerId", customer_id.clone()));
        }

        let resp = self
            .client
            .request(Method::GET, "/transactions", &params, None)
            .await?;

        let transactions: Vec<XpressTransaction> = extract(&resp, "transactions")?;
        let meta: XpressPageMeta = extract(&resp, "metadata").unwrap_or_default();

        Ok(Paginated {
            items: transactions
                .into_iter()
                .map(mapping::map_transaction)
                .collect(),
            page: meta.page.unwrap_or(query.page),
            per_page: meta.per_page.unwrap_or(query.per_page),
            total: meta.total,
        })
    }

    async fn list_banks(&self) -> Result<Vec<ProviderBank>, ProviderError> {
        let resp = self
            .client
            .request(Method::GET, "/transfer/banks", &[], None)
            .await?;
        let banks: Vec<XpressBank> = extract(&resp, "banks")?;
        Ok(banks.into_iter().map(mapping::map_bank).collect())
    }

    async fn validate_account(
        &self,
        bank_code: &str,
        account_number: &str,
    ) -> Result<ResolvedAccount, ProviderError> {
        // A read, not a write: GET with query parameters.
        let query = [
            ("sortCode", bank_code.to_string()),
            ("accountNumber", account_number.to_string()),
        ];
        let resp = self
            .client
            .request(Method::GET, "/transfer/account/details", &query, None)
            .await?;
        Ok(mapping::map_account(extract::<XpressAccount>(
            &resp, "account",
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_request(bank_code: &str) -> ProviderTransferRequest {
        ProviderTransferRequest {
            source_customer_id: "cus_123".into(),
            destination: TransferDestination::Bank {
                bank_code: bank_code.into(),
                account_number: "0123456789".into(),
                account_name: "Ada Obi".into(),
            },
            amount: 250_000,
            reference: "pyr_abc123def456".into(),
            narration: Some("rent".into()),
        }
    }

    #[test]
    fn wallet_transfer_requires_destination_customer_id() {
        let req = ProviderTransferRequest {
            source_customer_id: "cus_123".into(),
            destination: TransferDestination::Wallet { customer_id: None },
            amount: 10_000,
            reference: "pyr_abc123def456".into(),
            narration: None,
        };
        let err = build_wallet_transfer(&req).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));

        let empty = ProviderTransferRequest {
            destination: TransferDestination::Wallet {
                customer_id: Some(String::new()),
            },
            ..req
        };
        assert!(build_wallet_transfer(&empty).is_err());
    }

    #[test]
    fn wallet_transfer_routes_by_customer_identity() {
        let req = ProviderTransferRequest {
            source_customer_id: "cus_src".into(),
            destination: TransferDestination::Wallet {
                customer_id: Some("cus_dst".into()),
            },
            amount: 15_000,
            reference: "pyr_abc123def456".into(),
            narration: None,
        };
        let payload = build_wallet_transfer(&req).unwrap();
        assert_eq!(payload["fromCustomerId"], "cus_src");
        assert_eq!(payload["toCustomerId"], "cus_dst");
        assert_eq!(payload["amount"], 150.0);
    }

    #[test]
    fn bank_transfer_emits_partner_sort_code_name() {
        let payload = build_bank_transfer(&bank_request("000013")).unwrap();
        assert_eq!(payload["sortCode"], "000013");
        assert_eq!(payload["customerId"], "cus_123");
        assert_eq!(payload["accountNumber"], "0123456789");
        assert_eq!(payload["amount"], 2500.0);
        assert!(payload.get("bankCode").is_none());
    }

    #[test]
    fn identical_routing_codes_build_identical_payloads() {
        // Whether the caller said bankCode or sortCode upstream, by this
        // point both spell the same routing identifier.
        let a = build_bank_transfer(&bank_request("000013")).unwrap();
        let b = build_bank_transfer(&bank_request("000013")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extract_reports_missing_keys_with_body() {
        let resp = serde_json::json!({"status": true});
        let err = extract::<XpressCustomer>(&resp, "customer").unwrap_err();
        match err {
            ProviderError::Api { code, status, .. } => {
                assert_eq!(code, "invalid_response");
                assert_eq!(status, 502);
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
