use crate::models::entities::enum_types::{CustomerStatus, KycStatus};
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Local mirror of a partner-side customer. Rows are never physically
/// deleted; lifecycle is expressed through `status` transitions.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::customers)]
pub struct Customer {
    pub id: Uuid,
    pub provider: String,
    pub provider_customer_id: String,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub kyc_status: KycStatus,
    pub kyc_tier: i32,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
pub struct NewCustomer<'a> {
    pub provider: &'a str,
    pub provider_customer_id: &'a str,
    pub user_id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
    pub kyc_status: KycStatus,
    pub kyc_tier: i32,
    pub status: CustomerStatus,
}
