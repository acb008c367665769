use diesel::prelude::*;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::entities::customer::{Customer, NewCustomer};
use payrail_primitives::models::entities::enum_types::{CustomerStatus, KycStatus};
use payrail_primitives::schema::customers;
use uuid::Uuid;

pub struct CustomerRepository;

impl CustomerRepository {
    pub fn insert(conn: &mut PgConnection, customer: NewCustomer) -> Result<Customer, ApiError> {
        diesel::insert_into(customers::table)
            .values(&customer)
            .get_result::<Customer>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Customer>, ApiError> {
        customers::table
            .find(id)
            .first::<Customer>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_user(
        conn: &mut PgConnection,
        provider: &str,
        user_id: Uuid,
    ) -> Result<Option<Customer>, ApiError> {
        customers::table
            .filter(customers::provider.eq(provider))
            .filter(customers::user_id.eq(user_id))
            .first::<Customer>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_provider_customer_id(
        conn: &mut PgConnection,
        provider: &str,
        provider_customer_id: &str,
    ) -> Result<Option<Customer>, ApiError> {
        customers::table
            .filter(customers::provider.eq(provider))
            .filter(customers::provider_customer_id.eq(provider_customer_id))
            .first::<Customer>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// Profile sync: overwrite the mutable mirror fields from a fresh
    /// provider read.
    pub fn update_profile(
        conn: &mut PgConnection,
        id: Uuid,
        kyc_status: KycStatus,
        kyc_tier: i32,
        status: CustomerStatus,
    ) -> Result<Customer, ApiError> {
        diesel::update(customers::table.find(id))
            .set((
                customers::kyc_status.eq(kyc_status),
                customers::kyc_tier.eq(kyc_tier),
                customers::status.eq(status),
                customers::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<Customer>(conn)
            .map_err(ApiError::Database)
    }
}
