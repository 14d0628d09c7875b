//! # Customer Commands
//!
//! Listing customers, issuing points, and the admin add/delete actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::ShopState;
use rewards_core::{CoreError, Customer};
use rewards_service::ShopError;

/// Customer DTO (Data Transfer Object) for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub points: i64,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        CustomerDto {
            id: c.id,
            name: c.name,
            email: c.email,
            points: c.points,
        }
    }
}

/// Lists all customers with their balances.
pub async fn list_customers(shop: &ShopState) -> Result<Vec<CustomerDto>, ApiError> {
    let customers = shop.service().list_customers().await?;
    debug!(count = customers.len(), "Listed customers");
    Ok(customers.into_iter().map(CustomerDto::from).collect())
}

/// Gets one customer.
///
/// ## Returns
/// * `Ok(CustomerDto)` - Customer found
/// * `Err(ApiError)` - `NOT_FOUND` if the id is unknown
pub async fn get_customer(shop: &ShopState, id: i64) -> Result<CustomerDto, ApiError> {
    match shop.service().get_customer(id).await? {
        Some(customer) => Ok(customer.into()),
        None => Err(ShopError::from(CoreError::CustomerNotFound(id)).into()),
    }
}

/// Adds points to a customer's balance (employee action).
pub async fn issue_points(
    shop: &ShopState,
    customer_id: i64,
    points: i64,
) -> Result<CustomerDto, ApiError> {
    let customer = shop.service().issue_points(customer_id, points).await?;
    Ok(customer.into())
}

/// Registers a customer (admin action).
pub async fn add_customer(
    shop: &ShopState,
    name: &str,
    email: &str,
    points: i64,
) -> Result<CustomerDto, ApiError> {
    let customer = shop.service().add_customer(name, email, points).await?;
    Ok(customer.into())
}

/// Deletes a customer without orders (admin action).
pub async fn delete_customer(shop: &ShopState, id: i64) -> Result<(), ApiError> {
    shop.service().delete_customer(id).await?;
    Ok(())
}
