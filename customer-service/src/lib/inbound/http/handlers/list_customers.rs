use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerSearchFilter;
use crate::domain::customer::models::PageRequest;
use crate::inbound::http::router::AppState;

/// Paginated, filtered listing of active customers.
///
/// Filters are partial matches; omitted filters match everything.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<ApiSuccess<ListCustomersResponseData>, ApiError> {
    let filter = CustomerSearchFilter {
        full_name: query.full_name,
        email: query.email,
        phone: query.phone,
    };
    let page = PageRequest::new(query.page, query.per_page);

    state
        .customer_service
        .list_customers(&filter, &page)
        .await
        .map_err(ApiError::from)
        .map(|page| {
            ApiSuccess::new(
                StatusCode::OK,
                ListCustomersResponseData {
                    customers: page.customers.iter().map(CustomerData::from).collect(),
                    number_of_items: page.number_of_items,
                    number_of_pages: page.number_of_pages,
                },
            )
        })
}

fn default_per_page() -> u32 {
    20
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub page: u32,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCustomersResponseData {
    pub customers: Vec<CustomerData>,
    pub number_of_items: u64,
    pub number_of_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerData {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&Customer> for CustomerData {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            full_name: customer.full_name.as_str().to_string(),
            email: customer.email.as_str().to_string(),
            phone: customer.phone.as_ref().map(|p| p.as_str().to_string()),
        }
    }
}
