use async_trait::async_trait;

use crate::customer::errors::CustomerError;
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPage;
use crate::domain::customer::models::CustomerSearchFilter;
use crate::domain::customer::models::EmailAddress;
use crate::domain::customer::models::PageRequest;
use crate::domain::customer::models::UpdateCustomerCommand;

/// Port for customer domain service operations.
#[async_trait]
pub trait CustomerServicePort: Send + Sync + 'static {
    /// Register a new customer with validated data.
    ///
    /// The password is hashed before storage; the role defaults to
    /// "Customer".
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn create_customer(&self, command: CreateCustomerCommand)
        -> Result<Customer, CustomerError>;

    /// Retrieve an active customer by unique identifier.
    ///
    /// Soft-deleted customers are reported as missing.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist or has been deactivated
    /// * `DatabaseError` - Database operation failed
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, CustomerError>;

    /// Retrieve a customer record by email, the credential-store lookup.
    ///
    /// Returns the record in its current state; callers enforce the
    /// `active` flag.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No customer with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_customer_by_email(&self, email: &EmailAddress)
        -> Result<Customer, CustomerError>;

    /// Retrieve one page of active customers matching the filter.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_customers(
        &self,
        filter: &CustomerSearchFilter,
        page: &PageRequest,
    ) -> Result<CustomerPage, CustomerError>;

    /// Update an existing customer with the provided fields.
    ///
    /// Fields left as `None` are kept unchanged.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist or has been deactivated
    /// * `DatabaseError` - Database operation failed
    async fn update_customer(
        &self,
        id: &CustomerId,
        command: UpdateCustomerCommand,
    ) -> Result<Customer, CustomerError>;

    /// Soft-delete a customer (clear the `active` flag).
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_customer(&self, id: &CustomerId) -> Result<(), CustomerError>;
}

/// Persistence operations for the customer aggregate.
#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    /// Persist a new customer to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, customer: Customer) -> Result<Customer, CustomerError>;

    /// Retrieve a customer by identifier, regardless of active state.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError>;

    /// Retrieve a customer by email, regardless of active state.
    ///
    /// Reads the current row on every call; results must not be cached so
    /// that deactivation and role changes take effect on the next request.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Customer>, CustomerError>;

    /// Retrieve one page of active customers matching the filter.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn search(
        &self,
        filter: &CustomerSearchFilter,
        page: &PageRequest,
    ) -> Result<Vec<Customer>, CustomerError>;

    /// Count active customers matching the filter.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self, filter: &CustomerSearchFilter) -> Result<u64, CustomerError>;

    /// Update an existing customer in storage.
    ///
    /// # Errors
    /// * `NotFound` - Customer does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, customer: Customer) -> Result<Customer, CustomerError>;
}
