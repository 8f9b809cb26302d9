use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::customer::errors::CustomerError;
use crate::customer::ports::CustomerRepository;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPage;
use crate::domain::customer::models::CustomerSearchFilter;
use crate::domain::customer::models::EmailAddress;
use crate::domain::customer::models::PageRequest;
use crate::domain::customer::models::UpdateCustomerCommand;

/// Role assigned to newly registered customers.
const DEFAULT_ROLE: &str = "Customer";

/// Domain service implementation for customer operations.
///
/// Concrete implementation of CustomerServicePort with dependency injection.
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    repository: Arc<CR>,
    password_hasher: auth::PasswordHasher,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    /// Create a new customer service with an injected repository.
    pub fn new(repository: Arc<CR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<CR> CustomerServicePort for CustomerService<CR>
where
    CR: CustomerRepository,
{
    async fn create_customer(
        &self,
        command: CreateCustomerCommand,
    ) -> Result<Customer, CustomerError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(CustomerError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            full_name: command.full_name,
            email: command.email,
            phone: command.phone,
            role: DEFAULT_ROLE.to_string(),
            password_hash,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(customer).await
    }

    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, CustomerError> {
        let customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id.to_string()))?;

        // Soft-deleted rows are invisible to reads
        if !customer.active {
            return Err(CustomerError::NotFound(id.to_string()));
        }

        Ok(customer)
    }

    async fn get_customer_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Customer, CustomerError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(CustomerError::NotFoundByEmail(email.to_string()))
    }

    async fn list_customers(
        &self,
        filter: &CustomerSearchFilter,
        page: &PageRequest,
    ) -> Result<CustomerPage, CustomerError> {
        let customers = self.repository.search(filter, page).await?;
        let number_of_items = self.repository.count(filter).await?;
        let number_of_pages = number_of_items.div_ceil(u64::from(page.per_page()));

        Ok(CustomerPage {
            customers,
            number_of_items,
            number_of_pages,
        })
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        command: UpdateCustomerCommand,
    ) -> Result<Customer, CustomerError> {
        let mut customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id.to_string()))?;

        if !customer.active {
            return Err(CustomerError::NotFound(id.to_string()));
        }

        // Explicit allow-listed merge; absent fields keep their value
        if let Some(full_name) = command.full_name {
            customer.full_name = full_name;
        }

        if let Some(phone) = command.phone {
            customer.phone = Some(phone);
        }

        customer.updated_at = Utc::now();

        self.repository.update(customer).await
    }

    async fn delete_customer(&self, id: &CustomerId) -> Result<(), CustomerError> {
        let mut customer = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound(id.to_string()))?;

        customer.active = false;
        customer.updated_at = Utc::now();

        self.repository.update(customer).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::customer::models::FullName;
    use crate::domain::customer::models::PhoneNumber;

    mock! {
        pub TestCustomerRepository {}

        #[async_trait]
        impl CustomerRepository for TestCustomerRepository {
            async fn create(&self, customer: Customer) -> Result<Customer, CustomerError>;
            async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Customer>, CustomerError>;
            async fn search(&self, filter: &CustomerSearchFilter, page: &PageRequest) -> Result<Vec<Customer>, CustomerError>;
            async fn count(&self, filter: &CustomerSearchFilter) -> Result<u64, CustomerError>;
            async fn update(&self, customer: Customer) -> Result<Customer, CustomerError>;
        }
    }

    fn test_customer(active: bool) -> Customer {
        let now = Utc::now();
        Customer {
            id: CustomerId::new(),
            full_name: FullName::new("Frank Sinatra".to_string()).unwrap(),
            email: EmailAddress::new("frank@x.com".to_string()).unwrap(),
            phone: Some(PhoneNumber::new("+380123456".to_string()).unwrap()),
            role: "Admin".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
            active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_customer_hashes_password_and_defaults_role() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        repository
            .expect_create()
            .withf(|customer| {
                customer.password_hash.starts_with("$argon2")
                    && customer.password_hash != "FrSi01"
                    && customer.role == "Customer"
                    && customer.active
            })
            .times(1)
            .returning(|customer| Ok(customer));

        let service = CustomerService::new(Arc::new(repository));

        let command = CreateCustomerCommand::new(
            FullName::new("Frank Sinatra".to_string()).unwrap(),
            EmailAddress::new("frank@x.com".to_string()).unwrap(),
            Some(PhoneNumber::new("+380123456".to_string()).unwrap()),
            "FrSi01".to_string(),
        );

        let result = service.create_customer(command).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().email.as_str(), "frank@x.com");
    }

    #[tokio::test]
    async fn test_create_customer_duplicate_email() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_customer(true))));

        let service = CustomerService::new(Arc::new(repository));

        let command = CreateCustomerCommand::new(
            FullName::new("Frank Sinatra".to_string()).unwrap(),
            EmailAddress::new("frank@x.com".to_string()).unwrap(),
            None,
            "FrSi01".to_string(),
        );

        let result = service.create_customer(command).await;
        assert!(matches!(
            result.unwrap_err(),
            CustomerError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_customer_success() {
        let mut repository = MockTestCustomerRepository::new();

        let expected = test_customer(true);
        let expected_id = expected.id;

        let returned = expected.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == expected_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = CustomerService::new(Arc::new(repository));

        let result = service.get_customer(&expected_id).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, expected_id);
    }

    #[tokio::test]
    async fn test_get_customer_not_found() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = CustomerService::new(Arc::new(repository));

        let result = service.get_customer(&CustomerId::new()).await;
        assert!(matches!(result.unwrap_err(), CustomerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_customer_soft_deleted_is_not_found() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_customer(false))));

        let service = CustomerService::new(Arc::new(repository));

        let result = service.get_customer(&CustomerId::new()).await;
        assert!(matches!(result.unwrap_err(), CustomerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_customer_by_email_not_found() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = CustomerService::new(Arc::new(repository));

        let email = EmailAddress::new("ghost@x.com".to_string()).unwrap();
        let result = service.get_customer_by_email(&email).await;
        assert!(matches!(
            result.unwrap_err(),
            CustomerError::NotFoundByEmail(_)
        ));
    }

    #[tokio::test]
    async fn test_list_customers_computes_pages() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![test_customer(true), test_customer(true)]));

        repository.expect_count().times(1).returning(|_| Ok(45));

        let service = CustomerService::new(Arc::new(repository));

        let page = service
            .list_customers(&CustomerSearchFilter::default(), &PageRequest::new(0, 20))
            .await
            .expect("Listing failed");

        assert_eq!(page.customers.len(), 2);
        assert_eq!(page.number_of_items, 45);
        assert_eq!(page.number_of_pages, 3);
    }

    #[tokio::test]
    async fn test_update_customer_merges_provided_fields() {
        let mut repository = MockTestCustomerRepository::new();

        let existing = test_customer(true);
        let existing_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == existing_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|customer| {
                customer.full_name.as_str() == "Francis Albert"
                    && customer.phone.as_ref().map(|p| p.as_str()) == Some("+380123456")
            })
            .times(1)
            .returning(|customer| Ok(customer));

        let service = CustomerService::new(Arc::new(repository));

        // Only the name is updated; the phone keeps its stored value
        let command = UpdateCustomerCommand {
            full_name: Some(FullName::new("Francis Albert".to_string()).unwrap()),
            phone: None,
        };

        let result = service.update_customer(&existing_id, command).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().full_name.as_str(), "Francis Albert");
    }

    #[tokio::test]
    async fn test_update_customer_soft_deleted_is_not_found() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(test_customer(false))));

        let service = CustomerService::new(Arc::new(repository));

        let command = UpdateCustomerCommand {
            full_name: Some(FullName::new("Francis Albert".to_string()).unwrap()),
            phone: None,
        };

        let result = service.update_customer(&CustomerId::new(), command).await;
        assert!(matches!(result.unwrap_err(), CustomerError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_customer_clears_active_flag() {
        let mut repository = MockTestCustomerRepository::new();

        let existing = test_customer(true);
        let existing_id = existing.id;

        let returned = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == existing_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        repository
            .expect_update()
            .withf(|customer| !customer.active)
            .times(1)
            .returning(|customer| Ok(customer));

        let service = CustomerService::new(Arc::new(repository));

        let result = service.delete_customer(&existing_id).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_customer_not_found() {
        let mut repository = MockTestCustomerRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = CustomerService::new(Arc::new(repository));

        let result = service.delete_customer(&CustomerId::new()).await;
        assert!(matches!(result.unwrap_err(), CustomerError::NotFound(_)));
    }
}
