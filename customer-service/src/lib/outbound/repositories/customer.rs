use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::customer::errors::CustomerError;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerSearchFilter;
use crate::domain::customer::models::EmailAddress;
use crate::domain::customer::models::FullName;
use crate::domain::customer::models::PageRequest;
use crate::domain::customer::models::PhoneNumber;
use crate::domain::customer::ports::CustomerRepository;

const CUSTOMER_COLUMNS: &str =
    "id, full_name, email, phone, role, password_hash, active, created_at, updated_at";

pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> CustomerError {
    CustomerError::DatabaseError(e.to_string())
}

fn customer_from_row(row: &PgRow) -> Result<Customer, CustomerError> {
    let phone: Option<String> = row.try_get("phone").map_err(database_error)?;

    Ok(Customer {
        id: CustomerId(row.try_get("id").map_err(database_error)?),
        full_name: FullName::new(row.try_get("full_name").map_err(database_error)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(database_error)?)?,
        phone: phone.map(PhoneNumber::new).transpose()?,
        role: row.try_get("role").map_err(database_error)?,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        active: row.try_get("active").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

/// Partial-match pattern for LIKE-style filtering.
fn contains_pattern(fragment: &str) -> String {
    format!("%{}%", fragment)
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn create(&self, customer: Customer) -> Result<Customer, CustomerError> {
        sqlx::query(
            r#"
            INSERT INTO customers
                (id, full_name, email, phone, role, password_hash, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(customer.id.0)
        .bind(customer.full_name.as_str())
        .bind(customer.email.as_str())
        .bind(customer.phone.as_ref().map(|p| p.as_str()))
        .bind(&customer.role)
        .bind(&customer.password_hash)
        .bind(customer.active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return CustomerError::EmailAlreadyExists(
                        customer.email.as_str().to_string(),
                    );
                }
            }
            database_error(e)
        })?;

        Ok(customer)
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, CustomerError> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Customer>, CustomerError> {
        let row = sqlx::query(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(customer_from_row).transpose()
    }

    async fn search(
        &self,
        filter: &CustomerSearchFilter,
        page: &PageRequest,
    ) -> Result<Vec<Customer>, CustomerError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE active = TRUE
              AND full_name ILIKE $1
              AND email ILIKE $2
              AND COALESCE(phone, '') ILIKE $3
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(contains_pattern(&filter.full_name))
        .bind(contains_pattern(&filter.email))
        .bind(contains_pattern(&filter.phone))
        .bind(i64::from(page.per_page()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(customer_from_row).collect()
    }

    async fn count(&self, filter: &CustomerSearchFilter) -> Result<u64, CustomerError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total
            FROM customers
            WHERE active = TRUE
              AND full_name ILIKE $1
              AND email ILIKE $2
              AND COALESCE(phone, '') ILIKE $3
            "#,
        )
        .bind(contains_pattern(&filter.full_name))
        .bind(contains_pattern(&filter.email))
        .bind(contains_pattern(&filter.phone))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        let total: i64 = row.try_get("total").map_err(database_error)?;

        Ok(total as u64)
    }

    async fn update(&self, customer: Customer) -> Result<Customer, CustomerError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET full_name = $2, phone = $3, role = $4, password_hash = $5,
                active = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(customer.id.0)
        .bind(customer.full_name.as_str())
        .bind(customer.phone.as_ref().map(|p| p.as_str()))
        .bind(&customer.role)
        .bind(&customer.password_hash)
        .bind(customer.active)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(CustomerError::NotFound(customer.id.to_string()));
        }

        Ok(customer)
    }
}
