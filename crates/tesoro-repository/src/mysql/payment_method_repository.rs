//! MySQL payment method repository implementation.

use crate::params::QueryParams;
use crate::query::QueryHandle;
use crate::session::Session;
use crate::traits::{GenericRepository, PaymentMethodRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tesoro_core::{Entity, PaymentMethodId, TesoroError, TesoroResult};
use tesoro_domain::{BankPaymentMethod, CardPaymentMethod, PaymentMethod, PaymentMethodDetails};
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, kind, routing_number, account_number, card_number, expiry, \
                              holder_name, created_at, updated_at";

/// MySQL implementation of the generic payment method repository.
#[derive(Component)]
#[shaku(interface = PaymentMethodRepository)]
pub struct MySqlPaymentMethodRepository {
    #[shaku(inject)]
    session: Arc<dyn Session>,
}

impl MySqlPaymentMethodRepository {
    /// Creates a new repository over the given session.
    #[must_use]
    pub fn new(session: Arc<dyn Session>) -> Self {
        Self { session }
    }

    /// Returns the injected session.
    ///
    /// Avoid using this directly; prefer the repository operations.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }

    fn rows_to_entities(rows: Vec<PaymentMethodRow>) -> TesoroResult<Vec<PaymentMethod>> {
        rows.into_iter().map(PaymentMethod::try_from).collect()
    }
}

/// Database row representation of a payment method.
///
/// Single-table layout: one row per method, `kind` discriminates, variant
/// columns are nullable.
#[derive(Debug, FromRow)]
struct PaymentMethodRow {
    id: String, // MySQL stores UUID as CHAR(36)
    kind: String,
    routing_number: Option<String>,
    account_number: Option<String>,
    card_number: Option<String>,
    expiry: Option<String>,
    holder_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentMethodRow> for PaymentMethod {
    type Error = TesoroError;

    fn try_from(row: PaymentMethodRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| TesoroError::internal(format!("Invalid UUID in database: {}", e)))?;

        let details = match row.kind.to_lowercase().as_str() {
            "bank" => PaymentMethodDetails::Bank(BankPaymentMethod {
                routing_number: row.routing_number,
                account_number: row.account_number,
                name: row.holder_name,
            }),
            "card" => PaymentMethodDetails::Card(CardPaymentMethod {
                card_number: row.card_number,
                expiry: row.expiry,
                name: row.holder_name,
            }),
            other => {
                return Err(TesoroError::internal(format!(
                    "Unknown payment method kind in database: {}",
                    other
                )))
            }
        };

        Ok(PaymentMethod {
            id: PaymentMethodId::from_uuid(id),
            details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Splits an entity into the nullable variant columns.
fn variant_columns(
    method: &PaymentMethod,
) -> (
    Option<&str>,
    Option<&str>,
    Option<&str>,
    Option<&str>,
    Option<&str>,
) {
    match &method.details {
        PaymentMethodDetails::Bank(bank) => (
            bank.routing_number.as_deref(),
            bank.account_number.as_deref(),
            None,
            None,
            bank.name.as_deref(),
        ),
        PaymentMethodDetails::Card(card) => (
            None,
            None,
            card.card_number.as_deref(),
            card.expiry.as_deref(),
            card.name.as_deref(),
        ),
    }
}

#[async_trait]
impl GenericRepository<PaymentMethod, PaymentMethodId> for MySqlPaymentMethodRepository {
    type Query = QueryHandle;

    async fn save(&self, entity: &PaymentMethod) -> TesoroResult<()> {
        debug!("Saving payment method {}", entity.id);

        let (routing_number, account_number, card_number, expiry, holder_name) =
            variant_columns(entity);

        sqlx::query(
            r#"
            INSERT INTO payment_methods
                (id, kind, routing_number, account_number, card_number, expiry,
                 holder_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.into_inner().to_string())
        .bind(entity.kind().as_str())
        .bind(routing_number)
        .bind(account_number)
        .bind(card_number)
        .bind(expiry)
        .bind(holder_name)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .execute(self.session.pool())
        .await?;

        Ok(())
    }

    async fn refresh(&self, entity: &mut PaymentMethod) -> TesoroResult<()> {
        debug!("Refreshing payment method {}", entity.id);

        let id = entity.id;
        match self.find(&id).await? {
            Some(fresh) => {
                *entity = fresh;
                Ok(())
            }
            None => Err(TesoroError::not_found("payment_method", id)),
        }
    }

    async fn merge(&self, entity: &PaymentMethod) -> TesoroResult<PaymentMethod> {
        debug!("Merging payment method {}", entity.id);

        let (routing_number, account_number, card_number, expiry, holder_name) =
            variant_columns(entity);

        sqlx::query(
            r#"
            INSERT INTO payment_methods
                (id, kind, routing_number, account_number, card_number, expiry,
                 holder_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                kind = VALUES(kind),
                routing_number = VALUES(routing_number),
                account_number = VALUES(account_number),
                card_number = VALUES(card_number),
                expiry = VALUES(expiry),
                holder_name = VALUES(holder_name),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(entity.id.into_inner().to_string())
        .bind(entity.kind().as_str())
        .bind(routing_number)
        .bind(account_number)
        .bind(card_number)
        .bind(expiry)
        .bind(holder_name)
        .bind(entity.created_at)
        .bind(Utc::now())
        .execute(self.session.pool())
        .await?;

        let id = entity.id;
        self.find(&id).await?.ok_or_else(|| {
            TesoroError::internal(format!("Payment method {} missing after merge", id))
        })
    }

    async fn find(&self, id: &PaymentMethodId) -> TesoroResult<Option<PaymentMethod>> {
        debug!("Finding payment method by id: {}", id);

        let sql = format!(
            "SELECT {} FROM payment_methods WHERE id = ?",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, PaymentMethodRow>(&sql)
            .bind(id.into_inner().to_string())
            .fetch_optional(self.session.pool())
            .await?;

        row.map(PaymentMethod::try_from).transpose()
    }

    async fn get(&self, query: &str, params: &QueryParams) -> TesoroResult<Vec<PaymentMethod>> {
        debug!("Executing payment method query: {}", query);

        let rows: Vec<PaymentMethodRow> = QueryHandle::new(Arc::clone(&self.session), query)
            .with_params(params.clone())
            .fetch()
            .await?;

        Self::rows_to_entities(rows)
    }

    async fn get_limited(
        &self,
        query: &str,
        params: &QueryParams,
        max_results: u64,
    ) -> TesoroResult<Vec<PaymentMethod>> {
        debug!(
            "Executing payment method query (max {} results): {}",
            max_results, query
        );

        let rows: Vec<PaymentMethodRow> = QueryHandle::new(Arc::clone(&self.session), query)
            .with_params(params.clone())
            .set_max_results(max_results)
            .fetch()
            .await?;

        Self::rows_to_entities(rows)
    }

    async fn get_single_result(
        &self,
        query: &str,
        params: &QueryParams,
    ) -> TesoroResult<PaymentMethod> {
        let mut matches = self.get(query, params).await?;
        match matches.len() {
            0 => Err(TesoroError::no_result(query)),
            1 => Ok(matches.remove(0)),
            n => Err(TesoroError::non_unique(query, n)),
        }
    }

    async fn get_all(&self) -> TesoroResult<Vec<PaymentMethod>> {
        debug!("Loading all payment methods");

        let sql = format!("SELECT {} FROM payment_methods", SELECT_COLUMNS);
        let rows = sqlx::query_as::<_, PaymentMethodRow>(&sql)
            .fetch_all(self.session.pool())
            .await?;

        Self::rows_to_entities(rows)
    }

    fn create_query(&self, query: &str) -> QueryHandle {
        QueryHandle::new(Arc::clone(&self.session), query)
    }

    async fn count(&self, column: &str, value: &str) -> TesoroResult<u64> {
        if !PaymentMethod::columns().contains(&column) {
            return Err(TesoroError::validation(format!(
                "Unknown column for payment_methods: {}",
                column
            )));
        }

        let sql = format!("SELECT COUNT(*) FROM payment_methods WHERE {} = ?", column);
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(value.to_string())
            .fetch_one(self.session.pool())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

impl PaymentMethodRepository for MySqlPaymentMethodRepository {}

impl std::fmt::Debug for MySqlPaymentMethodRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlPaymentMethodRepository")
            .finish_non_exhaustive()
    }
}
