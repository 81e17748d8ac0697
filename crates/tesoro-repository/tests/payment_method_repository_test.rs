//! Integration tests for MySqlPaymentMethodRepository.
//!
//! These tests run against a real MySQL database using testcontainers and
//! are ignored by default. Run them with `cargo test -- --ignored` on a
//! machine with a Docker daemon available.

mod common;

use common::TestDatabase;
use tesoro_core::{PaymentMethodId, TesoroError};
use tesoro_domain::{BankPaymentMethod, CardPaymentMethod, PaymentMethod, PaymentMethodDetails};
use tesoro_repository::{GenericRepository, MySqlPaymentMethodRepository, QueryParams};

const BY_KIND: &str = "SELECT id, kind, routing_number, account_number, card_number, expiry, \
                       holder_name, created_at, updated_at \
                       FROM payment_methods WHERE kind = :kind";

const BY_HOLDER: &str = "SELECT id, kind, routing_number, account_number, card_number, expiry, \
                         holder_name, created_at, updated_at \
                         FROM payment_methods WHERE holder_name = :name";

fn bank_method(holder: &str) -> PaymentMethod {
    PaymentMethod::bank(BankPaymentMethod {
        routing_number: Some("021000021".to_string()),
        account_number: Some("123456789".to_string()),
        name: Some(holder.to_string()),
    })
}

fn card_method(holder: &str) -> PaymentMethod {
    PaymentMethod::card(CardPaymentMethod {
        card_number: Some("4111111111111111".to_string()),
        expiry: Some("12/29".to_string()),
        name: Some(holder.to_string()),
    })
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_save_and_find() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let method = bank_method("Ada Lovelace");
    let id = method.id;

    repo.save(&method).await.expect("Failed to save");

    let found = repo
        .find(&id)
        .await
        .expect("Query failed")
        .expect("Method not found");

    assert_eq!(found.id, id);
    let bank = found.as_bank().expect("expected bank variant");
    assert_eq!(bank.routing_number.as_deref(), Some("021000021"));
    assert_eq!(bank.account_number.as_deref(), Some("123456789"));
    assert_eq!(bank.name.as_deref(), Some("Ada Lovelace"));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_find_missing_returns_none() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let result = repo.find(&PaymentMethodId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_save_duplicate_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let method = bank_method("Ada Lovelace");
    repo.save(&method).await.expect("Failed to save");

    let err = repo.save(&method).await.expect_err("expected conflict");
    assert!(matches!(err, TesoroError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_refresh_overwrites_local_changes() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let method = bank_method("Ada Lovelace");
    repo.save(&method).await.expect("Failed to save");

    let mut local = method.clone();
    if let PaymentMethodDetails::Bank(bank) = &mut local.details {
        bank.name = Some("Changed Locally".to_string());
    }

    repo.refresh(&mut local).await.expect("Failed to refresh");
    assert_eq!(
        local.as_bank().unwrap().name.as_deref(),
        Some("Ada Lovelace")
    );
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_refresh_missing_errors() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let mut method = bank_method("Ada Lovelace");
    let err = repo.refresh(&mut method).await.expect_err("expected error");
    assert!(matches!(err, TesoroError::NotFound { .. }));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_merge_updates_and_keeps_identifier() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let method = bank_method("Ada Lovelace");
    let id = method.id;
    repo.save(&method).await.expect("Failed to save");

    let mut updated = method.clone();
    if let PaymentMethodDetails::Bank(bank) = &mut updated.details {
        bank.account_number = Some("987654321".to_string());
    }

    let merged = repo.merge(&updated).await.expect("Failed to merge");
    assert_eq!(merged.id, id);
    assert_eq!(
        merged.as_bank().unwrap().account_number.as_deref(),
        Some("987654321")
    );

    let found = repo.find(&id).await.unwrap().unwrap();
    assert_eq!(
        found.as_bank().unwrap().account_number.as_deref(),
        Some("987654321")
    );
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_merge_inserts_when_absent() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let method = card_method("Grace Hopper");
    let merged = repo.merge(&method).await.expect("Failed to merge");
    assert_eq!(merged.id, method.id);
    assert!(repo.find(&method.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_get_with_named_params() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    repo.save(&bank_method("Ada")).await.unwrap();
    repo.save(&bank_method("Grace")).await.unwrap();
    repo.save(&card_method("Ada")).await.unwrap();

    let params = QueryParams::new().set("kind", "bank");
    let banks = repo.get(BY_KIND, &params).await.expect("Query failed");
    assert_eq!(banks.len(), 2);
    assert!(banks.iter().all(|m| m.as_bank().is_some()));

    let params = QueryParams::new().set("name", "Ada");
    let adas = repo.get(BY_HOLDER, &params).await.expect("Query failed");
    assert_eq!(adas.len(), 2);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_get_limited_caps_results() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    for holder in ["Ada", "Grace", "Katherine"] {
        repo.save(&bank_method(holder)).await.unwrap();
    }

    let params = QueryParams::new().set("kind", "bank");
    let rows = repo.get_limited(BY_KIND, &params, 2).await.unwrap();
    assert_eq!(rows.len(), 2);

    let rows = repo.get_limited(BY_KIND, &params, 0).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_get_single_result_cardinality() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    let params = QueryParams::new().set("kind", "card");
    let err = repo
        .get_single_result(BY_KIND, &params)
        .await
        .expect_err("expected no-result error");
    assert!(matches!(err, TesoroError::NoResult { .. }));

    repo.save(&card_method("Ada")).await.unwrap();
    let method = repo.get_single_result(BY_KIND, &params).await.unwrap();
    assert!(method.as_card().is_some());

    repo.save(&card_method("Grace")).await.unwrap();
    let err = repo
        .get_single_result(BY_KIND, &params)
        .await
        .expect_err("expected non-unique error");
    assert!(matches!(err, TesoroError::NonUniqueResult { .. }));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_get_all() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    assert!(repo.get_all().await.unwrap().is_empty());

    repo.save(&bank_method("Ada")).await.unwrap();
    repo.save(&card_method("Grace")).await.unwrap();

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_count_by_column() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    repo.save(&bank_method("Ada")).await.unwrap();
    repo.save(&bank_method("Grace")).await.unwrap();
    repo.save(&card_method("Ada")).await.unwrap();

    assert_eq!(repo.count("kind", "bank").await.unwrap(), 2);
    assert_eq!(repo.count("kind", "card").await.unwrap(), 1);
    assert_eq!(repo.count("kind", "crypto").await.unwrap(), 0);
    assert_eq!(repo.count("holder_name", "Ada").await.unwrap(), 2);

    let err = repo
        .count("no_such_column", "x")
        .await
        .expect_err("expected validation error");
    assert!(matches!(err, TesoroError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_create_query_execute() {
    let db = TestDatabase::new().await;
    let repo = MySqlPaymentMethodRepository::new(db.session());

    repo.save(&bank_method("Ada")).await.unwrap();
    repo.save(&bank_method("Grace")).await.unwrap();

    let affected = repo
        .create_query("UPDATE payment_methods SET holder_name = :name WHERE kind = :kind")
        .set_parameter("name", "Renamed")
        .set_parameter("kind", "bank")
        .execute()
        .await
        .expect("Update failed");
    assert_eq!(affected, 2);

    assert_eq!(repo.count("holder_name", "Renamed").await.unwrap(), 2);
}
