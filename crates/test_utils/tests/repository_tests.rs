//! Repository tests against a PostgreSQL testcontainer
//!
//! `#[ignore]`d for plain `cargo test`; run with `cargo test -- --ignored`
//! where a Docker daemon is available.

use chrono::Utc;

use core_kernel::PaymentId;
use domain_payment::{Payment, PaymentInstrument, PaymentStatus};
use infra_db::{MerchantRepository, OrderRepository, PaymentRepository};
use test_utils::{TestDatabase, TestOrderBuilder};

async fn seeded_merchant_id(db: &TestDatabase) -> core_kernel::MerchantId {
    MerchantRepository::new(db.pool.clone())
        .find_by_email(&db.seed.email)
        .await
        .expect("lookup")
        .expect("seeded merchant present")
        .id
}

fn upi_payment(order: &domain_order::Order) -> Payment {
    let validated = PaymentInstrument::Upi {
        vpa: "payer@okhdfc".to_string(),
    }
    .validate(Utc::now())
    .expect("valid vpa");
    Payment::admit(order, validated)
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn credentials_resolve_only_on_exact_pair() {
    let db = TestDatabase::new().await.expect("container");
    let repo = MerchantRepository::new(db.pool.clone());

    let found = repo
        .find_by_credentials(&db.seed.api_key, &db.seed.api_secret)
        .await
        .expect("lookup");
    assert_eq!(found.expect("merchant").email, db.seed.email);

    let wrong_secret = repo
        .find_by_credentials(&db.seed.api_key, "wrong")
        .await
        .expect("lookup");
    assert!(wrong_secret.is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn order_round_trips_with_notes_and_currency() {
    let db = TestDatabase::new().await.expect("container");
    let merchant_id = seeded_merchant_id(&db).await;
    let repo = OrderRepository::new(db.pool.clone());

    let order = TestOrderBuilder::new()
        .with_merchant(merchant_id)
        .with_amount(2500)
        .with_currency("USD")
        .with_receipt("rcpt-42")
        .with_note("sku", "widget-9")
        .build();
    let stored = repo.create(order).await.expect("insert");

    let fetched = repo
        .fetch(&stored.id)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(fetched.amount.minor_units(), 2500);
    assert_eq!(fetched.currency.code(), "USD");
    assert_eq!(fetched.receipt.as_deref(), Some("rcpt-42"));
    assert_eq!(fetched.notes["sku"], "widget-9");
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn missing_order_fetch_is_none() {
    let db = TestDatabase::new().await.expect("container");
    let repo = OrderRepository::new(db.pool.clone());

    let absent = repo
        .fetch(&"order_0000000000000000".parse().expect("parse"))
        .await
        .expect("fetch");
    assert!(absent.is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn payment_finalization_round_trips() {
    let db = TestDatabase::new().await.expect("container");
    let merchant_id = seeded_merchant_id(&db).await;
    let orders = OrderRepository::new(db.pool.clone());
    let payments = PaymentRepository::new(db.pool.clone());

    let order = orders
        .create(TestOrderBuilder::new().with_merchant(merchant_id).build())
        .await
        .expect("order");

    let mut payment = upi_payment(&order);
    payments.insert_processing(&payment).await.expect("insert");

    let processing = payments
        .fetch(&payment.id)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(processing.status, PaymentStatus::Processing);

    payment.finalize(false).expect("finalize");
    payments.finalize(&payment).await.expect("update");

    let failed = payments
        .fetch(&payment.id)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(failed.error_code.as_deref(), Some("PAYMENT_FAILED"));
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn finalizing_an_unknown_payment_reports_not_found() {
    let db = TestDatabase::new().await.expect("container");
    let merchant_id = seeded_merchant_id(&db).await;
    let orders = OrderRepository::new(db.pool.clone());
    let payments = PaymentRepository::new(db.pool.clone());

    let order = orders
        .create(TestOrderBuilder::new().with_merchant(merchant_id).build())
        .await
        .expect("order");

    let mut payment = upi_payment(&order);
    payment.finalize(true).expect("finalize");
    let err = payments.finalize(&payment).await.expect_err("no row");
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "requires a Docker daemon for the PostgreSQL testcontainer"]
async fn list_for_merchant_is_newest_first() {
    let db = TestDatabase::new().await.expect("container");
    let merchant_id = seeded_merchant_id(&db).await;
    let orders = OrderRepository::new(db.pool.clone());
    let payments = PaymentRepository::new(db.pool.clone());

    let order = orders
        .create(TestOrderBuilder::new().with_merchant(merchant_id).build())
        .await
        .expect("order");

    let mut ids: Vec<PaymentId> = Vec::new();
    for _ in 0..3 {
        // Distinct created_at values so the ordering is observable.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let payment = upi_payment(&order);
        payments.insert_processing(&payment).await.expect("insert");
        ids.push(payment.id);
    }

    let listed = payments
        .list_for_merchant(&merchant_id)
        .await
        .expect("list");
    let listed_ids: Vec<&PaymentId> = listed.iter().map(|p| &p.id).collect();
    assert_eq!(listed_ids.len(), 3);
    assert_eq!(listed_ids[0], &ids[2]);
    assert_eq!(listed_ids[2], &ids[0]);
}
