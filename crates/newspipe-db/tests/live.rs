//! Live integration tests for newspipe-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh Postgres database from the sqlx test harness and
//! calls `init_schema` itself (there are no migration files to apply). The
//! tests are `#[ignore]`d so the default suite passes without a database;
//! run them with `cargo test -- --ignored` and a reachable `DATABASE_URL`.

use chrono::{TimeZone, Utc};
use newspipe_core::Article;
use newspipe_db::{count_by_source, init_schema, insert_article, ping, recent_articles};

fn article(url: &str, title: &str, source: &str) -> Article {
    Article {
        title: title.to_string(),
        source: source.to_string(),
        url: url.to_string(),
        publish_time: Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap(),
        content: "body".to_string(),
        topic: "general".to_string(),
    }
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn init_schema_is_idempotent(pool: sqlx::PgPool) {
    init_schema(&pool).await.expect("first init should succeed");
    init_schema(&pool)
        .await
        .expect("second init should also succeed");
    ping(&pool).await.expect("pool should be healthy");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn insert_returns_true_for_new_row(pool: sqlx::PgPool) {
    init_schema(&pool).await.unwrap();

    let inserted = insert_article(&pool, &article("https://example.com/a", "A", "BBC"))
        .await
        .expect("insert should succeed");
    assert!(inserted);
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn duplicate_url_is_a_no_op_and_first_write_wins(pool: sqlx::PgPool) {
    init_schema(&pool).await.unwrap();

    let first = article("https://example.com/dup", "Original Title", "BBC");
    let second = article("https://example.com/dup", "Different Title", "TechCrunch");

    assert!(insert_article(&pool, &first).await.unwrap());
    assert!(!insert_article(&pool, &second).await.unwrap());

    let rows = recent_articles(&pool, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Original Title");
    assert_eq!(rows[0].source, "BBC");
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn second_identical_run_adds_no_rows(pool: sqlx::PgPool) {
    init_schema(&pool).await.unwrap();

    let batch = [
        article("https://example.com/1", "One", "BBC"),
        article("https://example.com/2", "Two", "BBC"),
        article("https://example.com/3", "Three", "TechCrunch"),
    ];

    for a in &batch {
        assert!(insert_article(&pool, a).await.unwrap());
    }
    for a in &batch {
        assert!(!insert_article(&pool, a).await.unwrap());
    }

    let rows = recent_articles(&pool, 10).await.unwrap();
    assert_eq!(rows.len(), batch.len());
}

#[sqlx::test(migrations = false)]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn count_by_source_groups_and_orders(pool: sqlx::PgPool) {
    init_schema(&pool).await.unwrap();

    insert_article(&pool, &article("https://example.com/1", "One", "BBC"))
        .await
        .unwrap();
    insert_article(&pool, &article("https://example.com/2", "Two", "BBC"))
        .await
        .unwrap();
    insert_article(&pool, &article("https://example.com/3", "Three", "TechCrunch"))
        .await
        .unwrap();

    let counts = count_by_source(&pool).await.unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].source, "BBC");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].source, "TechCrunch");
    assert_eq!(counts[1].count, 1);
}
