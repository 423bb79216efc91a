use anyhow::Result;
use buzz_server::storage::{
    run_migrations, seed_buzz, BuzzFilter, BuzzInsert, BuzzRepository, BuzzUpdate,
    PgBuzzRepository, SEED_URLS,
};
use chrono::{TimeZone, Utc};
use serial_test::serial;

mod common;

async fn seeded_repository() -> Result<PgBuzzRepository> {
    let pool = common::setup_test_db().await;
    run_migrations(&pool).await?;
    seed_buzz(&pool, true).await?;
    Ok(PgBuzzRepository::new(pool))
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_seed_and_list() -> Result<()> {
    let repo = seeded_repository().await?;

    let all = repo.list(BuzzFilter::default()).await?;
    let urls: Vec<&str> = all.iter().map(|b| b.url.as_str()).collect();
    assert_eq!(urls, SEED_URLS.to_vec());
    assert_eq!(all[0].id, 1, "重設後序號應從 1 開始");

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_list_filters_and_limits() -> Result<()> {
    let repo = seeded_repository().await?;

    let filtered = repo
        .list(BuzzFilter {
            urltext: Some("waffle".to_string()),
            limit: None,
        })
        .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].url, "http://www.jobwaffle.com");

    let limited = repo
        .list(BuzzFilter {
            urltext: Some("http://".to_string()),
            limit: Some(2),
        })
        .await?;
    assert_eq!(limited.len(), 2);

    // '%' 視為一般字元
    let literal = repo
        .list(BuzzFilter {
            urltext: Some("%".to_string()),
            limit: None,
        })
        .await?;
    assert!(literal.is_empty());

    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
async fn test_crud_cycle() -> Result<()> {
    let repo = seeded_repository().await?;
    let pub_date = Utc.with_ymd_and_hms(2017, 1, 3, 12, 0, 0).unwrap();

    let created = repo
        .create(BuzzInsert {
            url: "http://example.com".to_string(),
            pub_date: Some(pub_date),
        })
        .await?;
    assert_eq!(created.pub_date, pub_date);

    let fetched = repo.get_by_id(created.id).await?;
    assert_eq!(fetched.as_ref(), Some(&created));

    let updated = repo
        .update(
            created.id,
            BuzzUpdate {
                url: Some("http://example.org".to_string()),
                pub_date: None,
            },
        )
        .await?
        .expect("更新的項目應存在");
    assert_eq!(updated.url, "http://example.org");
    assert_eq!(updated.pub_date, pub_date);

    assert!(repo.delete(created.id).await?);
    assert!(!repo.delete(created.id).await?);
    assert_eq!(repo.get_by_id(created.id).await?, None);
    assert_eq!(repo.update(created.id, BuzzUpdate::default()).await?, None);

    Ok(())
}
