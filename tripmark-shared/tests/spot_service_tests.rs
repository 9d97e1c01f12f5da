/// Integration tests for the spot service
///
/// Covers validation, the ownership gate, and the city filter against fresh
/// in-memory SQLite databases. Run with: cargo test --test spot_service_tests

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tripmark_shared::db::migrations::run_migrations;
use tripmark_shared::models::spot::Spot;
use tripmark_shared::models::user::{CreateUser, User};
use tripmark_shared::spots::{SpotError, SpotInput, SpotService};

/// One immortal connection so the in-memory database survives the whole test
async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    run_migrations(&pool).await.expect("migrations should apply");
    pool
}

/// Password checks are not under test here, so a placeholder hash is enough
async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash: "test_hash".to_string(),
        },
    )
    .await
    .expect("user should insert")
    .id
}

fn input(name: &str) -> SpotInput {
    SpotInput {
        name: name.to_string(),
        ..SpotInput::default()
    }
}

#[tokio::test]
async fn test_create_round_trips_all_fields() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    let created = service
        .create(
            alice,
            SpotInput {
                name: "Kinkaku-ji".to_string(),
                city: Some("Kyoto".to_string()),
                comment: Some("golden pavilion".to_string()),
                lat: Some("35.0394".to_string()),
                lng: Some("135.7292".to_string()),
            },
        )
        .await
        .expect("create should succeed");

    let fetched = service
        .get(alice, created.id)
        .await
        .expect("owner read should succeed");

    assert_eq!(fetched.name, "Kinkaku-ji");
    assert_eq!(fetched.city.as_deref(), Some("Kyoto"));
    assert_eq!(fetched.comment.as_deref(), Some("golden pavilion"));
    assert_eq!(fetched.lat, Some(35.0394));
    assert_eq!(fetched.lng, Some(135.7292));
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    let err = service
        .create(alice, input("   "))
        .await
        .expect_err("blank name should be rejected");

    assert!(matches!(err, SpotError::Validation(_)));
}

#[tokio::test]
async fn test_listing_is_scoped_to_the_owner() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    service.create(alice, input("First")).await.expect("create");
    service.create(alice, input("Second")).await.expect("create");
    service.create(bob, input("Other")).await.expect("create");

    let alices = service.list(alice, None).await.expect("list");
    let bobs = service.list(bob, None).await.expect("list");

    let names: Vec<&str> = alices.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].name, "Other");
}

#[tokio::test]
async fn test_city_filter_is_a_case_sensitive_substring_match() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    service
        .create(
            alice,
            SpotInput {
                name: "Night market".to_string(),
                city: Some("Taipei".to_string()),
                ..SpotInput::default()
            },
        )
        .await
        .expect("create");
    service
        .create(
            alice,
            SpotInput {
                name: "Temple".to_string(),
                city: Some("Kyoto".to_string()),
                ..SpotInput::default()
            },
        )
        .await
        .expect("create");
    service.create(alice, input("No city")).await.expect("create");

    let matched = service.list(alice, Some("aip")).await.expect("list");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Night market");

    // Different case must not match
    let cased = service.list(alice, Some("taipei")).await.expect("list");
    assert!(cased.is_empty());

    // An empty filter behaves like no filter at all
    let unfiltered = service.list(alice, Some("")).await.expect("list");
    assert_eq!(unfiltered.len(), 3);
}

#[tokio::test]
async fn test_get_distinguishes_missing_from_foreign() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let spot = service.create(alice, input("Mine")).await.expect("create");

    let missing = service.get(alice, 9999).await.expect_err("missing id");
    assert!(matches!(missing, SpotError::NotFound));

    let foreign = service.get(bob, spot.id).await.expect_err("foreign spot");
    assert!(matches!(foreign, SpotError::Forbidden));
}

#[tokio::test]
async fn test_update_checks_ownership_before_validating() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let spot = service.create(alice, input("Mine")).await.expect("create");

    // Even an invalid payload must not leak past the ownership gate
    let err = service
        .update(bob, spot.id, input(""))
        .await
        .expect_err("foreign update should fail");
    assert!(matches!(err, SpotError::Forbidden));

    let err = service
        .update(alice, spot.id, input(""))
        .await
        .expect_err("blank name should be rejected");
    assert!(matches!(err, SpotError::Validation(_)));
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    let spot = service
        .create(
            alice,
            SpotInput {
                name: "Old name".to_string(),
                city: Some("Taipei".to_string()),
                comment: Some("old".to_string()),
                lat: Some("25.0".to_string()),
                lng: Some("121.5".to_string()),
            },
        )
        .await
        .expect("create");

    let updated = service
        .update(
            alice,
            spot.id,
            SpotInput {
                name: "New name".to_string(),
                city: None,
                comment: None,
                lat: None,
                lng: None,
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.name, "New name");
    assert_eq!(updated.city, None);
    assert_eq!(updated.comment, None);
    assert_eq!(updated.lat, None);
    assert_eq!(updated.lng, None);

    let persisted = Spot::find_by_id(&pool, spot.id)
        .await
        .expect("lookup")
        .expect("spot should still exist");
    assert_eq!(persisted.name, "New name");
    assert_eq!(persisted.city, None);
}

#[tokio::test]
async fn test_coordinates_are_stored_verbatim() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    // Empty strings mean "not provided"
    let spot = service
        .create(
            alice,
            SpotInput {
                name: "Somewhere".to_string(),
                lat: Some("".to_string()),
                lng: Some("".to_string()),
                ..SpotInput::default()
            },
        )
        .await
        .expect("create");
    assert_eq!(spot.lat, None);
    assert_eq!(spot.lng, None);

    // No range clamping: 91 is not a latitude, but it parses and is kept
    let updated = service
        .update(
            alice,
            spot.id,
            SpotInput {
                name: "Somewhere".to_string(),
                lat: Some("91".to_string()),
                lng: Some("-200.5".to_string()),
                ..SpotInput::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.lat, Some(91.0));
    assert_eq!(updated.lng, Some(-200.5));
}

#[tokio::test]
async fn test_non_numeric_coordinates_are_rejected() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;

    let err = service
        .create(
            alice,
            SpotInput {
                name: "Somewhere".to_string(),
                lat: Some("north".to_string()),
                ..SpotInput::default()
            },
        )
        .await
        .expect_err("bad latitude should be rejected");

    match err {
        SpotError::Validation(message) => assert!(message.contains("Latitude")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let pool = test_pool().await;
    let service = SpotService::new(pool.clone());
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;

    let spot = service.create(alice, input("Mine")).await.expect("create");

    let err = service
        .delete(bob, spot.id)
        .await
        .expect_err("foreign delete should fail");
    assert!(matches!(err, SpotError::Forbidden));

    service
        .delete(alice, spot.id)
        .await
        .expect("owner delete should succeed");

    let gone = Spot::find_by_id(&pool, spot.id)
        .await
        .expect("lookup");
    assert!(gone.is_none());

    // The second delete finds nothing and says so
    let err = service
        .delete(alice, spot.id)
        .await
        .expect_err("second delete should fail");
    assert!(matches!(err, SpotError::NotFound));
}
