//! Integration tests for the filtered count + page list queries.
//!
//! Exercises the repository layer against a real database:
//! - offset / window arithmetic against actual row counts
//! - pages beyond the end
//! - filter round-trips
//! - partitioning across pages, including tied sort keys

use std::collections::HashSet;

use chrono::{Duration, TimeZone, Utc};
use eventhub_core::event::EventWindow;
use eventhub_core::pagination::{PageRequest, PaginationMeta};
use eventhub_core::review::ModerationStatus;
use eventhub_core::sorting::{EventSortField, ReviewSortField, Sort, SortOrder};
use eventhub_core::types::{DbId, Timestamp};
use eventhub_db::models::category::CreateCategory;
use eventhub_db::models::event::{CreateEvent, EventFilter};
use eventhub_db::models::review::{CreateReview, ModerateReview, ReviewFilter};
use eventhub_db::models::user::CreateUser;
use eventhub_db::repositories::{CategoryRepo, EventRepo, ReviewRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
        role: "user".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().user_id
}

fn new_event(name: &str, date: Timestamp, category_id: Option<DbId>) -> CreateEvent {
    CreateEvent {
        category_id,
        name: name.to_string(),
        description: None,
        location: "Main Hall".to_string(),
        event_date: date,
        attendees: None,
        image_url: None,
    }
}

/// Seed `n` events with distinct dates one day apart.
async fn seed_events(pool: &PgPool, owner: DbId, n: usize) -> Vec<DbId> {
    let base = Utc.with_ymd_and_hms(2030, 1, 1, 18, 0, 0).unwrap();
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let date = base + Duration::days(i as i64);
        let event = EventRepo::create(pool, owner, &new_event(&format!("Event {i:02}"), date, None))
            .await
            .unwrap();
        ids.push(event.event_id);
    }
    ids
}

async fn fetch_page(
    pool: &PgPool,
    filter: &EventFilter,
    sort: &Sort<EventSortField>,
    page: i64,
    limit: i64,
) -> (Vec<DbId>, PaginationMeta) {
    let request = PageRequest::new(page, limit);
    let total = EventRepo::count(pool, filter).await.unwrap();
    let rows = EventRepo::list(pool, filter, sort, &request).await.unwrap();
    (
        rows.into_iter().map(|e| e.event_id).collect(),
        PaginationMeta::new(&request, total),
    )
}

// ---------------------------------------------------------------------------
// Window arithmetic
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_sizes_match_window(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    seed_events(&pool, owner, 23).await;
    let sort = Sort::<EventSortField>::default();
    let filter = EventFilter::default();

    for limit in [1, 5, 10, 23, 50] {
        for page in 1..=6 {
            let (rows, meta) = fetch_page(&pool, &filter, &sort, page, limit).await;
            assert_eq!(meta.total, 23);
            assert_eq!(rows.len() as i64, meta.expected_rows(), "page={page} limit={limit}");
        }
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_past_end_is_empty_with_same_totals(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    seed_events(&pool, owner, 12).await;
    let sort = Sort::<EventSortField>::default();

    let (rows, meta) = fetch_page(&pool, &EventFilter::default(), &sort, 99, 5).await;
    assert!(rows.is_empty());
    assert_eq!(meta.total, 12);
    assert_eq!(meta.pages, 3);
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pages_partition_dataset_without_ties(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let ids = seed_events(&pool, owner, 17).await;
    let sort = Sort::<EventSortField>::resolve(Some("event_date"), Some("asc"));

    let mut seen = Vec::new();
    for page in 1..=4 {
        let (rows, _) = fetch_page(&pool, &EventFilter::default(), &sort, page, 5).await;
        seen.extend(rows);
    }
    assert_eq!(seen, ids, "pages must cover every row exactly once, in order");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pages_partition_dataset_with_tied_sort_keys(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let same_date = Utc.with_ymd_and_hms(2031, 6, 1, 20, 0, 0).unwrap();
    let mut ids = HashSet::new();
    for i in 0..20 {
        let event = EventRepo::create(&pool, owner, &new_event(&format!("Tie {i}"), same_date, None))
            .await
            .unwrap();
        ids.insert(event.event_id);
    }

    let sort = Sort::<EventSortField>::resolve(Some("event_date"), Some("desc"));
    let mut seen = Vec::new();
    for page in 1..=4 {
        let (rows, _) = fetch_page(&pool, &EventFilter::default(), &sort, page, 6).await;
        seen.extend(rows);
    }

    let unique: HashSet<DbId> = seen.iter().copied().collect();
    assert_eq!(seen.len(), 20, "no row may be repeated across pages");
    assert_eq!(unique, ids, "no row may be skipped across pages");

    // The primary-key tiebreaker follows the sort direction.
    let mut expected: Vec<DbId> = ids.into_iter().collect();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(seen, expected);
}

// ---------------------------------------------------------------------------
// Event filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_event_category_and_window_filters(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let music = CategoryRepo::create(
        &pool,
        &CreateCategory {
            name: "Music".into(),
            description: None,
        },
    )
    .await
    .unwrap();

    let future = Utc::now() + Duration::days(30);
    let past = Utc::now() - Duration::days(30);
    let upcoming_concert = EventRepo::create(
        &pool,
        owner,
        &new_event("Concert", future, Some(music.category_id)),
    )
    .await
    .unwrap();
    EventRepo::create(&pool, owner, &new_event("Old Concert", past, Some(music.category_id)))
        .await
        .unwrap();
    EventRepo::create(&pool, owner, &new_event("Meetup", future, None))
        .await
        .unwrap();

    let filter = EventFilter {
        category_id: Some(music.category_id),
        user_id: None,
        window: Some(EventWindow::Upcoming),
    };
    let (rows, meta) = fetch_page(&pool, &filter, &Sort::default(), 1, 10).await;
    assert_eq!(rows, vec![upcoming_concert.event_id]);
    assert_eq!(meta.total, 1);

    let past_filter = EventFilter {
        window: Some(EventWindow::Past),
        ..EventFilter::default()
    };
    assert_eq!(EventRepo::count(&pool, &past_filter).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Review filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_event_filter_round_trip(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let events = seed_events(&pool, owner, 2).await;

    let mut for_first = Vec::new();
    for (user, rating) in [(alice, 5), (bob, 3)] {
        let review = ReviewRepo::create(
            &pool,
            &CreateReview {
                event_id: events[0],
                user_id: user,
                rating,
                body: "Loved it".into(),
            },
        )
        .await
        .unwrap();
        for_first.push(review.review_id);
    }
    ReviewRepo::create(
        &pool,
        &CreateReview {
            event_id: events[1],
            user_id: alice,
            rating: 1,
            body: "Meh".into(),
        },
    )
    .await
    .unwrap();

    let filter = ReviewFilter {
        event_id: Some(events[0]),
        ..ReviewFilter::default()
    };
    let sort = Sort::<ReviewSortField>::default();
    let rows = ReviewRepo::list(&pool, &filter, &sort, &PageRequest::default())
        .await
        .unwrap();
    let mut got: Vec<DbId> = rows.iter().map(|r| r.review_id).collect();
    got.sort_unstable();
    for_first.sort_unstable();
    assert_eq!(got, for_first);
    assert!(rows.iter().all(|r| r.event_id == events[0]));
    assert_eq!(ReviewRepo::count(&pool, &filter).await.unwrap(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_review_rating_range_status_and_sort(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let events = seed_events(&pool, owner, 1).await;
    let mut review_ids = Vec::new();
    for rating in 1..=5 {
        let user = create_user(&pool, &format!("rater{rating}")).await;
        let review = ReviewRepo::create(
            &pool,
            &CreateReview {
                event_id: events[0],
                user_id: user,
                rating,
                body: format!("{rating} stars"),
            },
        )
        .await
        .unwrap();
        review_ids.push(review.review_id);
    }

    ReviewRepo::moderate(
        &pool,
        review_ids[4],
        &ModerateReview {
            status: ModerationStatus::Approved,
            notes: Some("fine".into()),
            moderator_id: owner,
        },
    )
    .await
    .unwrap()
    .expect("review exists");

    let ranged = ReviewFilter {
        min_rating: Some(2),
        max_rating: Some(4),
        ..ReviewFilter::default()
    };
    let sort = Sort {
        field: ReviewSortField::Rating,
        order: SortOrder::Asc,
    };
    let rows = ReviewRepo::list(&pool, &ranged, &sort, &PageRequest::default())
        .await
        .unwrap();
    let ratings: Vec<i32> = rows.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![2, 3, 4]);

    let approved = ReviewFilter {
        status: Some(ModerationStatus::Approved),
        ..ReviewFilter::default()
    };
    let rows = ReviewRepo::list(&pool, &approved, &sort, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].moderation_status, "approved");
    assert_eq!(rows[0].moderated_by, Some(owner));
    assert!(rows[0].moderated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_review_violates_unique_constraint(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    let alice = create_user(&pool, "alice").await;
    let events = seed_events(&pool, owner, 1).await;
    let input = CreateReview {
        event_id: events[0],
        user_id: alice,
        rating: 4,
        body: "Nice".into(),
    };

    ReviewRepo::create(&pool, &input).await.unwrap();
    assert!(ReviewRepo::exists_for_event_and_user(&pool, events[0], alice)
        .await
        .unwrap());

    let err = ReviewRepo::create(&pool, &input).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(
                db_err.constraint(),
                Some(eventhub_db::repositories::review_repo::UQ_EVENT_USER)
            );
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}
