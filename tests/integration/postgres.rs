//! PostgreSQL store tests
//!
//! Need a database reachable through `DATABASE_URL`.
//! Run with: cargo test -- --ignored

use chrono::{DateTime, Duration, Utc};
use sqlx::postgres::PgPoolOptions;

use shareit::{
    error::AppError,
    models::{
        booking::{BookingState, BookingStatus, NewBooking},
        item::CreateItem,
        user::CreateUser,
        Page,
    },
    repository::{BookingStore, ItemStore, Repository, UserStore},
};

async fn connect() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

/// Fresh owner, booker and item, so repeated runs do not see each other's rows
async fn seed(repository: &Repository) -> (i64, i64, i64) {
    let tag = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let mut ids = Vec::new();
    for name in ["owner", "booker"] {
        let user = repository
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: format!("{}-{}@example.com", name, tag),
            })
            .await
            .unwrap();
        ids.push(user.id);
    }
    let item = repository
        .items
        .create(
            ids[0],
            &CreateItem {
                name: "Drill".to_string(),
                description: "Cordless drill".to_string(),
                available: Some(true),
                request_id: None,
            },
        )
        .await
        .unwrap();
    (ids[0], ids[1], item.id)
}

fn booking(
    item_id: i64,
    booker_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: BookingStatus,
) -> NewBooking {
    NewBooking {
        item_id,
        booker_id,
        start_date: start,
        end_date: end,
        status,
    }
}

#[tokio::test]
#[ignore]
async fn test_listing_filters() {
    let repository = connect().await;
    let (owner, booker, item) = seed(&repository).await;
    let now = Utc::now();

    let mut ids = Vec::new();
    for (start, end, status) in [
        (now - Duration::days(10), now - Duration::days(9), BookingStatus::Approved),
        (now - Duration::hours(2), now + Duration::hours(2), BookingStatus::Approved),
        (now + Duration::days(3), now + Duration::days(4), BookingStatus::Waiting),
    ] {
        let created = repository
            .bookings
            .create(&booking(item, booker, start, end, status))
            .await
            .unwrap();
        ids.push(created.id);
    }
    let (past, current, future) = (ids[0], ids[1], ids[2]);
    let page = Page::new(Some(0), Some(10)).unwrap();

    let listed = |list: Vec<shareit::models::booking::Booking>| {
        list.into_iter().map(|b| b.id).collect::<Vec<_>>()
    };

    for (state, expected) in [
        (BookingState::All, vec![future, current, past]),
        (BookingState::Past, vec![past]),
        (BookingState::Current, vec![current]),
        (BookingState::Future, vec![future]),
        (BookingState::Waiting, vec![future]),
        (BookingState::Rejected, vec![]),
    ] {
        let rows = repository
            .bookings
            .list_by_booker(booker, state, now, page)
            .await
            .unwrap();
        assert_eq!(listed(rows), expected, "booker listing {}", state.as_str());

        let rows = repository
            .bookings
            .list_by_owner(owner, state, now, page)
            .await
            .unwrap();
        assert_eq!(listed(rows), expected, "owner listing {}", state.as_str());
    }

    let second_page = Page::new(Some(1), Some(1)).unwrap();
    let rows = repository
        .bookings
        .list_by_booker(booker, BookingState::All, now, second_page)
        .await
        .unwrap();
    assert_eq!(listed(rows), vec![current]);
}

#[tokio::test]
#[ignore]
async fn test_exclusion_constraint_maps_to_overlap() {
    let repository = connect().await;
    let (_, booker, item) = seed(&repository).await;
    let start = Utc::now() + Duration::days(1);
    let end = start + Duration::days(1);

    let first = repository
        .bookings
        .create(&booking(item, booker, start, end, BookingStatus::Waiting))
        .await
        .unwrap();

    let clash = repository
        .bookings
        .create(&booking(item, booker, start, end, BookingStatus::Waiting))
        .await;
    assert!(matches!(clash, Err(AppError::BookingOverlap(_))));

    repository
        .bookings
        .update_status(first.id, BookingStatus::Rejected)
        .await
        .unwrap();
    repository
        .bookings
        .create(&booking(item, booker, start, end, BookingStatus::Approved))
        .await
        .unwrap();

    let clash = repository
        .bookings
        .update_status(first.id, BookingStatus::Approved)
        .await;
    assert!(matches!(clash, Err(AppError::BookingOverlap(_))));
}
