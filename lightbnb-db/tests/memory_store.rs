//! Store contract exercised against the in-memory implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use lightbnb_db::{MemoryStore, NewProperty, NewUser, PropertyFilter, RowLimit, Store};

fn property(owner_id: i32, title: &str, city: &str, cost_per_night: i32) -> NewProperty {
    NewProperty {
        owner_id,
        title: title.into(),
        description: "description".into(),
        thumbnail_photo_url: format!("https://example.com/{title}/thumb.jpg"),
        cover_photo_url: format!("https://example.com/{title}/cover.jpg"),
        cost_per_night,
        street: "100 Water St".into(),
        city: city.into(),
        province: "British Columbia".into(),
        post_code: "V6B 1B8".into(),
        country: "Canada".into(),
        parking_spaces: 1,
        number_of_bathrooms: 1,
        number_of_bedrooms: 2,
    }
}

/// Owner with six reviewed listings, a guest with a booking history.
///
/// | title   | city        | cost   | ratings |
/// |---------|-------------|--------|---------|
/// | cabin   | Vancouver   | 4_500  | 3       |
/// | loft    | Vancouver   | 5_000  | 5, 4    |
/// | condo   | Victoria    | 9_950  | 4       |
/// | house   | North Vanc. | 15_099 | 2, 3    |
/// | villa   | Whistler    | 15_100 | 5       |
/// | chalet  | Whistler    | 30_000 | 4, 5    |
/// | shed    | Vancouver   | 1_000  | (none)  |
async fn seeded() -> (MemoryStore, i32, i32) {
    let store = MemoryStore::new();
    let owner = store
        .add_user(&NewUser::new("Owner", "owner@example.com", "pw"))
        .await
        .unwrap();
    let guest = store
        .add_user(&NewUser::new("Guest", "guest@example.com", "pw"))
        .await
        .unwrap();

    let listings = [
        ("cabin", "Vancouver", 4_500, vec![3]),
        ("loft", "Vancouver", 5_000, vec![5, 4]),
        ("condo", "Victoria", 9_950, vec![4]),
        ("house", "North Vancouver", 15_099, vec![2, 3]),
        ("villa", "Whistler", 15_100, vec![5]),
        ("chalet", "Whistler", 30_000, vec![4, 5]),
        ("shed", "Vancouver", 1_000, vec![]),
    ];
    for (title, city, cost, ratings) in listings {
        let stored = store
            .add_property(&property(owner.id, title, city, cost))
            .await
            .unwrap();
        for rating in ratings {
            store.add_review(guest.id, stored.id, rating).unwrap();
        }
    }

    (store, owner.id, guest.id)
}

#[tokio::test]
async fn email_lookup_ignores_case() {
    let (store, _, _) = seeded().await;

    let lower = store.get_user_with_email("owner@example.com").await.unwrap();
    let upper = store.get_user_with_email("OWNER@EXAMPLE.COM").await.unwrap();
    assert!(lower.is_some());
    assert_eq!(lower, upper);
}

#[tokio::test]
async fn lookups_miss_with_none() {
    let (store, _, _) = seeded().await;

    assert!(store
        .get_user_with_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
    assert!(store.get_user_with_id(9_999).await.unwrap().is_none());
}

#[tokio::test]
async fn added_user_is_found_by_email_and_id() {
    let store = MemoryStore::new();
    let input = NewUser::new("Kira Fox", "kira@example.com", "$2a$10$hash");

    let created = store.add_user(&input).await.unwrap();
    let by_email = store
        .get_user_with_email("kira@example.com")
        .await
        .unwrap()
        .expect("user by email");

    assert_eq!(by_email.name, input.name);
    assert_eq!(by_email.email, input.email);
    assert_eq!(by_email.password, input.password);
    assert_eq!(by_email.id, created.id);
    assert_eq!(
        store.get_user_with_id(created.id).await.unwrap(),
        Some(created)
    );
}

#[tokio::test]
async fn mixed_case_email_round_trips() {
    let store = MemoryStore::new();
    let input = NewUser::new("Ada", "Ada@Example.com", "pw");

    let created = store.add_user(&input).await.unwrap();

    for casing in ["Ada@Example.com", "ada@example.com", "ADA@EXAMPLE.COM"] {
        let found = store.get_user_with_email(casing).await.unwrap();
        assert_eq!(found.as_ref(), Some(&created), "lookup by {casing}");
    }
    // stored as given
    assert_eq!(created.email, "Ada@Example.com");
}

#[tokio::test]
async fn emails_differing_only_in_case_conflict() {
    let store = MemoryStore::new();
    store
        .add_user(&NewUser::new("Ada", "Ada@Example.com", "pw"))
        .await
        .unwrap();

    let err = store
        .add_user(&NewUser::new("Other Ada", "ada@example.com", "pw"))
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "expected conflict, got {err}");
}

#[tokio::test]
async fn unfiltered_search_is_capped_and_cheapest_first() {
    let (store, _, _) = seeded().await;

    let rows = store
        .get_all_properties(&PropertyFilter::default(), RowLimit::new(5))
        .await
        .unwrap();

    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.average_rating.is_some()));
    assert!(rows
        .windows(2)
        .all(|w| w[0].property.cost_per_night <= w[1].property.cost_per_night));
    // the unreviewed shed is cheapest but never listed
    assert!(rows.iter().all(|r| r.property.title != "shed"));
}

#[tokio::test]
async fn price_bounds_use_major_units_inclusively() {
    let (store, _, _) = seeded().await;

    let filter = PropertyFilter::new().price_range(Some(50), Some(150));
    let rows = store
        .get_all_properties(&filter, RowLimit::new(10))
        .await
        .unwrap();

    let titles: Vec<_> = rows.iter().map(|r| r.property.title.as_str()).collect();
    assert_eq!(titles, ["loft", "condo", "house"]);
    assert!(rows.iter().all(|r| {
        let major = r.property.cost_per_night / 100;
        (50..=150).contains(&major)
    }));
}

#[tokio::test]
async fn minimum_rating_filters_on_average() {
    let (store, _, _) = seeded().await;

    let rows = store
        .get_all_properties(&PropertyFilter::new().minimum_rating(4.0), RowLimit::new(10))
        .await
        .unwrap();

    let titles: Vec<_> = rows.iter().map(|r| r.property.title.as_str()).collect();
    assert_eq!(titles, ["loft", "condo", "villa", "chalet"]);
    assert!(rows.iter().all(|r| r.average_rating.unwrap() >= 4.0));
}

#[tokio::test]
async fn city_filter_is_case_sensitive_substring() {
    let (store, _, _) = seeded().await;

    let matching = store
        .get_all_properties(&PropertyFilter::new().city("Vancouver"), RowLimit::new(10))
        .await
        .unwrap();
    let titles: Vec<_> = matching.iter().map(|r| r.property.title.as_str()).collect();
    assert_eq!(titles, ["cabin", "loft", "house"]);

    let lowercase = store
        .get_all_properties(&PropertyFilter::new().city("vancouver"), RowLimit::new(10))
        .await
        .unwrap();
    assert!(lowercase.is_empty());
}

#[tokio::test]
async fn filters_combine_conjunctively() {
    let (store, owner_id, _) = seeded().await;

    let filter = PropertyFilter::new()
        .city("Whistler")
        .owner_id(owner_id)
        .minimum_rating(4.5);
    let rows = store
        .get_all_properties(&filter, RowLimit::default())
        .await
        .unwrap();

    let titles: Vec<_> = rows.iter().map(|r| r.property.title.as_str()).collect();
    assert_eq!(titles, ["villa", "chalet"]);

    let nobody = store
        .get_all_properties(&PropertyFilter::new().owner_id(owner_id + 100), RowLimit::default())
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn past_reservations_only_oldest_first() {
    let (store, owner_id, guest_id) = seeded().await;
    let today = Utc::now().date_naive();

    // property ids follow insertion order: 1 cabin, 2 loft, 3 condo, 7 shed
    store
        .add_reservation(guest_id, 3, today - Duration::days(30), today - Duration::days(25))
        .unwrap();
    store
        .add_reservation(guest_id, 1, today - Duration::days(90), today - Duration::days(80))
        .unwrap();
    store
        .add_reservation(guest_id, 2, today + Duration::days(5), today + Duration::days(9))
        .unwrap();
    store
        .add_reservation(guest_id, 7, today - Duration::days(60), today - Duration::days(55))
        .unwrap();
    store
        .add_reservation(owner_id, 2, today - Duration::days(20), today - Duration::days(18))
        .unwrap();

    let rows = store
        .get_all_reservations(guest_id, RowLimit::new(10))
        .await
        .unwrap();

    let titles: Vec<_> = rows.iter().map(|r| r.property.title.as_str()).collect();
    assert_eq!(titles, ["cabin", "condo"]);
    assert!(rows.iter().all(|r| r.end_date < today));
    assert!(rows.windows(2).all(|w| w[0].start_date <= w[1].start_date));
    assert_eq!(rows[0].average_rating, Some(3.0));
    assert_eq!(rows[1].property.city, "Victoria");

    let capped = store
        .get_all_reservations(guest_id, RowLimit::new(1))
        .await
        .unwrap();
    assert_eq!(capped.len(), 1);
    assert_eq!(capped[0].property.title, "cabin");
}

#[tokio::test]
async fn added_property_echoes_input() {
    let (store, owner_id, _) = seeded().await;
    let input = property(owner_id, "treehouse", "Tofino", 22_000);

    let created = store.add_property(&input).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.owner_id, input.owner_id);
    assert_eq!(created.title, input.title);
    assert_eq!(created.description, input.description);
    assert_eq!(created.thumbnail_photo_url, input.thumbnail_photo_url);
    assert_eq!(created.cover_photo_url, input.cover_photo_url);
    assert_eq!(created.cost_per_night, input.cost_per_night);
    assert_eq!(created.street, input.street);
    assert_eq!(created.city, input.city);
    assert_eq!(created.province, input.province);
    assert_eq!(created.post_code, input.post_code);
    assert_eq!(created.country, input.country);
    assert_eq!(created.parking_spaces, input.parking_spaces);
    assert_eq!(created.number_of_bathrooms, input.number_of_bathrooms);
    assert_eq!(created.number_of_bedrooms, input.number_of_bedrooms);
}

#[tokio::test]
async fn shared_store_serves_concurrent_callers() {
    let (store, _, _) = seeded().await;
    let store: Arc<dyn Store> = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                let email = format!("user{i}@example.com");
                store
                    .add_user(&NewUser::new(format!("User {i}"), email.clone(), "pw"))
                    .await
                    .unwrap();
                store
                    .get_user_with_email(&email)
                    .await
                    .unwrap()
                    .map(|u| u.email)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let email = handle.await.expect("task panicked");
        assert_eq!(email, Some(format!("user{i}@example.com")));
    }
}
