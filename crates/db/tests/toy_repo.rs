//! Integration tests for the toy aggregate tables.
//!
//! Exercises the repository layer against a real database:
//! - Toy insert with tag associations and attachments in one transaction
//! - Diff application (scalar, associations, attachments)
//! - Rollback of the whole diff when one statement fails
//! - Cascade of associations and attachments on delete
//! - Listing filters, ordering and counts

use sqlx::PgPool;
use toycraft_core::pagination::{Pagination, SortOrder};
use toycraft_db::models::master::CreateMaster;
use toycraft_db::models::toy::{CreateToy, ToyFilters, UpdateToy};
use toycraft_db::repositories::{AttachmentRepo, CategoryRepo, MasterRepo, TagRepo, ToyRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_master(pool: &PgPool, user_id: i64) -> i64 {
    MasterRepo::create(
        pool,
        &CreateMaster {
            user_id,
            info: None,
        },
    )
    .await
    .unwrap()
}

async fn category_id(pool: &PgPool, name: &str) -> i64 {
    CategoryRepo::list_all(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap()
}

async fn new_tags(pool: &PgPool, names: &[&str]) -> Vec<i64> {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    TagRepo::create_many(pool, &names).await.unwrap()
}

fn new_toy(master_id: i64, category_id: i64, name: &str) -> CreateToy {
    CreateToy {
        master_id,
        category_id,
        name: name.to_string(),
        description: String::new(),
        price: 50.0,
        quantity: 3,
        tag_ids: vec![],
        attachments: vec![],
    }
}

async fn tag_ids_of(pool: &PgPool, toy_id: i64) -> Vec<i64> {
    let mut ids: Vec<i64> = TagRepo::list_for_toy(pool, toy_id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    ids.sort_unstable();
    ids
}

async fn links_of(pool: &PgPool, toy_id: i64) -> Vec<String> {
    AttachmentRepo::list_for_toy(pool, toy_id)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.link)
        .collect()
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_toy_with_children(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let wooden = category_id(&pool, "Wooden toys").await;
    let tags = new_tags(&pool, &["wood", "bear"]).await;

    let mut input = new_toy(master_id, wooden, "Carved Bear");
    // Repeated tag ids collapse into one association.
    input.tag_ids = vec![tags[0], tags[1], tags[0]];
    input.attachments = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    let toy_id = ToyRepo::create(&pool, &input).await.unwrap();

    let toy = ToyRepo::find_by_id(&pool, toy_id).await.unwrap().unwrap();
    assert_eq!(toy.name, "Carved Bear");
    assert_eq!(toy.master_id, master_id);
    assert_eq!(toy.category_id, wooden);
    assert_eq!(toy.price, 50.0);
    assert_eq!(toy.quantity, 3);

    let mut expected = tags.clone();
    expected.sort_unstable();
    assert_eq!(tag_ids_of(&pool, toy_id).await, expected);
    assert_eq!(links_of(&pool, toy_id).await, vec!["a.jpg", "b.jpg"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_toy_rolls_back_on_bad_tag(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;

    let mut input = new_toy(master_id, dolls, "Rag Doll");
    input.tag_ids = vec![999_999];
    assert!(ToyRepo::create(&pool, &input).await.is_err());

    assert_eq!(ToyRepo::count(&pool, None).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_applies_full_diff(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;
    let puzzles = category_id(&pool, "Puzzles").await;
    let tags = new_tags(&pool, &["t10", "t20", "t30"]).await;

    let mut input = new_toy(master_id, dolls, "Carved Bear");
    input.tag_ids = vec![tags[0], tags[1]];
    input.attachments = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    let toy_id = ToyRepo::create(&pool, &input).await.unwrap();
    let a_id = AttachmentRepo::list_for_toy(&pool, toy_id).await.unwrap()[0].id;

    let matched = ToyRepo::update(
        &pool,
        &UpdateToy {
            id: toy_id,
            category_id: Some(puzzles),
            name: Some("Bear Puzzle".to_string()),
            quantity: Some(0),
            tag_ids_to_add: vec![tags[2]],
            tag_ids_to_delete: vec![tags[0]],
            attachments_to_add: vec!["c.jpg".to_string()],
            attachment_ids_to_delete: vec![a_id],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(matched);

    let toy = ToyRepo::find_by_id(&pool, toy_id).await.unwrap().unwrap();
    assert_eq!(toy.name, "Bear Puzzle");
    assert_eq!(toy.category_id, puzzles);
    assert_eq!(toy.quantity, 0);
    // Untouched columns keep their value.
    assert_eq!(toy.price, 50.0);

    assert_eq!(tag_ids_of(&pool, toy_id).await, vec![tags[1], tags[2]]);
    assert_eq!(links_of(&pool, toy_id).await, vec!["b.jpg", "c.jpg"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_diff_touches_nothing(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;
    let toy_id = ToyRepo::create(&pool, &new_toy(master_id, dolls, "Rag Doll"))
        .await
        .unwrap();
    let before = ToyRepo::find_by_id(&pool, toy_id).await.unwrap().unwrap();

    ToyRepo::update(
        &pool,
        &UpdateToy {
            id: toy_id,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let after = ToyRepo::find_by_id(&pool, toy_id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_of_deleted_toy_matches_nothing(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;
    let tags = new_tags(&pool, &["gift"]).await;
    let toy_id = ToyRepo::create(&pool, &new_toy(master_id, dolls, "Rag Doll"))
        .await
        .unwrap();
    assert!(ToyRepo::delete(&pool, toy_id).await.unwrap());

    let scalar_only = UpdateToy {
        id: toy_id,
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    assert!(!ToyRepo::update(&pool, &scalar_only).await.unwrap());

    // Collection changes must not reach the foreign key check either.
    let with_children = UpdateToy {
        id: toy_id,
        tag_ids_to_add: tags,
        attachments_to_add: vec!["a.jpg".to_string()],
        ..Default::default()
    };
    assert!(!ToyRepo::update(&pool, &with_children).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_attachment_insert_rolls_back_diff(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;
    let tags = new_tags(&pool, &["old", "new"]).await;

    let mut input = new_toy(master_id, dolls, "Rag Doll");
    input.tag_ids = vec![tags[0]];
    let toy_id = ToyRepo::create(&pool, &input).await.unwrap();

    // An empty link violates the attachment CHECK constraint, which fails the
    // last statement of the transaction.
    let result = ToyRepo::update(
        &pool,
        &UpdateToy {
            id: toy_id,
            name: Some("Renamed".to_string()),
            tag_ids_to_add: vec![tags[1]],
            tag_ids_to_delete: vec![tags[0]],
            attachments_to_add: vec![String::new()],
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err());

    let toy = ToyRepo::find_by_id(&pool, toy_id).await.unwrap().unwrap();
    assert_eq!(toy.name, "Rag Doll");
    assert_eq!(tag_ids_of(&pool, toy_id).await, vec![tags[0]]);
    assert!(links_of(&pool, toy_id).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attachment_delete_is_scoped_to_toy(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;

    let mut first = new_toy(master_id, dolls, "First");
    first.attachments = vec!["first.jpg".to_string()];
    let first_id = ToyRepo::create(&pool, &first).await.unwrap();
    let foreign = AttachmentRepo::list_for_toy(&pool, first_id).await.unwrap()[0].id;

    let second_id = ToyRepo::create(&pool, &new_toy(master_id, dolls, "Second"))
        .await
        .unwrap();
    ToyRepo::update(
        &pool,
        &UpdateToy {
            id: second_id,
            attachment_ids_to_delete: vec![foreign],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(links_of(&pool, first_id).await, vec!["first.jpg"]);
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_children(pool: PgPool) {
    let master_id = new_master(&pool, 1).await;
    let dolls = category_id(&pool, "Dolls").await;
    let tags = new_tags(&pool, &["gift"]).await;

    let mut input = new_toy(master_id, dolls, "Rag Doll");
    input.tag_ids = tags.clone();
    input.attachments = vec!["a.jpg".to_string()];
    let toy_id = ToyRepo::create(&pool, &input).await.unwrap();

    assert!(ToyRepo::delete(&pool, toy_id).await.unwrap());
    assert!(ToyRepo::find_by_id(&pool, toy_id).await.unwrap().is_none());

    let associations: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM toys_tags_associations WHERE toy_id = $1")
            .bind(toy_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let attachments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM toys_attachments WHERE toy_id = $1")
            .bind(toy_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(associations, 0);
    assert_eq!(attachments, 0);

    // The tag itself survives.
    assert!(TagRepo::find_by_id(&pool, tags[0]).await.unwrap().is_some());
    assert!(!ToyRepo::delete(&pool, toy_id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_and_counts(pool: PgPool) {
    let alice = new_master(&pool, 1).await;
    let bob = new_master(&pool, 2).await;
    let dolls = category_id(&pool, "Dolls").await;
    let puzzles = category_id(&pool, "Puzzles").await;
    let tags = new_tags(&pool, &["gift"]).await;

    let mut doll = new_toy(alice, dolls, "Rag Doll");
    doll.price = 20.0;
    doll.tag_ids = tags.clone();
    let doll_id = ToyRepo::create(&pool, &doll).await.unwrap();

    let mut puzzle = new_toy(alice, puzzles, "Forest Puzzle");
    puzzle.price = 80.0;
    puzzle.description = "100% wood".to_string();
    let puzzle_id = ToyRepo::create(&pool, &puzzle).await.unwrap();

    let mut other = new_toy(bob, dolls, "Porcelain Doll");
    other.price = 120.0;
    other.quantity = 0;
    let other_id = ToyRepo::create(&pool, &other).await.unwrap();

    let ids = |toys: Vec<toycraft_db::models::toy::Toy>| -> Vec<i64> {
        toys.into_iter().map(|t| t.id).collect()
    };

    // No filters: everything in id order.
    let all = ToyRepo::list(&pool, None, None).await.unwrap();
    assert_eq!(ids(all), vec![doll_id, puzzle_id, other_id]);

    let search = ToyFilters {
        search: Some("doll".to_string()),
        ..Default::default()
    };
    assert_eq!(
        ids(ToyRepo::list(&pool, None, Some(&search)).await.unwrap()),
        vec![doll_id, other_id]
    );
    assert_eq!(ToyRepo::count(&pool, Some(&search)).await.unwrap(), 2);

    // LIKE metacharacters match literally.
    let percent = ToyFilters {
        search: Some("100%".to_string()),
        ..Default::default()
    };
    assert_eq!(
        ids(ToyRepo::list(&pool, None, Some(&percent)).await.unwrap()),
        vec![puzzle_id]
    );

    let price = ToyFilters {
        price_floor: Some(20.0),
        price_ceil: Some(100.0),
        ..Default::default()
    };
    assert_eq!(
        ids(ToyRepo::list(&pool, None, Some(&price)).await.unwrap()),
        vec![doll_id, puzzle_id]
    );

    let in_stock = ToyFilters {
        quantity_floor: Some(1),
        category_ids: vec![dolls],
        ..Default::default()
    };
    assert_eq!(
        ids(ToyRepo::list(&pool, None, Some(&in_stock)).await.unwrap()),
        vec![doll_id]
    );

    let tagged = ToyFilters {
        tag_ids: tags.clone(),
        ..Default::default()
    };
    assert_eq!(ToyRepo::count(&pool, Some(&tagged)).await.unwrap(), 1);

    let newest_first = ToyFilters {
        created_at_order: Some(SortOrder::Desc),
        ..Default::default()
    };
    let page = Pagination::new(2, 0);
    assert_eq!(
        ids(ToyRepo::list(&pool, Some(&page), Some(&newest_first)).await.unwrap()),
        vec![other_id, puzzle_id]
    );

    // Master scope.
    assert_eq!(
        ids(ToyRepo::list_by_master(&pool, alice, None, None).await.unwrap()),
        vec![doll_id, puzzle_id]
    );
    assert_eq!(ToyRepo::count_by_master(&pool, bob, None).await.unwrap(), 1);
    assert_eq!(
        ToyRepo::count_by_master(&pool, alice, Some(&search)).await.unwrap(),
        1
    );
}
