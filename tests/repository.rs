use auronet_forum::domain::category::NewCategory;
use auronet_forum::domain::post::NewPost;
use auronet_forum::domain::topic::NewTopic;
use auronet_forum::domain::types::{
    CategoryId, CategoryName, Email, PasswordHash, PostContent, PostId, Slug, TopicId, TopicTitle,
    UserId, Username, VoteTarget, VoteValue,
};
use auronet_forum::domain::user::{NewAccount, NewUserProfile, UserProfile};
use auronet_forum::pagination::Pagination;
use auronet_forum::repository::{
    CategoryReader, CategoryWriter, DieselRepository, PostListQuery, PostReader, PostWriter,
    RepositoryError, TopicReader, TopicWriter, UserReader, UserWriter, VoteReader, VoteWriter,
};
use auronet_forum::schema::{accounts, topics, votes};
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

mod common;

fn at(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

fn create_user(repo: &DieselRepository, name: &str) -> UserProfile {
    let email = Email::new(format!("{name}@example.com")).expect("valid email");
    let now = Utc::now().naive_utc();
    let (_, profile) = repo
        .create_account(
            &NewAccount {
                email: email.clone(),
                password_hash: PasswordHash::new("$argon2id$stub").expect("non-empty hash"),
                created_at: now,
            },
            &NewUserProfile {
                username: Username::new(name).expect("valid username"),
                email,
                avatar_url: None,
                bio: None,
                created_at: now,
            },
        )
        .expect("should create account");
    profile
}

fn create_category(repo: &DieselRepository, name: &str) -> CategoryId {
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).expect("valid name"),
        slug: Slug::from_title(name),
        description: None,
        icon: None,
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create category")
    .id
}

fn new_topic(
    category_id: CategoryId,
    author_id: UserId,
    title: &str,
    created_at: NaiveDateTime,
) -> NewTopic {
    NewTopic {
        title: TopicTitle::new(title).expect("valid title"),
        slug: Slug::from_title(title),
        category_id,
        author_id,
        content: PostContent::new("opening post").expect("valid content"),
        created_at,
    }
}

fn new_post(topic_id: TopicId, author_id: UserId, created_at: NaiveDateTime) -> NewPost {
    NewPost {
        topic_id,
        author_id,
        content: PostContent::new("reply").expect("valid content"),
        parent_post_id: None,
        created_at,
    }
}

#[test]
fn account_and_profile_have_distinct_ids() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    // An account without a profile shifts the account ids away from the
    // profile ids.
    let mut conn = test_db.pool().get().unwrap();
    diesel::insert_into(accounts::table)
        .values((
            accounts::email.eq("bare@example.com"),
            accounts::password_hash.eq("$argon2id$stub"),
            accounts::created_at.eq(Utc::now().naive_utc()),
        ))
        .execute(&mut conn)
        .expect("should insert bare account");

    let first = create_user(&repo, "alice");
    let second = create_user(&repo, "bob");

    let resolved = repo
        .get_profile_by_account_id(second.auth_user_id)
        .expect("lookup should succeed")
        .expect("profile should exist");
    assert_eq!(resolved.id, second.id);
    assert_ne!(second.id.get(), second.auth_user_id.get());

    let found = repo
        .get_account_by_email(&Email::new("ALICE@example.com").unwrap())
        .expect("lookup should succeed")
        .expect("account should exist");
    assert_eq!(found.id, first.auth_user_id);
}

#[test]
fn duplicate_username_is_a_unique_violation() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    create_user(&repo, "alice");

    let now = Utc::now().naive_utc();
    let result = repo.create_account(
        &NewAccount {
            email: Email::new("other@example.com").unwrap(),
            password_hash: PasswordHash::new("$argon2id$stub").unwrap(),
            created_at: now,
        },
        &NewUserProfile {
            username: Username::new("alice").unwrap(),
            email: Email::new("other@example.com").unwrap(),
            avatar_url: None,
            bio: None,
            created_at: now,
        },
    );

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation { code: "UNIQUE", .. })
    ));
    // The account insert was rolled back with the profile.
    assert!(
        repo.get_account_by_email(&Email::new("other@example.com").unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn categories_are_unique_and_sorted_by_name() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    create_category(&repo, "Off Topic");
    create_category(&repo, "General");

    let names: Vec<String> = repo
        .list_categories()
        .expect("should list")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["General", "Off Topic"]);

    let duplicate = repo.create_category(&NewCategory {
        name: CategoryName::new("General").unwrap(),
        slug: Slug::from_title("General"),
        description: None,
        icon: None,
        created_at: Utc::now().naive_utc(),
    });
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation { code: "UNIQUE", .. })
    ));
}

#[test]
fn topic_creation_writes_topic_and_initial_post() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let author = create_user(&repo, "alice");
    let category_id = create_category(&repo, "General");

    let (topic, post) = repo
        .create_topic(&new_topic(category_id, author.id, "Hello World", at(1_000)))
        .expect("should create topic");

    assert_eq!(topic.slug.as_str(), "hello-world");
    assert_eq!(topic.last_activity_at, topic.created_at);
    assert!(!topic.is_locked);
    assert_eq!(post.topic_id, topic.id);
    assert_eq!(post.author_id, author.id);
    assert_eq!(post.created_at, topic.created_at);
    assert_eq!(repo.count_posts(topic.id).unwrap(), 1);

    let summary = repo
        .get_topic_summary(topic.id)
        .unwrap()
        .expect("summary should exist");
    assert_eq!(summary.author_name.as_deref(), Some("alice"));
    assert_eq!(summary.category_name.as_deref(), Some("General"));
}

#[test]
fn topic_in_unknown_category_leaves_nothing_behind() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let author = create_user(&repo, "alice");

    let result = repo.create_topic(&new_topic(
        CategoryId::new(999).unwrap(),
        author.id,
        "Orphan",
        at(1_000),
    ));

    assert!(matches!(
        result,
        Err(RepositoryError::ConstraintViolation {
            code: "FOREIGN_KEY",
            ..
        })
    ));
    let mut conn = test_db.pool().get().unwrap();
    let count: i64 = topics::table.count().get_result(&mut conn).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn topics_are_listed_by_last_activity() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let author = create_user(&repo, "alice");
    let category_id = create_category(&repo, "General");

    let (older, _) = repo
        .create_topic(&new_topic(category_id, author.id, "Older", at(1_000)))
        .unwrap();
    let (newer, _) = repo
        .create_topic(&new_topic(category_id, author.id, "Newer", at(2_000)))
        .unwrap();

    let ids = |repo: &DieselRepository| -> Vec<TopicId> {
        repo.list_topics(category_id)
            .unwrap()
            .into_iter()
            .map(|s| s.topic.id)
            .collect()
    };
    assert_eq!(ids(&repo), vec![newer.id, older.id]);

    repo.create_post(&new_post(older.id, author.id, at(3_000)))
        .expect("should create post");
    assert_eq!(ids(&repo), vec![older.id, newer.id]);
}

#[test]
fn posting_never_moves_activity_backwards() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let author = create_user(&repo, "alice");
    let category_id = create_category(&repo, "General");
    let (topic, _) = repo
        .create_topic(&new_topic(category_id, author.id, "Clock", at(5_000)))
        .unwrap();

    repo.create_post(&new_post(topic.id, author.id, at(4_000)))
        .expect("should create post");

    let stored = repo.get_topic_by_id(topic.id).unwrap().unwrap();
    assert_eq!(stored.last_activity_at, at(5_000));
}

#[test]
fn posts_are_paginated_in_creation_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let author = create_user(&repo, "alice");
    let category_id = create_category(&repo, "General");
    let (topic, _) = repo
        .create_topic(&new_topic(category_id, author.id, "Busy", at(0)))
        .unwrap();
    for i in 1..25 {
        repo.create_post(&new_post(topic.id, author.id, at(i * 10)))
            .unwrap();
    }

    let (total, page) = repo
        .list_posts(PostListQuery::new(topic.id).paginate(Pagination::clamped(Some(2), Some(20))))
        .expect("should list posts");

    assert_eq!(total, 25);
    assert_eq!(page.len(), 5);
    assert_eq!(page[0].created_at, at(200));
    assert!(page.windows(2).all(|w| w[0].created_at <= w[1].created_at));
}

#[test]
fn vote_upsert_keeps_one_row_per_user_and_entity() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = create_user(&repo, "alice");
    let bob = create_user(&repo, "bob");
    let category_id = create_category(&repo, "General");
    let (topic, post) = repo
        .create_topic(&new_topic(category_id, alice.id, "Poll", at(0)))
        .unwrap();
    let target = VoteTarget::Topic(topic.id);

    repo.upsert_vote(alice.id, target, VoteValue::Up, at(10)).unwrap();
    repo.upsert_vote(alice.id, target, VoteValue::Up, at(20)).unwrap();
    repo.upsert_vote(alice.id, target, VoteValue::Down, at(30)).unwrap();
    repo.upsert_vote(bob.id, target, VoteValue::Up, at(40)).unwrap();

    assert_eq!(repo.vote_score(target).unwrap(), 0);
    let alice_vote = repo.get_vote(alice.id, target).unwrap().expect("vote stored");
    assert_eq!(alice_vote.value, VoteValue::Down);
    assert_eq!(alice_vote.created_at, at(10));
    assert_eq!(alice_vote.updated_at, at(30));

    let mut conn = test_db.pool().get().unwrap();
    let rows: i64 = votes::table
        .filter(votes::user_id.eq(alice.id.get()))
        .count()
        .get_result(&mut conn)
        .unwrap();
    assert_eq!(rows, 1);

    // Same numeric id on the post side stays untouched.
    assert_eq!(repo.vote_score(VoteTarget::Post(post.id)).unwrap(), 0);
}

#[test]
fn deleting_a_vote_is_idempotent() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = create_user(&repo, "alice");
    let category_id = create_category(&repo, "General");
    let (_, post) = repo
        .create_topic(&new_topic(category_id, alice.id, "Poll", at(0)))
        .unwrap();
    let target = VoteTarget::Post(post.id);
    repo.upsert_vote(alice.id, target, VoteValue::Up, at(10)).unwrap();

    assert_eq!(repo.delete_vote(alice.id, target).unwrap(), 1);
    assert_eq!(repo.delete_vote(alice.id, target).unwrap(), 0);
    assert_eq!(repo.vote_score(target).unwrap(), 0);
    assert!(repo.get_vote(alice.id, target).unwrap().is_none());
}

#[test]
fn cleared_votes_are_never_stored() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = create_user(&repo, "alice");

    let result = repo.upsert_vote(
        alice.id,
        VoteTarget::Post(PostId::new(1).unwrap()),
        VoteValue::Clear,
        at(0),
    );

    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}

#[test]
fn profiles_load_in_bulk() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = create_user(&repo, "alice");
    let bob = create_user(&repo, "bob");

    let mut names: Vec<String> = repo
        .list_profiles_by_ids(&[alice.id, bob.id, UserId::new(999).unwrap()])
        .unwrap()
        .into_iter()
        .map(|p| p.username.into_inner())
        .collect();
    names.sort();

    assert_eq!(names, vec!["alice", "bob"]);
}
