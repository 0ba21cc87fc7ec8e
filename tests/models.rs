//! Model round-trips against a real MongoDB instance.
//!
//! These need a live database: set `TEST_MONGODB_URI` to run them, otherwise
//! every test here skips itself.

use backend::error::AppError;
use backend::routes::group::model::Group;
use backend::routes::invite::model::Invite;
use backend::routes::user::model::User;
use backend::utils::verify_password;
use mongodb::Database;
use mongodb::bson::doc;
use uuid::Uuid;

async fn test_db() -> Option<Database> {
    let uri = match std::env::var("TEST_MONGODB_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("TEST_MONGODB_URI not set, skipping");
            return None;
        }
    };

    let client = mongodb::Client::with_uri_str(&uri)
        .await
        .expect("failed to connect to test MongoDB");
    Some(client.database("backend_test"))
}

fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Uuid::new_v4().simple())
}

#[tokio::test]
async fn register_hashes_password_and_issues_token() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("register");

    let user = User::register(&db, &email, "paco").await.unwrap();

    let stored = User::get_by_id(&db, &user.id).await.unwrap().unwrap();
    assert_eq!(stored.email, email);
    assert!(!stored.access_token.is_empty());
    assert_ne!(stored.password, "paco");
    assert!(verify_password("paco", &stored.password).unwrap());

    User::remove(&db, &user.id).await.unwrap();
}

#[tokio::test]
async fn register_rejects_used_email() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("duplicate");

    let user = User::register(&db, &email, "first").await.unwrap();
    let err = User::register(&db, &email, "second").await.unwrap_err();
    assert!(matches!(err, AppError::UsedEmail));

    User::remove(&db, &user.id).await.unwrap();
}

#[tokio::test]
async fn login_round_trip_and_failures() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("login");

    let registered = User::register(&db, &email, "jose").await.unwrap();

    let logged_in = User::login(&db, &email, "jose").await.unwrap();
    assert_eq!(logged_in.id, registered.id);
    // Login refreshes the stored token.
    assert!(!logged_in.access_token.is_empty());

    let err = User::login(&db, &email, "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::IncorrectEmailOrPassword));

    let err = User::login(&db, &unique_email("nobody"), "jose")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotExists));

    User::remove(&db, &registered.id).await.unwrap();
}

#[tokio::test]
async fn access_token_lookup_resolves_owner() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("token");

    let user = User::register(&db, &email, "jose").await.unwrap();

    let found = User::get_by_access_token(&db, &user.access_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let missing = User::get_by_access_token(&db, "no-such-token")
        .await
        .unwrap();
    assert!(missing.is_none());

    User::remove(&db, &user.id).await.unwrap();
}

#[tokio::test]
async fn update_location_round_trip() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("location");

    let user = User::register(&db, &email, "jose").await.unwrap();

    User::update_location(&db, &user.id, 57.062, 13.673)
        .await
        .unwrap();

    let stored = User::get_by_id(&db, &user.id).await.unwrap().unwrap();
    let location = stored.location.unwrap();
    assert_eq!(location[0], 57.062);
    assert_eq!(location[1], 13.673);

    User::remove(&db, &user.id).await.unwrap();
}

#[tokio::test]
async fn add_member_is_idempotent() {
    let Some(db) = test_db().await else { return };
    let email = unique_email("group");

    let creator = User::register(&db, &email, "jose").await.unwrap();
    let group_id = Uuid::new_v4().to_string();
    let group = Group::create(&db, &group_id, &creator.id, "Test group")
        .await
        .unwrap();

    assert_eq!(group.name, "Test group");
    assert!(group.users.contains(&creator.id));

    Group::add_member(&db, &group_id, "1234").await.unwrap();
    Group::add_member(&db, &group_id, "1234").await.unwrap();

    let stored = Group::get_by_id(&db, &group_id).await.unwrap().unwrap();
    assert_eq!(stored.users.iter().filter(|u| *u == "1234").count(), 1);

    Group::remove_member(&db, &group_id, "1234").await.unwrap();
    let stored = Group::get_by_id(&db, &group_id).await.unwrap().unwrap();
    assert!(!stored.users.iter().any(|u| u == "1234"));

    Group::remove(&db, &group_id).await.unwrap();
    User::remove(&db, &creator.id).await.unwrap();
}

#[tokio::test]
async fn invite_activation_creates_user_and_joins_group() {
    let Some(db) = test_db().await else { return };

    let inviter = User::register(&db, &unique_email("inviter"), "jose")
        .await
        .unwrap();
    // The inviter's default Friends group shares the inviter's id.
    Group::create(&db, &inviter.id, &inviter.id, "Friends")
        .await
        .unwrap();

    let invited_email = unique_email("invited");
    let invite = Invite::create(&db, &invited_email, &inviter.id)
        .await
        .unwrap();
    assert!(invite.pending);

    let user = Invite::activate(&db, &invite.token, "pass").await.unwrap();
    assert_eq!(user.email, invited_email);

    let stored_invite = Invite::get_by_token(&db, &invite.token)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored_invite.pending);

    let group = Group::get_by_id(&db, &inviter.id).await.unwrap().unwrap();
    assert!(group.users.contains(&user.id));

    // Spent invites cannot be activated twice.
    let err = Invite::activate(&db, &invite.token, "again").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));

    User::remove(&db, &user.id).await.unwrap();
    User::remove(&db, &inviter.id).await.unwrap();
    Group::remove(&db, &inviter.id).await.unwrap();
    db.collection::<Invite>("invites")
        .delete_one(doc! { "_id": &invite.id })
        .await
        .unwrap();
}
