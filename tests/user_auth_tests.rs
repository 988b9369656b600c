mod common;

use wallet_ledger::error::AppError;
use wallet_ledger::services::{AuthService, UserService};

#[tokio::test]
async fn register_then_login_mints_a_valid_token() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let username = format!("victor{suffix}");
    common::register_user(&pool, &username, &format!("{username}@example.com")).await;

    let service = UserService::new(pool.clone(), "test-secret".to_string(), 3600);
    let (token, user) = service
        .login(&username, "password123")
        .await
        .expect("login failed");

    let auth = AuthService::new(pool.clone(), "test-secret".to_string(), 3600);
    let resolved_user_id = auth.validate_token(&token).await.expect("validate_token failed");
    assert_eq!(resolved_user_id, user.id);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let username = format!("wendy{suffix}");
    common::register_user(&pool, &username, &format!("{username}@example.com")).await;

    let service = UserService::new(pool.clone(), "test-secret".to_string(), 3600);
    let result = service.login(&username, "not the password").await;
    assert!(matches!(result, Err(AppError::IncorrectPassword)));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let username = format!("xena{suffix}");
    common::register_user(&pool, &username, &format!("{username}@example.com")).await;

    // mint with a negative ttl so the token is already expired
    let auth = AuthService::new(pool.clone(), "test-secret".to_string(), -1);
    let service = UserService::new(pool.clone(), "test-secret".to_string(), -1);
    let (token, _) = service
        .login(&username, "password123")
        .await
        .expect("login failed");

    let result = auth.validate_token(&token).await;
    assert!(matches!(result, Err(AppError::ExpiredToken)));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let username = format!("yara{suffix}");
    common::register_user(&pool, &username, &format!("{username}@example.com")).await;

    let service = UserService::new(pool.clone(), "test-secret".to_string(), 3600);
    let result = service
        .register(wallet_ledger::services::RegisterUserRequest {
            username: username.clone(),
            password: "password123".to_string(),
            full_name: "Duplicate".to_string(),
            email: format!("other-{username}@example.com"),
        })
        .await;
    assert!(matches!(result, Err(AppError::UserAlreadyExist(_))));

    common::cleanup_test_data(&pool).await;
}
