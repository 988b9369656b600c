mod common;

use wallet_ledger::error::AppError;
use wallet_ledger::models::{BankAccountStatus, WalletStatus};
use wallet_ledger::services::{BankAccountLifecycle, UserService};

#[tokio::test]
async fn create_with_wallet_starts_in_verification() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    common::ensure_currency(&pool, "USD").await;
    let suffix = common::unique_suffix();
    let user = common::register_user(&pool, &format!("ivan{suffix}"), &format!("ivan{suffix}@example.com")).await;

    let lifecycle = BankAccountLifecycle::new(pool.clone());
    let created = lifecycle
        .create_with_wallet(user.id, &format!("ACC-{suffix}"), "IFSC0001", "Test Bank", "USD")
        .await
        .expect("create_with_wallet failed");

    assert_eq!(created.bank_account.status, BankAccountStatus::InVerification);
    assert_eq!(created.wallet.status, WalletStatus::Inactive);
    assert_eq!(created.wallet.bank_account_id, created.bank_account.id);
    assert!(created.wallet.address.ends_with("@my.wallet"));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn create_with_wallet_rejects_unknown_currency() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let user = common::register_user(&pool, &format!("nora{suffix}"), &format!("nora{suffix}@example.com")).await;

    let lifecycle = BankAccountLifecycle::new(pool.clone());
    let result = lifecycle
        .create_with_wallet(user.id, &format!("ACC-{suffix}"), "IFSC0001", "Test Bank", "ZZZ")
        .await;

    assert!(matches!(result, Err(AppError::CurrencyNotFound(_))));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn address_collision_retries_with_suffix_in_same_transaction() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    common::ensure_currency(&pool, "USD").await;
    let suffix = common::unique_suffix();
    let local = format!("oscar{suffix}");

    // Two users share the same email local part, so they collide on the
    // derived wallet address and the second create must retry with a
    // numeric suffix rather than failing the whole transaction.
    let user_one = common::register_user(&pool, &format!("{local}one"), &format!("{local}@example.com")).await;
    let user_two = common::register_user(&pool, &format!("{local}two"), &format!("{local}@other.example.com")).await;

    let lifecycle = BankAccountLifecycle::new(pool.clone());
    let first = lifecycle
        .create_with_wallet(user_one.id, &format!("ACC-{suffix}-1"), "IFSC0001", "Test Bank", "USD")
        .await
        .expect("first create_with_wallet failed");
    assert_eq!(first.wallet.address, format!("{local}@my.wallet"));

    let second = lifecycle
        .create_with_wallet(user_two.id, &format!("ACC-{suffix}-2"), "IFSC0001", "Test Bank", "USD")
        .await
        .expect("second create_with_wallet failed");
    assert_eq!(second.wallet.address, format!("{local}-2@my.wallet"));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn verification_success_activates_wallet() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, bank_account, wallet) = common::create_active_wallet(&pool, &format!("judy{suffix}"), "USD").await;

    assert_eq!(bank_account.status, BankAccountStatus::Verified);
    assert_eq!(wallet.status, WalletStatus::Active);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn verification_failed_leaves_wallet_inactive() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    common::ensure_currency(&pool, "USD").await;
    let suffix = common::unique_suffix();
    let user = common::register_user(&pool, &format!("kyle{suffix}"), &format!("kyle{suffix}@example.com")).await;

    let lifecycle = BankAccountLifecycle::new(pool.clone());
    let created = lifecycle
        .create_with_wallet(user.id, &format!("ACC-{suffix}"), "IFSC0001", "Test Bank", "USD")
        .await
        .expect("create_with_wallet failed");

    let failed = lifecycle
        .verification_failed(created.bank_account.id)
        .await
        .expect("verification_failed failed");
    assert_eq!(failed.status, BankAccountStatus::VerificationFailed);

    let wallet = lifecycle.get_wallet(created.wallet.id).await.expect("get_wallet failed");
    assert_eq!(wallet.status, WalletStatus::Inactive);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn verification_cannot_run_twice() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, bank_account, _) = common::create_active_wallet(&pool, &format!("liam{suffix}"), "USD").await;

    let lifecycle = BankAccountLifecycle::new(pool.clone());
    let result = lifecycle.verification_success(bank_account.id).await;
    assert!(matches!(result, Err(AppError::IllegalTransition(_))));

    let result = lifecycle.verification_failed(bank_account.id).await;
    assert!(matches!(result, Err(AppError::IllegalTransition(_))));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn blocked_user_cannot_log_in() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let username = format!("mia{suffix}");
    let _ = common::register_user(&pool, &username, &format!("{username}@example.com")).await;

    sqlx::query("UPDATE users SET status = 'BLOCKED' WHERE username = $1")
        .bind(&username)
        .execute(&pool)
        .await
        .expect("failed to block user");

    let service = UserService::new(pool.clone(), "test-secret".to_string(), 3600);
    let result = service.login(&username, "password123").await;
    assert!(matches!(result, Err(AppError::Unauthorized)));

    common::cleanup_test_data(&pool).await;
}
