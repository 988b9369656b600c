mod common;

use wallet_ledger::error::AppError;
use wallet_ledger::services::WalletEngine;

#[tokio::test]
async fn deposit_then_withdraw_round_trips_balance() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet) = common::create_active_wallet(&pool, &format!("alice{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());

    let deposited = engine.deposit(wallet.id, 10_000).await.expect("deposit failed");
    assert_eq!(deposited.wallet.balance, 10_000);
    assert_eq!(deposited.from_entry.id, deposited.to_entry.id);

    let withdrawn = engine.withdraw(wallet.id, 4_000).await.expect("withdraw failed");
    assert_eq!(withdrawn.wallet.balance, 6_000);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn withdraw_more_than_balance_is_rejected() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet) = common::create_active_wallet(&pool, &format!("bob{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(wallet.id, 1_000).await.expect("deposit failed");

    let result = engine.withdraw(wallet.id, 5_000).await;
    assert!(matches!(result, Err(AppError::InsufficientBalance)));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn send_money_moves_balance_between_wallets() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, from_wallet) = common::create_active_wallet(&pool, &format!("carol{suffix}"), "USD").await;
    let (_, _, to_wallet) = common::create_active_wallet(&pool, &format!("dave{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(from_wallet.id, 5_000).await.expect("deposit failed");

    let result = engine
        .send_money(&from_wallet.address, &to_wallet.address, 2_000)
        .await
        .expect("send_money failed");
    assert_eq!(result.from_entry.amount, -2_000);
    assert_eq!(result.to_entry.amount, 2_000);

    let pay_by_id = engine
        .pay_by_wallet_id(from_wallet.id, to_wallet.id, 1_000)
        .await
        .expect("pay_by_wallet_id failed");
    assert_eq!(pay_by_id.from_entry.amount, -1_000);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn send_money_requires_matching_currency() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, usd_wallet) = common::create_active_wallet(&pool, &format!("erin{suffix}"), "USD").await;
    let (_, _, inr_wallet) = common::create_active_wallet(&pool, &format!("frank{suffix}"), "INR").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(usd_wallet.id, 5_000).await.expect("deposit failed");

    let result = engine
        .send_money(&usd_wallet.address, &inr_wallet.address, 1_000)
        .await;
    assert!(matches!(result, Err(AppError::CurrencyMismatch)));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn concurrent_send_money_in_opposite_directions_does_not_deadlock() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet_a) = common::create_active_wallet(&pool, &format!("gina{suffix}"), "USD").await;
    let (_, _, wallet_b) = common::create_active_wallet(&pool, &format!("hank{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(wallet_a.id, 10_000).await.expect("deposit failed");
    engine.deposit(wallet_b.id, 10_000).await.expect("deposit failed");

    let engine_a = engine.clone();
    let engine_b = engine.clone();
    let addr_a = wallet_a.address.clone();
    let addr_b = wallet_b.address.clone();

    let task1 = tokio::spawn(async move { engine_a.send_money(&addr_a, &addr_b, 500).await });
    let task2 = tokio::spawn(async move { engine_b.send_money(&addr_b, &addr_a, 300).await });

    let (r1, r2) = tokio::join!(task1, task2);
    r1.expect("task1 panicked").expect("send_money a->b failed");
    r2.expect("task2 panicked").expect("send_money b->a failed");

    common::cleanup_test_data(&pool).await;
}
