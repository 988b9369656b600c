mod common;

use std::time::Duration;

use wallet_ledger::error::AppError;
use wallet_ledger::services::WalletEngine;

/// P1/P2: a wallet's balance always equals the sum of its entries, and
/// every transfer's entries sum to zero.
#[tokio::test]
async fn balance_equals_sum_of_entries_and_transfer_entries_net_to_zero() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, from_wallet) = common::create_active_wallet(&pool, &format!("zack{suffix}"), "USD").await;
    let (_, _, to_wallet) = common::create_active_wallet(&pool, &format!("abby{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(from_wallet.id, 10_000).await.expect("deposit failed");
    let transfer = engine
        .send_money(&from_wallet.address, &to_wallet.address, 4_000)
        .await
        .expect("send_money failed");

    let from_sum: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM entries WHERE wallet_id = $1")
        .bind(from_wallet.id)
        .fetch_one(&pool)
        .await
        .expect("sum query failed");
    let from_balance: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
        .bind(from_wallet.id)
        .fetch_one(&pool)
        .await
        .expect("balance query failed");
    assert_eq!(from_sum, from_balance);

    let transfer_sum: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM entries WHERE transfer_id = $1")
        .bind(transfer.transfer.id)
        .fetch_one(&pool)
        .await
        .expect("transfer sum query failed");
    assert_eq!(transfer_sum, 0);

    common::cleanup_test_data(&pool).await;
}

/// P8: N concurrent deposits against one wallet land exactly once each,
/// with no lost updates from the row lock.
#[tokio::test]
async fn concurrent_deposits_sum_exactly() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet) = common::create_active_wallet(&pool, &format!("bruno{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    const N: i64 = 20;
    const AMOUNT: i64 = 100;

    let mut handles = Vec::new();
    for _ in 0..N {
        let engine = engine.clone();
        let wallet_id = wallet.id;
        handles.push(tokio::spawn(async move { engine.deposit(wallet_id, AMOUNT).await }));
    }

    for handle in handles {
        handle.await.expect("task panicked").expect("deposit failed");
    }

    let balance: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
        .bind(wallet.id)
        .fetch_one(&pool)
        .await
        .expect("balance query failed");
    assert_eq!(balance, N * AMOUNT);

    let transfer_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM transfers WHERE from_wallet_id = $1 AND transfer_type = 'DEPOSIT_TO_WALLET'",
    )
    .bind(wallet.id)
    .fetch_one(&pool)
    .await
    .expect("count query failed");
    assert_eq!(transfer_count, N);

    common::cleanup_test_data(&pool).await;
}

/// P10: concurrent withdrawals exceeding the balance succeed exactly as
/// many times as the balance allows; the rest fail closed.
#[tokio::test]
async fn concurrent_withdrawals_exceeding_balance_fail_closed() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet) = common::create_active_wallet(&pool, &format!("carlos{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    const AMOUNT: i64 = 100;
    const N: i64 = 10;
    engine.deposit(wallet.id, AMOUNT * 6).await.expect("deposit failed");

    let mut handles = Vec::new();
    for _ in 0..N {
        let engine = engine.clone();
        let wallet_id = wallet.id;
        handles.push(tokio::spawn(async move { engine.withdraw(wallet_id, AMOUNT).await }));
    }

    let mut succeeded: i64 = 0;
    let mut failed_insufficient: i64 = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => succeeded += 1,
            Err(AppError::InsufficientBalance) => failed_insufficient += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(succeeded, 6);
    assert_eq!(failed_insufficient, N - 6);
    let balance: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
        .bind(wallet.id)
        .fetch_one(&pool)
        .await
        .expect("balance query failed");
    assert_eq!(balance, 0);

    common::cleanup_test_data(&pool).await;
}

/// P9: concurrent send_money in both directions between the same pair of
/// wallets never deadlocks because both directions lock in the same
/// ascending-id order; balances return to their starting point.
#[tokio::test]
async fn concurrent_bidirectional_sends_never_deadlock() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, wallet_a) = common::create_active_wallet(&pool, &format!("wendy{suffix}"), "USD").await;
    let (_, _, wallet_b) = common::create_active_wallet(&pool, &format!("xena{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    const START: i64 = 50_000;
    const AMOUNT: i64 = 100;
    const N: i64 = 15;

    engine.deposit(wallet_a.id, START).await.expect("deposit failed");
    engine.deposit(wallet_b.id, START).await.expect("deposit failed");

    let mut handles = Vec::new();
    for _ in 0..N {
        let engine = engine.clone();
        let (from, to) = (wallet_a.address.clone(), wallet_b.address.clone());
        handles.push(tokio::spawn(async move { engine.send_money(&from, &to, AMOUNT).await }));
    }
    for _ in 0..N {
        let engine = engine.clone();
        let (from, to) = (wallet_b.address.clone(), wallet_a.address.clone());
        handles.push(tokio::spawn(async move { engine.send_money(&from, &to, AMOUNT).await }));
    }

    let deadline = tokio::time::timeout(Duration::from_secs(30), async {
        for handle in handles {
            handle.await.expect("task panicked").expect("send_money failed");
        }
    })
    .await;
    assert!(deadline.is_ok(), "concurrent bidirectional sends deadlocked");

    let balance_a: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
        .bind(wallet_a.id)
        .fetch_one(&pool)
        .await
        .expect("balance query failed");
    let balance_b: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE id = $1")
        .bind(wallet_b.id)
        .fetch_one(&pool)
        .await
        .expect("balance query failed");
    assert_eq!(balance_a, START);
    assert_eq!(balance_b, START);
    assert_eq!(balance_a + balance_b, 2 * START);

    common::cleanup_test_data(&pool).await;
}
