mod common;

use wallet_ledger::error::AppError;
use wallet_ledger::models::PaymentRequestStatus;
use wallet_ledger::services::{PaymentRequestService, WalletEngine};

#[tokio::test]
async fn approve_moves_money_and_marks_success() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, payer) = common::create_active_wallet(&pool, &format!("nina{suffix}"), "USD").await;
    let (_, _, payee) = common::create_active_wallet(&pool, &format!("omar{suffix}"), "USD").await;

    let engine = WalletEngine::new(pool.clone());
    engine.deposit(payer.id, 10_000).await.expect("deposit failed");

    let requests = PaymentRequestService::new(pool.clone());
    let request = requests
        .create(&payer.address, &payee.address, 3_000)
        .await
        .expect("create payment request failed");
    assert_eq!(request.status, PaymentRequestStatus::WaitingApproval);

    let approved = requests.approve(request.id).await.expect("approve failed");
    assert_eq!(approved.status, PaymentRequestStatus::PaymentSuccess);

    let payer_wallet = engine.withdraw(payer.id, 7_000).await.expect("withdraw failed");
    assert_eq!(payer_wallet.wallet.balance, 0);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn approve_fails_closed_when_payer_has_insufficient_balance() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, payer) = common::create_active_wallet(&pool, &format!("paul{suffix}"), "USD").await;
    let (_, _, payee) = common::create_active_wallet(&pool, &format!("quinn{suffix}"), "USD").await;

    let requests = PaymentRequestService::new(pool.clone());
    let request = requests
        .create(&payer.address, &payee.address, 5_000)
        .await
        .expect("create payment request failed");

    let result = requests.approve(request.id).await;
    assert!(matches!(result, Err(AppError::InsufficientBalance)));

    let reloaded = requests.get(request.id).await.expect("get failed");
    assert_eq!(reloaded.status, PaymentRequestStatus::PaymentFailed);

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn refuse_requires_waiting_approval() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, payer) = common::create_active_wallet(&pool, &format!("rose{suffix}"), "USD").await;
    let (_, _, payee) = common::create_active_wallet(&pool, &format!("sam{suffix}"), "USD").await;

    let requests = PaymentRequestService::new(pool.clone());
    let request = requests
        .create(&payer.address, &payee.address, 1_000)
        .await
        .expect("create payment request failed");

    let refused = requests.refuse(request.id).await.expect("refuse failed");
    assert_eq!(refused.status, PaymentRequestStatus::Refused);

    // a second refuse on an already-terminal request must be rejected,
    // not silently re-applied
    let result = requests.refuse(request.id).await;
    assert!(matches!(result, Err(AppError::IllegalTransition(_))));

    common::cleanup_test_data(&pool).await;
}

#[tokio::test]
async fn list_returns_requests_touching_a_wallet() {
    let pool = common::setup_test_db().await;
    common::cleanup_test_data(&pool).await;

    let suffix = common::unique_suffix();
    let (_, _, payer) = common::create_active_wallet(&pool, &format!("tara{suffix}"), "USD").await;
    let (_, _, payee) = common::create_active_wallet(&pool, &format!("uma{suffix}"), "USD").await;

    let requests = PaymentRequestService::new(pool.clone());
    requests
        .create(&payer.address, &payee.address, 1_000)
        .await
        .expect("create payment request failed");
    requests
        .create(&payer.address, &payee.address, 2_000)
        .await
        .expect("create payment request failed");

    let listed = requests.list(payee.id, 10, 0).await.expect("list failed");
    assert_eq!(listed.len(), 2);

    common::cleanup_test_data(&pool).await;
}
