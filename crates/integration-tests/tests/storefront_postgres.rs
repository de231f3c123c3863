//! `PostgreSQL` repository tests.
//!
//! These tests require a reachable database in `ORCHARD_DATABASE_URL` (or
//! `DATABASE_URL`). Migrations are applied on connect; every test works in a
//! fresh random cart or email so runs do not interfere.
//!
//! Run with: cargo test -p orchard-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use sqlx::PgPool;
use uuid::Uuid;

use orchard_core::{CartId, Email, ProductId, Quantity, UserName};
use orchard_storefront::db::{
    CartItemRepository, CartStore, RepositoryError, UserRepository, UserStore, create_pool,
};
use orchard_storefront::models::CartItem;
use orchard_storefront::services::{CartError, CartService};

async fn pool() -> PgPool {
    let url = std::env::var("ORCHARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap();
    let pool = create_pool(&SecretString::from(url)).await.unwrap();
    sqlx::migrate!("../storefront/migrations")
        .run(&pool)
        .await
        .unwrap();
    pool
}

fn product(n: u128) -> ProductId {
    ProductId::new(Uuid::from_u128(n))
}

fn item(cart_id: CartId, product_id: ProductId, quantity: i32) -> CartItem {
    CartItem {
        cart_id,
        product_id,
        quantity: Quantity::new(quantity).unwrap(),
    }
}

fn unique_email() -> Email {
    Email::parse(&format!("u{}@example.com", Uuid::new_v4().simple())).unwrap()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_cart_list_orders_product_ids_descending() {
    let carts = CartItemRepository::new(pool().await);
    let cart = CartId::generate();

    for n in [1, 5, 3] {
        carts.create(item(cart, product(n), 1)).await.unwrap();
    }
    carts
        .create(item(CartId::generate(), product(9), 1))
        .await
        .unwrap();

    let ids: Vec<ProductId> = carts
        .list(cart)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.product_id)
        .collect();
    assert_eq!(ids, vec![product(5), product(3), product(1)]);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_cart_duplicate_insert_is_conflict() {
    let carts = CartItemRepository::new(pool().await);
    let new = item(CartId::generate(), product(1), 2);

    assert_eq!(carts.create(new).await.unwrap(), new);
    let err = carts.create(new).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "{err:?}");
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_cart_update_and_delete_missing_return_none() {
    let carts = CartItemRepository::new(pool().await);
    let cart = CartId::generate();

    assert!(carts.find(cart, product(1)).await.unwrap().is_none());
    assert!(
        carts
            .update_quantity(cart, product(1), Quantity::new(4).unwrap())
            .await
            .unwrap()
            .is_none()
    );
    assert!(carts.delete(cart, product(1)).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_cart_update_and_delete_return_rows() {
    let carts = CartItemRepository::new(pool().await);
    let cart = CartId::generate();
    carts.create(item(cart, product(1), 1)).await.unwrap();

    let updated = carts
        .update_quantity(cart, product(1), Quantity::new(8).unwrap())
        .await
        .unwrap();
    assert_eq!(updated, Some(item(cart, product(1), 8)));

    let deleted = carts.delete(cart, product(1)).await.unwrap();
    assert_eq!(deleted, Some(item(cart, product(1), 8)));
    assert!(carts.list(cart).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_cart_service_rejects_missing_item_on_postgres() {
    let carts = CartItemRepository::new(pool().await);
    let service = CartService::new(&carts);

    let err = service
        .update(CartId::generate(), product(1), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::ItemNotFound));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_ping() {
    let carts = CartItemRepository::new(pool().await);
    carts.ping().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_user_create_and_lookup() {
    let users = UserRepository::new(pool().await);
    let email = unique_email();
    let name = UserName::parse("Ada").unwrap();

    let created = users.create(&email, &name, "hash").await.unwrap();
    assert_eq!(created.email, email);

    let (found, hash) = users.get_with_password_hash(&email).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(hash, "hash");

    assert!(
        users
            .get_with_password_hash(&unique_email())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ORCHARD_DATABASE_URL)"]
async fn test_user_duplicate_email_is_conflict() {
    let users = UserRepository::new(pool().await);
    let email = unique_email();
    let name = UserName::parse("Ada").unwrap();

    users.create(&email, &name, "hash").await.unwrap();
    let err = users.create(&email, &name, "hash").await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)), "{err:?}");
}
