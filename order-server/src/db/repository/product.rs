//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteExecutor, SqlitePool};

const PRODUCT_SELECT: &str = "SELECT id, name, weight, pickup_price, delivery_price, quantity, created_at, updated_at FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} ORDER BY name"))
        .fetch_all(pool)
        .await?;
    Ok(products)
}

/// Catalog listing filtered by name or weight
pub async fn search(pool: &SqlitePool, term: Option<&str>) -> RepoResult<Vec<Product>> {
    let products = find_all(pool).await?;
    Ok(match term {
        Some(term) => products
            .into_iter()
            .filter(|p| p.matches_search(term))
            .collect(),
        None => products,
    })
}

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO product (id, name, weight, pickup_price, delivery_price, quantity, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.weight)
    .bind(data.pickup_price)
    .bind(data.delivery_price)
    .bind(data.quantity.unwrap_or(0))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), weight = COALESCE(?2, weight), pickup_price = COALESCE(?3, pickup_price), delivery_price = COALESCE(?4, delivery_price), quantity = COALESCE(?5, quantity), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.name)
    .bind(data.weight)
    .bind(data.pickup_price)
    .bind(data.delivery_price)
    .bind(data.quantity)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Subtract `quantity` from stock. Unconditional: stock may go negative.
pub async fn decrement_stock<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    quantity: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE product SET quantity = quantity - ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(now_millis())
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn p13(quantity: Option<i64>) -> ProductCreate {
        ProductCreate {
            name: "Botijão P13".into(),
            weight: "13".into(),
            pickup_price: 95.0,
            delivery_price: 105.0,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_and_update_product() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, p13(Some(5))).await.unwrap();
        assert_eq!(created.quantity, 5);

        let updated = update(
            &db.pool,
            created.id,
            ProductUpdate {
                delivery_price: Some(110.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.delivery_price, 110.0);
        assert_eq!(updated.pickup_price, 95.0);
        assert_eq!(updated.name, "Botijão P13");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let db = DbService::open_in_memory().await.unwrap();
        let err = update(&db.pool, 42, ProductUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_decrement_stock_can_go_negative() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, p13(Some(1))).await.unwrap();
        decrement_stock(&db.pool, created.id, 3).await.unwrap();
        let after = find_by_id(&db.pool, created.id).await.unwrap().unwrap();
        assert_eq!(after.quantity, -2);
    }

    #[tokio::test]
    async fn test_search_by_name_and_weight() {
        let db = DbService::open_in_memory().await.unwrap();
        create(&db.pool, p13(None)).await.unwrap();
        create(
            &db.pool,
            ProductCreate {
                name: "Cilindro P45".into(),
                weight: "45".into(),
                pickup_price: 380.0,
                delivery_price: 400.0,
                quantity: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(search(&db.pool, Some("cilindro")).await.unwrap().len(), 1);
        assert_eq!(search(&db.pool, Some("13")).await.unwrap().len(), 1);
        assert_eq!(search(&db.pool, None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, p13(None)).await.unwrap();
        assert!(delete(&db.pool, created.id).await.unwrap());
        assert!(!delete(&db.pool, created.id).await.unwrap());
    }
}
