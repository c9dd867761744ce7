use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Runs an UPDATE ... RETURNING; a missing row surfaces as `NotFound`
    async fn save(&self, id: i32, active_model: entity::ActiveModel) -> ProductResult<Product> {
        match active_model.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(input.name),
            price: Set(input.price),
            availability: Set(input.availability),
        };

        let product = self.save(id, active_model).await?;
        tracing::info!(product_id = id, "Updated product");
        Ok(product)
    }

    async fn set_availability(&self, id: i32, availability: bool) -> ProductResult<Product> {
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            availability: Set(availability),
            ..Default::default()
        };

        let product = self.save(id, active_model).await?;
        tracing::info!(product_id = id, availability, "Updated product availability");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, name: &str, price: f64, availability: bool) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            price,
            availability,
        }
    }

    #[tokio::test]
    async fn test_list_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(2, "Teclado", 50.0, true),
                model(1, "Monitor", 300.0, false),
            ]])
            .into_connection();

        let products = PgProductRepository::new(db).list().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 2);
        assert!(!products[1].availability);
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let product = PgProductRepository::new(db).get_by_id(9).await.unwrap();
        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Monitor", 300.0, true)]])
            .into_connection();

        let product = PgProductRepository::new(db)
            .create(CreateProduct {
                name: "Monitor".to_string(),
                price: 300.0,
                availability: None,
            })
            .await
            .unwrap();

        assert_eq!(product.id, 1);
        assert!(product.availability);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let result = PgProductRepository::new(db)
            .update(
                5,
                UpdateProduct {
                    name: "Monitor".to_string(),
                    price: 1.0,
                    availability: true,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_set_availability_returns_updated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(3, "Mouse", 20.0, false)]])
            .into_connection();

        let product = PgProductRepository::new(db)
            .set_availability(3, false)
            .await
            .unwrap();

        assert_eq!(product.id, 3);
        assert!(!product.availability);
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let repo = PgProductRepository::new(db);
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_maps_to_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let result = PgProductRepository::new(db).list().await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
