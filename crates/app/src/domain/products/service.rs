//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use plaza::catalog::ProductId;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::ProductRecord,
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, id).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn search_products(
        &self,
        term: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, term).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[tracing::instrument(name = "products.service.create_product", skip(self, product), err)]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self.repository.next_product_id(&mut tx).await?;
        let created = self.repository.create_product(&mut tx, id, &product).await?;

        tx.commit().await?;

        info!(product_id = %created.id, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_product(&mut tx, id, &update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, id).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, oldest id first.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, ProductsServiceError>;

    /// Case-insensitive substring search over product names.
    async fn search_products(&self, term: &str)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Creates a new product, allocating the next sequential id.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the stored details of a product.
    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given id.
    async fn delete_product(&self, id: ProductId) -> Result<(), ProductsServiceError>;
}
