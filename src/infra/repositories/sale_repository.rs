//! Sale repository.
//!
//! Sales are persisted as a header row plus product/service line items; the
//! total is derived on the way out and never written back.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::{sale, sale_product, sale_service};
use super::scope_filter;
use crate::domain::{
    sale_total, CreateSale, Sale, SaleProductLine, SaleServiceLine, Scope, UpdateSale,
};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(test)]
use mockall::automock;

/// Sale persistence operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Sale>>;

    /// Scoped by `responsible_manager_id`.
    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Sale>, u64)>;

    async fn create(&self, data: CreateSale) -> AppResult<Sale>;

    async fn update(&self, id: i32, data: UpdateSale) -> AppResult<Sale>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed sale store.
pub struct SaleStore {
    db: DatabaseConnection,
}

impl SaleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

type ProductLines = HashMap<i32, Vec<SaleProductLine>>;
type ServiceLines = HashMap<i32, Vec<SaleServiceLine>>;

/// Batch-load line items for a set of sales, resolving current product and
/// service prices. A dangling product/service reference yields a zero-priced
/// line rather than an error.
async fn load_lines<C: ConnectionTrait>(
    conn: &C,
    sale_ids: &[i32],
) -> AppResult<(ProductLines, ServiceLines)> {
    let mut products: ProductLines = HashMap::new();
    let mut services: ServiceLines = HashMap::new();
    if sale_ids.is_empty() {
        return Ok((products, services));
    }

    let product_rows = sale_product::Entity::find()
        .filter(sale_product::Column::SaleId.is_in(sale_ids.to_vec()))
        .find_also_related(super::entities::product::Entity)
        .all(conn)
        .await?;
    for (line, product) in product_rows {
        let (name, price) = product
            .map(|p| (p.name, p.price))
            .unwrap_or_else(|| (String::new(), Decimal::ZERO));
        products.entry(line.sale_id).or_default().push(SaleProductLine {
            product_id: line.product_id,
            product_name: name,
            price,
            quantity: line.quantity,
        });
    }

    let service_rows = sale_service::Entity::find()
        .filter(sale_service::Column::SaleId.is_in(sale_ids.to_vec()))
        .find_also_related(super::entities::service_item::Entity)
        .all(conn)
        .await?;
    for (line, service) in service_rows {
        let (name, price) = service
            .map(|s| (s.name, s.price))
            .unwrap_or_else(|| (String::new(), Decimal::ZERO));
        services.entry(line.sale_id).or_default().push(SaleServiceLine {
            service_id: line.service_id,
            service_name: name,
            price,
        });
    }

    Ok((products, services))
}

fn assemble(
    model: sale::Model,
    products: Vec<SaleProductLine>,
    services: Vec<SaleServiceLine>,
) -> Sale {
    let total_price = sale_total(&products, &services);
    Sale {
        id: model.id,
        counterparty_id: model.counterparty_id,
        responsible_manager_id: model.responsible_manager_id,
        sale_date: model.sale_date,
        status: model.status,
        deferred_payment_date: model.deferred_payment_date,
        project_id: model.project_id,
        products,
        services,
        total_price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

async fn insert_lines<C: ConnectionTrait>(
    conn: &C,
    sale_id: i32,
    products: &[(i32, Decimal)],
    services: &[i32],
) -> AppResult<()> {
    for (product_id, quantity) in products {
        sale_product::ActiveModel {
            sale_id: Set(sale_id),
            product_id: Set(*product_id),
            quantity: Set(*quantity),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    for service_id in services {
        sale_service::ActiveModel {
            sale_id: Set(sale_id),
            service_id: Set(*service_id),
            ..Default::default()
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl SaleRepository for SaleStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Sale>> {
        let model = match sale::Entity::find_by_id(id).one(&self.db).await? {
            Some(m) => m,
            None => return Ok(None),
        };

        let (mut products, mut services) = load_lines(&self.db, &[id]).await?;
        Ok(Some(assemble(
            model,
            products.remove(&id).unwrap_or_default(),
            services.remove(&id).unwrap_or_default(),
        )))
    }

    async fn list(&self, scope: Scope, page: PaginationParams) -> AppResult<(Vec<Sale>, u64)> {
        let mut query = sale::Entity::find().order_by_asc(sale::Column::Id);
        if let Some(cond) = scope_filter(&scope, sale::Column::ResponsibleManagerId) {
            query = query.filter(cond);
        }

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let (mut products, mut services) = load_lines(&self.db, &ids).await?;

        let sales = models
            .into_iter()
            .map(|m| {
                let id = m.id;
                assemble(
                    m,
                    products.remove(&id).unwrap_or_default(),
                    services.remove(&id).unwrap_or_default(),
                )
            })
            .collect();
        Ok((sales, total))
    }

    async fn create(&self, data: CreateSale) -> AppResult<Sale> {
        let txn = self.db.begin().await?;

        let now = Utc::now();
        let model = sale::ActiveModel {
            counterparty_id: Set(data.counterparty_id),
            responsible_manager_id: Set(data.responsible_manager_id),
            sale_date: Set(data.sale_date),
            status: Set(data.status),
            deferred_payment_date: Set(data.deferred_payment_date),
            project_id: Set(data.project_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_lines(&txn, model.id, &data.products, &data.services).await?;

        let sale_id = model.id;
        let (mut products, mut services) = load_lines(&txn, &[sale_id]).await?;
        let sale = assemble(
            model,
            products.remove(&sale_id).unwrap_or_default(),
            services.remove(&sale_id).unwrap_or_default(),
        );

        txn.commit().await?;
        Ok(sale)
    }

    async fn update(&self, id: i32, data: UpdateSale) -> AppResult<Sale> {
        let txn = self.db.begin().await?;

        let model = sale::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: sale::ActiveModel = model.into();
        if let Some(counterparty_id) = data.counterparty_id {
            active.counterparty_id = Set(counterparty_id);
        }
        if let Some(responsible) = data.responsible_manager_id {
            active.responsible_manager_id = Set(responsible);
        }
        if let Some(sale_date) = data.sale_date {
            active.sale_date = Set(sale_date);
        }
        if let Some(status) = data.status {
            active.status = Set(status);
        }
        if let Some(deferred) = data.deferred_payment_date {
            active.deferred_payment_date = Set(deferred);
        }
        if let Some(project_id) = data.project_id {
            active.project_id = Set(project_id);
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&txn).await?;

        // Line items, when provided, replace the stored ones wholesale
        if let Some(products) = &data.products {
            sale_product::Entity::delete_many()
                .filter(sale_product::Column::SaleId.eq(id))
                .exec(&txn)
                .await?;
            insert_lines(&txn, id, products, &[]).await?;
        }
        if let Some(services) = &data.services {
            sale_service::Entity::delete_many()
                .filter(sale_service::Column::SaleId.eq(id))
                .exec(&txn)
                .await?;
            insert_lines(&txn, id, &[], services).await?;
        }

        let (mut products, mut services) = load_lines(&txn, &[id]).await?;
        let sale = assemble(
            model,
            products.remove(&id).unwrap_or_default(),
            services.remove(&id).unwrap_or_default(),
        );

        txn.commit().await?;
        Ok(sale)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sale::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
