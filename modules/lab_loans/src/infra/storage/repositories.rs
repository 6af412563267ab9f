//! SeaORM repository implementations

use super::mapper::StoredResource;
use crate::contract::*;
use crate::domain::repository::{ConstraintViolation, Repositories, Repository};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use std::marker::PhantomData;
use std::sync::Arc;

/// Table-backed repository for any stored resource
pub struct SeaOrmRepository<T> {
    db: Arc<DatabaseConnection>,
    _resource: PhantomData<fn() -> T>,
}

impl<T> SeaOrmRepository<T> {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            _resource: PhantomData,
        }
    }
}

/// Wire one SeaORM repository per resource onto a shared connection
pub fn sea_orm_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        cursos: Arc::new(SeaOrmRepository::<Curso>::new(db.clone())),
        secciones: Arc::new(SeaOrmRepository::<Seccion>::new(db.clone())),
        alumnos: Arc::new(SeaOrmRepository::<Alumno>::new(db.clone())),
        componentes: Arc::new(SeaOrmRepository::<Componente>::new(db.clone())),
        kits: Arc::new(SeaOrmRepository::<Kit>::new(db.clone())),
        kit_componentes: Arc::new(SeaOrmRepository::<KitComponente>::new(db.clone())),
        jornadas: Arc::new(SeaOrmRepository::<JornadaPrestamo>::new(db.clone())),
        prestamos: Arc::new(SeaOrmRepository::<Prestamo>::new(db.clone())),
        detalles: Arc::new(SeaOrmRepository::<DetallePrestamo>::new(db)),
    }
}

/// Surface constraint failures as [`ConstraintViolation`], anything else as-is
fn write_error(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => ConstraintViolation::Unique(detail).into(),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            ConstraintViolation::ForeignKey(detail).into()
        }
        _ => err.into(),
    }
}

fn into_records<T: StoredResource>(
    models: Vec<<T::Entity as EntityTrait>::Model>,
) -> Result<Vec<Record<T>>> {
    models.into_iter().map(T::from_model).collect()
}

#[async_trait]
impl<T> Repository<T> for SeaOrmRepository<T>
where
    T: StoredResource,
    <T::Entity as EntityTrait>::Model: IntoActiveModel<T::ActiveModel> + Sync,
{
    async fn insert(&self, fields: &T) -> Result<Record<T>> {
        let active_model = fields.to_active_model(None);

        let result = T::Entity::insert(active_model)
            .exec_with_returning(&*self.db)
            .await
            .map_err(write_error)?;

        T::from_model(result)
    }

    async fn find_by_id(&self, id: Id) -> Result<Option<Record<T>>> {
        let result = T::Entity::find()
            .filter(T::id_column().eq(id))
            .one(&*self.db)
            .await?;

        result.map(T::from_model).transpose()
    }

    async fn find_by_unique_key(&self, key: &str) -> Result<Option<Record<T>>> {
        let Some(column) = T::unique_column() else {
            return Ok(None);
        };

        let result = T::Entity::find()
            .filter(column.eq(key))
            .one(&*self.db)
            .await?;

        result.map(T::from_model).transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Record<T>>> {
        let results = T::Entity::find()
            .order_by_asc(T::id_column())
            .limit(page.limit)
            .offset(page.offset)
            .all(&*self.db)
            .await?;

        into_records(results)
    }

    async fn list_linked(&self, link: T::Link, page: Page) -> Result<Vec<Record<T>>> {
        let (column, parent_id) = T::link_column(link);

        let results = T::Entity::find()
            .filter(column.eq(parent_id))
            .order_by_asc(T::id_column())
            .limit(page.limit)
            .offset(page.offset)
            .all(&*self.db)
            .await?;

        into_records(results)
    }

    async fn count_linked(&self, link: T::Link) -> Result<u64> {
        let (column, parent_id) = T::link_column(link);

        let count = T::Entity::find()
            .filter(column.eq(parent_id))
            .count(&*self.db)
            .await?;

        Ok(count)
    }

    async fn update(&self, record: &Record<T>) -> Result<Option<Record<T>>> {
        let active_model = record.fields.to_active_model(Some(record.id));

        match T::Entity::update(active_model).exec(&*self.db).await {
            Ok(result) => Ok(Some(T::from_model(result)?)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(write_error(err)),
        }
    }

    async fn delete(&self, id: Id) -> Result<bool> {
        let result = T::Entity::delete_many()
            .filter(T::id_column().eq(id))
            .exec(&*self.db)
            .await
            .map_err(write_error)?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_linked(&self, link: T::Link) -> Result<u64> {
        let (column, parent_id) = T::link_column(link);

        let result = T::Entity::delete_many()
            .filter(column.eq(parent_id))
            .exec(&*self.db)
            .await
            .map_err(write_error)?;

        Ok(result.rows_affected)
    }

    async fn exists(&self, id: Id) -> Result<bool> {
        let count = T::Entity::find()
            .filter(T::id_column().eq(id))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }
}
