//! Per-resource reference checks and delete policy
//!
//! Owned children (kit composition lines, loan line items) are removed with
//! their parent; any other dependent record blocks the delete. Owned rows are
//! cleared after the parent row is gone, so on SQL storage the parent delete and
//! its `ON DELETE CASCADE` are a single statement.

use super::repository::{Repositories, Repository};
use crate::contract::*;
use async_trait::async_trait;

/// Resource wired into the domain service
#[async_trait]
pub trait Managed: Resource {
    fn repository(repos: &Repositories) -> &dyn Repository<Self>;

    /// Verify that every referenced record exists
    async fn check_references(&self, _repos: &Repositories) -> Result<(), LoansError> {
        Ok(())
    }

    /// Refuse the delete while restricting dependents exist
    async fn before_delete(_target: Ref<Self>, _repos: &Repositories) -> Result<(), LoansError> {
        Ok(())
    }

    /// Remove owned dependents of a deleted `target`
    async fn after_delete(_target: Ref<Self>, _repos: &Repositories) -> Result<(), LoansError> {
        Ok(())
    }
}

/// Log a storage failure and hide its details from callers
pub(crate) fn storage_failure(error: anyhow::Error) -> LoansError {
    tracing::error!(error = ?error, "storage operation failed");
    LoansError::Internal
}

pub(crate) async fn ensure_exists<T: Managed>(
    repos: &Repositories,
    target: Ref<T>,
) -> Result<(), LoansError> {
    let found = T::repository(repos)
        .exists(target.id())
        .await
        .map_err(storage_failure)?;

    if !found {
        return Err(LoansError::UnknownReference {
            resource: T::NAME.to_string(),
            id: target.id(),
        });
    }
    Ok(())
}

async fn ensure_unreferenced<C: Managed, P: Resource>(
    repos: &Repositories,
    parent: Ref<P>,
    link: C::Link,
) -> Result<(), LoansError> {
    let count = C::repository(repos)
        .count_linked(link)
        .await
        .map_err(storage_failure)?;

    if count > 0 {
        return Err(LoansError::Conflict {
            reason: format!(
                "{} {} is still referenced by {} {} record(s)",
                P::NAME,
                parent.id(),
                count,
                C::NAME
            ),
        });
    }
    Ok(())
}

async fn cascade<C: Managed, P: Resource>(
    repos: &Repositories,
    parent: Ref<P>,
    link: C::Link,
) -> Result<(), LoansError> {
    let removed = C::repository(repos)
        .delete_linked(link)
        .await
        .map_err(storage_failure)?;

    if removed > 0 {
        tracing::debug!(
            parent = P::NAME,
            parent_id = parent.id(),
            child = C::NAME,
            removed,
            "cascaded delete"
        );
    }
    Ok(())
}

#[async_trait]
impl Managed for Curso {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.cursos.as_ref()
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<Seccion, _>(repos, target, SeccionLink::Curso(target)).await?;
        ensure_unreferenced::<JornadaPrestamo, _>(repos, target, JornadaLink::Curso(target)).await
    }
}

#[async_trait]
impl Managed for Seccion {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.secciones.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.curso).await
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<Alumno, _>(repos, target, AlumnoLink::Seccion(target)).await?;
        ensure_unreferenced::<JornadaPrestamo, _>(repos, target, JornadaLink::Seccion(target)).await
    }
}

#[async_trait]
impl Managed for Alumno {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.alumnos.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.seccion).await
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<Prestamo, _>(repos, target, PrestamoLink::Alumno(target)).await
    }
}

#[async_trait]
impl Managed for Componente {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.componentes.as_ref()
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<KitComponente, _>(repos, target, KitComponenteLink::Componente(target))
            .await?;
        ensure_unreferenced::<DetallePrestamo, _>(repos, target, DetalleLink::Componente(target)).await
    }
}

#[async_trait]
impl Managed for Kit {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.kits.as_ref()
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<DetallePrestamo, _>(repos, target, DetalleLink::Kit(target)).await
    }

    async fn after_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        cascade::<KitComponente, _>(repos, target, KitComponenteLink::Kit(target)).await
    }
}

#[async_trait]
impl Managed for KitComponente {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.kit_componentes.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.kit).await?;
        ensure_exists(repos, self.componente).await
    }
}

#[async_trait]
impl Managed for JornadaPrestamo {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.jornadas.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.curso).await?;
        ensure_exists(repos, self.seccion).await
    }

    async fn before_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        ensure_unreferenced::<Prestamo, _>(repos, target, PrestamoLink::Jornada(target)).await
    }
}

#[async_trait]
impl Managed for Prestamo {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.prestamos.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.jornada).await?;
        ensure_exists(repos, self.alumno).await
    }

    async fn after_delete(target: Ref<Self>, repos: &Repositories) -> Result<(), LoansError> {
        cascade::<DetallePrestamo, _>(repos, target, DetalleLink::Prestamo(target)).await
    }
}

#[async_trait]
impl Managed for DetallePrestamo {
    fn repository(repos: &Repositories) -> &dyn Repository<Self> {
        repos.detalles.as_ref()
    }

    async fn check_references(&self, repos: &Repositories) -> Result<(), LoansError> {
        ensure_exists(repos, self.prestamo).await?;
        match self.articulo {
            Articulo::Kit(kit) => ensure_exists(repos, kit).await,
            Articulo::Componente(componente) => ensure_exists(repos, componente).await,
        }
    }
}
