//! Domain service - business logic orchestration

use super::policy::{storage_failure, Managed};
use super::repository::{ConstraintViolation, Repositories};
use crate::contract::*;

/// Domain service for lab loans management
pub struct Service {
    repos: Repositories,
}

impl Service {
    /// Create a new service instance
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    /// Validate a draft and insert it
    pub async fn create<T: Managed>(&self, draft: T::Draft) -> Result<Record<T>, LoansError> {
        let fields = draft.validate()?;
        fields.check_references(&self.repos).await?;
        self.ensure_unique(&fields, None).await?;

        let record = match T::repository(&self.repos).insert(&fields).await {
            Ok(record) => record,
            Err(error) => return Err(self.rejected_write(&fields, error).await),
        };

        tracing::debug!(resource = T::NAME, id = record.id, "record created");
        Ok(record)
    }

    /// Get a record by identifier
    pub async fn get<T: Managed>(&self, id: Id) -> Result<Record<T>, LoansError> {
        T::repository(&self.repos)
            .find_by_id(id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| LoansError::not_found(T::NAME, id))
    }

    /// Load the record behind a lazy reference
    pub async fn resolve<T: Managed>(&self, target: Ref<T>) -> Result<Record<T>, LoansError> {
        self.get(target.id()).await
    }

    /// List records ordered by id
    pub async fn list<T: Managed>(&self, page: Page) -> Result<Vec<Record<T>>, LoansError> {
        T::repository(&self.repos)
            .list(page)
            .await
            .map_err(storage_failure)
    }

    /// List records of `C` belonging to an existing parent record
    pub async fn children<P, C>(&self, parent: Ref<P>, page: Page) -> Result<Vec<Record<C>>, LoansError>
    where
        P: Managed,
        C: Managed + LinkedBy<P>,
    {
        let found = P::repository(&self.repos)
            .exists(parent.id())
            .await
            .map_err(storage_failure)?;
        if !found {
            return Err(LoansError::not_found(P::NAME, parent.id()));
        }

        C::repository(&self.repos)
            .list_linked(C::link(parent), page)
            .await
            .map_err(storage_failure)
    }

    /// Composition lines of a kit with each component resolved
    pub async fn kit_composition(&self, kit: Ref<Kit>, page: Page) -> Result<Vec<KitLine>, LoansError> {
        let lineas = self.children::<Kit, KitComponente>(kit, page).await?;

        let mut composition = Vec::with_capacity(lineas.len());
        for linea in lineas {
            let componente = self.resolve(linea.componente).await?;
            composition.push(KitLine { linea, componente });
        }
        Ok(composition)
    }

    /// Replace all fields of an existing record
    pub async fn update<T: Managed>(&self, id: Id, draft: T::Draft) -> Result<Record<T>, LoansError> {
        let fields = draft.validate()?;
        let repo = T::repository(&self.repos);

        if !repo.exists(id).await.map_err(storage_failure)? {
            return Err(LoansError::not_found(T::NAME, id));
        }
        fields.check_references(&self.repos).await?;
        self.ensure_unique(&fields, Some(id)).await?;

        let record = match repo.update(&Record::new(id, fields.clone())).await {
            Ok(record) => record.ok_or_else(|| LoansError::not_found(T::NAME, id))?,
            Err(error) => return Err(self.rejected_write(&fields, error).await),
        };

        tracing::debug!(resource = T::NAME, id, "record updated");
        Ok(record)
    }

    /// Delete a record after applying the delete policy
    pub async fn delete<T: Managed>(&self, id: Id) -> Result<(), LoansError> {
        let repo = T::repository(&self.repos);

        if !repo.exists(id).await.map_err(storage_failure)? {
            return Err(LoansError::not_found(T::NAME, id));
        }
        T::before_delete(Ref::new(id), &self.repos).await?;

        let deleted = repo.delete(id).await.map_err(|error| match violation(&error) {
            Some(ConstraintViolation::ForeignKey(_)) => still_referenced::<T>(id),
            _ => storage_failure(error),
        })?;
        if !deleted {
            return Err(LoansError::not_found(T::NAME, id));
        }
        T::after_delete(Ref::new(id), &self.repos).await?;

        tracing::debug!(resource = T::NAME, id, "record deleted");
        Ok(())
    }

    // ===== Helper Methods =====

    /// Reject a unique key already held by another record
    async fn ensure_unique<T: Managed>(&self, fields: &T, current: Option<Id>) -> Result<(), LoansError> {
        let Some(key) = fields.unique_key() else {
            return Ok(());
        };

        let existing = T::repository(&self.repos)
            .find_by_unique_key(key)
            .await
            .map_err(storage_failure)?;

        match existing {
            Some(existing) if Some(existing.id) != current => Err(duplicate_key::<T>(key)),
            _ => Ok(()),
        }
    }

    /// Translate a failed insert or update into the error callers expect
    ///
    /// A concurrent writer can pass the pre-checks and still lose at the
    /// storage constraint; that outcome is reported as if the check had failed.
    async fn rejected_write<T: Managed>(&self, fields: &T, error: anyhow::Error) -> LoansError {
        match violation(&error) {
            Some(ConstraintViolation::Unique(_)) => {
                duplicate_key::<T>(fields.unique_key().unwrap_or_default())
            }
            Some(ConstraintViolation::ForeignKey(_)) => match fields.check_references(&self.repos).await {
                Err(missing) => missing,
                Ok(()) => LoansError::Conflict {
                    reason: format!("{} references a record that is being removed", T::NAME),
                },
            },
            None => storage_failure(error),
        }
    }
}

fn violation(error: &anyhow::Error) -> Option<&ConstraintViolation> {
    error.downcast_ref::<ConstraintViolation>()
}

fn duplicate_key<T: Resource>(key: &str) -> LoansError {
    LoansError::Conflict {
        reason: format!("{} with codigo '{}' already exists", T::NAME, key),
    }
}

fn still_referenced<T: Resource>(id: Id) -> LoansError {
    LoansError::Conflict {
        reason: format!("{} {} is still referenced", T::NAME, id),
    }
}
