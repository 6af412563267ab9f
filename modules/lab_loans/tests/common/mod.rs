//! Common test utilities: in-memory repositories and a seeded lab

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use lab_loans::contract::*;
use lab_loans::domain::{Repositories, Repository, Service};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== Mock repository =====

/// In-memory repository keyed by id, ids assigned from 1
pub struct MockRepository<T> {
    data: RwLock<BTreeMap<Id, T>>,
    next_id: AtomicI32,
}

impl<T> MockRepository<T> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }
}

impl<T> Default for MockRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn paged<T: Clone>(rows: impl Iterator<Item = (Id, T)>, page: Page) -> Vec<Record<T>> {
    rows.skip(page.offset as usize)
        .take(page.limit as usize)
        .map(|(id, fields)| Record::new(id, fields))
        .collect()
}

#[async_trait]
impl<T: Resource> Repository<T> for MockRepository<T> {
    async fn insert(&self, fields: &T) -> anyhow::Result<Record<T>> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.data.write().insert(id, fields.clone());
        Ok(Record::new(id, fields.clone()))
    }

    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<Record<T>>> {
        Ok(self
            .data
            .read()
            .get(&id)
            .map(|fields| Record::new(id, fields.clone())))
    }

    async fn find_by_unique_key(&self, key: &str) -> anyhow::Result<Option<Record<T>>> {
        Ok(self
            .data
            .read()
            .iter()
            .find(|(_, fields)| fields.unique_key() == Some(key))
            .map(|(id, fields)| Record::new(*id, fields.clone())))
    }

    async fn list(&self, page: Page) -> anyhow::Result<Vec<Record<T>>> {
        let data = self.data.read();
        Ok(paged(data.iter().map(|(id, f)| (*id, f.clone())), page))
    }

    async fn list_linked(&self, link: T::Link, page: Page) -> anyhow::Result<Vec<Record<T>>> {
        let data = self.data.read();
        Ok(paged(
            data.iter()
                .filter(|(_, f)| f.is_linked(link))
                .map(|(id, f)| (*id, f.clone())),
            page,
        ))
    }

    async fn count_linked(&self, link: T::Link) -> anyhow::Result<u64> {
        Ok(self
            .data
            .read()
            .values()
            .filter(|f| f.is_linked(link))
            .count() as u64)
    }

    async fn update(&self, record: &Record<T>) -> anyhow::Result<Option<Record<T>>> {
        let mut data = self.data.write();
        match data.get_mut(&record.id) {
            Some(fields) => {
                *fields = record.fields.clone();
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Id) -> anyhow::Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }

    async fn delete_linked(&self, link: T::Link) -> anyhow::Result<u64> {
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|_, f| !f.is_linked(link));
        Ok((before - data.len()) as u64)
    }

    async fn exists(&self, id: Id) -> anyhow::Result<bool> {
        Ok(self.data.read().contains_key(&id))
    }
}

// ===== Failing writes =====

/// In-memory repository whose insert or delete can be made to fail
pub struct FailingRepository<T> {
    pub inner: MockRepository<T>,
    pub insert_error: Option<fn() -> anyhow::Error>,
    pub delete_error: Option<fn() -> anyhow::Error>,
}

impl<T> FailingRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: MockRepository::new(),
            insert_error: None,
            delete_error: None,
        }
    }

    pub fn failing_insert(mut self, error: fn() -> anyhow::Error) -> Self {
        self.insert_error = Some(error);
        self
    }

    pub fn failing_delete(mut self, error: fn() -> anyhow::Error) -> Self {
        self.delete_error = Some(error);
        self
    }
}

#[async_trait]
impl<T: Resource> Repository<T> for FailingRepository<T> {
    async fn insert(&self, fields: &T) -> anyhow::Result<Record<T>> {
        match self.insert_error {
            Some(error) => Err(error()),
            None => self.inner.insert(fields).await,
        }
    }

    async fn find_by_id(&self, id: Id) -> anyhow::Result<Option<Record<T>>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_unique_key(&self, key: &str) -> anyhow::Result<Option<Record<T>>> {
        self.inner.find_by_unique_key(key).await
    }

    async fn list(&self, page: Page) -> anyhow::Result<Vec<Record<T>>> {
        self.inner.list(page).await
    }

    async fn list_linked(&self, link: T::Link, page: Page) -> anyhow::Result<Vec<Record<T>>> {
        self.inner.list_linked(link, page).await
    }

    async fn count_linked(&self, link: T::Link) -> anyhow::Result<u64> {
        self.inner.count_linked(link).await
    }

    async fn update(&self, record: &Record<T>) -> anyhow::Result<Option<Record<T>>> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: Id) -> anyhow::Result<bool> {
        match self.delete_error {
            Some(error) => Err(error()),
            None => self.inner.delete(id).await,
        }
    }

    async fn delete_linked(&self, link: T::Link) -> anyhow::Result<u64> {
        self.inner.delete_linked(link).await
    }

    async fn exists(&self, id: Id) -> anyhow::Result<bool> {
        self.inner.exists(id).await
    }
}

pub fn mock_repositories() -> Repositories {
    Repositories {
        cursos: Arc::new(MockRepository::<Curso>::new()),
        secciones: Arc::new(MockRepository::<Seccion>::new()),
        alumnos: Arc::new(MockRepository::<Alumno>::new()),
        componentes: Arc::new(MockRepository::<Componente>::new()),
        kits: Arc::new(MockRepository::<Kit>::new()),
        kit_componentes: Arc::new(MockRepository::<KitComponente>::new()),
        jornadas: Arc::new(MockRepository::<JornadaPrestamo>::new()),
        prestamos: Arc::new(MockRepository::<Prestamo>::new()),
        detalles: Arc::new(MockRepository::<DetallePrestamo>::new()),
    }
}

pub fn mock_service() -> Service {
    Service::new(mock_repositories())
}

// ===== Drafts =====

pub fn curso_draft(codigo: &str) -> CursoDraft {
    CursoDraft {
        nombre: Some("Redes de Computadoras".to_string()),
        codigo: Some(codigo.to_string()),
    }
}

pub fn seccion_draft(curso: Ref<Curso>) -> SeccionDraft {
    SeccionDraft {
        nombre: Some("A".to_string()),
        profesor: Some("Rosa Huaman".to_string()),
        curso: Some(curso),
    }
}

pub fn alumno_draft(codigo: &str, seccion: Ref<Seccion>) -> AlumnoDraft {
    AlumnoDraft {
        codigo: Some(codigo.to_string()),
        nombres: Some("Luis Alberto".to_string()),
        apellidos: Some("Mamani Condori".to_string()),
        seccion: Some(seccion),
    }
}

pub fn componente_draft(nombre: &str, requiere_numero_serie: bool) -> ComponenteDraft {
    ComponenteDraft {
        nombre: Some(nombre.to_string()),
        requiere_numero_serie: Some(requiere_numero_serie),
    }
}

pub fn kit_draft(nombre: &str) -> KitDraft {
    KitDraft {
        nombre: Some(nombre.to_string()),
        descripcion: Some("Placa, cables y sensores".to_string()),
    }
}

pub fn jornada_draft(curso: Ref<Curso>, seccion: Ref<Seccion>) -> JornadaPrestamoDraft {
    JornadaPrestamoDraft {
        fecha: NaiveDate::from_ymd_opt(2025, 4, 14),
        curso: Some(curso),
        seccion: Some(seccion),
    }
}

pub fn prestamo_draft(jornada: Ref<JornadaPrestamo>, alumno: Ref<Alumno>) -> PrestamoDraft {
    PrestamoDraft {
        jornada: Some(jornada),
        alumno: Some(alumno),
        estado: Some("PRESTADO".to_string()),
    }
}

// ===== Seeded lab =====

/// One record of every parent resource, linked together
pub struct Lab {
    pub curso: Record<Curso>,
    pub seccion: Record<Seccion>,
    pub alumno: Record<Alumno>,
    pub componente: Record<Componente>,
    pub kit: Record<Kit>,
    pub jornada: Record<JornadaPrestamo>,
}

pub async fn seed_lab(service: &Service) -> Lab {
    let curso = service.create::<Curso>(curso_draft("RC-2025")).await.unwrap();
    let seccion = service
        .create::<Seccion>(seccion_draft(curso.reference()))
        .await
        .unwrap();
    let alumno = service
        .create::<Alumno>(alumno_draft("20231234", seccion.reference()))
        .await
        .unwrap();
    let componente = service
        .create::<Componente>(componente_draft("Multimetro digital", true))
        .await
        .unwrap();
    let kit = service.create::<Kit>(kit_draft("Kit de Arduino")).await.unwrap();
    let jornada = service
        .create::<JornadaPrestamo>(jornada_draft(curso.reference(), seccion.reference()))
        .await
        .unwrap();

    Lab {
        curso,
        seccion,
        alumno,
        componente,
        kit,
        jornada,
    }
}
