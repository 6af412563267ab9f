//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models, plus the column
//! lookups the generic repository needs for each resource.

use super::entity;
use crate::contract::*;
use anyhow::{bail, Result};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait};

type ColumnOf<T> = <<T as StoredResource>::Entity as EntityTrait>::Column;
type ModelOf<T> = <<T as StoredResource>::Entity as EntityTrait>::Model;

/// A resource persisted in one table
pub trait StoredResource: Resource {
    type Entity: EntityTrait;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;

    fn id_column() -> ColumnOf<Self>;

    /// Foreign key column and value selected by a link
    fn link_column(link: Self::Link) -> (ColumnOf<Self>, Id);

    /// Column backing `Resource::unique_key`
    fn unique_column() -> Option<ColumnOf<Self>> {
        None
    }

    /// Active model with every field set; `id` stays unset on insert
    fn to_active_model(&self, id: Option<Id>) -> Self::ActiveModel;

    fn from_model(model: ModelOf<Self>) -> Result<Record<Self>>;
}

fn key(id: Option<Id>) -> sea_orm::ActiveValue<Id> {
    id.map_or(NotSet, Set)
}

// ===== Courses and sections =====

impl StoredResource for Curso {
    type Entity = entity::curso::Entity;
    type ActiveModel = entity::curso::ActiveModel;

    fn id_column() -> entity::curso::Column {
        entity::curso::Column::Id
    }

    fn link_column(link: Unlinked) -> (entity::curso::Column, Id) {
        match link {}
    }

    fn unique_column() -> Option<entity::curso::Column> {
        Some(entity::curso::Column::Codigo)
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::curso::ActiveModel {
        entity::curso::ActiveModel {
            id: key(id),
            nombre: Set(self.nombre.clone()),
            codigo: Set(self.codigo.clone()),
        }
    }

    fn from_model(model: entity::curso::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Curso {
                nombre: model.nombre,
                codigo: model.codigo,
            },
        ))
    }
}

impl StoredResource for Seccion {
    type Entity = entity::seccion::Entity;
    type ActiveModel = entity::seccion::ActiveModel;

    fn id_column() -> entity::seccion::Column {
        entity::seccion::Column::Id
    }

    fn link_column(link: SeccionLink) -> (entity::seccion::Column, Id) {
        match link {
            SeccionLink::Curso(curso) => (entity::seccion::Column::CursoId, curso.id()),
        }
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::seccion::ActiveModel {
        entity::seccion::ActiveModel {
            id: key(id),
            nombre: Set(self.nombre.clone()),
            profesor: Set(self.profesor.clone()),
            curso_id: Set(self.curso.id()),
        }
    }

    fn from_model(model: entity::seccion::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Seccion {
                nombre: model.nombre,
                profesor: model.profesor,
                curso: Ref::new(model.curso_id),
            },
        ))
    }
}

impl StoredResource for Alumno {
    type Entity = entity::alumno::Entity;
    type ActiveModel = entity::alumno::ActiveModel;

    fn id_column() -> entity::alumno::Column {
        entity::alumno::Column::Id
    }

    fn link_column(link: AlumnoLink) -> (entity::alumno::Column, Id) {
        match link {
            AlumnoLink::Seccion(seccion) => (entity::alumno::Column::SeccionId, seccion.id()),
        }
    }

    fn unique_column() -> Option<entity::alumno::Column> {
        Some(entity::alumno::Column::Codigo)
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::alumno::ActiveModel {
        entity::alumno::ActiveModel {
            id: key(id),
            codigo: Set(self.codigo.clone()),
            nombres: Set(self.nombres.clone()),
            apellidos: Set(self.apellidos.clone()),
            seccion_id: Set(self.seccion.id()),
        }
    }

    fn from_model(model: entity::alumno::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Alumno {
                codigo: model.codigo,
                nombres: model.nombres,
                apellidos: model.apellidos,
                seccion: Ref::new(model.seccion_id),
            },
        ))
    }
}

// ===== Equipment =====

impl StoredResource for Componente {
    type Entity = entity::componente::Entity;
    type ActiveModel = entity::componente::ActiveModel;

    fn id_column() -> entity::componente::Column {
        entity::componente::Column::Id
    }

    fn link_column(link: Unlinked) -> (entity::componente::Column, Id) {
        match link {}
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::componente::ActiveModel {
        entity::componente::ActiveModel {
            id: key(id),
            nombre: Set(self.nombre.clone()),
            requiere_numero_serie: Set(self.requiere_numero_serie),
        }
    }

    fn from_model(model: entity::componente::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Componente {
                nombre: model.nombre,
                requiere_numero_serie: model.requiere_numero_serie,
            },
        ))
    }
}

impl StoredResource for Kit {
    type Entity = entity::kit::Entity;
    type ActiveModel = entity::kit::ActiveModel;

    fn id_column() -> entity::kit::Column {
        entity::kit::Column::Id
    }

    fn link_column(link: Unlinked) -> (entity::kit::Column, Id) {
        match link {}
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::kit::ActiveModel {
        entity::kit::ActiveModel {
            id: key(id),
            nombre: Set(self.nombre.clone()),
            descripcion: Set(self.descripcion.clone()),
        }
    }

    fn from_model(model: entity::kit::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Kit {
                nombre: model.nombre,
                descripcion: model.descripcion,
            },
        ))
    }
}

impl StoredResource for KitComponente {
    type Entity = entity::kit_componente::Entity;
    type ActiveModel = entity::kit_componente::ActiveModel;

    fn id_column() -> entity::kit_componente::Column {
        entity::kit_componente::Column::Id
    }

    fn link_column(link: KitComponenteLink) -> (entity::kit_componente::Column, Id) {
        match link {
            KitComponenteLink::Kit(kit) => (entity::kit_componente::Column::KitId, kit.id()),
            KitComponenteLink::Componente(componente) => {
                (entity::kit_componente::Column::ComponenteId, componente.id())
            }
        }
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::kit_componente::ActiveModel {
        entity::kit_componente::ActiveModel {
            id: key(id),
            kit_id: Set(self.kit.id()),
            componente_id: Set(self.componente.id()),
            cantidad: Set(self.cantidad),
        }
    }

    fn from_model(model: entity::kit_componente::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            KitComponente {
                kit: Ref::new(model.kit_id),
                componente: Ref::new(model.componente_id),
                cantidad: model.cantidad,
            },
        ))
    }
}

// ===== Loans =====

impl StoredResource for JornadaPrestamo {
    type Entity = entity::jornada_prestamo::Entity;
    type ActiveModel = entity::jornada_prestamo::ActiveModel;

    fn id_column() -> entity::jornada_prestamo::Column {
        entity::jornada_prestamo::Column::Id
    }

    fn link_column(link: JornadaLink) -> (entity::jornada_prestamo::Column, Id) {
        match link {
            JornadaLink::Curso(curso) => (entity::jornada_prestamo::Column::CursoId, curso.id()),
            JornadaLink::Seccion(seccion) => {
                (entity::jornada_prestamo::Column::SeccionId, seccion.id())
            }
        }
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::jornada_prestamo::ActiveModel {
        entity::jornada_prestamo::ActiveModel {
            id: key(id),
            fecha: Set(self.fecha),
            curso_id: Set(self.curso.id()),
            seccion_id: Set(self.seccion.id()),
        }
    }

    fn from_model(model: entity::jornada_prestamo::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            JornadaPrestamo {
                fecha: model.fecha,
                curso: Ref::new(model.curso_id),
                seccion: Ref::new(model.seccion_id),
            },
        ))
    }
}

impl StoredResource for Prestamo {
    type Entity = entity::prestamo::Entity;
    type ActiveModel = entity::prestamo::ActiveModel;

    fn id_column() -> entity::prestamo::Column {
        entity::prestamo::Column::Id
    }

    fn link_column(link: PrestamoLink) -> (entity::prestamo::Column, Id) {
        match link {
            PrestamoLink::Jornada(jornada) => (entity::prestamo::Column::JornadaId, jornada.id()),
            PrestamoLink::Alumno(alumno) => (entity::prestamo::Column::AlumnoId, alumno.id()),
        }
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::prestamo::ActiveModel {
        entity::prestamo::ActiveModel {
            id: key(id),
            jornada_id: Set(self.jornada.id()),
            alumno_id: Set(self.alumno.id()),
            estado: Set(self.estado.clone()),
        }
    }

    fn from_model(model: entity::prestamo::Model) -> Result<Record<Self>> {
        Ok(Record::new(
            model.id,
            Prestamo {
                jornada: Ref::new(model.jornada_id),
                alumno: Ref::new(model.alumno_id),
                estado: model.estado,
            },
        ))
    }
}

impl StoredResource for DetallePrestamo {
    type Entity = entity::detalle_prestamo::Entity;
    type ActiveModel = entity::detalle_prestamo::ActiveModel;

    fn id_column() -> entity::detalle_prestamo::Column {
        entity::detalle_prestamo::Column::Id
    }

    fn link_column(link: DetalleLink) -> (entity::detalle_prestamo::Column, Id) {
        match link {
            DetalleLink::Prestamo(prestamo) => {
                (entity::detalle_prestamo::Column::PrestamoId, prestamo.id())
            }
            DetalleLink::Kit(kit) => (entity::detalle_prestamo::Column::KitId, kit.id()),
            DetalleLink::Componente(componente) => {
                (entity::detalle_prestamo::Column::ComponenteId, componente.id())
            }
        }
    }

    fn to_active_model(&self, id: Option<Id>) -> entity::detalle_prestamo::ActiveModel {
        entity::detalle_prestamo::ActiveModel {
            id: key(id),
            prestamo_id: Set(self.prestamo.id()),
            kit_id: Set(self.articulo.kit().map(|kit| kit.id())),
            componente_id: Set(self.articulo.componente().map(|componente| componente.id())),
            cantidad: Set(self.cantidad),
            numero_serie: Set(self.numero_serie.clone()),
        }
    }

    fn from_model(model: entity::detalle_prestamo::Model) -> Result<Record<Self>> {
        let articulo = match (model.kit_id, model.componente_id) {
            (Some(kit), None) => Articulo::Kit(Ref::new(kit)),
            (None, Some(componente)) => Articulo::Componente(Ref::new(componente)),
            (kit, componente) => bail!(
                "detalle_prestamo {} must reference exactly one article (kit_id={:?}, componente_id={:?})",
                model.id,
                kit,
                componente
            ),
        };

        Ok(Record::new(
            model.id,
            DetallePrestamo {
                prestamo: Ref::new(model.prestamo_id),
                articulo,
                cantidad: model.cantidad,
                numero_serie: model.numero_serie,
            },
        ))
    }
}
