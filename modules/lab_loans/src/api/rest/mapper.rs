//! Mapper implementations for converting between DTOs and contract models
//!
//! Requests become drafts (unvalidated); persisted records become response DTOs.

use super::dto::*;
use crate::contract::*;

fn link<T>(id: Option<i32>) -> Option<Ref<T>> {
    id.map(Ref::new)
}

// ===== Course conversions =====

impl From<CursoRequest> for CursoDraft {
    fn from(req: CursoRequest) -> Self {
        Self {
            nombre: req.nombre,
            codigo: req.codigo,
        }
    }
}

impl From<Record<Curso>> for CursoDto {
    fn from(record: Record<Curso>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            nombre: fields.nombre,
            codigo: fields.codigo,
        }
    }
}

impl From<SeccionRequest> for SeccionDraft {
    fn from(req: SeccionRequest) -> Self {
        Self {
            nombre: req.nombre,
            profesor: req.profesor,
            curso: link(req.curso_id),
        }
    }
}

impl From<Record<Seccion>> for SeccionDto {
    fn from(record: Record<Seccion>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            nombre: fields.nombre,
            profesor: fields.profesor,
            curso_id: fields.curso.id(),
        }
    }
}

// ===== Student conversions =====

impl From<AlumnoRequest> for AlumnoDraft {
    fn from(req: AlumnoRequest) -> Self {
        Self {
            codigo: req.codigo,
            nombres: req.nombres,
            apellidos: req.apellidos,
            seccion: link(req.seccion_id),
        }
    }
}

impl From<Record<Alumno>> for AlumnoDto {
    fn from(record: Record<Alumno>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            codigo: fields.codigo,
            nombres: fields.nombres,
            apellidos: fields.apellidos,
            seccion_id: fields.seccion.id(),
        }
    }
}

// ===== Equipment conversions =====

impl From<ComponenteRequest> for ComponenteDraft {
    fn from(req: ComponenteRequest) -> Self {
        Self {
            nombre: req.nombre,
            requiere_numero_serie: req.requiere_numero_serie,
        }
    }
}

impl From<Record<Componente>> for ComponenteDto {
    fn from(record: Record<Componente>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            nombre: fields.nombre,
            requiere_numero_serie: fields.requiere_numero_serie,
        }
    }
}

impl From<KitRequest> for KitDraft {
    fn from(req: KitRequest) -> Self {
        Self {
            nombre: req.nombre,
            descripcion: req.descripcion,
        }
    }
}

impl From<Record<Kit>> for KitDto {
    fn from(record: Record<Kit>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            nombre: fields.nombre,
            descripcion: fields.descripcion,
        }
    }
}

impl From<KitComponenteRequest> for KitComponenteDraft {
    fn from(req: KitComponenteRequest) -> Self {
        Self {
            kit: link(req.kit_id),
            componente: link(req.componente_id),
            cantidad: req.cantidad,
        }
    }
}

impl From<Record<KitComponente>> for KitComponenteDto {
    fn from(record: Record<KitComponente>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            kit_id: fields.kit.id(),
            componente_id: fields.componente.id(),
            cantidad: fields.cantidad,
        }
    }
}

impl From<KitLine> for KitLineDto {
    fn from(line: KitLine) -> Self {
        Self {
            id: line.linea.id,
            kit_id: line.linea.kit.id(),
            cantidad: line.linea.cantidad,
            componente: line.componente.into(),
        }
    }
}

// ===== Loan conversions =====

impl From<JornadaPrestamoRequest> for JornadaPrestamoDraft {
    fn from(req: JornadaPrestamoRequest) -> Self {
        Self {
            fecha: req.fecha,
            curso: link(req.curso_id),
            seccion: link(req.seccion_id),
        }
    }
}

impl From<Record<JornadaPrestamo>> for JornadaPrestamoDto {
    fn from(record: Record<JornadaPrestamo>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            fecha: fields.fecha,
            curso_id: fields.curso.id(),
            seccion_id: fields.seccion.id(),
        }
    }
}

impl From<PrestamoRequest> for PrestamoDraft {
    fn from(req: PrestamoRequest) -> Self {
        Self {
            jornada: link(req.jornada_id),
            alumno: link(req.alumno_id),
            estado: req.estado,
        }
    }
}

impl From<Record<Prestamo>> for PrestamoDto {
    fn from(record: Record<Prestamo>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            jornada_id: fields.jornada.id(),
            alumno_id: fields.alumno.id(),
            estado: fields.estado,
        }
    }
}

impl From<DetallePrestamoRequest> for DetallePrestamoDraft {
    fn from(req: DetallePrestamoRequest) -> Self {
        Self {
            prestamo: link(req.prestamo_id),
            kit: link(req.kit_id),
            componente: link(req.componente_id),
            cantidad: req.cantidad,
            numero_serie: req.numero_serie,
        }
    }
}

impl From<Record<DetallePrestamo>> for DetallePrestamoDto {
    fn from(record: Record<DetallePrestamo>) -> Self {
        let Record { id, fields } = record;
        Self {
            id,
            prestamo_id: fields.prestamo.id(),
            kit_id: fields.articulo.kit().map(|kit| kit.id()),
            componente_id: fields.articulo.componente().map(|componente| componente.id()),
            cantidad: fields.cantidad,
            numero_serie: fields.numero_serie,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detalle_dto_exposes_one_article_id() {
        let record = Record::new(
            8,
            DetallePrestamo {
                prestamo: Ref::new(3),
                articulo: Articulo::Kit(Ref::new(2)),
                cantidad: 1,
                numero_serie: None,
            },
        );

        let dto = DetallePrestamoDto::from(record);
        assert_eq!(dto.kit_id, Some(2));
        assert_eq!(dto.componente_id, None);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["componente_id"], serde_json::Value::Null);
        assert!(json.get("numero_serie").is_none());
    }

    #[test]
    fn test_request_ids_become_references() {
        let draft = PrestamoDraft::from(PrestamoRequest {
            jornada_id: Some(4),
            alumno_id: None,
            estado: Some("PRESTADO".to_string()),
        });
        assert_eq!(draft.jornada, Some(Ref::new(4)));
        assert_eq!(draft.alumno, None);
    }
}
