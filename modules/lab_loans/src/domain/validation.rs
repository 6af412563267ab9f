//! Draft validation - required fields, text limits and quantities
//!
//! Every draft is checked here before anything reaches storage. Text is
//! trimmed; blank optional text is stored as absent.

use crate::contract::*;

/// Column limits of the storage schema
pub const CODIGO_MAX_LEN: usize = 50;
pub const NOMBRE_MAX_LEN: usize = 255;
pub const ESTADO_MAX_LEN: usize = 20;
pub const NUMERO_SERIE_MAX_LEN: usize = 100;

fn required<T>(field: &str, value: Option<T>) -> Result<T, LoansError> {
    value.ok_or_else(|| LoansError::validation(format!("{} is required", field)))
}

fn required_text(field: &str, value: Option<String>, max_len: usize) -> Result<String, LoansError> {
    let text = required(field, value)?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LoansError::validation(format!("{} cannot be blank", field)));
    }
    check_len(field, trimmed, max_len)?;
    Ok(trimmed.to_string())
}

fn optional_text(
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Result<Option<String>, LoansError> {
    let Some(text) = value else {
        return Ok(None);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(max_len) = max_len {
        check_len(field, trimmed, max_len)?;
    }
    Ok(Some(trimmed.to_string()))
}

fn check_len(field: &str, text: &str, max_len: usize) -> Result<(), LoansError> {
    if text.chars().count() > max_len {
        return Err(LoansError::validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

fn positive_quantity(field: &str, value: Option<i32>) -> Result<i32, LoansError> {
    let cantidad = required(field, value)?;
    if cantidad <= 0 {
        return Err(LoansError::validation(format!(
            "{} must be greater than zero, got {}",
            field, cantidad
        )));
    }
    Ok(cantidad)
}

impl Validate for CursoDraft {
    type Valid = Curso;

    fn validate(self) -> Result<Curso, LoansError> {
        Ok(Curso {
            nombre: required_text("nombre", self.nombre, NOMBRE_MAX_LEN)?,
            codigo: required_text("codigo", self.codigo, CODIGO_MAX_LEN)?,
        })
    }
}

impl Validate for SeccionDraft {
    type Valid = Seccion;

    fn validate(self) -> Result<Seccion, LoansError> {
        Ok(Seccion {
            nombre: required_text("nombre", self.nombre, NOMBRE_MAX_LEN)?,
            profesor: required_text("profesor", self.profesor, NOMBRE_MAX_LEN)?,
            curso: required("curso_id", self.curso)?,
        })
    }
}

impl Validate for AlumnoDraft {
    type Valid = Alumno;

    fn validate(self) -> Result<Alumno, LoansError> {
        Ok(Alumno {
            codigo: required_text("codigo", self.codigo, CODIGO_MAX_LEN)?,
            nombres: required_text("nombres", self.nombres, NOMBRE_MAX_LEN)?,
            apellidos: required_text("apellidos", self.apellidos, NOMBRE_MAX_LEN)?,
            seccion: required("seccion_id", self.seccion)?,
        })
    }
}

impl Validate for ComponenteDraft {
    type Valid = Componente;

    fn validate(self) -> Result<Componente, LoansError> {
        Ok(Componente {
            nombre: required_text("nombre", self.nombre, NOMBRE_MAX_LEN)?,
            requiere_numero_serie: self.requiere_numero_serie.unwrap_or(false),
        })
    }
}

impl Validate for KitDraft {
    type Valid = Kit;

    fn validate(self) -> Result<Kit, LoansError> {
        Ok(Kit {
            nombre: required_text("nombre", self.nombre, NOMBRE_MAX_LEN)?,
            descripcion: optional_text("descripcion", self.descripcion, None)?,
        })
    }
}

impl Validate for KitComponenteDraft {
    type Valid = KitComponente;

    fn validate(self) -> Result<KitComponente, LoansError> {
        Ok(KitComponente {
            kit: required("kit_id", self.kit)?,
            componente: required("componente_id", self.componente)?,
            cantidad: positive_quantity("cantidad", self.cantidad)?,
        })
    }
}

impl Validate for JornadaPrestamoDraft {
    type Valid = JornadaPrestamo;

    fn validate(self) -> Result<JornadaPrestamo, LoansError> {
        Ok(JornadaPrestamo {
            fecha: required("fecha", self.fecha)?,
            curso: required("curso_id", self.curso)?,
            seccion: required("seccion_id", self.seccion)?,
        })
    }
}

impl Validate for PrestamoDraft {
    type Valid = Prestamo;

    fn validate(self) -> Result<Prestamo, LoansError> {
        Ok(Prestamo {
            jornada: required("jornada_id", self.jornada)?,
            alumno: required("alumno_id", self.alumno)?,
            estado: required_text("estado", self.estado, ESTADO_MAX_LEN)?,
        })
    }
}

impl Validate for DetallePrestamoDraft {
    type Valid = DetallePrestamo;

    fn validate(self) -> Result<DetallePrestamo, LoansError> {
        let prestamo = required("prestamo_id", self.prestamo)?;
        let articulo = match (self.kit, self.componente) {
            (Some(kit), None) => Articulo::Kit(kit),
            (None, Some(componente)) => Articulo::Componente(componente),
            (Some(_), Some(_)) => {
                return Err(LoansError::validation(
                    "a loan line references either kit_id or componente_id, not both",
                ))
            }
            (None, None) => {
                return Err(LoansError::validation(
                    "kit_id or componente_id is required",
                ))
            }
        };

        Ok(DetallePrestamo {
            prestamo,
            articulo,
            cantidad: positive_quantity("cantidad", self.cantidad)?,
            numero_serie: optional_text(
                "numero_serie",
                self.numero_serie,
                Some(NUMERO_SERIE_MAX_LEN),
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assert_validation_mentions<T: std::fmt::Debug>(result: Result<T, LoansError>, needle: &str) {
        match result {
            Err(LoansError::Validation { message }) => assert!(
                message.contains(needle),
                "expected '{}' in validation message '{}'",
                needle,
                message
            ),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    fn alumno_draft() -> AlumnoDraft {
        AlumnoDraft {
            codigo: Some("20231234".to_string()),
            nombres: Some("Ana Lucia".to_string()),
            apellidos: Some("Quispe Rojas".to_string()),
            seccion: Some(Ref::new(1)),
        }
    }

    #[test]
    fn test_alumno_valid_draft_is_trimmed() {
        let mut draft = alumno_draft();
        draft.nombres = Some("  Ana Lucia ".to_string());

        let alumno = draft.validate().unwrap();
        assert_eq!(alumno.nombres, "Ana Lucia");
        assert_eq!(alumno.seccion, Ref::new(1));
    }

    #[test]
    fn test_alumno_each_required_field() {
        let mut draft = alumno_draft();
        draft.codigo = None;
        assert_validation_mentions(draft.validate(), "codigo");

        let mut draft = alumno_draft();
        draft.nombres = None;
        assert_validation_mentions(draft.validate(), "nombres");

        let mut draft = alumno_draft();
        draft.apellidos = Some("   ".to_string());
        assert_validation_mentions(draft.validate(), "apellidos");

        let mut draft = alumno_draft();
        draft.seccion = None;
        assert_validation_mentions(draft.validate(), "seccion_id");
    }

    #[test]
    fn test_text_length_limits() {
        let mut draft = alumno_draft();
        draft.codigo = Some("9".repeat(CODIGO_MAX_LEN + 1));
        assert_validation_mentions(draft.validate(), "at most 50");

        let mut draft = alumno_draft();
        draft.codigo = Some("ñ".repeat(CODIGO_MAX_LEN));
        assert!(draft.validate().is_ok());

        let prestamo = PrestamoDraft {
            jornada: Some(Ref::new(1)),
            alumno: Some(Ref::new(1)),
            estado: Some("PENDIENTE_DE_DEVOLUCION".to_string()),
        };
        assert_validation_mentions(prestamo.validate(), "estado");
    }

    #[test]
    fn test_componente_defaults_serial_flag() {
        let componente = ComponenteDraft {
            nombre: Some("Protoboard".to_string()),
            requiere_numero_serie: None,
        }
        .validate()
        .unwrap();
        assert!(!componente.requiere_numero_serie);

        assert_validation_mentions(ComponenteDraft::default().validate(), "nombre");
    }

    #[test]
    fn test_kit_blank_description_becomes_none() {
        let kit = KitDraft {
            nombre: Some("Kit de Redes".to_string()),
            descripcion: Some("  ".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(kit.descripcion, None);
    }

    #[test]
    fn test_quantities_must_be_positive() {
        let draft = KitComponenteDraft {
            kit: Some(Ref::new(1)),
            componente: Some(Ref::new(2)),
            cantidad: Some(0),
        };
        assert_validation_mentions(draft.validate(), "greater than zero");

        let draft = KitComponenteDraft {
            kit: Some(Ref::new(1)),
            componente: Some(Ref::new(2)),
            cantidad: None,
        };
        assert_validation_mentions(draft.validate(), "cantidad is required");
    }

    #[test]
    fn test_jornada_requires_date_and_links() {
        let draft = JornadaPrestamoDraft {
            fecha: NaiveDate::from_ymd_opt(2025, 4, 14),
            curso: Some(Ref::new(1)),
            seccion: None,
        };
        assert_validation_mentions(draft.validate(), "seccion_id");

        let draft = JornadaPrestamoDraft {
            fecha: None,
            curso: Some(Ref::new(1)),
            seccion: Some(Ref::new(1)),
        };
        assert_validation_mentions(draft.validate(), "fecha");
    }

    #[test]
    fn test_detalle_articulo_exclusivity() {
        let base = DetallePrestamoDraft {
            prestamo: Some(Ref::new(1)),
            cantidad: Some(1),
            ..Default::default()
        };

        let kit_only = DetallePrestamoDraft {
            kit: Some(Ref::new(4)),
            ..base.clone()
        };
        assert_eq!(kit_only.validate().unwrap().articulo, Articulo::Kit(Ref::new(4)));

        let componente_only = DetallePrestamoDraft {
            componente: Some(Ref::new(5)),
            numero_serie: Some(" SN-001 ".to_string()),
            ..base.clone()
        };
        let detalle = componente_only.validate().unwrap();
        assert_eq!(detalle.articulo, Articulo::Componente(Ref::new(5)));
        assert_eq!(detalle.numero_serie.as_deref(), Some("SN-001"));

        let both = DetallePrestamoDraft {
            kit: Some(Ref::new(4)),
            componente: Some(Ref::new(5)),
            ..base.clone()
        };
        assert_validation_mentions(both.validate(), "not both");

        assert_validation_mentions(base.validate(), "kit_id or componente_id is required");
    }
}
