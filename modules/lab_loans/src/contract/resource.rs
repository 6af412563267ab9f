//! Resource metadata shared by the domain, storage and REST layers

use super::error::LoansError;
use super::model::*;
use std::fmt;

/// Converts an incoming draft into validated record fields
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, LoansError>;
}

/// A record type managed by the lab loans module
pub trait Resource: fmt::Debug + Clone + Send + Sync + 'static {
    /// Singular resource name used in errors and logs
    const NAME: &'static str;

    /// Payload form where every field may be missing
    type Draft: Validate<Valid = Self> + fmt::Debug + Send + 'static;

    /// Foreign keys the resource can be listed by
    type Link: fmt::Debug + Copy + Send + Sync + 'static;

    fn is_linked(&self, link: Self::Link) -> bool;

    /// Value that must be unique across all records of this resource
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// Child resources reachable from a parent record
pub trait LinkedBy<P>: Resource {
    fn link(parent: Ref<P>) -> Self::Link;
}

impl Resource for Curso {
    const NAME: &'static str = "curso";
    type Draft = CursoDraft;
    type Link = Unlinked;

    fn is_linked(&self, link: Unlinked) -> bool {
        match link {}
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.codigo)
    }
}

impl Resource for Seccion {
    const NAME: &'static str = "seccion";
    type Draft = SeccionDraft;
    type Link = SeccionLink;

    fn is_linked(&self, link: SeccionLink) -> bool {
        match link {
            SeccionLink::Curso(curso) => self.curso == curso,
        }
    }
}

impl Resource for Alumno {
    const NAME: &'static str = "alumno";
    type Draft = AlumnoDraft;
    type Link = AlumnoLink;

    fn is_linked(&self, link: AlumnoLink) -> bool {
        match link {
            AlumnoLink::Seccion(seccion) => self.seccion == seccion,
        }
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.codigo)
    }
}

impl Resource for Componente {
    const NAME: &'static str = "componente";
    type Draft = ComponenteDraft;
    type Link = Unlinked;

    fn is_linked(&self, link: Unlinked) -> bool {
        match link {}
    }
}

impl Resource for Kit {
    const NAME: &'static str = "kit";
    type Draft = KitDraft;
    type Link = Unlinked;

    fn is_linked(&self, link: Unlinked) -> bool {
        match link {}
    }
}

impl Resource for KitComponente {
    const NAME: &'static str = "kit_componente";
    type Draft = KitComponenteDraft;
    type Link = KitComponenteLink;

    fn is_linked(&self, link: KitComponenteLink) -> bool {
        match link {
            KitComponenteLink::Kit(kit) => self.kit == kit,
            KitComponenteLink::Componente(componente) => self.componente == componente,
        }
    }
}

impl Resource for JornadaPrestamo {
    const NAME: &'static str = "jornada_prestamo";
    type Draft = JornadaPrestamoDraft;
    type Link = JornadaLink;

    fn is_linked(&self, link: JornadaLink) -> bool {
        match link {
            JornadaLink::Curso(curso) => self.curso == curso,
            JornadaLink::Seccion(seccion) => self.seccion == seccion,
        }
    }
}

impl Resource for Prestamo {
    const NAME: &'static str = "prestamo";
    type Draft = PrestamoDraft;
    type Link = PrestamoLink;

    fn is_linked(&self, link: PrestamoLink) -> bool {
        match link {
            PrestamoLink::Jornada(jornada) => self.jornada == jornada,
            PrestamoLink::Alumno(alumno) => self.alumno == alumno,
        }
    }
}

impl Resource for DetallePrestamo {
    const NAME: &'static str = "detalle_prestamo";
    type Draft = DetallePrestamoDraft;
    type Link = DetalleLink;

    fn is_linked(&self, link: DetalleLink) -> bool {
        match link {
            DetalleLink::Prestamo(prestamo) => self.prestamo == prestamo,
            DetalleLink::Kit(kit) => self.articulo.kit() == Some(kit),
            DetalleLink::Componente(componente) => self.articulo.componente() == Some(componente),
        }
    }
}

// ===== Parent -> child traversal =====

impl LinkedBy<Curso> for Seccion {
    fn link(parent: Ref<Curso>) -> SeccionLink {
        SeccionLink::Curso(parent)
    }
}

impl LinkedBy<Curso> for JornadaPrestamo {
    fn link(parent: Ref<Curso>) -> JornadaLink {
        JornadaLink::Curso(parent)
    }
}

impl LinkedBy<Seccion> for Alumno {
    fn link(parent: Ref<Seccion>) -> AlumnoLink {
        AlumnoLink::Seccion(parent)
    }
}

impl LinkedBy<Seccion> for JornadaPrestamo {
    fn link(parent: Ref<Seccion>) -> JornadaLink {
        JornadaLink::Seccion(parent)
    }
}

impl LinkedBy<Alumno> for Prestamo {
    fn link(parent: Ref<Alumno>) -> PrestamoLink {
        PrestamoLink::Alumno(parent)
    }
}

impl LinkedBy<JornadaPrestamo> for Prestamo {
    fn link(parent: Ref<JornadaPrestamo>) -> PrestamoLink {
        PrestamoLink::Jornada(parent)
    }
}

impl LinkedBy<Prestamo> for DetallePrestamo {
    fn link(parent: Ref<Prestamo>) -> DetalleLink {
        DetalleLink::Prestamo(parent)
    }
}

impl LinkedBy<Kit> for KitComponente {
    fn link(parent: Ref<Kit>) -> KitComponenteLink {
        KitComponenteLink::Kit(parent)
    }
}
