//! SeaORM entities for database tables

/// `cursos` table
pub mod curso {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "cursos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub nombre: String,
        #[sea_orm(unique)]
        pub codigo: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::seccion::Entity")]
        Secciones,
        #[sea_orm(has_many = "super::jornada_prestamo::Entity")]
        Jornadas,
    }

    impl Related<super::seccion::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Secciones.def()
        }
    }

    impl Related<super::jornada_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Jornadas.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `secciones` table
pub mod seccion {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "secciones")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub nombre: String,
        pub profesor: String,
        pub curso_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::curso::Entity",
            from = "Column::CursoId",
            to = "super::curso::Column::Id",
            on_delete = "Restrict"
        )]
        Curso,
        #[sea_orm(has_many = "super::alumno::Entity")]
        Alumnos,
        #[sea_orm(has_many = "super::jornada_prestamo::Entity")]
        Jornadas,
    }

    impl Related<super::curso::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Curso.def()
        }
    }

    impl Related<super::alumno::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Alumnos.def()
        }
    }

    impl Related<super::jornada_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Jornadas.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `alumnos` table
pub mod alumno {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "alumnos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        #[sea_orm(unique)]
        pub codigo: String,
        pub nombres: String,
        pub apellidos: String,
        pub seccion_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::seccion::Entity",
            from = "Column::SeccionId",
            to = "super::seccion::Column::Id",
            on_delete = "Restrict"
        )]
        Seccion,
        #[sea_orm(has_many = "super::prestamo::Entity")]
        Prestamos,
    }

    impl Related<super::seccion::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Seccion.def()
        }
    }

    impl Related<super::prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Prestamos.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `componentes` table
pub mod componente {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "componentes")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub nombre: String,
        pub requiere_numero_serie: bool,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::kit_componente::Entity")]
        KitComponentes,
        #[sea_orm(has_many = "super::detalle_prestamo::Entity")]
        Detalles,
    }

    impl Related<super::kit_componente::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::KitComponentes.def()
        }
    }

    impl Related<super::detalle_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Detalles.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `kits` table
pub mod kit {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "kits")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub nombre: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub descripcion: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::kit_componente::Entity")]
        KitComponentes,
        #[sea_orm(has_many = "super::detalle_prestamo::Entity")]
        Detalles,
    }

    impl Related<super::kit_componente::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::KitComponentes.def()
        }
    }

    impl Related<super::detalle_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Detalles.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `kit_componentes` table
pub mod kit_componente {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "kit_componentes")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub kit_id: i32,
        pub componente_id: i32,
        pub cantidad: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::kit::Entity",
            from = "Column::KitId",
            to = "super::kit::Column::Id",
            on_delete = "Cascade"
        )]
        Kit,
        #[sea_orm(
            belongs_to = "super::componente::Entity",
            from = "Column::ComponenteId",
            to = "super::componente::Column::Id",
            on_delete = "Restrict"
        )]
        Componente,
    }

    impl Related<super::kit::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Kit.def()
        }
    }

    impl Related<super::componente::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Componente.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `jornadas_prestamo` table
pub mod jornada_prestamo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "jornadas_prestamo")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub fecha: Date,
        pub curso_id: i32,
        pub seccion_id: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::curso::Entity",
            from = "Column::CursoId",
            to = "super::curso::Column::Id",
            on_delete = "Restrict"
        )]
        Curso,
        #[sea_orm(
            belongs_to = "super::seccion::Entity",
            from = "Column::SeccionId",
            to = "super::seccion::Column::Id",
            on_delete = "Restrict"
        )]
        Seccion,
        #[sea_orm(has_many = "super::prestamo::Entity")]
        Prestamos,
    }

    impl Related<super::curso::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Curso.def()
        }
    }

    impl Related<super::seccion::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Seccion.def()
        }
    }

    impl Related<super::prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Prestamos.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `prestamos` table
pub mod prestamo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "prestamos")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub jornada_id: i32,
        pub alumno_id: i32,
        pub estado: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::jornada_prestamo::Entity",
            from = "Column::JornadaId",
            to = "super::jornada_prestamo::Column::Id",
            on_delete = "Restrict"
        )]
        Jornada,
        #[sea_orm(
            belongs_to = "super::alumno::Entity",
            from = "Column::AlumnoId",
            to = "super::alumno::Column::Id",
            on_delete = "Restrict"
        )]
        Alumno,
        #[sea_orm(has_many = "super::detalle_prestamo::Entity")]
        Detalles,
    }

    impl Related<super::jornada_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Jornada.def()
        }
    }

    impl Related<super::alumno::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Alumno.def()
        }
    }

    impl Related<super::detalle_prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Detalles.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// `detalles_prestamo` table
pub mod detalle_prestamo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "detalles_prestamo")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub prestamo_id: i32,
        /// Exactly one of `kit_id`/`componente_id` is set (check constraint)
        pub kit_id: Option<i32>,
        pub componente_id: Option<i32>,
        pub cantidad: i32,
        pub numero_serie: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::prestamo::Entity",
            from = "Column::PrestamoId",
            to = "super::prestamo::Column::Id",
            on_delete = "Cascade"
        )]
        Prestamo,
        #[sea_orm(
            belongs_to = "super::kit::Entity",
            from = "Column::KitId",
            to = "super::kit::Column::Id",
            on_delete = "Restrict"
        )]
        Kit,
        #[sea_orm(
            belongs_to = "super::componente::Entity",
            from = "Column::ComponenteId",
            to = "super::componente::Column::Id",
            on_delete = "Restrict"
        )]
        Componente,
    }

    impl Related<super::prestamo::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Prestamo.def()
        }
    }

    impl Related<super::kit::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Kit.def()
        }
    }

    impl Related<super::componente::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Componente.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
