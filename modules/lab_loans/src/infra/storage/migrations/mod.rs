//! Database migrations for lab loans

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalog::Migration),
            Box::new(m20250301_000002_create_loans::Migration),
        ]
    }
}

fn id_column<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

mod m20250301_000001_create_catalog {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_catalog"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Cursos::Table)
                        .if_not_exists()
                        .col(id_column(Cursos::Id))
                        .col(ColumnDef::new(Cursos::Nombre).string_len(255).not_null())
                        .col(ColumnDef::new(Cursos::Codigo).string_len(50).not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Secciones::Table)
                        .if_not_exists()
                        .col(id_column(Secciones::Id))
                        .col(ColumnDef::new(Secciones::Nombre).string_len(255).not_null())
                        .col(ColumnDef::new(Secciones::Profesor).string_len(255).not_null())
                        .col(ColumnDef::new(Secciones::CursoId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_secciones_curso")
                                .from(Secciones::Table, Secciones::CursoId)
                                .to(Cursos::Table, Cursos::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Alumnos::Table)
                        .if_not_exists()
                        .col(id_column(Alumnos::Id))
                        .col(ColumnDef::new(Alumnos::Codigo).string_len(50).not_null())
                        .col(ColumnDef::new(Alumnos::Nombres).string_len(255).not_null())
                        .col(ColumnDef::new(Alumnos::Apellidos).string_len(255).not_null())
                        .col(ColumnDef::new(Alumnos::SeccionId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_alumnos_seccion")
                                .from(Alumnos::Table, Alumnos::SeccionId)
                                .to(Secciones::Table, Secciones::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Componentes::Table)
                        .if_not_exists()
                        .col(id_column(Componentes::Id))
                        .col(ColumnDef::new(Componentes::Nombre).string_len(255).not_null())
                        .col(
                            ColumnDef::new(Componentes::RequiereNumeroSerie)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Kits::Table)
                        .if_not_exists()
                        .col(id_column(Kits::Id))
                        .col(ColumnDef::new(Kits::Nombre).string_len(255).not_null())
                        .col(ColumnDef::new(Kits::Descripcion).text())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(KitComponentes::Table)
                        .if_not_exists()
                        .col(id_column(KitComponentes::Id))
                        .col(ColumnDef::new(KitComponentes::KitId).integer().not_null())
                        .col(ColumnDef::new(KitComponentes::ComponenteId).integer().not_null())
                        .col(ColumnDef::new(KitComponentes::Cantidad).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_kit_componentes_kit")
                                .from(KitComponentes::Table, KitComponentes::KitId)
                                .to(Kits::Table, Kits::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_kit_componentes_componente")
                                .from(KitComponentes::Table, KitComponentes::ComponenteId)
                                .to(Componentes::Table, Componentes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // Unique codes
            manager
                .create_index(
                    Index::create()
                        .name("idx_cursos_codigo")
                        .table(Cursos::Table)
                        .col(Cursos::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_alumnos_codigo")
                        .table(Alumnos::Table)
                        .col(Alumnos::Codigo)
                        .unique()
                        .to_owned(),
                )
                .await?;

            // Foreign key lookups
            manager
                .create_index(
                    Index::create()
                        .name("idx_secciones_curso_id")
                        .table(Secciones::Table)
                        .col(Secciones::CursoId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_alumnos_seccion_id")
                        .table(Alumnos::Table)
                        .col(Alumnos::SeccionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_kit_componentes_kit_id")
                        .table(KitComponentes::Table)
                        .col(KitComponentes::KitId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_kit_componentes_componente_id")
                        .table(KitComponentes::Table)
                        .col(KitComponentes::ComponenteId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(KitComponentes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Kits::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Componentes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Alumnos::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Secciones::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Cursos::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Cursos {
        Table,
        Id,
        Nombre,
        Codigo,
    }

    #[derive(DeriveIden)]
    enum Secciones {
        Table,
        Id,
        Nombre,
        Profesor,
        CursoId,
    }

    #[derive(DeriveIden)]
    enum Alumnos {
        Table,
        Id,
        Codigo,
        Nombres,
        Apellidos,
        SeccionId,
    }

    #[derive(DeriveIden)]
    enum Componentes {
        Table,
        Id,
        Nombre,
        RequiereNumeroSerie,
    }

    #[derive(DeriveIden)]
    enum Kits {
        Table,
        Id,
        Nombre,
        Descripcion,
    }

    #[derive(DeriveIden)]
    enum KitComponentes {
        Table,
        Id,
        KitId,
        ComponenteId,
        Cantidad,
    }
}

mod m20250301_000002_create_loans {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_loans"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(JornadasPrestamo::Table)
                        .if_not_exists()
                        .col(id_column(JornadasPrestamo::Id))
                        .col(ColumnDef::new(JornadasPrestamo::Fecha).date().not_null())
                        .col(ColumnDef::new(JornadasPrestamo::CursoId).integer().not_null())
                        .col(ColumnDef::new(JornadasPrestamo::SeccionId).integer().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_jornadas_prestamo_curso")
                                .from(JornadasPrestamo::Table, JornadasPrestamo::CursoId)
                                .to(Cursos::Table, Cursos::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_jornadas_prestamo_seccion")
                                .from(JornadasPrestamo::Table, JornadasPrestamo::SeccionId)
                                .to(Secciones::Table, Secciones::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Prestamos::Table)
                        .if_not_exists()
                        .col(id_column(Prestamos::Id))
                        .col(ColumnDef::new(Prestamos::JornadaId).integer().not_null())
                        .col(ColumnDef::new(Prestamos::AlumnoId).integer().not_null())
                        .col(ColumnDef::new(Prestamos::Estado).string_len(20).not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_prestamos_jornada")
                                .from(Prestamos::Table, Prestamos::JornadaId)
                                .to(JornadasPrestamo::Table, JornadasPrestamo::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_prestamos_alumno")
                                .from(Prestamos::Table, Prestamos::AlumnoId)
                                .to(Alumnos::Table, Alumnos::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DetallesPrestamo::Table)
                        .if_not_exists()
                        .col(id_column(DetallesPrestamo::Id))
                        .col(ColumnDef::new(DetallesPrestamo::PrestamoId).integer().not_null())
                        .col(ColumnDef::new(DetallesPrestamo::KitId).integer())
                        .col(ColumnDef::new(DetallesPrestamo::ComponenteId).integer())
                        .col(ColumnDef::new(DetallesPrestamo::Cantidad).integer().not_null())
                        .col(ColumnDef::new(DetallesPrestamo::NumeroSerie).string_len(100))
                        // Exactly one article per line
                        .check(Expr::cust("(kit_id IS NULL) <> (componente_id IS NULL)"))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_detalles_prestamo_prestamo")
                                .from(DetallesPrestamo::Table, DetallesPrestamo::PrestamoId)
                                .to(Prestamos::Table, Prestamos::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_detalles_prestamo_kit")
                                .from(DetallesPrestamo::Table, DetallesPrestamo::KitId)
                                .to(Kits::Table, Kits::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_detalles_prestamo_componente")
                                .from(DetallesPrestamo::Table, DetallesPrestamo::ComponenteId)
                                .to(Componentes::Table, Componentes::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_jornadas_prestamo_seccion_id")
                        .table(JornadasPrestamo::Table)
                        .col(JornadasPrestamo::SeccionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_prestamos_jornada_id")
                        .table(Prestamos::Table)
                        .col(Prestamos::JornadaId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_prestamos_alumno_id")
                        .table(Prestamos::Table)
                        .col(Prestamos::AlumnoId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_detalles_prestamo_prestamo_id")
                        .table(DetallesPrestamo::Table)
                        .col(DetallesPrestamo::PrestamoId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DetallesPrestamo::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Prestamos::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(JornadasPrestamo::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum JornadasPrestamo {
        Table,
        Id,
        Fecha,
        CursoId,
        SeccionId,
    }

    #[derive(DeriveIden)]
    enum Prestamos {
        Table,
        Id,
        JornadaId,
        AlumnoId,
        Estado,
    }

    #[derive(DeriveIden)]
    enum DetallesPrestamo {
        Table,
        Id,
        PrestamoId,
        KitId,
        ComponenteId,
        Cantidad,
        NumeroSerie,
    }

    #[derive(DeriveIden)]
    enum Cursos {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Secciones {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Alumnos {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Kits {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Componentes {
        Table,
        Id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_migration_names_are_unique_and_ordered() {
        let migrations = Migrator::migrations();
        let names: Vec<&str> = migrations.iter().map(|m| m.name()).collect();

        assert_eq!(
            names,
            ["m20250301_000001_create_catalog", "m20250301_000002_create_loans"]
        );
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
    }
}
