use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    Year,
    Make,
    Model,
    Vin,
    Mileage,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    Name,
    Description,
    MileageInterval,
    MonthInterval,
    CreatedAt,
}

#[derive(Iden)]
enum ServiceHistory {
    Table,
    Id,
    VehicleId,
    ServiceId,
    ServiceDate,
    Mileage,
    IntervalMiles,
    Cost,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum VehicleCatalog {
    Table,
    Id,
    Year,
    Make,
    Model,
    Trim,
    Engine,
    Transmission,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // vehicles
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Vehicles::Year).integer().not_null())
                    .col(ColumnDef::new(Vehicles::Make).string().not_null())
                    .col(ColumnDef::new(Vehicles::Model).string().not_null())
                    .col(ColumnDef::new(Vehicles::Vin).string().null())
                    .col(
                        ColumnDef::new(Vehicles::Mileage)
                            .big_integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Vehicles::Mileage).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // NULL VINs never collide; only present VINs must be unique
        manager
            .create_index(
                Index::create()
                    .name("ux_vehicles_vin")
                    .table(Vehicles::Table)
                    .col(Vehicles::Vin)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_vehicles_created_at")
                    .table(Vehicles::Table)
                    .col(Vehicles::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // services (service type catalog)
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::Description).text().null())
                    .col(ColumnDef::new(Services::MileageInterval).integer().null())
                    .col(ColumnDef::new(Services::MonthInterval).integer().null())
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_services_name")
                    .table(Services::Table)
                    .col(Services::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // service_history
        manager
            .create_table(
                Table::create()
                    .table(ServiceHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(ServiceHistory::VehicleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceHistory::ServiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceHistory::ServiceDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceHistory::Mileage).big_integer().null())
                    .col(
                        ColumnDef::new(ServiceHistory::IntervalMiles)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(ServiceHistory::Cost).double().null())
                    .col(ColumnDef::new(ServiceHistory::Notes).text().null())
                    .col(
                        ColumnDef::new(ServiceHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_history_vehicle_id")
                            .from(ServiceHistory::Table, ServiceHistory::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_history_service_id")
                            .from(ServiceHistory::Table, ServiceHistory::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_service_history_vehicle_date")
                    .table(ServiceHistory::Table)
                    .col(ServiceHistory::VehicleId)
                    .col(ServiceHistory::ServiceDate)
                    .to_owned(),
            )
            .await?;

        // vehicle_catalog (reference data, filled by catalog-ingest)
        manager
            .create_table(
                Table::create()
                    .table(VehicleCatalog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleCatalog::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(VehicleCatalog::Year).integer().not_null())
                    .col(ColumnDef::new(VehicleCatalog::Make).string().not_null())
                    .col(ColumnDef::new(VehicleCatalog::Model).string().not_null())
                    .col(ColumnDef::new(VehicleCatalog::Trim).string().null())
                    .col(ColumnDef::new(VehicleCatalog::Engine).string().null())
                    .col(ColumnDef::new(VehicleCatalog::Transmission).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_vehicle_catalog_year_make_model")
                    .table(VehicleCatalog::Table)
                    .col(VehicleCatalog::Year)
                    .col(VehicleCatalog::Make)
                    .col(VehicleCatalog::Model)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_vehicle_catalog_year_make_model")
                    .table(VehicleCatalog::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(VehicleCatalog::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_service_history_vehicle_date")
                    .table(ServiceHistory::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceHistory::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ux_services_name")
                    .table(Services::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_vehicles_created_at")
                    .table(Vehicles::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ux_vehicles_vin")
                    .table(Vehicles::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await?;

        Ok(())
    }
}
