//! Initial schema: configuration, jobs, builds, test cases, test logs.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_configuration(manager).await?;
        self.create_job(manager).await?;
        self.create_build(manager).await?;
        self.create_test_case(manager).await?;
        self.create_test_log(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestLog::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TestCase::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Build::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Job::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Configuration::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_configuration(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Configuration::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configuration::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Configuration::JenkinsUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Configuration::Username).string().null())
                    .col(ColumnDef::new(Configuration::ApiToken).string().null())
                    .col(
                        ColumnDef::new(Configuration::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_job(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Job::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Job::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Job::JenkinsPath).string().not_null())
                    .col(ColumnDef::new(Job::Name).string().not_null())
                    .col(
                        ColumnDef::new(Job::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_job_jenkins_path")
                    .table(Job::Table)
                    .col(Job::JenkinsPath)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn create_build(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Build::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Build::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Build::JobId).uuid().not_null())
                    .col(ColumnDef::new(Build::Number).integer().not_null())
                    .col(ColumnDef::new(Build::Result).string().null())
                    .col(ColumnDef::new(Build::DurationMs).big_integer().not_null())
                    .col(
                        ColumnDef::new(Build::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Build::StartedBy).string().null())
                    .col(ColumnDef::new(Build::Building).boolean().not_null())
                    .col(
                        ColumnDef::new(Build::SyncedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_build_job")
                            .from(Build::Table, Build::JobId)
                            .to(Job::Table, Job::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_build_job_number")
                    .table(Build::Table)
                    .col(Build::JobId)
                    .col(Build::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // The in-progress pass scans for building=true per job.
        manager
            .create_index(
                Index::create()
                    .name("idx_build_job_building")
                    .table(Build::Table)
                    .col(Build::JobId)
                    .col(Build::Building)
                    .to_owned(),
            )
            .await
    }

    async fn create_test_case(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCase::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestCase::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestCase::BuildId).uuid().not_null())
                    .col(ColumnDef::new(TestCase::ClassName).string().not_null())
                    .col(ColumnDef::new(TestCase::Name).string().not_null())
                    .col(ColumnDef::new(TestCase::Status).string().not_null())
                    .col(
                        ColumnDef::new(TestCase::DurationSecs)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_case_build")
                            .from(TestCase::Table, TestCase::BuildId)
                            .to(Build::Table, Build::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_build")
                    .table(TestCase::Table)
                    .col(TestCase::BuildId)
                    .to_owned(),
            )
            .await
    }

    async fn create_test_log(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestLog::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestLog::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestLog::TestCaseId).uuid().not_null())
                    .col(ColumnDef::new(TestLog::ErrorStackTrace).text().null())
                    .col(ColumnDef::new(TestLog::Stdout).text().null())
                    .col(ColumnDef::new(TestLog::Stderr).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_test_log_test_case")
                            .from(TestLog::Table, TestLog::TestCaseId)
                            .to(TestCase::Table, TestCase::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_log_test_case")
                    .table(TestLog::Table)
                    .col(TestLog::TestCaseId)
                    .unique()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Configuration {
    #[sea_orm(iden = "configuration")]
    Table,
    Id,
    JenkinsUrl,
    Username,
    ApiToken,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Job {
    #[sea_orm(iden = "job")]
    Table,
    Id,
    JenkinsPath,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Build {
    #[sea_orm(iden = "build")]
    Table,
    Id,
    JobId,
    Number,
    Result,
    DurationMs,
    Timestamp,
    StartedBy,
    Building,
    SyncedAt,
}

#[derive(DeriveIden)]
enum TestCase {
    #[sea_orm(iden = "test_case")]
    Table,
    Id,
    BuildId,
    ClassName,
    Name,
    Status,
    DurationSecs,
}

#[derive(DeriveIden)]
enum TestLog {
    #[sea_orm(iden = "test_log")]
    Table,
    Id,
    TestCaseId,
    ErrorStackTrace,
    Stdout,
    Stderr,
}
