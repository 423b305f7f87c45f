use super::{Db, DbResult};

mod embedded {
    refinery::embed_migrations!("migrations");
}

impl Db {
    /// Runs the embedded schema migrations. Called once at boot.
    pub async fn init(&self) -> DbResult<()> {
        let mut client = self.get_client().await?;
        let report = embedded::migrations::runner().run_async(&mut **client).await?;

        for migration in report.applied_migrations() {
            tracing::info!(version = %migration.version(), name = %migration.name(), "applied migration");
        }

        Ok(())
    }
}
