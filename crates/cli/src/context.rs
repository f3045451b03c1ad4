//! Application context - dependency injection container

use std::sync::Arc;

use labtrack_core::reconcile::ports::{DocumentationSync, OpportunityRepository, RemoteFileStore};
use labtrack_core::{ConsistencyChecker, Reconciler};
use labtrack_domain::{Config, Result};
use labtrack_infra::sharepoint::{
    AccessTokenProvider, ClientCredentialsTokenProvider, GraphFileStore, LoggingDocumentationSync,
};
use labtrack_infra::{DbManager, SqliteOpportunityRepository};

/// Holds the wired-up services every command runs against.
pub struct AppContext {
    pub config: Config,
    pub repository: Arc<dyn OpportunityRepository>,
    pub checker: ConsistencyChecker,
    pub reconciler: Arc<Reconciler>,
}

impl AppContext {
    /// Wire the SQLite repositories and the Graph client from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;
        db.health_check()?;

        let repository: Arc<dyn OpportunityRepository> =
            Arc::new(SqliteOpportunityRepository::new(Arc::clone(&db)));

        let tokens: Arc<dyn AccessTokenProvider> =
            Arc::new(ClientCredentialsTokenProvider::new(&config.sharepoint)?);
        let store: Arc<dyn RemoteFileStore> =
            Arc::new(GraphFileStore::new(tokens, config.reconcile.page_size));
        let documentation: Arc<dyn DocumentationSync> = Arc::new(LoggingDocumentationSync);

        let reconciler = Arc::new(Reconciler::new(
            store,
            Arc::clone(&repository),
            documentation,
            config.sharepoint.drive_id.clone(),
            config.sharepoint.archive_folder.clone(),
        ));
        let checker = ConsistencyChecker::new(
            Arc::clone(&repository),
            config.sharepoint.archive_folder.clone(),
        );

        Ok(Self { config, repository, checker, reconciler })
    }
}
