//! Application state - shared across all handlers.

use std::sync::Arc;

use inkwell_core::BlogService;
use inkwell_core::ports::{CommentRepository, PostRepository, UserRepository};
use inkwell_core::settings::BlogSettings;
use inkwell_infra::database::{DatabaseConfig, DatabaseConnections};
use inkwell_infra::{InMemoryStore, LogMailer};

#[cfg(feature = "postgres")]
use inkwell_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub db: Option<Arc<DatabaseConnections>>,
}

struct Stores {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

impl Stores {
    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            posts: store.clone(),
            comments: store.clone(),
            users: store,
        }
    }
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        run_migrations: bool,
        settings: BlogSettings,
    ) -> Self {
        #[cfg(feature = "postgres")]
        let (db, stores) = match db_config {
            Some(config) => match connect(config, run_migrations).await {
                Ok(connections) => {
                    let conn = connections.main.clone();
                    let stores = Stores {
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
                        users: Arc::new(PostgresUserRepository::new(conn)),
                    };
                    (Some(Arc::new(connections)), stores)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to prepare database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, Stores::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Stores::in_memory())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, stores) = {
            let _ = (db_config, run_migrations);
            tracing::info!("Running without postgres feature - using in-memory store");
            (None, Stores::in_memory())
        };

        tracing::info!("Application state initialized");
        Self::with_stores(stores, settings, db)
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(settings: BlogSettings) -> Self {
        Self::with_stores(Stores::in_memory(), settings, None)
    }

    fn with_stores(
        stores: Stores,
        settings: BlogSettings,
        db: Option<Arc<DatabaseConnections>>,
    ) -> Self {
        let blog = BlogService::new(
            stores.posts,
            stores.comments,
            stores.users,
            Arc::new(LogMailer::new()),
            settings,
        );
        Self { blog, db }
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    config: &DatabaseConfig,
    run_migrations: bool,
) -> Result<DatabaseConnections, migration::DbErr> {
    use migration::{Migrator, MigratorTrait};

    let connections = DatabaseConnections::init(config).await?;
    if run_migrations {
        Migrator::up(&connections.main, None).await?;
        tracing::info!("Migrations applied");
    }
    Ok(connections)
}
