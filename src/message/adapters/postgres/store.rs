//! `PostgreSQL` implementation of the [`DurableStore`] port.

use super::{
    models::{MessageRow, NewMessageRow},
    schema::messages,
};
use crate::message::{
    domain::Message,
    error::{RepositoryError, RepositoryResult},
    ports::durable_store::DurableStore,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by message adapters.
pub type MessagePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed durable message store.
///
/// Diesel is synchronous, so every query runs on the blocking thread pool;
/// the async contract of the port is preserved without holding up the
/// runtime.
#[derive(Debug, Clone)]
pub struct PostgresDurableStore {
    pool: MessagePgPool,
}

impl PostgresDurableStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MessagePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

#[async_trait]
impl DurableStore for PostgresDurableStore {
    async fn write_through(&self, message: &Message) -> RepositoryResult<()> {
        let message_id = message.id();
        let new_row = NewMessageRow::from_message(message);

        self.run_blocking(move |connection| {
            diesel::insert_into(messages::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RepositoryError::DuplicateMessage(message_id)
                    }
                    _ => RepositoryError::persistence(err),
                })?;

            Ok(())
        })
        .await
    }

    async fn load_all(&self) -> RepositoryResult<Vec<Message>> {
        self.run_blocking(|connection| {
            let rows = messages::table
                .order(messages::seq.asc())
                .select(MessageRow::as_select())
                .load::<MessageRow>(connection)
                .map_err(RepositoryError::persistence)?;

            Ok(rows.into_iter().map(Message::from).collect())
        })
        .await
    }
}
