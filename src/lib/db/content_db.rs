use super::SurrealDBConnection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::future::IntoFuture;
use std::time::Duration;
use surrealdb::engine::any::{connect, Any};
use surrealdb::{opt::auth::Root, Response, Surreal};
use tracing::{debug, info, instrument};

use crate::constants::BLOG_TABLE;
use crate::errors::StoreError;

#[derive(Clone)]
pub struct ContentDB {
    pub db: Surreal<Any>,
    timeout: Duration,
}

impl ContentDB {
    #[instrument(skip(conn), fields(address = %conn.address))]
    pub async fn connect(conn: SurrealDBConnection) -> Result<Self, StoreError> {
        let SurrealDBConnection {
            address,
            username,
            password,
            namespace,
            database,
            timeout,
        } = conn;

        debug!("connecting to: {:#?}", &address);
        let db = connect(address).await?;

        debug!("signing in as: {:#?}", &username);
        db.signin(Root {
            username: username.as_str(),
            password: password.as_str(),
        })
        .await?;

        debug!("ns: {:#?} | db: {:#?}", &namespace, &database);
        db.use_ns(namespace).use_db(database).await?;

        let content_db = Self { db, timeout };
        content_db.define_schema().await?;

        Ok(content_db)
    }

    /// Ensures the blog table exists with a unique slug index.
    async fn define_schema(&self) -> Result<(), StoreError> {
        info!("defining {} table", BLOG_TABLE);

        let schema = format!(
            r#"
                DEFINE TABLE {table} SCHEMALESS;
                DEFINE INDEX {table}_slug ON TABLE {table} COLUMNS slug.current UNIQUE;
            "#,
            table = BLOG_TABLE
        );

        self.bounded(self.db.query(schema)).await?.check()?;

        Ok(())
    }

    async fn bounded<F>(&self, query: F) -> Result<Response, StoreError>
    where
        F: IntoFuture<Output = surrealdb::Result<Response>>,
    {
        match tokio::time::timeout(self.timeout, query.into_future()).await {
            Ok(response) => Ok(response?),
            Err(_) => Err(StoreError::Timeout(self.timeout.as_secs())),
        }
    }

    pub async fn query_single_with_args<T: DeserializeOwned, A: Serialize + Debug>(
        &self,
        query: &str,
        args: A,
    ) -> Result<Option<T>, StoreError> {
        debug!("args to bind {:#?}", args);
        let mut response = self.bounded(self.db.query(query).bind(args)).await?;

        Ok(response.take(0)?)
    }

    pub async fn query_many<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>, StoreError> {
        let mut response = self.bounded(self.db.query(query)).await?;

        Ok(response.take::<Vec<T>>(0)?)
    }

    pub async fn query_many_with_args<T: DeserializeOwned, A: Serialize + Debug>(
        &self,
        query: &str,
        args: A,
    ) -> Result<Vec<T>, StoreError> {
        debug!("args to bind {:#?}", args);
        let mut response = self.bounded(self.db.query(query).bind(args)).await?;

        Ok(response.take::<Vec<T>>(0)?)
    }
}
