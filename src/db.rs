use anyhow::{Context, Result};
use mongodb::{
    Client, Database,
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
};

use crate::store::mongo::MongoStore;

pub async fn init_db(database_url: &str, database_name: &str) -> Result<Database> {
    let mut options = ClientOptions::parse(database_url)
        .await
        .context("Invalid database url")?;

    let server_api = ServerApi::builder()
        .version(ServerApiVersion::V1)
        .strict(true)
        .deprecation_errors(true)
        .build();
    options.server_api = Some(server_api);
    options.app_name = Some("worksync".to_string());

    let client = Client::with_options(options).context("Failed to create database client")?;
    let db = client.database(database_name);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("Failed to connect to database")?;

    Ok(db)
}

pub async fn init_store(db: &Database) -> Result<MongoStore> {
    let store = MongoStore::new(db);
    store
        .ensure_indexes()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create indexes: {e}"))?;
    Ok(store)
}
