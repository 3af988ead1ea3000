//! SQLite-backed storage for the Brandkit engine.
//!
//! One database file carries both storage seams: the per-scope custom
//! layout content rows ([`ContentAdapter`]) and the branding preference
//! documents ([`PreferenceAdapter`]). Content rows live in two tables, one
//! per scope kind, selected from the scope key at query time; preference
//! documents live in a single keyed document table.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;

use brandkit::{content_adapter::ContentAdapter, preference_adapter::PreferenceAdapter, prelude::*};

mod content;
mod preference;
mod schema;

/// Log driver errors before they are wrapped
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

#[derive(Debug)]
pub struct ContentAdapterSqlite {
	db: SqlitePool,
}

impl ContentAdapterSqlite {
	/// Opens the database at `path`, creating the file and the schema when
	/// missing.
	pub async fn new(path: impl AsRef<Path>) -> BkResult<Self> {
		let opts = SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(SqliteJournalMode::Wal);
		let db = SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.map_err(|err| Error::storage(StoreOp::Open, path.as_ref().display(), err))?;

		schema::init_db(&db)
			.await
			.inspect_err(inspect)
			.map_err(|err| Error::storage(StoreOp::Open, path.as_ref().display(), err))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl ContentAdapter for ContentAdapterSqlite {
	async fn content_exists(&self, scope: &ScopeKey) -> BkResult<bool> {
		content::exists(&self.db, scope).await
	}

	async fn create_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()> {
		content::create(&self.db, scope, content).await
	}

	async fn update_content(&self, scope: &ScopeKey, content: &CustomContent) -> BkResult<()> {
		content::update(&self.db, scope, content).await
	}

	async fn read_content(&self, scope: &ScopeKey) -> BkResult<CustomContent> {
		content::read(&self.db, scope).await
	}

	async fn delete_content(&self, scope: &ScopeKey) -> BkResult<()> {
		content::delete(&self.db, scope).await
	}

	async fn delete_tenant_content(&self, tn_id: TnId) -> BkResult<()> {
		content::delete_tenant(&self.db, tn_id).await
	}
}

#[async_trait]
impl PreferenceAdapter for ContentAdapterSqlite {
	async fn read_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<Option<serde_json::Value>> {
		preference::read(&self.db, tn_id, res_type, name).await
	}

	async fn write_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
		document: &serde_json::Value,
	) -> BkResult<()> {
		preference::write(&self.db, tn_id, res_type, name, document).await
	}

	async fn preference_exists(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<bool> {
		preference::exists(&self.db, tn_id, res_type, name).await
	}

	async fn delete_preference(
		&self,
		tn_id: TnId,
		res_type: ResourceType,
		name: &str,
	) -> BkResult<()> {
		preference::delete(&self.db, tn_id, res_type, name).await
	}

	async fn delete_tenant_preferences(&self, tn_id: TnId) -> BkResult<()> {
		preference::delete_tenant(&self.db, tn_id).await
	}
}

// vim: ts=4
