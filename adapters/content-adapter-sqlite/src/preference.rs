//! Preference document storage
//!
//! Documents are stored as JSON text keyed by tenant, resource type and
//! resource name, and replaced in place on write. `created_at` survives
//! rewrites; `updated_at` tracks the latest write.

use sqlx::{Row, SqlitePool};

use crate::inspect;
use brandkit::prelude::*;

fn key(tn_id: TnId, res_type: ResourceType, name: &str) -> String {
	format!("{}/{}/{}", tn_id, res_type, name)
}

pub(crate) async fn read(
	db: &SqlitePool,
	tn_id: TnId,
	res_type: ResourceType,
	name: &str,
) -> BkResult<Option<serde_json::Value>> {
	let row = sqlx::query(
		"SELECT document FROM branding_preference WHERE tn_id = ? AND resource_type = ? AND name = ?",
	)
	.bind(tn_id.0)
	.bind(res_type.as_str())
	.bind(name)
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.map_err(|err| Error::storage(StoreOp::ReadPreference, key(tn_id, res_type, name), err))?;

	let Some(row) = row else { return Ok(None) };
	let text: Box<str> = row
		.try_get("document")
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::ReadPreference, key(tn_id, res_type, name), err))?;
	let document = serde_json::from_str(&text)
		.inspect_err(|err| warn!("Stored preference document does not parse: {:#?}", err))
		.map_err(|err| Error::storage(StoreOp::ReadPreference, key(tn_id, res_type, name), err))?;
	Ok(Some(document))
}

pub(crate) async fn write(
	db: &SqlitePool,
	tn_id: TnId,
	res_type: ResourceType,
	name: &str,
	document: &serde_json::Value,
) -> BkResult<()> {
	let now = Timestamp::now().0;
	sqlx::query(
		"INSERT INTO branding_preference (tn_id, resource_type, name, document, created_at, updated_at)
		VALUES (?, ?, ?, ?, ?, ?)
		ON CONFLICT (tn_id, resource_type, name) DO UPDATE SET
		document = excluded.document,
		updated_at = excluded.updated_at",
	)
	.bind(tn_id.0)
	.bind(res_type.as_str())
	.bind(name)
	.bind(document.to_string())
	.bind(now)
	.bind(now)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|err| Error::storage(StoreOp::WritePreference, key(tn_id, res_type, name), err))?;

	Ok(())
}

pub(crate) async fn exists(
	db: &SqlitePool,
	tn_id: TnId,
	res_type: ResourceType,
	name: &str,
) -> BkResult<bool> {
	let row = sqlx::query(
		"SELECT count(*) AS cnt FROM branding_preference WHERE tn_id = ? AND resource_type = ? AND name = ?",
	)
	.bind(tn_id.0)
	.bind(res_type.as_str())
	.bind(name)
	.fetch_one(db)
	.await
	.inspect_err(inspect)
	.map_err(|err| Error::storage(StoreOp::PreferenceExists, key(tn_id, res_type, name), err))?;

	let count: i64 = row
		.try_get("cnt")
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::PreferenceExists, key(tn_id, res_type, name), err))?;
	Ok(count > 0)
}

/// Deletes one stored document; an absent key is a no-op
pub(crate) async fn delete(
	db: &SqlitePool,
	tn_id: TnId,
	res_type: ResourceType,
	name: &str,
) -> BkResult<()> {
	sqlx::query("DELETE FROM branding_preference WHERE tn_id = ? AND resource_type = ? AND name = ?")
		.bind(tn_id.0)
		.bind(res_type.as_str())
		.bind(name)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeletePreference, key(tn_id, res_type, name), err))?;

	Ok(())
}

/// Deletes every document of every resource type owned by a tenant
pub(crate) async fn delete_tenant(db: &SqlitePool, tn_id: TnId) -> BkResult<()> {
	sqlx::query("DELETE FROM branding_preference WHERE tn_id = ?")
		.bind(tn_id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeletePreference, tn_id, err))?;

	Ok(())
}

// vim: ts=4
