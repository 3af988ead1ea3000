//! Custom layout content row management
//!
//! The three parts of a scope's custom layout are stored one row per
//! content type, in a table per scope kind. Writes touch all three rows
//! inside a single transaction so a half-written scope is never observable.

use sqlx::{Row, SqlitePool};

use crate::inspect;
use brandkit::prelude::*;

/// Writes the three content rows of a scope with one shared creation
/// timestamp.
///
/// Any part hitting an existing row rolls the whole write back and reports
/// [`Error::AlreadyExists`].
pub(crate) async fn create(
	db: &SqlitePool,
	scope: &ScopeKey,
	content: &CustomContent,
) -> BkResult<()> {
	let now = Timestamp::now().0;
	let mut tx = db
		.begin()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::CreateContent, scope, err))?;

	for content_type in ContentType::ALL {
		let query = match scope.app_id() {
			None => sqlx::query(
				"INSERT INTO org_custom_content (tn_id, content_type, content, created_at, updated_at)
				VALUES (?, ?, ?, ?, ?)",
			)
			.bind(scope.tn_id.0)
			.bind(content_type.as_str())
			.bind(content.part(content_type))
			.bind(now)
			.bind(now),
			Some(app_id) => sqlx::query(
				"INSERT INTO app_custom_content (tn_id, app_id, content_type, content, created_at, updated_at)
				VALUES (?, ?, ?, ?, ?, ?)",
			)
			.bind(scope.tn_id.0)
			.bind(app_id)
			.bind(content_type.as_str())
			.bind(content.part(content_type))
			.bind(now)
			.bind(now),
		};
		query.execute(&mut *tx).await.map_err(|err| {
			if let sqlx::Error::Database(ref db_err) = err {
				if db_err.message().contains("UNIQUE") {
					return Error::already_exists(scope);
				}
			}
			inspect(&err);
			Error::storage(StoreOp::CreateContent, scope, err)
		})?;
	}

	tx.commit()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::CreateContent, scope, err))?;
	Ok(())
}

/// Rewrites the three content rows of a scope, advancing `updated_at` only.
/// Updating a scope with no rows changes nothing and is not an error.
pub(crate) async fn update(
	db: &SqlitePool,
	scope: &ScopeKey,
	content: &CustomContent,
) -> BkResult<()> {
	let now = Timestamp::now().0;
	let mut tx = db
		.begin()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::UpdateContent, scope, err))?;

	for content_type in ContentType::ALL {
		let query = match scope.app_id() {
			None => sqlx::query(
				"UPDATE org_custom_content SET content = ?, updated_at = ?
				WHERE tn_id = ? AND content_type = ?",
			)
			.bind(content.part(content_type))
			.bind(now)
			.bind(scope.tn_id.0)
			.bind(content_type.as_str()),
			Some(app_id) => sqlx::query(
				"UPDATE app_custom_content SET content = ?, updated_at = ?
				WHERE tn_id = ? AND app_id = ? AND content_type = ?",
			)
			.bind(content.part(content_type))
			.bind(now)
			.bind(scope.tn_id.0)
			.bind(app_id)
			.bind(content_type.as_str()),
		};
		query
			.execute(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(|err| Error::storage(StoreOp::UpdateContent, scope, err))?;
	}

	tx.commit()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::UpdateContent, scope, err))?;
	Ok(())
}

pub(crate) async fn exists(db: &SqlitePool, scope: &ScopeKey) -> BkResult<bool> {
	let query = match scope.app_id() {
		None => sqlx::query("SELECT count(*) AS cnt FROM org_custom_content WHERE tn_id = ?")
			.bind(scope.tn_id.0),
		Some(app_id) => {
			sqlx::query("SELECT count(*) AS cnt FROM app_custom_content WHERE tn_id = ? AND app_id = ?")
				.bind(scope.tn_id.0)
				.bind(app_id)
		}
	};
	let row = query
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::ContentExists, scope, err))?;

	let count: i64 = row
		.try_get("cnt")
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::ContentExists, scope, err))?;
	Ok(count > 0)
}

/// Assembles the stored parts of a scope; a part with no row reads as an
/// empty string, so an unconfigured scope reads as all-empty.
pub(crate) async fn read(db: &SqlitePool, scope: &ScopeKey) -> BkResult<CustomContent> {
	let query = match scope.app_id() {
		None => sqlx::query("SELECT content_type, content FROM org_custom_content WHERE tn_id = ?")
			.bind(scope.tn_id.0),
		Some(app_id) => sqlx::query(
			"SELECT content_type, content FROM app_custom_content WHERE tn_id = ? AND app_id = ?",
		)
		.bind(scope.tn_id.0)
		.bind(app_id),
	};
	let rows = query
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::ReadContent, scope, err))?;

	let mut content = CustomContent::default();
	for row in rows {
		let tag: Box<str> = row
			.try_get("content_type")
			.inspect_err(inspect)
			.map_err(|err| Error::storage(StoreOp::ReadContent, scope, err))?;
		let text: Box<str> = row
			.try_get("content")
			.inspect_err(inspect)
			.map_err(|err| Error::storage(StoreOp::ReadContent, scope, err))?;
		match ContentType::parse(&tag) {
			Some(content_type) => content.set_part(content_type, text),
			None => warn!("Unknown content type row for {}: {}", scope, tag),
		}
	}
	Ok(content)
}

/// Removes every content row of a scope; deleting an absent scope is a
/// no-op.
pub(crate) async fn delete(db: &SqlitePool, scope: &ScopeKey) -> BkResult<()> {
	let query = match scope.app_id() {
		None => sqlx::query("DELETE FROM org_custom_content WHERE tn_id = ?").bind(scope.tn_id.0),
		Some(app_id) => sqlx::query("DELETE FROM app_custom_content WHERE tn_id = ? AND app_id = ?")
			.bind(scope.tn_id.0)
			.bind(app_id),
	};
	query
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeleteContent, scope, err))?;
	Ok(())
}

/// Removes the content rows of both scope kinds owned by a tenant
pub(crate) async fn delete_tenant(db: &SqlitePool, tn_id: TnId) -> BkResult<()> {
	let mut tx = db
		.begin()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeleteContent, tn_id, err))?;

	sqlx::query("DELETE FROM org_custom_content WHERE tn_id = ?")
		.bind(tn_id.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeleteContent, tn_id, err))?;

	sqlx::query("DELETE FROM app_custom_content WHERE tn_id = ?")
		.bind(tn_id.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeleteContent, tn_id, err))?;

	tx.commit()
		.await
		.inspect_err(inspect)
		.map_err(|err| Error::storage(StoreOp::DeleteContent, tn_id, err))?;
	Ok(())
}

// vim: ts=4
