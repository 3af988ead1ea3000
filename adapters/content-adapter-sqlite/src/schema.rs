//! Database schema initialization
//!
//! Creates the content and preference tables on first open. All statements
//! are idempotent and run in one transaction.

use sqlx::SqlitePool;

pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Custom layout content
	//***********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS org_custom_content (
		tn_id integer NOT NULL,
		content_type text NOT NULL,		-- 'html', 'css', 'js'
		content text NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id, content_type)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS app_custom_content (
		tn_id integer NOT NULL,
		app_id text NOT NULL,
		content_type text NOT NULL,		-- 'html', 'css', 'js'
		content text NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id, app_id, content_type)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Preference documents
	//**********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS branding_preference (
		tn_id integer NOT NULL,
		resource_type text NOT NULL,
		name text NOT NULL,
		document json NOT NULL,
		created_at datetime DEFAULT (unixepoch()),
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(tn_id, resource_type, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
