//! Seed the ingredient and tag catalog from `ingredients.csv` and `tags.csv`.
//!
//! Usage: `import-catalog [DIR]` (defaults to `data`).
use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use pushkind_recipes::repository::DieselRepository;
use pushkind_recipes::services::catalog::import_catalog_dir;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    match import_catalog_dir(&repo, &dir) {
        Ok(summary) => log::info!(
            "Catalog import from {} finished: {} ingredients, {} tags",
            dir.display(),
            summary.ingredients,
            summary.tags
        ),
        Err(err) => {
            log::error!("Catalog import from {} failed: {err}", dir.display());
            std::process::exit(1);
        }
    }
}
