use std::fs::File;
use std::path::Path;

use crate::forms::catalog::{parse_ingredients, parse_tags};
use crate::repository::{IngredientWriter, TagWriter};
use crate::services::{ServiceError, ServiceResult};

pub const INGREDIENTS_FILE: &str = "ingredients.csv";
pub const TAGS_FILE: &str = "tags.csv";

/// Rows created by a catalog import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CatalogImportSummary {
    pub ingredients: usize,
    pub tags: usize,
}

/// Seeds ingredients and tags from `ingredients.csv` and `tags.csv` in `dir`.
///
/// A missing file is skipped with a warning.
pub fn import_catalog_dir<R>(repo: &R, dir: &Path) -> ServiceResult<CatalogImportSummary>
where
    R: IngredientWriter + TagWriter + ?Sized,
{
    let mut summary = CatalogImportSummary::default();

    if let Some(file) = open_catalog_file(&dir.join(INGREDIENTS_FILE))? {
        let ingredients =
            parse_ingredients(file).map_err(|err| ServiceError::Form(err.to_string()))?;
        summary.ingredients = repo
            .create_ingredients(&ingredients)
            .map_err(ServiceError::from)?;
        log::info!("Imported {} ingredients", summary.ingredients);
    }

    if let Some(file) = open_catalog_file(&dir.join(TAGS_FILE))? {
        let tags = parse_tags(file).map_err(|err| ServiceError::Form(err.to_string()))?;
        summary.tags = repo.create_tags(&tags).map_err(ServiceError::from)?;
        log::info!("Imported {} tags", summary.tags);
    }

    Ok(summary)
}

fn open_catalog_file(path: &Path) -> ServiceResult<Option<File>> {
    if !path.exists() {
        log::warn!("Catalog file {} not found, skipping", path.display());
        return Ok(None);
    }

    File::open(path)
        .map(Some)
        .map_err(|err| ServiceError::Form(format!("{}: {err}", path.display())))
}
