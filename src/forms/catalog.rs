use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::Trim;
use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{ingredient::NewIngredient, tag::NewTag};

#[derive(MultipartForm)]
/// Multipart form carrying a catalog CSV file.
pub struct UploadCatalogForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

#[derive(Debug, Error)]
/// Errors that can occur while parsing a catalog CSV file.
pub enum CatalogCsvError {
    #[error("Не удалось прочитать CSV файл")]
    FileReadError,
    #[error("Не удалось разобрать CSV файл: {0}")]
    CsvParseError(String),
    #[error("Строка {row}: не заполнено обязательное поле `{field}`")]
    MissingField { row: usize, field: &'static str },
}

impl From<std::io::Error> for CatalogCsvError {
    fn from(_: std::io::Error) -> Self {
        CatalogCsvError::FileReadError
    }
}

impl From<csv::Error> for CatalogCsvError {
    fn from(err: csv::Error) -> Self {
        CatalogCsvError::CsvParseError(err.to_string())
    }
}

impl UploadCatalogForm {
    /// Parse the uploaded file as `name,measurement_unit` rows.
    pub fn parse_ingredients(&mut self) -> Result<Vec<NewIngredient>, CatalogCsvError> {
        self.csv.file.rewind()?;
        parse_ingredients(self.csv.file.by_ref())
    }

    /// Parse the uploaded file as `name,color,slug` rows.
    pub fn parse_tags(&mut self) -> Result<Vec<NewTag>, CatalogCsvError> {
        self.csv.file.rewind()?;
        parse_tags(self.csv.file.by_ref())
    }
}

#[derive(Deserialize)]
struct IngredientCsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    measurement_unit: Option<String>,
}

#[derive(Deserialize)]
struct TagCsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    color: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slug: Option<String>,
}

/// Read ingredients from CSV with a `name,measurement_unit` header.
///
/// Rows with every field blank are skipped.
pub fn parse_ingredients<R: Read>(reader: R) -> Result<Vec<NewIngredient>, CatalogCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    let mut ingredients = Vec::new();

    for (index, row) in csv_reader.deserialize::<IngredientCsvRow>().enumerate() {
        let record = row?;
        let row = index + 2;

        match (record.name, record.measurement_unit) {
            (None, None) => continue,
            (Some(name), Some(unit)) => ingredients.push(NewIngredient::new(name, unit)),
            (None, _) => return Err(CatalogCsvError::MissingField { row, field: "name" }),
            (_, None) => {
                return Err(CatalogCsvError::MissingField {
                    row,
                    field: "measurement_unit",
                });
            }
        }
    }

    Ok(ingredients)
}

/// Read tags from CSV with a `name,color,slug` header.
pub fn parse_tags<R: Read>(reader: R) -> Result<Vec<NewTag>, CatalogCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    let mut tags = Vec::new();

    for (index, row) in csv_reader.deserialize::<TagCsvRow>().enumerate() {
        let record = row?;

        let Some(name) = record.name else {
            if record.color.is_none() && record.slug.is_none() {
                continue;
            }
            return Err(CatalogCsvError::MissingField {
                row: index + 2,
                field: "name",
            });
        };

        let mut tag = NewTag::new(name);
        if let Some(color) = record.color {
            tag = tag.with_color(color);
        }
        if let Some(slug) = record.slug {
            tag = tag.with_slug(slug);
        }
        tags.push(tag);
    }

    Ok(tags)
}
