use std::borrow::Cow;
use std::sync::LazyLock;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use catalog_core::{DomainError, DomainResult, ItemId};
use catalog_items::ItemDraft;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /api/items` and `PUT /api/items/{id}`.
///
/// Every field is optional at the JSON level so that a missing field is
/// reported as a field error instead of a parse failure.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    #[validate(
        required(message = "Item name is required and cannot be empty"),
        custom(function = "name_not_blank"),
        length(min = 2, max = 100, message = "Item name must be between 2 and 100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Description is required and cannot be empty"),
        custom(function = "description_not_blank"),
        length(min = 10, max = 500, message = "Description must be between 10 and 500 characters")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Category is required and cannot be empty"),
        custom(function = "category_not_blank"),
        length(min = 2, max = 50, message = "Category must be between 2 and 50 characters")
    )]
    pub category: Option<String>,

    #[validate(required(message = "Price is required"), custom(function = "price_in_range"))]
    pub price: Option<f64>,

    #[validate(
        required(message = "Stock quantity is required"),
        range(min = 0, message = "Stock quantity cannot be negative")
    )]
    pub stock_quantity: Option<i32>,

    #[validate(custom(function = "image_url_format"))]
    pub image_url: Option<String>,

    #[validate(custom(function = "rating_in_range"))]
    pub rating: Option<f64>,
}

impl ItemRequest {
    /// Validate and convert into a store draft.
    pub fn into_draft(self) -> DomainResult<ItemDraft> {
        self.validate()
            .map_err(|e| DomainError::Validation(field_errors(&e)))?;

        let ItemRequest {
            name: Some(name),
            description: Some(description),
            category: Some(category),
            price: Some(price),
            stock_quantity: Some(stock_quantity),
            image_url,
            rating,
        } = self
        else {
            return Err(DomainError::unexpected(
                "validated item request is missing a required field",
            ));
        };

        let mut draft = ItemDraft::new(name, description, category, price, stock_quantity);
        draft.image_url = image_url;
        draft.rating = rating;
        Ok(draft)
    }
}

/// Unwrap an extracted JSON body into a validated draft. A missing or
/// malformed body is an invalid argument, not a validation failure.
pub fn parse_item_body(body: Result<Json<ItemRequest>, JsonRejection>) -> DomainResult<ItemDraft> {
    let Json(request) = body.map_err(|rejection| DomainError::invalid_argument(rejection.body_text()))?;
    request.into_draft()
}

/// Item id from the `{id}` path segment.
pub fn parse_item_id(path: Result<Path<String>, PathRejection>) -> DomainResult<ItemId> {
    let Path(raw) = path.map_err(|rejection| DomainError::invalid_argument(rejection.body_text()))?;
    raw.parse()
}

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
}

pub fn parse_list_query(
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> DomainResult<ListItemsQuery> {
    let Query(query) = query.map_err(|rejection| DomainError::invalid_argument(rejection.body_text()))?;
    Ok(query)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_items: usize,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

// -------------------------
// Field rules
// -------------------------

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://.*|/.*)?$").expect("image url pattern is valid")
});

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(violation("not_blank", message));
    }
    Ok(())
}

fn name_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Item name is required and cannot be empty")
}

fn description_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Description is required and cannot be empty")
}

fn category_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Category is required and cannot be empty")
}

fn price_in_range(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(violation("price_min", "Price must be greater than 0"));
    }
    if price > 999_999.99 {
        return Err(violation("price_max", "Price cannot exceed 999999.99"));
    }
    Ok(())
}

fn rating_in_range(rating: f64) -> Result<(), ValidationError> {
    if rating.is_nan() || rating < 0.0 {
        return Err(violation("rating_min", "Rating must be at least 0.0"));
    }
    if rating > 5.0 {
        return Err(violation("rating_max", "Rating cannot exceed 5.0"));
    }
    Ok(())
}

fn image_url_format(value: &str) -> Result<(), ValidationError> {
    if !IMAGE_URL.is_match(value) {
        return Err(violation(
            "image_url",
            "Image URL must be a valid HTTP/HTTPS URL or relative path",
        ));
    }
    Ok(())
}

/// Flatten validator output into sorted `"field: reason"` lines with
/// camelCase field names.
fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {reason}")
            })
        })
        .collect();
    lines.sort();
    lines
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
