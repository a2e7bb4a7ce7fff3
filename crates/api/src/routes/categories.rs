//! Category and category group routes.

use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use tracing::warn;

use ledgerline_core::catalog::{Category, CategoryFilter, CategoryGroup, EnrichedCategory};

use crate::AppState;
use crate::response::{ApiResponse, ApiResult};

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/category-groups", get(list_category_groups))
        .route("/categories-with-notes", get(list_categories_with_notes))
        .route(
            "/categories-with-notes-and-groups",
            get(list_categories_with_notes_and_groups),
        )
}

/// Query parameters for the enriched category listings.
///
/// Values are kept as raw strings; only a single `"true"` enables a flag. A
/// repeated parameter does not count as `"true"`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CategoryListQuery {
    /// Include hidden categories.
    pub include_hidden: Option<String>,
    /// Only income categories.
    pub income_only: Option<String>,
    /// Only expense categories.
    pub expense_only: Option<String>,
}

impl CategoryListQuery {
    /// Collects the flags from raw query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let single = |name: &str| {
            let mut values = pairs.iter().filter(|(key, _)| key == name);
            match (values.next(), values.next()) {
                (Some((_, value)), None) => Some(value.clone()),
                _ => None,
            }
        };
        Self {
            include_hidden: single("includeHidden"),
            income_only: single("incomeOnly"),
            expense_only: single("expenseOnly"),
        }
    }

    fn extract(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Self {
        match query {
            Ok(Query(pairs)) => Self::from_pairs(&pairs),
            Err(rejection) => {
                warn!(error = %rejection.body_text(), "Unreadable query string, using default filters");
                Self::default()
            }
        }
    }
}

impl From<&CategoryListQuery> for CategoryFilter {
    fn from(query: &CategoryListQuery) -> Self {
        CategoryFilter::from_params(
            query.include_hidden.as_deref(),
            query.income_only.as_deref(),
            query.expense_only.as_deref(),
        )
    }
}

/// GET `/api/categories` - List all categories.
async fn list_categories(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Category>>> {
    Ok(ApiResponse::ok(state.gateway.list_categories().await?))
}

/// GET `/api/category-groups` - List all category groups.
async fn list_category_groups(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<CategoryGroup>>> {
    Ok(ApiResponse::ok(state.gateway.list_category_groups().await?))
}

/// GET `/api/categories-with-notes` - Filtered categories with their notes.
async fn list_categories_with_notes(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<EnrichedCategory>>> {
    let query = CategoryListQuery::extract(query);
    let categories = state
        .gateway
        .list_categories_with_notes(CategoryFilter::from(&query))
        .await?;
    Ok(ApiResponse::ok(categories))
}

/// GET `/api/categories-with-notes-and-groups` - Filtered categories with
/// their notes and groups.
async fn list_categories_with_notes_and_groups(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<ApiResponse<Vec<EnrichedCategory>>> {
    let query = CategoryListQuery::extract(query);
    let categories = state
        .gateway
        .list_categories_with_notes_and_groups(CategoryFilter::from(&query))
        .await?;
    Ok(ApiResponse::ok(categories))
}
