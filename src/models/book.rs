//! Book model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Book record
///
/// Fields missing from a JSON payload decode to their zero value and are
/// then rejected by [`Validate`], so an incomplete body reports which field
/// is wrong instead of a generic decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct Book {
    /// Caller-supplied identifier, unique within the catalog
    #[validate(range(min = 1, message = "Book id must be a positive integer"))]
    #[schema(example = 1)]
    pub id: i64,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[schema(example = "Dune")]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    #[schema(example = "Herbert")]
    pub author: String,
    #[serde(rename = "published_year")]
    #[validate(range(min = 1, message = "Publication year must be a positive integer"))]
    #[schema(example = 1965)]
    pub publication_year: i32,
}
