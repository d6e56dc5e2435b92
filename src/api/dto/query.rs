//! Query string parameters shared by list endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// `?limit=` for list endpoints.
///
/// Uses `serde_with` to parse the limit from the query string as an integer.
/// Non-positive values are rejected by the services.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}
