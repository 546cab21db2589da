//! Centralized default values for flake-chart configuration.
//!
//! These defaults are used as fallback values when neither the command line
//! nor a configuration file provides a setting.

// ============================================================================
// Backend Defaults
// ============================================================================

/// Default base URL of the flake statistics backend.
///
/// Used when neither `--base-url` nor `backend.base_url` in the configuration
/// is given.
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8080";

/// Path of the environment statistics endpoint, relative to the base URL.
pub const ENVIRONMENT_ENDPOINT_PATH: &str = "/env";

/// Path of the per-test statistics endpoint, relative to the base URL.
pub const TEST_ENDPOINT_PATH: &str = "/test";

// ============================================================================
// Page Defaults
// ============================================================================

/// Default title of the generated page.
pub const DEFAULT_PAGE_TITLE: &str = "Flake Rates";

/// Id of the element the views render into.
pub const CHART_CONTAINER_ID: &str = "chart_div";

/// Script that enables interactive column sorting on tables marked `sortable`.
pub const TABLESORT_SCRIPT_URL: &str = "https://unpkg.com/tablesort@5.3.0/dist/tablesort.min.js";

/// Script that enables numeric sorting for tablesort.
pub const TABLESORT_NUMBER_SCRIPT_URL: &str =
    "https://unpkg.com/tablesort@5.3.0/dist/sorts/tablesort.number.min.js";
