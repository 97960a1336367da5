//! # Jobly - companies and the jobs they post
//!
//! A REST backend over PostgreSQL, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: entities, auth claims and the error taxonomy
//! - **Application**: use cases, DTOs and repository ports
//! - **Infrastructure**: Postgres adapters and the SQL clause builders
//! - **API**: axum handlers and middleware
//!
//! ## Clause builders
//!
//! Partial updates and list filters are turned into parameterized SQL
//! fragments. Values never appear in the SQL text.
//!
//! ```
//! use jobly::infrastructure::persistence::{sql_for_job_filter, SqlValue};
//! use serde_json::json;
//!
//! let filter = json!({"title": "eng", "hasEquity": "true"});
//! let result = sql_for_job_filter(filter.as_object().unwrap()).unwrap();
//!
//! assert_eq!(result.clause, "title ILIKE $1 AND equity > $2");
//! assert_eq!(result.values, vec![SqlValue::Text("%eng%".into()), SqlValue::Int(0)]);
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::entities;
pub use domain::errors as domain_errors;
