mod binding;
mod filters;
mod postgres_company_repository;
mod postgres_job_repository;
mod query_builder;

pub use filters::{
    sql_for_company_filter, sql_for_job_filter, COMPANY_COLUMNS, COMPANY_FILTER_RULES,
    JOB_COLUMNS, JOB_FILTER_RULES,
};
pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_job_repository::PostgresJobRepository;
pub use query_builder::{
    build_set_clause, build_where_clause, ClauseResult, Coercion, ColumnMap, Emission, FieldRule,
    FilterRules, FilterSpec, RangeCheck, SqlValue, UpdateSpec,
};
