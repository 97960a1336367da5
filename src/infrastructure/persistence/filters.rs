use crate::domain::errors::DomainError;

use super::query_builder::{
    build_where_clause, ClauseResult, Coercion, ColumnMap, Emission, FieldRule, FilterRules,
    FilterSpec, RangeCheck, SqlValue,
};

/// Request field -> column for company updates.
pub static COMPANY_COLUMNS: &ColumnMap = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// Job update fields already match their columns.
pub static JOB_COLUMNS: &ColumnMap = &[];

pub static COMPANY_FILTER_RULES: FilterRules = FilterRules {
    fields: &[
        FieldRule {
            key: "nameLike",
            template: "name ILIKE {}",
            coercion: Coercion::Contains,
            emission: Emission::Always,
        },
        FieldRule {
            key: "minEmployees",
            template: "num_employees >= {}",
            coercion: Coercion::Number,
            emission: Emission::Always,
        },
        FieldRule {
            key: "maxEmployees",
            template: "num_employees <= {}",
            coercion: Coercion::Number,
            emission: Emission::Always,
        },
    ],
    range: Some(RangeCheck {
        min: "minEmployees",
        max: "maxEmployees",
    }),
};

pub static JOB_FILTER_RULES: FilterRules = FilterRules {
    fields: &[
        FieldRule {
            key: "title",
            template: "title ILIKE {}",
            coercion: Coercion::Contains,
            emission: Emission::Always,
        },
        FieldRule {
            key: "minSalary",
            template: "salary >= {}",
            coercion: Coercion::Number,
            emission: Emission::Always,
        },
        // hasEquity=false is "no constraint", never "equity = 0".
        FieldRule {
            key: "hasEquity",
            template: "equity > {}",
            coercion: Coercion::Boolean,
            emission: Emission::WhenTrue(SqlValue::Int(0)),
        },
    ],
    range: None,
};

/// WHERE fragment for `nameLike` / `minEmployees` / `maxEmployees`.
pub fn sql_for_company_filter(filter: &FilterSpec) -> Result<ClauseResult, DomainError> {
    build_where_clause(filter, &COMPANY_FILTER_RULES)
}

/// WHERE fragment for `title` / `minSalary` / `hasEquity`.
pub fn sql_for_job_filter(filter: &FilterSpec) -> Result<ClauseResult, DomainError> {
    build_where_clause(filter, &JOB_FILTER_RULES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::query_builder::{build_set_clause, UpdateSpec};
    use serde_json::{json, Value};

    fn filter(value: Value) -> FilterSpec {
        match value {
            Value::Object(map) => map,
            _ => panic!("filter fixtures must be objects"),
        }
    }

    #[test]
    fn test_company_name_like() {
        let result = sql_for_company_filter(&filter(json!({"nameLike": "c"}))).unwrap();

        assert_eq!(result.clause, "name ILIKE $1");
        assert_eq!(result.values, vec![SqlValue::Text("%c%".into())]);
    }

    #[test]
    fn test_company_employee_bounds() {
        let result =
            sql_for_company_filter(&filter(json!({"minEmployees": 1, "maxEmployees": 2}))).unwrap();

        assert_eq!(
            result.clause,
            "num_employees >= $1 AND num_employees <= $2"
        );
        assert_eq!(result.values, vec![SqlValue::Int(1), SqlValue::Int(2)]);
    }

    #[test]
    fn test_company_employee_bounds_from_query_strings() {
        let from_strings =
            sql_for_company_filter(&filter(json!({"minEmployees": "1", "maxEmployees": "2"})))
                .unwrap();
        let from_numbers =
            sql_for_company_filter(&filter(json!({"minEmployees": 1, "maxEmployees": 2}))).unwrap();

        assert_eq!(from_strings, from_numbers);
    }

    #[test]
    fn test_company_all_filters() {
        let result = sql_for_company_filter(&filter(json!({
            "maxEmployees": "300",
            "nameLike": "net",
            "minEmployees": "10"
        })))
        .unwrap();

        assert_eq!(
            result.clause,
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            result.values,
            vec![
                SqlValue::Text("%net%".into()),
                SqlValue::Int(10),
                SqlValue::Int(300)
            ]
        );
    }

    #[test]
    fn test_company_inverted_range() {
        let result =
            sql_for_company_filter(&filter(json!({"minEmployees": 2, "maxEmployees": 1})));
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_company_empty_filter() {
        assert_eq!(
            sql_for_company_filter(&FilterSpec::new()),
            Err(DomainError::EmptyInput)
        );
    }

    #[test]
    fn test_job_has_equity_true() {
        let result = sql_for_job_filter(&filter(json!({"hasEquity": true}))).unwrap();

        assert_eq!(result.clause, "equity > $1");
        assert_eq!(result.where_sql(), "WHERE equity > $1");
        assert_eq!(result.values, vec![SqlValue::Int(0)]);
    }

    #[test]
    fn test_job_has_equity_false() {
        let result = sql_for_job_filter(&filter(json!({"hasEquity": false}))).unwrap();

        assert_eq!(result.clause, "");
        assert_eq!(result.where_sql(), "");
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_job_has_equity_string_forms() {
        let on = sql_for_job_filter(&filter(json!({"hasEquity": "true"}))).unwrap();
        let off = sql_for_job_filter(&filter(json!({"hasEquity": "false"}))).unwrap();

        assert!(on.has_clause());
        assert!(!off.has_clause());
    }

    #[test]
    fn test_job_has_equity_rejects_other_values() {
        let result = sql_for_job_filter(&filter(json!({"hasEquity": "maybe"})));
        assert!(matches!(
            result,
            Err(DomainError::InvalidBoolean { ref field, ref value })
                if field == "hasEquity" && value == "maybe"
        ));
    }

    #[test]
    fn test_job_min_salary_not_a_number() {
        let result = sql_for_job_filter(&filter(json!({"minSalary": "nonnumber string"})));
        assert_eq!(
            result,
            Err(DomainError::NotANumber {
                field: "minSalary".to_string(),
                value: "nonnumber string".to_string(),
            })
        );
    }

    #[test]
    fn test_job_all_filters() {
        let result = sql_for_job_filter(&filter(json!({
            "hasEquity": "true",
            "minSalary": "50000",
            "title": "eng"
        })))
        .unwrap();

        assert_eq!(
            result.clause,
            "title ILIKE $1 AND salary >= $2 AND equity > $3"
        );
        assert_eq!(
            result.values,
            vec![
                SqlValue::Text("%eng%".into()),
                SqlValue::Int(50000),
                SqlValue::Int(0)
            ]
        );
    }

    #[test]
    fn test_jobs_have_no_range_check() {
        // minSalary has no max counterpart; a large value is just a filter.
        let result = sql_for_job_filter(&filter(json!({"minSalary": 1_000_000}))).unwrap();
        assert_eq!(result.clause, "salary >= $1");
    }

    #[test]
    fn test_job_empty_filter() {
        assert_eq!(
            sql_for_job_filter(&FilterSpec::new()),
            Err(DomainError::EmptyInput)
        );
    }

    #[test]
    fn test_company_update_columns() {
        let update = UpdateSpec::new()
            .with("name", "New")
            .with("numEmployees", 10)
            .with("logoUrl", None::<String>);
        let result = build_set_clause(&update, COMPANY_COLUMNS).unwrap();

        assert_eq!(
            result.clause,
            r#""name"=$1, "num_employees"=$2, "logo_url"=$3"#
        );
        assert_eq!(
            result.values,
            vec![SqlValue::Text("New".into()), SqlValue::Int(10), SqlValue::Null]
        );
    }
}
