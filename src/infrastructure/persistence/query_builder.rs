//! Dynamic SQL fragments for partial updates and list filters.
//!
//! Both builders return a [`ClauseResult`]: the fragment text plus the values
//! for its positional placeholders, where `$k` binds `values[k - 1]`. The
//! fragment never includes the `SET`/`WHERE` keyword; callers splice it into
//! their own statement and continue numbering from
//! [`ClauseResult::next_placeholder`].

use serde_json::Value;

use crate::domain::errors::DomainError;

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    /// Numeric view used for range comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Int(n) => Some(*n as f64),
            SqlValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral floats collapse to `Int` so `"1"`, `1` and `1.0` bind the same way.
    fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            SqlValue::Int(n as i64)
        } else {
            SqlValue::Float(n)
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Output shared by both builders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseResult {
    pub clause: String,
    pub values: Vec<SqlValue>,
}

impl ClauseResult {
    /// True when at least one fragment was emitted.
    pub fn has_clause(&self) -> bool {
        !self.clause.is_empty()
    }

    /// Index of the first placeholder a caller may append after this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// `WHERE <clause>` or nothing, for splicing into a SELECT.
    pub fn where_sql(&self) -> String {
        if self.has_clause() {
            format!("WHERE {}", self.clause)
        } else {
            String::new()
        }
    }
}

/// Ordered field/value pairs for a partial update.
///
/// Setting a field that is already present replaces its value in place, so a
/// spec never holds duplicates and keeps first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    fields: Vec<(String, SqlValue)>,
}

impl UpdateSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for UpdateSpec
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut spec = UpdateSpec::new();
        for (field, value) in iter {
            spec.set(field, value);
        }
        spec
    }
}

/// Source field -> column name. Targets are trusted constants and are not escaped.
pub type ColumnMap = [(&'static str, &'static str)];

/// Build `"col"=$1, "col2"=$2, ...` from a partial update.
///
/// Fields missing from `rename` use their own name as the column. Values are
/// passed through untouched, `SqlValue::Null` included.
pub fn build_set_clause(
    update: &UpdateSpec,
    rename: &ColumnMap,
) -> Result<ClauseResult, DomainError> {
    if update.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    let mut fragments = Vec::with_capacity(update.len());
    let mut values = Vec::with_capacity(update.len());

    for (idx, (field, value)) in update.iter().enumerate() {
        let column = rename
            .iter()
            .find(|(source, _)| *source == field)
            .map_or(field, |(_, target)| *target);
        fragments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(ClauseResult {
        clause: fragments.join(", "),
        values,
    })
}

/// Raw filter input keyed by filter name. Values are usually strings from a
/// query string but typed JSON numbers/booleans are accepted too.
pub type FilterSpec = serde_json::Map<String, Value>;

/// How a raw filter value becomes a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Text wrapped in `%...%` for a substring match.
    Contains,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// Bind the coerced value.
    Always,
    /// Flag filter: emit only when the value is `true`, binding the given operand.
    /// `false` means "no constraint".
    WhenTrue(SqlValue),
}

/// One recognized filter key.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub key: &'static str,
    /// SQL with a single `{}` where the placeholder goes.
    pub template: &'static str,
    pub coercion: Coercion,
    pub emission: Emission,
}

/// Cross-field check: `min` must not exceed `max` when both are given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCheck {
    pub min: &'static str,
    pub max: &'static str,
}

/// Filter rules for one resource, processed in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRules {
    pub fields: &'static [FieldRule],
    pub range: Option<RangeCheck>,
}

/// Build `a AND b AND ...` from a sparse filter map.
///
/// Keys are visited in rule order, not input order, so placeholder numbering
/// does not depend on how the caller built the map. Keys without a rule are
/// ignored; rejecting them is the request validator's job.
pub fn build_where_clause(
    filter: &FilterSpec,
    rules: &FilterRules,
) -> Result<ClauseResult, DomainError> {
    if filter.is_empty() {
        return Err(DomainError::EmptyInput);
    }

    if let Some(range) = rules.range {
        check_range(filter, range)?;
    }

    let mut fragments = Vec::new();
    let mut values = Vec::new();

    for rule in rules.fields {
        let Some(raw) = filter.get(rule.key) else {
            continue;
        };

        let value = coerce(rule.key, raw, rule.coercion)?;
        let bound = match &rule.emission {
            Emission::Always => value,
            Emission::WhenTrue(operand) => {
                if value != SqlValue::Bool(true) {
                    continue;
                }
                operand.clone()
            }
        };

        values.push(bound);
        fragments.push(
            rule.template
                .replacen("{}", &format!("${}", values.len()), 1),
        );
    }

    Ok(ClauseResult {
        clause: fragments.join(" AND "),
        values,
    })
}

fn check_range(filter: &FilterSpec, range: RangeCheck) -> Result<(), DomainError> {
    let (Some(raw_min), Some(raw_max)) = (filter.get(range.min), filter.get(range.max)) else {
        return Ok(());
    };

    let min = coerce_number(range.min, raw_min)?;
    let max = coerce_number(range.max, raw_max)?;

    if let (Some(min), Some(max)) = (min.as_f64(), max.as_f64()) {
        if min > max {
            return Err(DomainError::InvalidRange {
                min_field: range.min,
                max_field: range.max,
                min,
                max,
            });
        }
    }

    Ok(())
}

fn coerce(field: &str, raw: &Value, coercion: Coercion) -> Result<SqlValue, DomainError> {
    match coercion {
        Coercion::Contains => Ok(SqlValue::Text(format!("%{}%", raw_text(raw)))),
        Coercion::Number => coerce_number(field, raw),
        Coercion::Boolean => coerce_boolean(field, raw),
    }
}

fn raw_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_number(field: &str, raw: &Value) -> Result<SqlValue, DomainError> {
    let parsed = match raw {
        Value::Number(n) => n.as_i64().map(SqlValue::Int).or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(SqlValue::from_number)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().map(SqlValue::Int).ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(SqlValue::from_number)
            })
        }
        _ => None,
    };

    parsed.ok_or_else(|| DomainError::NotANumber {
        field: field.to_string(),
        value: raw_text(raw),
    })
}

fn coerce_boolean(field: &str, raw: &Value) -> Result<SqlValue, DomainError> {
    match raw {
        Value::Bool(b) => Ok(SqlValue::Bool(*b)),
        Value::String(s) if s == "true" => Ok(SqlValue::Bool(true)),
        Value::String(s) if s == "false" => Ok(SqlValue::Bool(false)),
        other => Err(DomainError::InvalidBoolean {
            field: field.to_string(),
            value: raw_text(other),
        }),
    }
}
