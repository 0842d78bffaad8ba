use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ordering::{compare_for_sort, strict_equals};
use crate::model::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort directive: a field name, descending when written with a `-` prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `"field"` / `"-field"`
    ///
    /// An empty string or a bare `-` names no field and means "no sort".
    pub fn parse(directive: &str) -> Option<Self> {
        let (field, direction) = match directive.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Desc),
            None => (directive, SortDirection::Asc),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => f.write_str(&self.field),
            SortDirection::Desc => write!(f, "-{}", self.field),
        }
    }
}

/// Filter conditions, sort directive and limit for one collection read
///
/// Applied strictly in the order filter → sort → limit.
///
/// ```
/// use ecohub_core::queries::Query;
/// use serde_json::json;
///
/// let query = Query::new()
///     .where_eq("status", json!("active"))
///     .order_by("-created_date")
///     .limit(2);
/// assert_eq!(query.conditions().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    conditions: Vec<(String, Value)>,
    order_by: Option<OrderBy>,
    limit: Option<usize>,
}

impl Query {
    /// A query matching every record, unsorted, unlimited
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to be present and strictly equal to `value`
    ///
    /// Repeating a field replaces its earlier condition.
    pub fn where_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        self.conditions.retain(|(existing, _)| *existing != field);
        self.conditions.push((field, value));
        self
    }

    /// Sort by a `"field"` / `"-field"` directive; see [`OrderBy::parse`]
    pub fn order_by(mut self, directive: &str) -> Self {
        self.order_by = OrderBy::parse(directive);
        self
    }

    pub fn sorted(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Keep the first `n` results; `0` means no limit
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = (n > 0).then_some(n);
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn max_results(&self) -> Option<usize> {
        self.limit
    }

    /// Whether `record` satisfies every condition
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            record
                .value(field)
                .is_some_and(|actual| strict_equals(&actual, expected))
        })
    }

    /// Run the query over `records`, producing a new owned sequence
    pub fn run<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut results: Vec<Record> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        if let Some(order) = &self.order_by {
            let descending = order.direction == SortDirection::Desc;
            let directed = |ord: Ordering| if descending { ord.reverse() } else { ord };

            // Timestamps order the same as their ISO strings; compare them unformatted
            match order.field.as_str() {
                "created_date" => {
                    results.sort_by(|a, b| directed(a.created_date().cmp(&b.created_date())))
                }
                "updated_date" => {
                    results.sort_by(|a, b| directed(a.updated_date().cmp(&b.updated_date())))
                }
                field => results.sort_by(|a, b| {
                    compare_for_sort(
                        a.value(field).as_deref(),
                        b.value(field).as_deref(),
                        descending,
                    )
                }),
            }
        }

        if let Some(n) = self.limit {
            results.truncate(n);
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Fields, RecordId};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, second).unwrap()
    }

    fn titled(id: u64, created: u32, title: &str) -> Record {
        Record::new(RecordId::new(id), at(created), Fields::new().with("title", title))
    }

    fn titles(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.get("title").and_then(Value::as_str).unwrap())
            .collect()
    }

    #[test]
    fn test_order_by_parse() {
        assert_eq!(OrderBy::parse("points"), Some(OrderBy::asc("points")));
        assert_eq!(OrderBy::parse("-points"), Some(OrderBy::desc("points")));
        assert_eq!(OrderBy::parse(""), None);
        assert_eq!(OrderBy::parse("-"), None);
    }

    #[test]
    fn test_order_by_display_round_trips() {
        for directive in ["title", "-created_date"] {
            let parsed = OrderBy::parse(directive).unwrap();
            assert_eq!(parsed.to_string(), directive);
        }
    }

    #[test]
    fn test_limit_zero_means_unlimited() {
        assert_eq!(Query::new().limit(0).max_results(), None);
        assert_eq!(Query::new().limit(3).max_results(), Some(3));
    }

    #[test]
    fn test_repeated_condition_replaces() {
        let query = Query::new()
            .where_eq("status", json!("active"))
            .where_eq("status", json!("pending"));
        assert_eq!(
            query.conditions(),
            &[("status".to_string(), json!("pending"))]
        );
    }

    #[test]
    fn test_sort_by_system_dates_matches_iso_order() {
        let mut first = titled(1, 0, "first");
        first.apply_update(Fields::new().with("edited", true), at(30));
        let second = titled(2, 10, "second");
        let third = titled(3, 20, "third");
        let records = vec![first, second, third];

        let by_updated = Query::new().order_by("updated_date").run(&records);
        assert_eq!(titles(&by_updated), vec!["second", "third", "first"]);

        let by_created_desc = Query::new().order_by("-created_date").run(&records);
        assert_eq!(titles(&by_created_desc), vec!["third", "second", "first"]);

        let mut by_string = records.clone();
        by_string.sort_by_key(|r| r.value("updated_date").unwrap().as_str().unwrap().to_string());
        assert_eq!(by_updated, by_string);
    }
}
