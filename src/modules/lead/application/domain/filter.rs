use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::IntoParams;

use super::entities::{LeadSource, LeadStatus};

// ======================= Query Parameters =======================

/// Parses an optional query parameter with `FromStr`. Blank values are
/// treated as absent, matching how clients send half-filled filter forms.
fn de_opt_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Raw filter parameters accepted by the lead listing endpoint.
///
/// `*_in` and `*_between` carry comma-separated lists; everything else is a
/// single value. See [`compile`] for how these collapse into a [`LeadFilter`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListLeadsQuery {
    #[serde(deserialize_with = "de_opt_from_str")]
    pub page: Option<u64>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub limit: Option<u64>,

    pub email: Option<String>,
    pub email_contains: Option<String>,
    pub company: Option<String>,
    pub company_contains: Option<String>,
    pub city: Option<String>,
    pub city_contains: Option<String>,

    #[serde(deserialize_with = "de_opt_from_str")]
    pub status: Option<LeadStatus>,
    pub status_in: Option<String>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub source: Option<LeadSource>,
    pub source_in: Option<String>,

    #[serde(deserialize_with = "de_opt_from_str")]
    pub score: Option<f64>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub score_gt: Option<f64>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub score_lt: Option<f64>,
    pub score_between: Option<String>,

    #[serde(deserialize_with = "de_opt_from_str")]
    pub lead_value: Option<f64>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub lead_value_gt: Option<f64>,
    #[serde(deserialize_with = "de_opt_from_str")]
    pub lead_value_lt: Option<f64>,
    pub lead_value_between: Option<String>,

    pub created_at_on: Option<String>,
    pub created_at_before: Option<String>,
    pub created_at_after: Option<String>,
    pub created_at_between: Option<String>,

    // Both spellings are accepted; clients in the wild use the short one.
    #[serde(alias = "last_activity_on")]
    pub last_activity_at_on: Option<String>,
    #[serde(alias = "last_activity_before")]
    pub last_activity_at_before: Option<String>,
    #[serde(alias = "last_activity_after")]
    pub last_activity_at_after: Option<String>,
    #[serde(alias = "last_activity_between")]
    pub last_activity_at_between: Option<String>,

    #[serde(deserialize_with = "de_opt_from_str")]
    pub is_qualified: Option<bool>,
}

// ========================= Filter Model =========================

/// A column a clause applies to. One clause per field: applying another
/// clause for the same field replaces the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Email,
    Company,
    City,
    Status,
    Source,
    Score,
    LeadValue,
    CreatedAt,
    LastActivityAt,
    IsQualified,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldClause {
    Equals(String),
    ContainsInsensitive(String),
    OneOf(Vec<String>),
    NumberIs(f64),
    NumberCompare { gt: Option<f64>, lt: Option<f64> },
    NumberBetween { low: f64, high: f64 },
    OnDay(NaiveDate),
    DateCompare {
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    },
    /// Half-open range `[start, end)`. Produced when a bound narrows an
    /// existing day window.
    DateWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    DateBetween {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Is(bool),
}

/// The compiled filter: an ordered set of per-field clauses, all ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadFilter {
    clauses: Vec<(FilterField, FieldClause)>,
}

impl LeadFilter {
    pub fn put(&mut self, field: FilterField, clause: FieldClause) {
        if let Some(slot) = self.clauses.iter_mut().find(|(f, _)| *f == field) {
            slot.1 = clause;
        } else {
            self.clauses.push((field, clause));
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&FieldClause> {
        self.clauses.iter().find(|(f, _)| *f == field).map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FilterField, FieldClause)> {
        self.clauses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Folds a gt/lt bound into an existing comparison on the field.
    /// Any other clause kind on the field is discarded, so a bound applied
    /// after an exact match wins.
    fn put_number_bound(&mut self, field: FilterField, gt: Option<f64>, lt: Option<f64>) {
        let merged = match self.get(field) {
            Some(FieldClause::NumberCompare { gt: prev_gt, lt: prev_lt }) => {
                FieldClause::NumberCompare {
                    gt: gt.or(*prev_gt),
                    lt: lt.or(*prev_lt),
                }
            }
            _ => FieldClause::NumberCompare { gt, lt },
        };
        self.put(field, merged);
    }

    /// Folds a before/after bound into whatever date clause the field
    /// already carries. A day window keeps its untouched side, so
    /// `on=D&before=X` yields `[D 00:00, X)`.
    fn put_date_bound(
        &mut self,
        field: FilterField,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) {
        let merged = match self.get(field) {
            Some(FieldClause::DateCompare {
                after: prev_after,
                before: prev_before,
            }) => FieldClause::DateCompare {
                after: after.or(*prev_after),
                before: before.or(*prev_before),
            },
            Some(FieldClause::OnDay(day)) => {
                let day_start = day.and_time(NaiveTime::MIN).and_utc();
                FieldClause::DateWindow {
                    start: after.unwrap_or(day_start),
                    end: before.unwrap_or(day_start + Duration::days(1)),
                }
            }
            Some(FieldClause::DateWindow { start, end }) => FieldClause::DateWindow {
                start: after.unwrap_or(*start),
                end: before.unwrap_or(*end),
            },
            _ => FieldClause::DateCompare { after, before },
        };
        self.put(field, merged);
    }
}

/// Pagination window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.limit
    }

    pub fn take(&self) -> u64 {
        self.limit
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilterError {
    #[error("Page must be a positive integer")]
    InvalidPage,
    #[error("Limit must be between 1 and 100")]
    InvalidLimit,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

// =========================== Compiler ===========================

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Collapses raw query parameters into a [`LeadFilter`] and a [`Page`].
///
/// Clauses are applied in a fixed order with one slot per field, so when a
/// request carries several operators for the same field the one applied
/// last wins (bounds merge with an existing comparison; `_between` always
/// replaces). Blank parameters are ignored; an unparseable date is an error.
pub fn compile(query: &ListLeadsQuery) -> Result<(LeadFilter, Page), FilterError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    if page < 1 {
        return Err(FilterError::InvalidPage);
    }

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit < 1 || limit > MAX_LIMIT {
        return Err(FilterError::InvalidLimit);
    }

    let mut filter = LeadFilter::default();

    if let Some(v) = non_empty(&query.email) {
        filter.put(FilterField::Email, FieldClause::Equals(v.to_string()));
    }
    if let Some(v) = non_empty(&query.email_contains) {
        filter.put(
            FilterField::Email,
            FieldClause::ContainsInsensitive(v.to_string()),
        );
    }
    if let Some(v) = non_empty(&query.company) {
        filter.put(FilterField::Company, FieldClause::Equals(v.to_string()));
    }
    if let Some(v) = non_empty(&query.company_contains) {
        filter.put(
            FilterField::Company,
            FieldClause::ContainsInsensitive(v.to_string()),
        );
    }
    if let Some(v) = non_empty(&query.city) {
        filter.put(FilterField::City, FieldClause::Equals(v.to_string()));
    }
    if let Some(v) = non_empty(&query.city_contains) {
        filter.put(
            FilterField::City,
            FieldClause::ContainsInsensitive(v.to_string()),
        );
    }

    if let Some(status) = query.status {
        filter.put(
            FilterField::Status,
            FieldClause::Equals(status.as_str().to_string()),
        );
    }
    if let Some(raw) = non_empty(&query.status_in) {
        filter.put(
            FilterField::Status,
            FieldClause::OneOf(parse_list::<LeadStatus>(raw)),
        );
    }
    if let Some(source) = query.source {
        filter.put(
            FilterField::Source,
            FieldClause::Equals(source.as_str().to_string()),
        );
    }
    if let Some(raw) = non_empty(&query.source_in) {
        filter.put(
            FilterField::Source,
            FieldClause::OneOf(parse_list::<LeadSource>(raw)),
        );
    }

    if let Some(v) = query.score {
        filter.put(FilterField::Score, FieldClause::NumberIs(v));
    }
    if let Some(v) = query.score_gt {
        filter.put_number_bound(FilterField::Score, Some(v), None);
    }
    if let Some(v) = query.score_lt {
        filter.put_number_bound(FilterField::Score, None, Some(v));
    }
    if let Some(raw) = non_empty(&query.score_between) {
        if let Some((low, high)) = parse_number_pair(raw) {
            filter.put(FilterField::Score, FieldClause::NumberBetween { low, high });
        }
    }

    if let Some(v) = query.lead_value {
        filter.put(FilterField::LeadValue, FieldClause::NumberIs(v));
    }
    if let Some(v) = query.lead_value_gt {
        filter.put_number_bound(FilterField::LeadValue, Some(v), None);
    }
    if let Some(v) = query.lead_value_lt {
        filter.put_number_bound(FilterField::LeadValue, None, Some(v));
    }
    if let Some(raw) = non_empty(&query.lead_value_between) {
        if let Some((low, high)) = parse_number_pair(raw) {
            filter.put(
                FilterField::LeadValue,
                FieldClause::NumberBetween { low, high },
            );
        }
    }

    compile_date_field(
        &mut filter,
        FilterField::CreatedAt,
        &query.created_at_on,
        &query.created_at_before,
        &query.created_at_after,
        &query.created_at_between,
    )?;
    compile_date_field(
        &mut filter,
        FilterField::LastActivityAt,
        &query.last_activity_at_on,
        &query.last_activity_at_before,
        &query.last_activity_at_after,
        &query.last_activity_at_between,
    )?;

    if let Some(b) = query.is_qualified {
        filter.put(FilterField::IsQualified, FieldClause::Is(b));
    }

    Ok((filter, Page { page, limit }))
}

fn compile_date_field(
    filter: &mut LeadFilter,
    field: FilterField,
    on: &Option<String>,
    before: &Option<String>,
    after: &Option<String>,
    between: &Option<String>,
) -> Result<(), FilterError> {
    if let Some(raw) = non_empty(on) {
        filter.put(field, FieldClause::OnDay(parse_day(raw)?));
    }
    if let Some(raw) = non_empty(before) {
        filter.put_date_bound(field, None, Some(parse_date(raw)?));
    }
    if let Some(raw) = non_empty(after) {
        filter.put_date_bound(field, Some(parse_date(raw)?), None);
    }
    if let Some(raw) = non_empty(between) {
        if let Some((start, end)) = parse_date_pair(raw) {
            filter.put(field, FieldClause::DateBetween { start, end });
        }
    }
    Ok(())
}

// =========================== Helpers ============================

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Splits a comma list, dropping tokens that do not parse. A list where no
/// token survives still yields a clause: the set is empty, so it matches
/// nothing.
fn parse_list<T>(raw: &str) -> Vec<String>
where
    T: FromStr + fmt::Display,
{
    raw.split(',')
        .filter_map(|token| token.trim().parse::<T>().ok())
        .map(|value| value.to_string())
        .collect()
}

/// A between pair counts only when exactly two numeric tokens remain.
fn parse_number_pair(raw: &str) -> Option<(f64, f64)> {
    let values: Vec<f64> = raw
        .split(',')
        .filter_map(|token| token.trim().parse::<f64>().ok())
        .collect();
    match values[..] {
        [low, high] => Some((low, high)),
        _ => None,
    }
}

fn parse_date_pair(raw: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let values: Vec<DateTime<Utc>> = raw
        .split(',')
        .filter_map(|token| parse_date(token.trim()).ok())
        .collect();
    match values[..] {
        [start, end] => Some((start, end)),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(raw: &str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(FilterError::InvalidDate(raw.to_string()))
}

fn parse_day(raw: &str) -> Result<NaiveDate, FilterError> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).date_naive());
    }
    Err(FilterError::InvalidDate(raw.to_string()))
}
