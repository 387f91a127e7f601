use chrono::{Days, NaiveDateTime, NaiveTime};
use crate::server::controller::error::QueryError;
use crate::server::model::record::OrderRecord;
use crate::server::model::CustomerOrdersParams;
use crate::server::util::time::{parse_permissive, ParsedDate};

/// Raw filter parameters to echo in the next-page link, in link order.
pub(crate) type LinkParams = Vec<(&'static str, String)>;

/// Which records pass through before pagination.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FilterMode {
    NoFilter,
    MonthYear { month: u32, year: i32 },
    DateRange(DateWindow),
    /// Everything from midnight of the day after the last load, up to `end_date`.
    SinceLastLoad(DateWindow),
}

/// Inclusive window. An upper bound given without a time of day covers that whole day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DateWindow {
    from: Option<NaiveDateTime>,
    until: ParsedDate,
}

impl DateWindow {
    pub fn new(from: Option<NaiveDateTime>, until: ParsedDate) -> Self {
        Self { from, until }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let after_start = self.from.map_or(true, |from| at >= from);
        let before_end = if self.until.has_time {
            at <= self.until.value
        } else {
            at.date() <= self.until.value.date()
        };
        after_start && before_end
    }
}

impl FilterMode {
    /// Pick the filter mode from which parameters are present and validate it as a unit.
    ///
    /// Precedence is month/year, then last_load, then start_date/end_date. Empty
    /// values count as absent. Returns the mode together with the raw values that
    /// a next-page link must carry.
    pub fn from_params(params: &CustomerOrdersParams) -> Result<(Self, LinkParams), QueryError> {
        let month = present(&params.month);
        let year = present(&params.year);
        let start_date = present(&params.start_date);
        let end_date = present(&params.end_date);
        let last_load = present(&params.last_load);

        if month.is_some() || year.is_some() {
            let (Some(month), Some(year)) = (month, year) else {
                return Err(QueryError::missing_pair(
                    "Both 'month' and 'year' parameters are required together",
                ));
            };
            let (m, y) = parse_month_year(month, year)
                .map_err(|e| QueryError::invalid_filter(format!("Invalid month/year filter: {e}")))?;
            return Ok((
                FilterMode::MonthYear { month: m, year: y },
                vec![("month", month.to_string()), ("year", year.to_string())],
            ));
        }

        if let Some(last_load) = last_load {
            let Some(end_date) = end_date else {
                return Err(QueryError::missing_pair(
                    "Both 'last_load' and 'end_date' parameters are required together",
                ));
            };
            let loaded = parse_date(last_load)?;
            let from = loaded
                .value
                .date()
                .checked_add_days(Days::new(1))
                .map(|day| day.and_time(NaiveTime::MIN))
                .ok_or_else(|| QueryError::invalid_filter("Invalid date filter: 'last_load' is out of range"))?;
            let until = parse_date(end_date)?;
            return Ok((
                FilterMode::SinceLastLoad(DateWindow::new(Some(from), until)),
                vec![("last_load", last_load.to_string()), ("end_date", end_date.to_string())],
            ));
        }

        match (start_date, end_date) {
            (None, None) => Ok((FilterMode::NoFilter, vec![])),
            (Some(_), None) => Err(QueryError::missing_pair(
                "'end_date' parameter is required when 'start_date' is given",
            )),
            (start_date, Some(end_date)) => {
                let from = start_date.map(parse_date).transpose()?.map(|d| d.value);
                let until = parse_date(end_date)?;
                let mut link = Vec::with_capacity(2);
                if let Some(start_date) = start_date {
                    link.push(("start_date", start_date.to_string()));
                }
                link.push(("end_date", end_date.to_string()));
                Ok((FilterMode::DateRange(DateWindow::new(from, until)), link))
            }
        }
    }

    pub fn matches(&self, record: &OrderRecord) -> bool {
        match self {
            FilterMode::NoFilter => true,
            FilterMode::MonthYear { month, year } => record.placed_in(*month, *year),
            FilterMode::DateRange(window) | FilterMode::SinceLastLoad(window) => {
                record.order_date().is_some_and(|at| window.contains(at))
            }
        }
    }

    pub fn is_filtered(&self) -> bool {
        !matches!(self, FilterMode::NoFilter)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_month_year(month: &str, year: &str) -> Result<(u32, i32), String> {
    let month = month.trim().parse::<i64>().map_err(|e| e.to_string())?;
    let year = year.trim().parse::<i32>().map_err(|e| e.to_string())?;
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12.".to_string());
    }
    Ok((month as u32, year))
}

fn parse_date(raw: &str) -> Result<ParsedDate, QueryError> {
    parse_permissive(raw).map_err(|e| QueryError::invalid_filter(format!("Invalid date filter: {e}")))
}
