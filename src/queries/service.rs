//! The query service: five fixed query shapes over the climate store.
//!
//! Every operation is pure given the store snapshot and takes a fresh lazy
//! handle on the frames, so calls are independent and safe to run
//! concurrently.

use crate::queries::error::QueryError;
use crate::queries::format::{four_significant, plain_float};
use crate::store::ClimateStore;
use crate::types::records::{PrecipitationRecord, TobsRecord};
use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use tracing::warn;

/// Lookback window, in days, for the most-active-station listing.
/// Fixed design constant, not configuration.
const ACTIVE_STATION_WINDOW_DAYS: i64 = 366;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset between the Date dtype's epoch (1970-01-01) and `chrono`'s
/// day-1 (0001-01-01).
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Min/avg/max of the temperature observations over some date subset.
struct TemperatureStats {
    min: f64,
    avg: f64,
    max: f64,
}

/// Answers the five read-only queries over a [`ClimateStore`].
pub struct ClimateService {
    store: ClimateStore,
}

impl ClimateService {
    pub fn new(store: ClimateStore) -> Self {
        Self { store }
    }

    /// All `{date, tobs}` pairs, ascending by date. Ties keep storage order.
    pub fn precipitation(&self) -> Result<Vec<PrecipitationRecord>, QueryError> {
        let df = self
            .store
            .measurements()
            .select([col("date"), col("tobs")])
            // Equal dates keep storage order.
            .sort(["date"], SortMultipleOptions::default().with_maintain_order(true))
            .collect()?;

        let dates = df.column("date")?.date()?;
        let tobs = df.column("tobs")?.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for (days, tobs) in dates.into_iter().zip(tobs) {
            if let (Some(days), Some(tobs)) = (days, tobs) {
                if let Some(date) = date_from_days(days) {
                    records.push(PrecipitationRecord { date, tobs });
                }
            }
        }
        Ok(records)
    }

    /// Every station name, in storage order. Not deduplicated or sorted.
    pub fn stations(&self) -> Result<Vec<String>, QueryError> {
        let df = self.store.stations().select([col("name")]).collect()?;
        Ok(df
            .column("name")?
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect())
    }

    /// Temperature observations for the most-active station over the last
    /// 366 days of the dataset.
    ///
    /// "Most active" is the station with the highest measurement count;
    /// equal counts break toward the lexicographically smallest station id
    /// so the result is deterministic. Temperatures are truncated to whole
    /// degrees.
    pub fn most_active_station_temperatures(&self) -> Result<Vec<TobsRecord>, QueryError> {
        let (_, latest) = self.date_bounds()?;
        let window_start = latest - Duration::days(ACTIVE_STATION_WINDOW_DAYS);
        let station = self.most_active_station()?;

        let df = self
            .store
            .measurements()
            .filter(
                col("station")
                    .eq(lit(station.clone()))
                    .and(col("date").gt_eq(lit(window_start))),
            )
            .select([col("date"), col("tobs")])
            .collect()?;

        let dates = df.column("date")?.date()?;
        let tobs = df.column("tobs")?.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for (days, tobs) in dates.into_iter().zip(tobs) {
            if let (Some(days), Some(tobs)) = (days, tobs) {
                if let Some(date) = date_from_days(days) {
                    records.push(TobsRecord {
                        date,
                        station: station.clone(),
                        temperature: tobs.trunc() as i64,
                    });
                }
            }
        }
        Ok(records)
    }

    /// Min/avg/max temperature over all measurements with `date >= start`,
    /// as four report lines.
    ///
    /// `start` is valid only if it is literally present among the stored
    /// dates; an in-range date with no readings, or an unparseable string,
    /// is rejected with the dataset's date-range hint.
    pub fn range_stats(&self, start: &str) -> Result<Vec<String>, QueryError> {
        let (min, max) = self.date_bounds()?;
        let Some(start_date) = self.stored_date(start)? else {
            warn!(start, "rejected start date not present in dataset");
            return Err(QueryError::DateNotFound {
                date: start.to_string(),
                min: format_date(min),
                max: format_date(max),
            });
        };

        let stats =
            self.aggregate(start_date, None)?
                .ok_or_else(|| QueryError::EmptyRange {
                    start: start.to_string(),
                    end: format_date(max),
                })?;

        Ok(vec![
            format!("Start Date: {start}"),
            format!("The Lowest Temperature was: {} F", plain_float(stats.min)),
            format!(
                "The Average Temperature was: {} F",
                four_significant(stats.avg)
            ),
            format!("The Highest Temperature was: {} F", plain_float(stats.max)),
        ])
    }

    /// Min/avg/max temperature over `start <= date <= end`, as five report
    /// lines. Both bounds are validated independently by the same literal
    /// existence check as [`range_stats`](ClimateService::range_stats).
    pub fn range_stats_between(&self, start: &str, end: &str) -> Result<Vec<String>, QueryError> {
        let (min, max) = self.date_bounds()?;
        let min = format_date(min);
        let max = format_date(max);

        match (self.stored_date(start)?, self.stored_date(end)?) {
            (Some(start_date), Some(end_date)) => {
                let stats = self.aggregate(start_date, Some(end_date))?.ok_or_else(|| {
                    QueryError::EmptyRange {
                        start: start.to_string(),
                        end: end.to_string(),
                    }
                })?;
                Ok(vec![
                    format!("Start Date: {start}"),
                    format!("End Date: {end}"),
                    format!("The Lowest Temperature was: {} F", plain_float(stats.min)),
                    format!(
                        "The Average Temperature was: {} F",
                        four_significant(stats.avg)
                    ),
                    format!("The Highest Temperature was: {} F", plain_float(stats.max)),
                ])
            }
            (None, None) => {
                warn!(start, end, "rejected range with both dates absent");
                Err(QueryError::RangeNotFound {
                    start: start.to_string(),
                    end: end.to_string(),
                    min,
                    max,
                })
            }
            (None, Some(_)) => {
                warn!(start, "rejected start date not present in dataset");
                Err(QueryError::StartDateNotFound {
                    start: start.to_string(),
                    min,
                    max,
                })
            }
            (Some(_), None) => {
                warn!(end, "rejected end date not present in dataset");
                Err(QueryError::EndDateNotFound {
                    end: end.to_string(),
                    min,
                    max,
                })
            }
        }
    }

    /// Returns the parsed date iff `raw` is literally present among the
    /// stored measurement dates. Strings that do not parse as `YYYY-MM-DD`
    /// can never match a stored date and yield `None` directly.
    fn stored_date(&self, raw: &str) -> Result<Option<NaiveDate>, QueryError> {
        let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) else {
            return Ok(None);
        };
        let df = self
            .store
            .measurements()
            .filter(col("date").eq(lit(date)))
            .select([col("date")])
            .limit(1)
            .collect()?;
        Ok((df.height() > 0).then_some(date))
    }

    /// The dataset's (min, max) measurement dates.
    fn date_bounds(&self) -> Result<(NaiveDate, NaiveDate), QueryError> {
        let df = self
            .store
            .measurements()
            .select([
                col("date").min().alias("min_date"),
                col("date").max().alias("max_date"),
            ])
            .collect()?;

        let min = df
            .column("min_date")?
            .date()?
            .get(0)
            .and_then(date_from_days)
            .ok_or(QueryError::EmptyDataset)?;
        let max = df
            .column("max_date")?
            .date()?
            .get(0)
            .and_then(date_from_days)
            .ok_or(QueryError::EmptyDataset)?;
        Ok((min, max))
    }

    /// The station id with the most measurements; count descending, station
    /// id ascending as the tie-break.
    fn most_active_station(&self) -> Result<String, QueryError> {
        let counts = self
            .store
            .measurements()
            .group_by([col("station")])
            .agg([len().alias("observations")])
            .sort_by_exprs(
                [col("observations"), col("station")],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(1)
            .collect()?;

        counts
            .column("station")?
            .str()?
            .get(0)
            .map(str::to_string)
            .ok_or(QueryError::EmptyDataset)
    }

    /// Aggregates tobs over `date >= start` (and `date <= end` when given).
    /// `None` means the filtered subset was empty.
    fn aggregate(
        &self,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Option<TemperatureStats>, QueryError> {
        let mut predicate = col("date").gt_eq(lit(start));
        if let Some(end) = end {
            predicate = predicate.and(col("date").lt_eq(lit(end)));
        }

        let df = self
            .store
            .measurements()
            .filter(predicate)
            .select([
                col("tobs").min().alias("tmin"),
                col("tobs").mean().alias("tavg"),
                col("tobs").max().alias("tmax"),
            ])
            .collect()?;

        let min = df.column("tmin")?.f64()?.get(0);
        let avg = df.column("tavg")?.f64()?.get(0);
        let max = df.column("tmax")?.f64()?.get(0);

        Ok(match (min, avg, max) {
            (Some(min), Some(avg), Some(max)) => Some(TemperatureStats { min, avg, max }),
            _ => None,
        })
    }
}

fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + EPOCH_DAYS_FROM_CE)
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
