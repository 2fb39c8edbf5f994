//! Concurrent sampling of the timetable.
//!
//! Each combination is queried once per configured time of day. Up to
//! `concurrency` queries are in flight at once, but results are consumed
//! in submission order, so the same answers always produce the same table.
//! A failed query is logged and skipped; it never aborts the run.

use std::future::Future;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::{Combination, ConnectionQuery, Journey, TimeOfDay};
use crate::timetable::{MockTimetable, TimetableClient, TimetableError};

use super::config::NetworkConfig;
use super::edges::{NetworkTable, build_edges};

/// Source of journeys for a query.
///
/// Implemented by the HTTP client and by the in-memory mock.
pub trait Timetable {
    fn connections(
        &self,
        query: &ConnectionQuery,
    ) -> impl Future<Output = Result<Vec<Journey>, TimetableError>>;
}

impl Timetable for TimetableClient {
    fn connections(
        &self,
        query: &ConnectionQuery,
    ) -> impl Future<Output = Result<Vec<Journey>, TimetableError>> {
        TimetableClient::connections(self, query)
    }
}

impl Timetable for MockTimetable {
    fn connections(
        &self,
        query: &ConnectionQuery,
    ) -> impl Future<Output = Result<Vec<Journey>, TimetableError>> {
        MockTimetable::connections(self, query)
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Queries issued
    pub queries: usize,
    /// Queries that returned at least one journey
    pub succeeded: usize,
    /// Queries that returned no journeys
    pub empty: usize,
    /// Queries that failed and were skipped
    pub failed: usize,
    /// Stop visits dropped for bad station data
    pub rejected_records: usize,
    /// Rows in the output table
    pub edges: usize,
}

/// Output of a run.
#[derive(Debug, Clone, Default)]
pub struct SampleRun {
    pub table: NetworkTable,
    pub stats: RunStats,
}

/// Issues queries against a timetable and accumulates the edge table.
pub struct Sampler<'a, T> {
    timetable: &'a T,
    times: &'a [TimeOfDay],
    limit: u8,
    concurrency: usize,
}

impl<'a, T: Timetable> Sampler<'a, T> {
    pub fn new(timetable: &'a T, config: &'a NetworkConfig) -> Self {
        Self {
            timetable,
            times: &config.times,
            limit: config.limit,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Expand combinations into queries, one per time of day.
    pub fn queries(&self, combinations: &[Combination]) -> Vec<ConnectionQuery> {
        combinations
            .iter()
            .flat_map(|combination| {
                self.times.iter().map(move |time| {
                    ConnectionQuery::new(combination.clone(), *time, self.limit)
                })
            })
            .collect()
    }

    /// Query every combination and build the network table.
    pub async fn run(&self, combinations: &[Combination]) -> SampleRun {
        let queries = self.queries(combinations);
        info!(
            combinations = combinations.len(),
            queries = queries.len(),
            concurrency = self.concurrency,
            "sampling timetable"
        );

        let timetable = self.timetable;
        let results = stream::iter(queries)
            .map(move |query| async move {
                let result = timetable.connections(&query).await;
                (query, result)
            })
            .buffered(self.concurrency);
        let mut results = std::pin::pin!(results);

        let mut run = SampleRun::default();
        while let Some((query, result)) = results.next().await {
            run.stats.queries += 1;
            match result {
                Ok(journeys) if journeys.is_empty() => {
                    debug!(
                        origin = %query.origin(),
                        destination = %query.destination(),
                        date = %query.date(),
                        time = %query.time,
                        "no connections"
                    );
                    run.stats.empty += 1;
                }
                Ok(journeys) => {
                    let batch = build_edges(&journeys);
                    run.stats.succeeded += 1;
                    run.stats.rejected_records += batch.rejected;
                    run.table.append(batch.edges);
                }
                Err(e) => {
                    warn!(
                        origin = %query.origin(),
                        destination = %query.destination(),
                        date = %query.date(),
                        time = %query.time,
                        error = %e,
                        "query failed, skipping"
                    );
                    run.stats.failed += 1;
                }
            }
        }

        run.stats.edges = run.table.len();
        info!(
            queries = run.stats.queries,
            succeeded = run.stats.succeeded,
            empty = run.stats.empty,
            failed = run.stats.failed,
            rejected_records = run.stats.rejected_records,
            edges = run.stats.edges,
            "sampling finished"
        );

        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station, StationName, StopVisit, Timestamp};
    use crate::network::combinations::QuerySpace;
    use chrono::NaiveDate;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(&format!("2020-03-09T{s}:00+0100")).unwrap()
    }

    fn stop(station: &str) -> StopVisit {
        StopVisit::new(Station::new(station, Some(Coordinate::new(47.0, 7.5))))
    }

    /// origin -> destination, two stops
    fn trip(origin: &str, destination: &str) -> Journey {
        Journey::single_leg(vec![
            stop(origin).with_departure(ts("09:00")),
            stop(destination).with_arrival(ts("10:00")),
        ])
    }

    fn config(stations: &[&str], days: i64) -> NetworkConfig {
        let start = NaiveDate::from_ymd_opt(2020, 3, 9).unwrap();
        let space = QuerySpace::new(
            start,
            start + chrono::Duration::days(days),
            stations.iter().map(|s| name(s)).collect(),
        );
        NetworkConfig::new(space)
    }

    #[tokio::test]
    async fn one_query_per_time_of_day() {
        let mock = MockTimetable::new();
        let config = config(&["Basel", "Bern"], 1);
        let combinations = config.query_space.combinations();

        let run = Sampler::new(&mock, &config).run(&combinations).await;

        assert_eq!(run.stats.queries, 10);
        assert_eq!(run.stats.empty, 10);
        assert_eq!(mock.call_count(), 10);

        let queries = Sampler::new(&mock, &config).queries(&combinations);
        let times: Vec<String> = queries
            .iter()
            .filter(|q| q.origin().as_str() == "Basel")
            .map(|q| q.time.to_string())
            .collect();
        assert_eq!(times, ["00:00", "09:00", "13:00", "17:00", "21:00"]);
        assert!(queries.iter().all(|q| q.limit == 15));
    }

    #[tokio::test]
    async fn failed_query_is_isolated() {
        let mock = MockTimetable::new()
            .with_route(name("Basel"), name("Bern"), vec![trip("Basel", "Bern")])
            .with_failing_route(name("Bern"), name("Basel"));
        let config = config(&["Basel", "Bern"], 1);
        let combinations = config.query_space.combinations();

        let run = Sampler::new(&mock, &config).run(&combinations).await;

        assert_eq!(run.stats.queries, 10);
        assert_eq!(run.stats.succeeded, 5);
        assert_eq!(run.stats.failed, 5);
        // Two edges per successful query
        assert_eq!(run.table.len(), 10);
        assert_eq!(run.stats.edges, 10);
        assert!(run.table.iter().all(|e| e.from == "Basel" || e.from == "Bern"));
    }

    #[tokio::test]
    async fn all_failing_gives_empty_table() {
        let mock = MockTimetable::new()
            .with_failing_route(name("Basel"), name("Bern"))
            .with_failing_route(name("Bern"), name("Basel"));
        let config = config(&["Basel", "Bern"], 1);

        let run = Sampler::new(&mock, &config)
            .run(&config.query_space.combinations())
            .await;

        assert!(run.table.is_empty());
        assert_eq!(run.stats.failed, 10);
    }

    #[tokio::test]
    async fn output_follows_submission_order() {
        let mock = MockTimetable::new()
            .with_route(name("Basel"), name("Bern"), vec![trip("Basel", "Bern")])
            .with_route(name("Bern"), name("Basel"), vec![trip("Bern", "Basel")])
            .with_route(name("Genf"), name("Basel"), vec![trip("Genf", "Basel")]);
        let config = config(&["Basel", "Bern", "Genf"], 1).with_concurrency(8);
        let combinations = config.query_space.combinations();

        let run = Sampler::new(&mock, &config).run(&combinations).await;

        let froms: Vec<&str> = run
            .table
            .iter()
            .filter(|e| e.to.as_str() != "end-station")
            .map(|e| e.from.as_str())
            .collect();
        let mut expected = vec!["Basel"; 5];
        expected.extend(["Bern"; 5]);
        expected.extend(["Genf"; 5]);
        assert_eq!(froms, expected);
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let mock = MockTimetable::new()
            .with_route(name("Basel"), name("Bern"), vec![trip("Basel", "Bern")])
            .with_route(
                name("Bern"),
                name("Basel"),
                vec![trip("Bern", "Olten"), trip("Olten", "Basel")],
            );
        let config = config(&["Basel", "Bern"], 15).with_concurrency(3);
        let combinations = config.query_space.combinations();
        let sampler = Sampler::new(&mock, &config);

        let first = sampler.run(&combinations).await;
        let second = sampler.run(&combinations).await;

        assert_eq!(first.table, second.table);
        assert_eq!(first.stats, second.stats);
    }

    #[tokio::test]
    async fn rejected_stops_are_counted() {
        let mut bad = trip("Basel", "Bern");
        bad.sections[0]
            .leg
            .as_mut()
            .unwrap()
            .stops[0]
            .station
            .coordinate = None;

        let mock = MockTimetable::new().with_route(name("Basel"), name("Bern"), vec![bad]);
        let config = config(&["Basel", "Bern"], 1).with_times(vec![TimeOfDay::from_hm(9, 0).unwrap()]);

        let run = Sampler::new(&mock, &config)
            .run(&config.query_space.combinations())
            .await;

        assert_eq!(run.stats.rejected_records, 1);
        assert_eq!(run.table.len(), 1);
        assert_eq!(run.table.records()[0].from, "Bern");
    }

    #[test]
    fn queries_cross_times() {
        let mock = MockTimetable::new();
        let config = config(&["Basel", "Bern", "Genf"], 8).with_limit(4);
        let combinations = config.query_space.combinations();

        let queries = Sampler::new(&mock, &config).queries(&combinations);
        assert_eq!(queries.len(), combinations.len() * 5);
        assert_eq!(queries.len(), config.query_count());
        assert!(queries.iter().all(|q| q.limit == 4));
        assert_eq!(queries[0].time.to_string(), "00:00");
        assert_eq!(queries[4].time.to_string(), "21:00");
        assert_eq!(queries[5].combination, combinations[1]);
    }
}
