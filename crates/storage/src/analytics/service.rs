//! Endpoint pairings and the service that runs them

use super::cypher::CypherQuery;
use super::queries::{
    build_cities, build_countries, build_monthly_growth, build_weekly_growth, shape_cities,
    shape_countries, shape_monthly_growth, shape_weekly_growth,
};
use super::rows::{
    GraphRow, LocationCityRow, LocationCountryRow, MonthlyGrowthRow, WeeklyGrowthRow,
};
use crate::neo4j::GraphExecutor;
use anyhow::Result;
use groupstats_core::entities::{
    City, Country, EndpointKind, GrowthFilter, LookupFilter, MonthlyGrowth, QueryOptions,
    WeeklyGrowth,
};
use std::sync::Arc;
use tracing::debug;

/// A query builder paired with the shaper for its rows
pub struct Endpoint<P, R, O> {
    pub kind: EndpointKind,
    pub build: fn(&P) -> CypherQuery,
    pub shape: fn(Vec<R>) -> Vec<O>,
}

pub const WEEKLY_GROWTH: Endpoint<GrowthFilter, WeeklyGrowthRow, WeeklyGrowth> = Endpoint {
    kind: EndpointKind::WeeklyGrowth,
    build: build_weekly_growth,
    shape: shape_weekly_growth,
};

pub const MONTHLY_GROWTH: Endpoint<GrowthFilter, MonthlyGrowthRow, MonthlyGrowth> = Endpoint {
    kind: EndpointKind::MonthlyGrowth,
    build: build_monthly_growth,
    shape: shape_monthly_growth,
};

pub const CITIES: Endpoint<LookupFilter, LocationCityRow, City> = Endpoint {
    kind: EndpointKind::Cities,
    build: build_cities,
    shape: shape_cities,
};

pub const COUNTRIES: Endpoint<LookupFilter, LocationCountryRow, Country> = Endpoint {
    kind: EndpointKind::Countries,
    build: build_countries,
    shape: shape_countries,
};

/// Analytics operations over a graph executor
///
/// Each operation builds its query, runs it once and shapes the rows.
/// Executor errors are returned unchanged and no partial result is produced.
pub struct AnalyticsService<E: GraphExecutor> {
    executor: Arc<E>,
}

impl<E: GraphExecutor> Clone for AnalyticsService<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<E: GraphExecutor> AnalyticsService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    /// Build, execute and shape one endpoint
    pub async fn run<P, R, O>(
        &self,
        endpoint: &Endpoint<P, R, O>,
        params: &P,
        options: &QueryOptions,
    ) -> Result<Vec<O>>
    where
        R: GraphRow + Send + 'static,
    {
        let query = (endpoint.build)(params);
        debug!(
            endpoint = %endpoint.kind,
            params = ?query.params().keys().collect::<Vec<_>>(),
            "Running analytics query"
        );

        let rows: Vec<R> = self.executor.fetch(query, options).await?;
        debug!(endpoint = %endpoint.kind, rows = rows.len(), "Query returned rows");

        Ok((endpoint.shape)(rows))
    }

    /// Member count per group at the start of each week in the range
    pub async fn get_weekly_growth_percent(
        &self,
        params: &GrowthFilter,
        options: &QueryOptions,
    ) -> Result<Vec<WeeklyGrowth>> {
        self.run(&WEEKLY_GROWTH, params, options).await
    }

    /// Member count per group on the first day of each month in the range
    pub async fn get_monthly_growth_percent(
        &self,
        params: &GrowthFilter,
        options: &QueryOptions,
    ) -> Result<Vec<MonthlyGrowth>> {
        self.run(&MONTHLY_GROWTH, params, options).await
    }

    pub async fn get_cities(
        &self,
        params: &LookupFilter,
        options: &QueryOptions,
    ) -> Result<Vec<City>> {
        self.run(&CITIES, params, options).await
    }

    pub async fn get_countries(
        &self,
        params: &LookupFilter,
        options: &QueryOptions,
    ) -> Result<Vec<Country>> {
        self.run(&COUNTRIES, params, options).await
    }
}

/// Build the query an endpoint would run, without executing it
pub fn preview<P, R, O>(endpoint: &Endpoint<P, R, O>, params: &P) -> CypherQuery {
    (endpoint.build)(params)
}
