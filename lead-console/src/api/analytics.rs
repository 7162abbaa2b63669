use async_trait::async_trait;
use shared_types::{
    DashboardStats, DashboardStatsResponse, FilterOptions, HealthResponse, PerformanceResponse,
    PerformanceRow,
};

use super::{ApiClient, ApiResult};

/// Read-only reporting endpoints, plus filter options and the health probe.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;

    async fn industry_performance(&self) -> ApiResult<Vec<PerformanceRow>>;

    async fn source_performance(&self) -> ApiResult<Vec<PerformanceRow>>;

    async fn filter_options(&self) -> ApiResult<FilterOptions>;

    async fn health(&self) -> ApiResult<HealthResponse>;
}

#[async_trait]
impl AnalyticsApi for ApiClient {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let resp: DashboardStatsResponse = self.get("/analytics/dashboard").await?;
        Ok(resp.stats)
    }

    async fn industry_performance(&self) -> ApiResult<Vec<PerformanceRow>> {
        let resp: PerformanceResponse = self.get("/analytics/industry-performance").await?;
        Ok(resp.performance)
    }

    async fn source_performance(&self) -> ApiResult<Vec<PerformanceRow>> {
        let resp: PerformanceResponse = self.get("/analytics/source-performance").await?;
        Ok(resp.performance)
    }

    async fn filter_options(&self) -> ApiResult<FilterOptions> {
        self.get("/filters/options").await
    }

    async fn health(&self) -> ApiResult<HealthResponse> {
        self.get_absolute(&format!("{}/health", self.origin())).await
    }
}
