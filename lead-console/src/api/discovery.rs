use async_trait::async_trait;
use serde_json::Value;
use shared_types::{
    CreateDiscoveryJobRequest, DiscoveryJob, DiscoveryJobListResponse, DiscoveryJobResponse,
    EnrichLeadsRequest, EnrichLeadsResponse, JobProgress, JobProgressResponse,
};

use super::{ApiClient, ApiResult};

#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    async fn list_jobs(&self) -> ApiResult<Vec<DiscoveryJob>>;

    async fn create_job(&self, request: &CreateDiscoveryJobRequest) -> ApiResult<DiscoveryJob>;

    /// Blocks on the backend until the job finishes; the final job is returned.
    async fn run_job(&self, id: i64) -> ApiResult<DiscoveryJob>;

    async fn job_progress(&self, id: i64) -> ApiResult<Option<JobProgress>>;

    async fn delete_job(&self, id: i64) -> ApiResult<()>;

    async fn enrich_leads(&self, batch_size: u32) -> ApiResult<EnrichLeadsResponse>;
}

#[async_trait]
impl DiscoveryApi for ApiClient {
    async fn list_jobs(&self) -> ApiResult<Vec<DiscoveryJob>> {
        let resp: DiscoveryJobListResponse = self.get("/lead-discovery/jobs").await?;
        Ok(resp.jobs)
    }

    async fn create_job(&self, request: &CreateDiscoveryJobRequest) -> ApiResult<DiscoveryJob> {
        let resp: DiscoveryJobResponse = self.post("/lead-discovery/jobs", request).await?;
        Ok(resp.job)
    }

    async fn run_job(&self, id: i64) -> ApiResult<DiscoveryJob> {
        let resp: DiscoveryJobResponse = self
            .post_empty(&format!("/lead-discovery/jobs/{}/run", id))
            .await?;
        Ok(resp.job)
    }

    async fn job_progress(&self, id: i64) -> ApiResult<Option<JobProgress>> {
        let resp: JobProgressResponse = self
            .get(&format!("/lead-discovery/jobs/{}/progress", id))
            .await?;
        Ok(resp.progress)
    }

    async fn delete_job(&self, id: i64) -> ApiResult<()> {
        let _: Value = self.delete(&format!("/lead-discovery/jobs/{}", id)).await?;
        Ok(())
    }

    async fn enrich_leads(&self, batch_size: u32) -> ApiResult<EnrichLeadsResponse> {
        self.post("/lead-discovery/enrich", &EnrichLeadsRequest { batch_size })
            .await
    }
}
