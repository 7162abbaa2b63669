use async_trait::async_trait;
use serde_json::Value;
use shared_types::{
    Campaign, CampaignResponse, CampaignsResponse, Contact, CreateCampaignRequest,
    RecipientsResponse, SendCampaignRequest, SendCampaignResponse, UpdateCampaignRequest,
};

use super::{ApiClient, ApiResult};

#[async_trait]
pub trait CampaignsApi: Send + Sync {
    async fn list_campaigns(&self) -> ApiResult<Vec<Campaign>>;

    async fn create_campaign(&self, request: &CreateCampaignRequest) -> ApiResult<Option<Campaign>>;

    async fn update_campaign(
        &self,
        id: i64,
        request: &UpdateCampaignRequest,
    ) -> ApiResult<Option<Campaign>>;

    async fn delete_campaign(&self, id: i64) -> ApiResult<()>;

    async fn campaign_recipients(&self, id: i64) -> ApiResult<Vec<Contact>>;

    /// Raw CSV of the personalized emails the next send would produce.
    async fn preview_campaign(&self, id: i64) -> ApiResult<Vec<u8>>;

    /// Returns how many emails went out.
    async fn send_campaign(&self, id: i64, request: &SendCampaignRequest) -> ApiResult<u64>;
}

#[async_trait]
impl CampaignsApi for ApiClient {
    async fn list_campaigns(&self) -> ApiResult<Vec<Campaign>> {
        let resp: CampaignsResponse = self.get("/campaigns").await?;
        Ok(resp.campaigns)
    }

    async fn create_campaign(&self, request: &CreateCampaignRequest) -> ApiResult<Option<Campaign>> {
        let resp: CampaignResponse = self.post("/campaigns", request).await?;
        Ok(resp.campaign)
    }

    async fn update_campaign(
        &self,
        id: i64,
        request: &UpdateCampaignRequest,
    ) -> ApiResult<Option<Campaign>> {
        let resp: CampaignResponse = self.put(&format!("/campaigns/{}", id), request).await?;
        Ok(resp.campaign)
    }

    async fn delete_campaign(&self, id: i64) -> ApiResult<()> {
        let _: Value = self.delete(&format!("/campaigns/{}", id)).await?;
        Ok(())
    }

    async fn campaign_recipients(&self, id: i64) -> ApiResult<Vec<Contact>> {
        let resp: RecipientsResponse = self.get(&format!("/campaigns/{}/recipients", id)).await?;
        Ok(resp.recipients)
    }

    async fn preview_campaign(&self, id: i64) -> ApiResult<Vec<u8>> {
        self.get_bytes(&format!("/campaigns/{}/preview", id)).await
    }

    async fn send_campaign(&self, id: i64, request: &SendCampaignRequest) -> ApiResult<u64> {
        let resp: SendCampaignResponse = self
            .post(&format!("/campaigns/{}/send", id), request)
            .await?;
        Ok(resp.sent)
    }
}
