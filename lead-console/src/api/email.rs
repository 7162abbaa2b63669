use async_trait::async_trait;
use serde_json::Value;
use shared_types::{
    Contact, CreateTemplateRequest, EmailSendResults, EmailTemplate, LogTouchRequest,
    LogTouchResponse, SendEmailRequest, SendEmailResponse, TemplatesResponse,
    UpdateTemplateRequest,
};

use super::{ApiClient, ApiResult};

#[async_trait]
pub trait EmailApi: Send + Sync {
    async fn send_email(&self, request: &SendEmailRequest) -> ApiResult<EmailSendResults>;

    async fn log_touch(&self, request: &LogTouchRequest) -> ApiResult<Option<Contact>>;

    async fn list_templates(&self) -> ApiResult<Vec<EmailTemplate>>;

    async fn create_template(&self, request: &CreateTemplateRequest) -> ApiResult<()>;

    async fn update_template(&self, id: i64, request: &UpdateTemplateRequest) -> ApiResult<()>;

    async fn delete_template(&self, id: i64) -> ApiResult<()>;
}

#[async_trait]
impl EmailApi for ApiClient {
    async fn send_email(&self, request: &SendEmailRequest) -> ApiResult<EmailSendResults> {
        let resp: SendEmailResponse = self.post("/email/send", request).await?;
        Ok(resp.results)
    }

    async fn log_touch(&self, request: &LogTouchRequest) -> ApiResult<Option<Contact>> {
        let resp: LogTouchResponse = self.post("/email/log-touch", request).await?;
        Ok(resp.contact)
    }

    async fn list_templates(&self) -> ApiResult<Vec<EmailTemplate>> {
        let resp: TemplatesResponse = self.get("/email/templates").await?;
        Ok(resp.templates)
    }

    async fn create_template(&self, request: &CreateTemplateRequest) -> ApiResult<()> {
        let _: Value = self.post("/email/templates", request).await?;
        Ok(())
    }

    async fn update_template(&self, id: i64, request: &UpdateTemplateRequest) -> ApiResult<()> {
        let _: Value = self.put(&format!("/email/templates/{}", id), request).await?;
        Ok(())
    }

    async fn delete_template(&self, id: i64) -> ApiResult<()> {
        let _: Value = self.delete(&format!("/email/templates/{}", id)).await?;
        Ok(())
    }
}
