use async_trait::async_trait;
use serde_json::Value;
use shared_types::{
    AddNoteRequest, BulkDeleteRequest, Contact, ContactDetailResponse, ContactFilters,
    ContactResponse, ContactsResponse, CreateContactRequest, DeletedResponse,
    DuplicateCheckRequest, DuplicateCheckResponse, UpdateContactRequest,
};

use super::{ApiClient, ApiResult};

#[async_trait]
pub trait ContactsApi: Send + Sync {
    async fn list_contacts(&self, filters: &ContactFilters) -> ApiResult<Vec<Contact>>;

    async fn get_contact(&self, id: i64) -> ApiResult<ContactDetailResponse>;

    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact>;

    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact>;

    async fn delete_contact(&self, id: i64) -> ApiResult<()>;

    /// Returns the number of contacts the backend deleted.
    async fn bulk_delete_contacts(&self, ids: &[i64]) -> ApiResult<u64>;

    async fn delete_all_contacts(&self) -> ApiResult<u64>;

    /// The existing contact holding `email`, if any.
    async fn check_duplicate(&self, email: &str) -> ApiResult<Option<Contact>>;

    async fn add_note(&self, contact_id: i64, content: &str) -> ApiResult<()>;
}

#[async_trait]
impl ContactsApi for ApiClient {
    async fn list_contacts(&self, filters: &ContactFilters) -> ApiResult<Vec<Contact>> {
        let resp: ContactsResponse = self.get_with_query("/contacts", filters).await?;
        Ok(resp.contacts)
    }

    async fn get_contact(&self, id: i64) -> ApiResult<ContactDetailResponse> {
        self.get(&format!("/contacts/{}", id)).await
    }

    async fn create_contact(&self, request: &CreateContactRequest) -> ApiResult<Contact> {
        let resp: ContactResponse = self.post("/contacts", request).await?;
        Ok(resp.contact)
    }

    async fn update_contact(&self, id: i64, request: &UpdateContactRequest) -> ApiResult<Contact> {
        let resp: ContactResponse = self.put(&format!("/contacts/{}", id), request).await?;
        Ok(resp.contact)
    }

    async fn delete_contact(&self, id: i64) -> ApiResult<()> {
        let _: Value = self.delete(&format!("/contacts/{}", id)).await?;
        Ok(())
    }

    async fn bulk_delete_contacts(&self, ids: &[i64]) -> ApiResult<u64> {
        let body = BulkDeleteRequest {
            contact_ids: ids.to_vec(),
        };
        let resp: DeletedResponse = self.post("/contacts/bulk-delete", &body).await?;
        Ok(resp.deleted)
    }

    async fn delete_all_contacts(&self) -> ApiResult<u64> {
        let resp: DeletedResponse = self.delete("/contacts/delete-all").await?;
        Ok(resp.deleted)
    }

    async fn check_duplicate(&self, email: &str) -> ApiResult<Option<Contact>> {
        let body = DuplicateCheckRequest {
            email: email.to_string(),
        };
        let resp: DuplicateCheckResponse = self.post("/contacts/check-duplicate", &body).await?;
        Ok(if resp.is_duplicate { resp.contact } else { None })
    }

    async fn add_note(&self, contact_id: i64, content: &str) -> ApiResult<()> {
        let body = AddNoteRequest {
            content: content.to_string(),
        };
        let _: Value = self
            .post(&format!("/contacts/{}/notes", contact_id), &body)
            .await?;
        Ok(())
    }
}
