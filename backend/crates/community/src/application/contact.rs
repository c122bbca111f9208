//! Contact Use Case

use std::sync::Arc;

use kernel::id::ContactId;

use crate::domain::entity::contact::Contact;
use crate::domain::repository::ContactRepository;
use crate::error::CommunityResult;

pub struct ContactUseCase<C>
where
    C: ContactRepository,
{
    contacts: Arc<C>,
}

impl<C> ContactUseCase<C>
where
    C: ContactRepository,
{
    pub fn new(contacts: Arc<C>) -> Self {
        Self { contacts }
    }

    pub async fn submit(&self, full_name: &str, email: &str, content: &str) -> CommunityResult<Contact> {
        let contact = Contact::submit(full_name, email, content)?;
        self.contacts.insert_contact(&contact).await?;

        tracing::info!(contact_id = %contact.id, "Contact message received");
        Ok(contact)
    }

    pub async fn list(&self) -> CommunityResult<Vec<Contact>> {
        self.contacts.list_contacts().await
    }

    /// Already-resolved ids are skipped; returns how many changed
    pub async fn resolve(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        let resolved = self.contacts.resolve_contacts(ids).await?;
        tracing::info!(requested = ids.len(), resolved, "Contacts resolved");
        Ok(resolved)
    }

    pub async fn delete(&self, ids: &[ContactId]) -> CommunityResult<u64> {
        let deleted = self.contacts.delete_contacts(ids).await?;
        tracing::info!(requested = ids.len(), deleted, "Contacts deleted");
        Ok(deleted)
    }
}
