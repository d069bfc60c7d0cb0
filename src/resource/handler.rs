//! Lifecycle trait implemented by every resource type.

use super::data::ResourceData;
use crate::error::ProviderResult;
use crate::schema::ResourceSchema;
use std::future::Future;

/// Lifecycle operations the host runtime drives for one resource type.
///
/// `C` is the remote client. Each operation performs at most one mutating
/// remote call and never retries; failures are returned to the host as is.
pub trait ResourceHandler<C>: Send + Sync {
    /// Resource type name, e.g. `azuredevops_agent_pool`
    fn resource_type(&self) -> &'static str;

    /// Declarative schema of the resource's attributes
    fn schema(&self) -> ResourceSchema;

    /// Create the remote entity and store its identifier and attributes.
    fn create(
        &self,
        client: &C,
        data: &mut ResourceData,
    ) -> impl Future<Output = ProviderResult<()>> + Send;

    /// Refresh attributes from the remote entity.
    ///
    /// A missing remote entity clears the identifier instead of failing.
    fn read(
        &self,
        client: &C,
        data: &mut ResourceData,
    ) -> impl Future<Output = ProviderResult<()>> + Send;

    /// Update the remote entity in place; the identifier never changes.
    fn update(
        &self,
        client: &C,
        data: &mut ResourceData,
    ) -> impl Future<Output = ProviderResult<()>> + Send;

    /// Delete the remote entity.
    fn delete(
        &self,
        client: &C,
        data: &ResourceData,
    ) -> impl Future<Output = ProviderResult<()>> + Send;

    /// Reconstitute state from an external identifier held in `data`'s ID slot.
    ///
    /// `data` is left untouched; the reconstituted resources are returned.
    fn import(
        &self,
        client: &C,
        data: &ResourceData,
    ) -> impl Future<Output = ProviderResult<Vec<ResourceData>>> + Send;
}
