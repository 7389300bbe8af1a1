use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{EndpointId, RegisteredEndpoint};

/// Keyed store of constructed endpoints.
#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: RwLock<HashMap<EndpointId, RegisteredEndpoint>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_endpoints(endpoints: impl IntoIterator<Item = RegisteredEndpoint>) -> Self {
        let endpoints = endpoints
            .into_iter()
            .map(|endpoint| (endpoint.id(), endpoint))
            .collect();
        Self {
            endpoints: RwLock::new(endpoints),
        }
    }

    /// Replaces any endpoint previously registered under the same id.
    pub async fn insert(&self, endpoint: RegisteredEndpoint) -> Option<RegisteredEndpoint> {
        self.endpoints.write().await.insert(endpoint.id(), endpoint)
    }

    pub async fn get(&self, id: EndpointId) -> Option<RegisteredEndpoint> {
        self.endpoints.read().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: EndpointId) -> bool {
        self.endpoints.read().await.contains_key(&id)
    }

    /// Registered ids in declaration order.
    pub async fn ids(&self) -> Vec<EndpointId> {
        let mut ids: Vec<EndpointId> = self.endpoints.read().await.keys().copied().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::codec::SerdeJsonCodec;
    use crate::request_context::RequestContext;
    use crate::transport::ReqwestTransport;

    fn ctx() -> RequestContext {
        RequestContext::build(
            "https://osu.example",
            Arc::new(ReqwestTransport::new().unwrap()),
            Arc::new(SerdeJsonCodec),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_and_lookup() {
        let registry = EndpointRegistry::new();
        assert!(registry.get(EndpointId::GetUser).await.is_none());

        let endpoint = RegisteredEndpoint::build(EndpointId::GetUser, &ctx()).unwrap();
        assert!(registry.insert(endpoint).await.is_none());
        assert!(registry.contains(EndpointId::GetUser).await);
        assert_eq!(
            registry.get(EndpointId::GetUser).await.map(|e| e.id()),
            Some(EndpointId::GetUser)
        );
    }

    #[tokio::test]
    async fn reregistering_replaces_previous_instance() {
        let registry = EndpointRegistry::new();
        let ctx = ctx();
        registry
            .insert(RegisteredEndpoint::build(EndpointId::GetUser, &ctx).unwrap())
            .await;
        let previous = registry
            .insert(RegisteredEndpoint::build(EndpointId::GetUser, &ctx).unwrap())
            .await;
        assert!(previous.is_some());
        assert_eq!(registry.ids().await, vec![EndpointId::GetUser]);
    }

    #[tokio::test]
    async fn ids_are_sorted() {
        let ctx = ctx();
        let registry = EndpointRegistry::from_endpoints(
            [EndpointId::GetUser, EndpointId::ClientCredentialsToken]
                .into_iter()
                .map(|id| RegisteredEndpoint::build(id, &ctx).unwrap()),
        );
        assert_eq!(registry.ids().await, EndpointId::ALL.to_vec());
    }
}
