use std::sync::Arc;

use service::catalog::ServiceCatalog;

#[derive(Clone)]
pub struct ServerState {
    pub catalog: Arc<ServiceCatalog>,
}
