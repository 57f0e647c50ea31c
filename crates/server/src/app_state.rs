use crate::api::{ApiContext, ServiceInfo};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) service: ServiceInfo,
}
