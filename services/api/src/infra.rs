use agency_leads::config::MailConfig;
use agency_leads::workflows::intake::{
    MailRoute, MessageRenderer, ResendMessenger, StaticCopy, SubmissionOrchestrator,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type LeadOrchestrator = SubmissionOrchestrator<ResendMessenger>;

pub(crate) fn build_orchestrator(mail: &MailConfig) -> Arc<LeadOrchestrator> {
    let route = MailRoute {
        from: mail.from_header(),
        operator_inbox: mail.operator_inbox.clone(),
    };
    let renderer = MessageRenderer::new(Arc::new(StaticCopy), route);
    let messenger = Arc::new(ResendMessenger::new(mail.clone()));
    Arc::new(SubmissionOrchestrator::new(messenger, renderer))
}
