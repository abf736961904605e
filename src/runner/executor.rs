use std::time::Instant;
use uuid::Uuid;

use super::checks::{evaluate, CheckKind, EndpointCheck, Outcome, CHECKS};
use super::events::{ConsoleEventListener, EventListener, TestEvent};
use super::state::{ResultLog, RunSummary, TestResult};
use crate::driver::Transport;
use crate::utils::config::Config;

/// Runs the endpoint checks in order against one transport
pub struct ApiTester<T: Transport> {
    transport: T,
    config: Config,
    session_id: String,
    log: ResultLog,
    listeners: Vec<Box<dyn EventListener>>,
}

impl<T: Transport> ApiTester<T> {
    /// Tester that prints progress to stdout
    pub fn new(transport: T, config: Config) -> Self {
        let mut tester = Self::silent(transport, config);
        tester.add_listener(Box::new(ConsoleEventListener));
        tester
    }

    /// Tester with no listeners attached
    pub fn silent(transport: T, config: Config) -> Self {
        Self {
            transport,
            config,
            session_id: Uuid::new_v4().to_string(),
            log: ResultLog::new(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn results(&self) -> &[TestResult] {
        self.log.results()
    }

    /// Run every check once, in table order, and summarize
    ///
    /// A failing check never stops the run and nothing here returns an error.
    /// Results of a previous run on the same tester are discarded.
    pub async fn run_all_tests(&mut self) -> RunSummary {
        self.log = ResultLog::new();
        emit(
            &mut self.listeners,
            TestEvent::SessionStarted {
                session_id: &self.session_id,
                base_url: &self.config.base_url,
            },
        );

        let mut app_accessible = true;
        let mut health_check_passed = true;

        for check in CHECKS {
            let passed = self.run_check(check).await;
            match check.kind {
                CheckKind::Page => app_accessible = passed,
                CheckKind::Health { .. } => health_check_passed = passed,
                _ => {}
            }
        }

        let summary = self.log.summary(app_accessible, health_check_passed);
        log::info!(
            "run {} finished: {}/{} passed",
            self.session_id,
            summary.passed_tests,
            summary.total_tests
        );
        emit(&mut self.listeners, TestEvent::SessionFinished { summary: &summary });
        summary
    }

    /// Execute one check and record its result; returns whether it passed
    pub async fn run_check(&mut self, check: &EndpointCheck) -> bool {
        let url = self.url_for(check);
        let started = Instant::now();

        let outcome = match self.transport.get(&url).await {
            Ok(response) => evaluate(check, &response),
            Err(err) => {
                log::warn!("{} request to {} failed: {}", check.label, url, err);
                Outcome::from_error(check, &err)
            }
        };

        let result = TestResult {
            name: outcome.name,
            success: outcome.success,
            details: outcome.details,
            timestamp: chrono::Local::now().to_rfc3339(),
            response_data: outcome.response_data,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        let passed = result.success;

        emit(&mut self.listeners, TestEvent::CheckFinished { result: &result });
        self.log.record(result);
        passed
    }

    fn url_for(&self, check: &EndpointCheck) -> String {
        match check.path {
            Some(path) => self.config.api_url(path),
            None => self.config.base_url.clone(),
        }
    }
}

fn emit(listeners: &mut [Box<dyn EventListener>], event: TestEvent<'_>) {
    for listener in listeners.iter_mut() {
        listener.on_event(&event);
    }
}
