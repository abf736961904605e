use serde::{Deserialize, Serialize};

/// Minimum success rate (percent) for a run without critical issues to pass
pub const PASS_THRESHOLD: f64 = 80.0;

pub const APP_NOT_ACCESSIBLE: &str = "Application not accessible";
pub const HEALTH_FAILING: &str = "Health endpoint failing";

/// Outcome of a single check, created once and never mutated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub details: String,
    /// RFC 3339 local time at which the result was recorded
    pub timestamp: String,
    pub response_data: Option<serde_json::Value>,
    pub duration_ms: u64,
}

/// Ordered results of a run plus the counters derived from them
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<TestResult>,
    tests_run: u32,
    tests_passed: u32,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result; every check lands here exactly once
    pub fn record(&mut self, result: TestResult) {
        self.tests_run += 1;
        if result.success {
            self.tests_passed += 1;
        }
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn tests_run(&self) -> u32 {
        self.tests_run
    }

    pub fn tests_passed(&self) -> u32 {
        self.tests_passed
    }

    /// Derive the run summary
    ///
    /// The two flags come from the root page and health checks, whose failure
    /// is critical regardless of the overall success rate.
    pub fn summary(&self, app_accessible: bool, health_check_passed: bool) -> RunSummary {
        let mut critical_issues = Vec::new();
        if !app_accessible {
            critical_issues.push(APP_NOT_ACCESSIBLE.to_string());
        }
        if !health_check_passed {
            critical_issues.push(HEALTH_FAILING.to_string());
        }

        RunSummary {
            total_tests: self.tests_run,
            passed_tests: self.tests_passed,
            success_rate: success_rate(self.tests_passed, self.tests_run),
            critical_issues,
            app_accessible,
            health_check_passed,
            test_results: self.results.clone(),
        }
    }
}

/// Percentage of passed checks, 0 for an empty run
pub fn success_rate(passed: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_tests: u32,
    pub passed_tests: u32,
    pub success_rate: f64,
    pub critical_issues: Vec<String>,
    pub app_accessible: bool,
    pub health_check_passed: bool,
    pub test_results: Vec<TestResult>,
}

/// Final verdict printed after the summary block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    CriticalIssues,
    Passed,
    SomeFailures,
}

impl RunSummary {
    pub fn failed_tests(&self) -> u32 {
        self.total_tests.saturating_sub(self.passed_tests)
    }

    pub fn verdict(&self) -> Verdict {
        if !self.critical_issues.is_empty() {
            Verdict::CriticalIssues
        } else if self.success_rate >= PASS_THRESHOLD {
            Verdict::Passed
        } else {
            Verdict::SomeFailures
        }
    }

    /// Process exit status: 0 only when the verdict is a pass
    pub fn exit_code(&self) -> i32 {
        match self.verdict() {
            Verdict::Passed => 0,
            Verdict::CriticalIssues | Verdict::SomeFailures => 1,
        }
    }
}
