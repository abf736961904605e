use super::state::{RunSummary, TestResult, Verdict};
use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// Test execution events, emitted in order while a run progresses
#[derive(Debug, Clone, Copy)]
pub enum TestEvent<'a> {
    SessionStarted { session_id: &'a str, base_url: &'a str },
    CheckFinished { result: &'a TestResult },
    SessionFinished { summary: &'a RunSummary },
}

/// Receives every event of a run
pub trait EventListener: Send {
    fn on_event(&mut self, event: &TestEvent<'_>);
}

/// Prints human-readable progress and the final summary to stdout
#[derive(Debug, Default)]
pub struct ConsoleEventListener;

impl EventListener for ConsoleEventListener {
    fn on_event(&mut self, event: &TestEvent<'_>) {
        match event {
            TestEvent::SessionStarted {
                session_id,
                base_url,
            } => {
                println!("🚀 Starting NutriMed Backend API Tests");
                println!("📍 Testing against: {}", base_url.cyan());
                log::debug!("session {}", session_id);
                println!("{}", "=".repeat(RULE_WIDTH));
            }

            TestEvent::CheckFinished { result } => {
                let status = if result.success {
                    "✅ PASSED".green().bold()
                } else {
                    "❌ FAILED".red().bold()
                };
                println!("\n{} - {}", status, result.name);
                if !result.details.is_empty() {
                    println!("   Details: {}", result.details);
                }
                if let (false, Some(data)) = (result.success, &result.response_data) {
                    println!("   Response: {}", render_data(data).dimmed());
                }
            }

            TestEvent::SessionFinished { summary } => print_summary(summary),
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("📊 TEST SUMMARY");
    println!("{}", rule);
    println!("Total Tests: {}", summary.total_tests);
    println!("Passed: {}", summary.passed_tests.to_string().green());
    println!("Failed: {}", summary.failed_tests().to_string().red());
    println!("Success Rate: {:.1}%", summary.success_rate);

    if !summary.critical_issues.is_empty() {
        println!("\n{}", "🚨 CRITICAL ISSUES:".red().bold());
        for issue in &summary.critical_issues {
            println!("   - {}", issue);
        }
    }

    match summary.verdict() {
        Verdict::CriticalIssues => {
            println!("\n{}", "❌ Tests completed with critical issues".red())
        }
        Verdict::Passed => println!("\n{}", "✅ Tests completed successfully".green()),
        Verdict::SomeFailures => {
            println!("\n{}", "⚠️  Tests completed with some failures".yellow())
        }
    }
}

/// Strings print bare, everything else as compact JSON
fn render_data(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
