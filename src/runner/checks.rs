//! Endpoint checks
//!
//! Each check is a row in [`CHECKS`]: where to send the GET and how to judge
//! the response. Judging is pure so it can be tested without a network.

use crate::driver::ProbeResponse;
use crate::error::ProbeError;
use serde_json::{json, Value};

/// Fields the health endpoint must always return
pub const HEALTH_FIELDS: &[&str] = &["status", "timestamp", "database", "supabase", "services"];

/// Body size kept from a failing root page response
const PAGE_SNIPPET_CHARS: usize = 200;

/// Expected body of an authenticated 200 response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    /// JSON object carrying all of these keys
    Fields(&'static [&'static str]),
    /// JSON array of any length
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Root page: 200 with an HTML content type
    Page,
    /// Health endpoint: 200 with every required key present
    Health { required: &'static [&'static str] },
    /// Protected endpoint: 401 proves auth is enforced, 200 must match `shape`
    AuthGuarded { shape: BodyShape },
    /// Liveness only: 200 or 401, body ignored
    Reachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointCheck {
    /// Prefix used in result names, e.g. "Dashboard Stats"
    pub label: &'static str,
    /// Path below `/api`; `None` targets the base URL itself
    pub path: Option<&'static str>,
    pub kind: CheckKind,
}

/// Fixed run order. No check is skipped when an earlier one fails.
pub const CHECKS: &[EndpointCheck] = &[
    EndpointCheck {
        label: "Application",
        path: None,
        kind: CheckKind::Page,
    },
    EndpointCheck {
        label: "Health Check",
        path: Some("/health"),
        kind: CheckKind::Health {
            required: HEALTH_FIELDS,
        },
    },
    EndpointCheck {
        label: "Dashboard Stats",
        path: Some("/dashboard/stats"),
        kind: CheckKind::AuthGuarded {
            shape: BodyShape::Fields(&[
                "targetCalories",
                "consumedCalories",
                "targetProtein",
                "consumedProtein",
            ]),
        },
    },
    EndpointCheck {
        label: "Nutrition Summary",
        path: Some("/nutrition/summary"),
        kind: CheckKind::AuthGuarded {
            shape: BodyShape::Fields(&["macroData", "pieChartData", "weeklyData", "totalCalories"]),
        },
    },
    EndpointCheck {
        label: "Meals Today",
        path: Some("/meals/today"),
        kind: CheckKind::AuthGuarded {
            shape: BodyShape::Array,
        },
    },
    EndpointCheck {
        label: "Foods Endpoint",
        path: Some("/foods"),
        kind: CheckKind::Reachable,
    },
    EndpointCheck {
        label: "Profile Endpoint",
        path: Some("/profile"),
        kind: CheckKind::Reachable,
    },
];

/// Verdict of one check before it is timestamped and recorded
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub name: String,
    pub success: bool,
    pub details: String,
    pub response_data: Option<Value>,
}

impl Outcome {
    fn new(check: &EndpointCheck, suffix: &str, success: bool, details: String) -> Self {
        Self {
            name: format!("{} - {}", check.label, suffix),
            success,
            details,
            response_data: None,
        }
    }

    fn pass(check: &EndpointCheck, suffix: &str, details: String) -> Self {
        Self::new(check, suffix, true, details)
    }

    fn fail(check: &EndpointCheck, suffix: &str, details: String) -> Self {
        Self::new(check, suffix, false, details)
    }

    fn with_data(mut self, data: Option<Value>) -> Self {
        self.response_data = data;
        self
    }

    /// Failure for a request that never produced a usable response
    ///
    /// Transport and decode errors are reported alike.
    pub fn from_error(check: &EndpointCheck, err: &ProbeError) -> Self {
        match check.kind {
            CheckKind::Page => Self::fail(check, "Connection", format!("Error: {}", err)),
            CheckKind::Health { .. } => {
                Self::fail(check, "Connection", format!("Connection error: {}", err))
            }
            _ => Self::fail(check, "Error", format!("Error: {}", err)),
        }
    }
}

/// Judge a response against its check
pub fn evaluate(check: &EndpointCheck, response: &ProbeResponse) -> Outcome {
    match check.kind {
        CheckKind::Page => evaluate_page(check, response),
        CheckKind::Health { required } => evaluate_health(check, required, response),
        CheckKind::AuthGuarded { shape } => evaluate_guarded(check, shape, response),
        CheckKind::Reachable => evaluate_reachable(check, response),
    }
}

fn evaluate_page(check: &EndpointCheck, response: &ProbeResponse) -> Outcome {
    if response.status == 200 {
        let is_html = response.content_type.contains("text/html");
        return Outcome::new(
            check,
            "Main Page",
            is_html,
            format!(
                "HTTP {}, Content-Type: {}",
                response.status, response.content_type
            ),
        );
    }

    let snippet: String = response.body.chars().take(PAGE_SNIPPET_CHARS).collect();
    Outcome::fail(check, "Main Page", format!("HTTP {}", response.status))
        .with_data(text_data(&snippet))
}

fn evaluate_health(
    check: &EndpointCheck,
    required: &[&str],
    response: &ProbeResponse,
) -> Outcome {
    if response.status != 200 {
        return unexpected_status(check, "API Response", response);
    }

    let data = match response.json() {
        Ok(data) => data,
        Err(err) => return Outcome::from_error(check, &err),
    };

    let missing = missing_fields(&data, required);
    if !missing.is_empty() {
        return Outcome::fail(
            check,
            "Response Structure",
            format!("Missing fields: {}", missing.join(", ")),
        )
        .with_data(Some(data));
    }

    let status = display_value(&data["status"]);
    let db_connected = connected_flag(&data, "database");
    let supabase_connected = connected_flag(&data, "supabase");

    Outcome::pass(
        check,
        "API Response",
        format!(
            "Status: {}, DB: {}, Supabase: {}",
            status, db_connected, supabase_connected
        ),
    )
    .with_data(Some(json!({
        "status": data["status"],
        "database_connected": db_connected,
        "supabase_connected": supabase_connected,
        "response_time": data.get("responseTime").cloned().unwrap_or(Value::Null),
    })))
}

fn evaluate_guarded(check: &EndpointCheck, shape: BodyShape, response: &ProbeResponse) -> Outcome {
    match response.status {
        401 => Outcome::pass(
            check,
            "Authentication Required",
            "Correctly returns 401 for unauthenticated request".to_string(),
        ),
        200 => {
            let data = match response.json() {
                Ok(data) => data,
                Err(err) => return Outcome::from_error(check, &err),
            };

            match shape {
                BodyShape::Fields(fields) => {
                    let has_required_fields = missing_fields(&data, fields).is_empty();
                    Outcome::new(
                        check,
                        "Response Structure",
                        has_required_fields,
                        format!("Has required fields: {}", has_required_fields),
                    )
                    .with_data(has_required_fields.then_some(data))
                }
                BodyShape::Array => {
                    let meals = data.as_array();
                    let is_array = meals.is_some();
                    Outcome::new(
                        check,
                        "Response Format",
                        is_array,
                        format!("Returns array: {}", is_array),
                    )
                    .with_data(Some(json!({ "meal_count": meals.map_or(0, |m| m.len()) })))
                }
            }
        }
        _ => unexpected_status(check, "Unexpected Status", response),
    }
}

fn evaluate_reachable(check: &EndpointCheck, response: &ProbeResponse) -> Outcome {
    match response.status {
        200 | 401 => Outcome::pass(
            check,
            "Accessibility",
            format!("Endpoint accessible (HTTP {})", response.status),
        ),
        _ => unexpected_status(check, "Status", response),
    }
}

fn unexpected_status(check: &EndpointCheck, suffix: &str, response: &ProbeResponse) -> Outcome {
    Outcome::fail(check, suffix, format!("HTTP {}", response.status))
        .with_data(text_data(&response.body))
}

/// Required keys absent from `data`; a non-object is missing all of them
pub fn missing_fields<'a>(data: &Value, required: &[&'a str]) -> Vec<&'a str> {
    let object = data.as_object();
    required
        .iter()
        .filter(|field| !object.map_or(false, |o| o.contains_key(**field)))
        .copied()
        .collect()
}

/// `<section>.connected`, false unless it is literally `true`
fn connected_flag(data: &Value, section: &str) -> bool {
    data.get(section)
        .and_then(|s| s.get("connected"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn text_data(text: &str) -> Option<Value> {
    if text.is_empty() {
        None
    } else {
        Some(Value::String(text.to_string()))
    }
}
