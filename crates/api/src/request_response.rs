// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract. Everything here is plain data suitable for JSON.

/// API request to add or remove a single assignment edge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeRequest {
    /// The employee who will perform (or stop performing) the review.
    pub reviewer_id: String,
    /// The employee being reviewed.
    pub reviewee_id: String,
}

/// API request to reassign a reviewer from one reviewee to another.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoveEdgeRequest {
    /// The employee performing the review.
    pub reviewer_id: String,
    /// The reviewee the reviewer is currently assigned to.
    pub from_reviewee_id: String,
    /// The reviewee the reviewer should be reassigned to.
    pub to_reviewee_id: String,
}

/// API response for a successful manual edge mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeMutationResponse {
    /// The review cycle that was modified.
    pub review_cycle_id: i64,
    /// The number of edges in the committed graph.
    pub edge_count: usize,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// An employee the solver could not bring up to the target reviewer count.
///
/// An under-capacity warning is data, not an error: the cycle is still
/// committed and the shortfall is surfaced for human follow-up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShortfallInfo {
    /// The under-capacity employee.
    pub employee_id: String,
    /// How many reviewers the employee ended up with.
    pub assigned: u32,
    /// How many more reviewers the employee still needs.
    pub needed: u32,
}

/// API response for a successful auto-pairing run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunAutoPairingResponse {
    /// The review cycle that was solved.
    pub review_cycle_id: i64,
    /// The number of edges in the committed graph.
    pub edge_count: usize,
    /// The number of preserved human-placed edges.
    pub manual_edge_count: usize,
    /// Employees still under the target reviewer count, in roster order.
    pub unsatisfied: Vec<ShortfallInfo>,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing the reviewers assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviewersResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// The employee being reviewed.
    pub employee_id: String,
    /// The assigned reviewers, in edge insertion order.
    pub reviewers: Vec<String>,
}

/// API response listing the reviewees an employee must review.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RevieweesResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// The reviewing employee.
    pub employee_id: String,
    /// The employees they must review, in edge insertion order.
    pub reviewees: Vec<String>,
}

/// API response listing the peers who mutually selected an employee.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MutualSelectionsResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// The employee in question.
    pub employee_id: String,
    /// Peers where both selection entries name each other, in id order.
    pub mutual: Vec<String>,
}

/// Per-employee assignment load.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeLoadInfo {
    /// The employee.
    pub employee_id: String,
    /// How many reviewers are assigned to this employee.
    pub in_degree: u32,
    /// How many reviews this employee owes.
    pub out_degree: u32,
}

/// API response with per-employee load rows for a cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoadSummaryResponse {
    /// The review cycle summarized.
    pub review_cycle_id: i64,
    /// One row per roster employee, in directory order.
    pub rows: Vec<EmployeeLoadInfo>,
}

/// One employee record in a roster feed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmployeeInfo {
    /// The employee's unique identifier.
    pub employee_id: String,
    /// The employee's display name.
    pub display_name: String,
    /// The employee's department.
    pub department: String,
    /// The employee's manager, if any.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// Whether the employee manages direct reports.
    #[serde(default)]
    pub is_manager: bool,
}

/// API request to replace a cycle's employee roster.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutRosterRequest {
    /// The full roster, in directory order.
    pub employees: Vec<EmployeeInfo>,
}

/// API response for a successful roster replacement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutRosterResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// The number of employees stored.
    pub employee_count: usize,
    /// A success message.
    pub message: String,
}

/// One selector's submitted peer choices.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelectionEntry {
    /// The employee making the selection.
    pub selector_id: String,
    /// The peers they chose.
    pub choices: Vec<String>,
}

/// API request to replace a cycle's peer selections.
///
/// Resubmitting for a selector overwrites their previous entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutSelectionsRequest {
    /// All submitted selections.
    pub selections: Vec<SelectionEntry>,
}

/// API response for a successful selections replacement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutSelectionsResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// The number of selectors with stored entries.
    pub selector_count: usize,
    /// A success message.
    pub message: String,
}

/// API request to store a cycle's capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutCapacityRequest {
    /// How many peers each employee may select upstream.
    pub max_peer_selection: u32,
    /// The hard per-reviewee reviewer ceiling and solver target.
    pub max_reviews_allowed: u32,
    /// Optional per-reviewer outbound ceiling.
    #[serde(default)]
    pub reviewer_load_limit: Option<u32>,
    /// Optional cap on same-department reviewers per reviewee.
    #[serde(default)]
    pub department_cap: Option<u32>,
    /// Whether manager/direct-subordinate pairings are disallowed.
    #[serde(default)]
    pub forbid_manager_pairs: bool,
}

/// API response for a successful capacity update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PutCapacityResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successful cycle deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveCycleResponse {
    /// The deleted review cycle.
    pub review_cycle_id: i64,
    /// A success message.
    pub message: String,
}

/// One audit event in a cycle's timeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The actor who initiated the mutation.
    pub actor_id: String,
    /// The type of actor.
    pub actor_type: String,
    /// The cause identifier (e.g., request ID).
    pub cause_id: String,
    /// A description of the cause.
    pub cause_description: String,
    /// The name of the action performed.
    pub action: String,
    /// Optional additional action details.
    pub details: Option<String>,
    /// The graph state before the mutation.
    pub before: String,
    /// The graph state after the mutation.
    pub after: String,
}

/// API response with the ordered audit timeline for a cycle.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    /// The review cycle.
    pub review_cycle_id: i64,
    /// All recorded events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
