// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use peer_pair_audit::{AuditEvent, StateSnapshot};
use peer_pair_domain::{
    AssignmentEdge, CapacityConfig, DomainError, EmployeeId, ReviewCycleId, Roster,
};
use std::collections::BTreeSet;

/// The assignment graph for one review cycle.
///
/// The graph is the owned aggregate: a set of directed reviewer → reviewee
/// edges with provenance. Edge insertion order is preserved and is the
/// stable order exposed by the query projections. Degree counts are derived
/// from the edge list on every read rather than cached, so they can never
/// drift from the edges themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentGraph {
    /// The review cycle this graph belongs to.
    review_cycle_id: ReviewCycleId,
    /// All edges, in insertion order.
    edges: Vec<AssignmentEdge>,
    /// Membership index over ordered `(reviewer, reviewee)` pairs.
    members: BTreeSet<(EmployeeId, EmployeeId)>,
}

impl AssignmentGraph {
    /// Creates an empty graph for a review cycle.
    ///
    /// # Arguments
    ///
    /// * `review_cycle_id` - The review cycle this graph belongs to
    #[must_use]
    pub const fn new(review_cycle_id: ReviewCycleId) -> Self {
        Self {
            review_cycle_id,
            edges: Vec::new(),
            members: BTreeSet::new(),
        }
    }

    /// Reconstructs a graph from a stored edge list.
    ///
    /// Only structural soundness is checked here (no self-edges, no
    /// duplicates); capacity rules were enforced when the edges were
    /// created and configuration may legitimately have changed since.
    ///
    /// # Arguments
    ///
    /// * `review_cycle_id` - The review cycle this graph belongs to
    /// * `edges` - The stored edges, in their original insertion order
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SelfAssignment` or `DomainError::DuplicateEdge`
    /// if the stored edge list is structurally corrupt.
    pub fn from_edges(
        review_cycle_id: ReviewCycleId,
        edges: Vec<AssignmentEdge>,
    ) -> Result<Self, DomainError> {
        let mut graph: Self = Self::new(review_cycle_id);
        for edge in edges {
            if edge.reviewer_id == edge.reviewee_id {
                return Err(DomainError::SelfAssignment {
                    employee_id: edge.reviewer_id,
                });
            }
            if graph.contains_edge(&edge.reviewer_id, &edge.reviewee_id) {
                return Err(DomainError::DuplicateEdge {
                    reviewer_id: edge.reviewer_id,
                    reviewee_id: edge.reviewee_id,
                });
            }
            graph.insert(edge);
        }
        Ok(graph)
    }

    /// Returns the review cycle this graph belongs to.
    #[must_use]
    pub const fn review_cycle_id(&self) -> ReviewCycleId {
        self.review_cycle_id
    }

    /// Returns all edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[AssignmentEdge] {
        &self.edges
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether the graph has no edges.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Checks whether the ordered `(reviewer, reviewee)` edge exists.
    #[must_use]
    pub fn contains_edge(&self, reviewer_id: &EmployeeId, reviewee_id: &EmployeeId) -> bool {
        // BTreeSet<(K, K)> has no borrowed-pair lookup without cloning.
        self.members
            .contains(&(reviewer_id.clone(), reviewee_id.clone()))
    }

    /// Returns the number of reviewers assigned to an employee.
    #[must_use]
    pub fn in_degree(&self, employee_id: &EmployeeId) -> u32 {
        u32::try_from(
            self.edges
                .iter()
                .filter(|edge| edge.reviewee_id == *employee_id)
                .count(),
        )
        .unwrap_or(u32::MAX)
    }

    /// Returns the number of reviews an employee owes.
    #[must_use]
    pub fn out_degree(&self, employee_id: &EmployeeId) -> u32 {
        u32::try_from(
            self.edges
                .iter()
                .filter(|edge| edge.reviewer_id == *employee_id)
                .count(),
        )
        .unwrap_or(u32::MAX)
    }

    /// Checks whether two employees review each other.
    #[must_use]
    pub fn is_mutual(&self, a: &EmployeeId, b: &EmployeeId) -> bool {
        self.contains_edge(a, b) && self.contains_edge(b, a)
    }

    /// Returns all human-placed edges in insertion order.
    #[must_use]
    pub fn manual_edges(&self) -> Vec<AssignmentEdge> {
        self.edges
            .iter()
            .filter(|edge| edge.is_manual())
            .cloned()
            .collect()
    }

    /// Validates a prospective edge against the live graph.
    ///
    /// Checks every invariant the post-insertion graph must satisfy: known
    /// employees, no self-edge, no duplicate, reviewee capacity, reviewer
    /// load limit, department cap, and the manager/subordinate rule. The
    /// graph itself is not modified.
    ///
    /// # Arguments
    ///
    /// * `roster` - The cycle's employee snapshot
    /// * `capacity` - The cycle's capacity configuration
    /// * `reviewer_id` - The prospective reviewer
    /// * `reviewee_id` - The prospective reviewee
    ///
    /// # Errors
    ///
    /// Returns the specific `DomainError` the insertion would violate.
    pub fn check_edge(
        &self,
        roster: &Roster,
        capacity: &CapacityConfig,
        reviewer_id: &EmployeeId,
        reviewee_id: &EmployeeId,
    ) -> Result<(), DomainError> {
        if !roster.contains(reviewer_id) {
            return Err(DomainError::UnknownEmployee {
                employee_id: reviewer_id.clone(),
            });
        }
        if !roster.contains(reviewee_id) {
            return Err(DomainError::UnknownEmployee {
                employee_id: reviewee_id.clone(),
            });
        }
        if reviewer_id == reviewee_id {
            return Err(DomainError::SelfAssignment {
                employee_id: reviewer_id.clone(),
            });
        }
        if self.contains_edge(reviewer_id, reviewee_id) {
            return Err(DomainError::DuplicateEdge {
                reviewer_id: reviewer_id.clone(),
                reviewee_id: reviewee_id.clone(),
            });
        }

        let current_reviewers: u32 = self.in_degree(reviewee_id);
        if current_reviewers >= capacity.max_reviews_allowed {
            return Err(DomainError::ReviewerCapacityExceeded {
                reviewee_id: reviewee_id.clone(),
                current: current_reviewers,
                max: capacity.max_reviews_allowed,
            });
        }

        if let Some(limit) = capacity.reviewer_load_limit {
            let current_load: u32 = self.out_degree(reviewer_id);
            if current_load >= limit {
                return Err(DomainError::ReviewerLoadExceeded {
                    reviewer_id: reviewer_id.clone(),
                    current: current_load,
                    max: limit,
                });
            }
        }

        if let Some(cap) = capacity.department_cap
            && let Some(reviewee_department) = roster.department_of(reviewee_id)
            && roster.department_of(reviewer_id) == Some(reviewee_department)
        {
            let same_department: u32 = self.same_department_reviewers(roster, reviewee_id);
            if same_department >= cap {
                return Err(DomainError::DepartmentCapExceeded {
                    reviewee_id: reviewee_id.clone(),
                    department: reviewee_department.to_owned(),
                    current: same_department,
                    max: cap,
                });
            }
        }

        if capacity.forbid_manager_pairs {
            if roster.is_manager_of(reviewer_id, reviewee_id) {
                return Err(DomainError::ManagerSubordinateDisallowed {
                    manager_id: reviewer_id.clone(),
                    subordinate_id: reviewee_id.clone(),
                });
            }
            if roster.is_manager_of(reviewee_id, reviewer_id) {
                return Err(DomainError::ManagerSubordinateDisallowed {
                    manager_id: reviewee_id.clone(),
                    subordinate_id: reviewer_id.clone(),
                });
            }
        }

        Ok(())
    }

    /// Counts a reviewee's reviewers who share the reviewee's department.
    #[must_use]
    pub fn same_department_reviewers(&self, roster: &Roster, reviewee_id: &EmployeeId) -> u32 {
        let Some(reviewee_department) = roster.department_of(reviewee_id) else {
            return 0;
        };
        u32::try_from(
            self.edges
                .iter()
                .filter(|edge| edge.reviewee_id == *reviewee_id)
                .filter(|edge| roster.department_of(&edge.reviewer_id) == Some(reviewee_department))
                .count(),
        )
        .unwrap_or(u32::MAX)
    }

    /// Inserts an edge. Callers must have validated it first.
    pub(crate) fn insert(&mut self, edge: AssignmentEdge) {
        self.members
            .insert((edge.reviewer_id.clone(), edge.reviewee_id.clone()));
        self.edges.push(edge);
    }

    /// Removes the ordered `(reviewer, reviewee)` edge.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EdgeNotFound` if the edge does not exist.
    pub(crate) fn remove(
        &mut self,
        reviewer_id: &EmployeeId,
        reviewee_id: &EmployeeId,
    ) -> Result<AssignmentEdge, DomainError> {
        let position: usize = self
            .edges
            .iter()
            .position(|edge| {
                edge.reviewer_id == *reviewer_id && edge.reviewee_id == *reviewee_id
            })
            .ok_or_else(|| DomainError::EdgeNotFound {
                reviewer_id: reviewer_id.clone(),
                reviewee_id: reviewee_id.clone(),
            })?;
        self.members
            .remove(&(reviewer_id.clone(), reviewee_id.clone()));
        Ok(self.edges.remove(position))
    }

    /// Converts the graph to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let manual_count: usize = self.edges.iter().filter(|edge| edge.is_manual()).count();
        StateSnapshot::new(format!(
            "review_cycle={},edges={},manual_edges={}",
            self.review_cycle_id.value(),
            self.edges.len(),
            manual_count
        ))
    }
}

/// The result of a successful manual transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new graph after the transition.
    pub new_graph: AssignmentGraph,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
