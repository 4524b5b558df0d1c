// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use peer_pair_domain::EmployeeId;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request manual changes to an assignment
/// graph. Each drag-and-drop gesture in the manual pairing screen maps to
/// exactly one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Assign a reviewer to a reviewee.
    AddEdge {
        /// The employee who will perform the review.
        reviewer_id: EmployeeId,
        /// The employee to be reviewed.
        reviewee_id: EmployeeId,
    },
    /// Remove an existing reviewer → reviewee assignment.
    RemoveEdge {
        /// The employee performing the review.
        reviewer_id: EmployeeId,
        /// The employee being reviewed.
        reviewee_id: EmployeeId,
    },
    /// Reassign a reviewer from one reviewee to another.
    ///
    /// Semantically remove-then-add, evaluated as one transaction: if the
    /// add half fails, the original edge survives and the reviewer is never
    /// left with one fewer assignment.
    MoveEdge {
        /// The employee performing the review.
        reviewer_id: EmployeeId,
        /// The reviewee the reviewer is currently assigned to.
        from_reviewee_id: EmployeeId,
        /// The reviewee the reviewer should be reassigned to.
        to_reviewee_id: EmployeeId,
    },
}
