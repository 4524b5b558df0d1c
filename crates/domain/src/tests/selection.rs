// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EmployeeId, PeerSelections};
use std::collections::BTreeSet;

fn id(value: &str) -> EmployeeId {
    EmployeeId::new(value)
}

fn choices(values: &[&str]) -> BTreeSet<EmployeeId> {
    values.iter().map(|value| EmployeeId::new(value)).collect()
}

#[test]
fn test_submit_records_choices() {
    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-1"), choices(&["emp-2", "emp-3"]));

    assert!(selections.has_submitted(&id("emp-1")));
    assert!(selections.named(&id("emp-1"), &id("emp-2")));
    assert!(!selections.named(&id("emp-1"), &id("emp-4")));
    assert!(!selections.has_submitted(&id("emp-2")));
}

#[test]
fn test_resubmission_overwrites_previous_choices() {
    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-1"), choices(&["emp-2", "emp-3"]));
    selections.submit(id("emp-1"), choices(&["emp-4"]));

    assert!(!selections.named(&id("emp-1"), &id("emp-2")));
    assert!(selections.named(&id("emp-1"), &id("emp-4")));
    assert_eq!(selections.len(), 1);
}

#[test]
fn test_submit_discards_self_selection() {
    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-1"), choices(&["emp-1", "emp-2"]));

    assert!(!selections.named(&id("emp-1"), &id("emp-1")));
    assert!(selections.named(&id("emp-1"), &id("emp-2")));
}

#[test]
fn test_mutual_requires_both_directions() {
    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-1"), choices(&["emp-2"]));
    selections.submit(id("emp-2"), choices(&["emp-1"]));
    selections.submit(id("emp-3"), choices(&["emp-1"]));

    assert!(selections.is_mutual(&id("emp-1"), &id("emp-2")));
    assert!(selections.is_mutual(&id("emp-2"), &id("emp-1")));
    assert!(!selections.is_mutual(&id("emp-1"), &id("emp-3")));
}

#[test]
fn test_iteration_is_ordered_by_selector() {
    let mut selections: PeerSelections = PeerSelections::new();
    selections.submit(id("emp-3"), choices(&["emp-1"]));
    selections.submit(id("emp-1"), choices(&["emp-2"]));
    selections.submit(id("emp-2"), choices(&["emp-3"]));

    let order: Vec<&str> = selections
        .iter()
        .map(|(selector, _)| selector.value())
        .collect();
    assert_eq!(order, vec!["emp-1", "emp-2", "emp-3"]);
}
