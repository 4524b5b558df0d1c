// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CapacityConfig, DomainError};

#[test]
fn test_validate_accepts_default_configuration() {
    let config: CapacityConfig = CapacityConfig::new(5, 3);

    assert!(config.validate().is_ok());
    assert_eq!(config.reviewer_load_limit, None);
    assert_eq!(config.department_cap, None);
    assert!(!config.forbid_manager_pairs);
}

#[test]
fn test_validate_rejects_zero_review_target() {
    let config: CapacityConfig = CapacityConfig::new(5, 0);

    let result: Result<(), DomainError> = config.validate();
    assert!(matches!(
        result,
        Err(DomainError::InvalidCapacity {
            field: "max_reviews_allowed",
            value: 0
        })
    ));
}

#[test]
fn test_validate_rejects_zero_selection_cap() {
    let config: CapacityConfig = CapacityConfig::new(0, 3);

    let result: Result<(), DomainError> = config.validate();
    assert!(matches!(
        result,
        Err(DomainError::InvalidCapacity {
            field: "max_peer_selection",
            value: 0
        })
    ));
}

#[test]
fn test_validate_rejects_configured_zero_limits() {
    let mut config: CapacityConfig = CapacityConfig::new(5, 3);
    config.reviewer_load_limit = Some(0);
    assert!(matches!(
        config.validate(),
        Err(DomainError::InvalidCapacity {
            field: "reviewer_load_limit",
            ..
        })
    ));

    let mut config: CapacityConfig = CapacityConfig::new(5, 3);
    config.department_cap = Some(0);
    assert!(matches!(
        config.validate(),
        Err(DomainError::InvalidCapacity {
            field: "department_cap",
            ..
        })
    ));
}

#[test]
fn test_validate_accepts_configured_optional_limits() {
    let mut config: CapacityConfig = CapacityConfig::new(5, 3);
    config.reviewer_load_limit = Some(4);
    config.department_cap = Some(2);
    config.forbid_manager_pairs = true;

    assert!(config.validate().is_ok());
}
