// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{RoleRequirement, StaffRole};
use std::collections::HashSet;

/// Validates an event's basic field constraints.
///
/// This function checks that required fields are not empty.
/// It does NOT check lifecycle or requirement uniqueness (see
/// [`validate_role_requirements`]).
///
/// # Arguments
///
/// * `title` - The event title
/// * `date` - The event date (ISO 8601 date)
/// * `location` - The venue or address
/// * `city` - The event city
///
/// # Errors
///
/// Returns an error if any required field is empty.
pub fn validate_event_fields(
    title: &str,
    date: &str,
    location: &str,
    city: &str,
) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if date.trim().is_empty() {
        return Err(DomainError::InvalidDate(String::from(
            "Date cannot be empty",
        )));
    }
    if location.trim().is_empty() {
        return Err(DomainError::InvalidLocation(String::from(
            "Location cannot be empty",
        )));
    }
    if city.trim().is_empty() {
        return Err(DomainError::InvalidCity(String::from(
            "City cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that an event's role requirements are unique per role.
///
/// Quantity zero is permitted; a requirement simply tracks the role with
/// nothing to fill.
///
/// # Errors
///
/// Returns `DomainError::DuplicateRoleRequirement` if the same role is
/// declared more than once.
pub fn validate_role_requirements(requirements: &[RoleRequirement]) -> Result<(), DomainError> {
    let mut seen: HashSet<StaffRole> = HashSet::new();
    for requirement in requirements {
        if !seen.insert(requirement.role) {
            return Err(DomainError::DuplicateRoleRequirement {
                role: requirement.role.as_str().to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the fields of a staff invite before creation.
///
/// # Arguments
///
/// * `email` - The invitee's email address
/// * `staff_roles` - The capabilities granted on completion
/// * `city` - The home city assigned on completion
///
/// # Errors
///
/// Returns an error if the email is empty or has no `@`, the role set is
/// empty, or the city is empty.
pub fn validate_invite_fields(
    email: &str,
    staff_roles: &[StaffRole],
    city: &str,
) -> Result<(), DomainError> {
    if email.trim().is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    if !email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        )));
    }
    if staff_roles.is_empty() {
        return Err(DomainError::EmptyStaffRoleSet);
    }
    if city.trim().is_empty() {
        return Err(DomainError::InvalidCity(String::from(
            "City cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a dispatch candidate set.
///
/// Eligibility filtering (availability, capability, city) is the caller's
/// concern; this only rejects an empty set.
///
/// # Errors
///
/// Returns `DomainError::EmptyCandidateSet` if no candidates were given.
pub fn validate_dispatch_candidates(candidates: &[String]) -> Result<(), DomainError> {
    if candidates.is_empty() {
        return Err(DomainError::EmptyCandidateSet);
    }
    Ok(())
}

/// Validates message content.
///
/// # Errors
///
/// Returns `DomainError::InvalidContent` if the content is empty or
/// whitespace only.
pub fn validate_message_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::InvalidContent(String::from(
            "Message content cannot be empty",
        )));
    }
    Ok(())
}
