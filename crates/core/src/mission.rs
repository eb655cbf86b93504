//! Mission and target business rules.
//!
//! A mission owns between [`MIN_TARGETS`] and [`MAX_TARGETS`] targets.
//! Completion gates later changes: notes freeze once either the target or
//! its mission is completed, a completed mission keeps its assigned cat,
//! and a mission can only be deleted after all of its targets are done.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum number of targets a mission must own.
pub const MIN_TARGETS: usize = 1;

/// Maximum number of targets a mission may own.
pub const MAX_TARGETS: usize = 3;

// ---------------------------------------------------------------------------
// Input normalisation
// ---------------------------------------------------------------------------

/// Trim a required text field, rejecting values that are empty afterwards.
pub fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field. Blank values collapse to `None`.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Validate the number of targets supplied when creating a mission.
pub fn validate_target_count(count: usize) -> Result<(), CoreError> {
    if !(MIN_TARGETS..=MAX_TARGETS).contains(&count) {
        return Err(CoreError::Validation(format!(
            "mission must have between {MIN_TARGETS} and {MAX_TARGETS} targets, got {count}"
        )));
    }
    Ok(())
}

/// Validate and trim a target's name and country.
///
/// Returns the trimmed `(name, country)` pair.
pub fn validate_target_fields(name: &str, country: &str) -> Result<(String, String), CoreError> {
    let name = require_text("target name", name)?;
    let country = require_text("target country", country)?;
    Ok((name, country))
}

// ---------------------------------------------------------------------------
// State gates
// ---------------------------------------------------------------------------

/// A target may be appended only to an incomplete mission below the cap.
pub fn ensure_can_add_target(
    current_count: usize,
    mission_completed: bool,
) -> Result<(), CoreError> {
    if mission_completed {
        return Err(CoreError::Conflict("cannot add target: mission completed".to_string()));
    }
    if current_count >= MAX_TARGETS {
        return Err(limit_reached());
    }
    Ok(())
}

/// Error returned when a mission already owns [`MAX_TARGETS`] targets.
pub fn limit_reached() -> CoreError {
    CoreError::Conflict(format!(
        "cannot add target: mission cannot have more than {MAX_TARGETS} targets"
    ))
}

/// A target may be removed only if the mission keeps at least [`MIN_TARGETS`].
pub fn ensure_can_delete_target(current_count: usize) -> Result<(), CoreError> {
    if current_count <= MIN_TARGETS {
        return Err(last_target());
    }
    Ok(())
}

/// Error returned when removing a target would leave its mission empty.
pub fn last_target() -> CoreError {
    CoreError::Conflict(format!(
        "cannot delete target: mission must have at least {MIN_TARGETS} target"
    ))
}

/// Notes are editable only while both the target and its mission are open.
pub fn ensure_notes_editable(
    target_completed: bool,
    mission_completed: bool,
) -> Result<(), CoreError> {
    if mission_completed {
        return Err(CoreError::Conflict("cannot update notes: mission completed".to_string()));
    }
    if target_completed {
        return Err(CoreError::Conflict("cannot update notes: target completed".to_string()));
    }
    Ok(())
}

/// The assigned cat of a completed mission is frozen.
pub fn ensure_assignment_open(mission_completed: bool) -> Result<(), CoreError> {
    if mission_completed {
        return Err(CoreError::Conflict(
            "cannot change assigned cat: mission completed".to_string(),
        ));
    }
    Ok(())
}

/// A mission can be deleted only once every target is completed.
pub fn ensure_mission_deletable(incomplete_targets: usize) -> Result<(), CoreError> {
    if incomplete_targets > 0 {
        return Err(CoreError::Conflict(format!(
            "cannot delete mission: {incomplete_targets} targets still incomplete"
        )));
    }
    Ok(())
}
