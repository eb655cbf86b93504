//! Spy cat field rules.
//!
//! Salary and experience must never be negative. These checks run in the
//! rule layer regardless of any request-level validation.

use crate::error::CoreError;
use crate::mission::require_text;
use crate::types::DbId;

/// Validate and trim a cat's name.
pub fn validate_name(name: &str) -> Result<String, CoreError> {
    require_text("cat name", name)
}

/// Validate and trim the breed name supplied on cat creation.
pub fn validate_breed_name(breed: &str) -> Result<String, CoreError> {
    require_text("breed", breed)
}

/// Salary must be a finite, non-negative amount.
pub fn validate_salary(salary: f64) -> Result<(), CoreError> {
    if !salary.is_finite() {
        return Err(CoreError::Validation("salary must be a finite number".to_string()));
    }
    if salary < 0.0 {
        return Err(CoreError::Validation("salary must be >= 0".to_string()));
    }
    Ok(())
}

/// Years of experience must be non-negative.
pub fn validate_experience(years: i32) -> Result<(), CoreError> {
    if years < 0 {
        return Err(CoreError::Validation("experience cannot be negative".to_string()));
    }
    Ok(())
}

/// A cat on an active mission cannot take another one.
///
/// `active_mission` is the cat's current incomplete mission, if any;
/// `for_mission` is the mission being assigned (re-assigning the same
/// mission is allowed).
pub fn ensure_cat_available(
    cat_id: DbId,
    active_mission: Option<DbId>,
    for_mission: Option<DbId>,
) -> Result<(), CoreError> {
    match active_mission {
        Some(busy) if Some(busy) != for_mission => Err(CoreError::Conflict(format!(
            "cat {cat_id} is already assigned to active mission {busy}"
        ))),
        _ => Ok(()),
    }
}

/// A cat assigned to an active mission cannot be deleted.
pub fn ensure_cat_deletable(active_mission: Option<DbId>) -> Result<(), CoreError> {
    if let Some(mission_id) = active_mission {
        return Err(CoreError::Conflict(format!(
            "cannot delete cat: assigned to active mission {mission_id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn salary_zero_is_valid() {
        assert!(validate_salary(0.0).is_ok());
        assert!(validate_salary(1500.5).is_ok());
    }

    #[test]
    fn negative_salary_rejected() {
        assert_matches!(validate_salary(-0.01), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_finite_salary_rejected() {
        assert_matches!(validate_salary(f64::NAN), Err(CoreError::Validation(_)));
        assert_matches!(validate_salary(f64::INFINITY), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_experience_rejected() {
        assert!(validate_experience(0).is_ok());
        assert_matches!(validate_experience(-1), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_cat_name_rejected() {
        assert_matches!(validate_name("   "), Err(CoreError::Validation(_)));
        assert_eq!(validate_name(" Tom ").unwrap(), "Tom");
    }

    #[test]
    fn busy_cat_is_unavailable_for_other_missions() {
        let cat = Uuid::new_v4();
        let busy = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(ensure_cat_available(cat, None, Some(other)).is_ok());
        assert!(ensure_cat_available(cat, Some(busy), Some(busy)).is_ok());
        assert_matches!(
            ensure_cat_available(cat, Some(busy), Some(other)),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            ensure_cat_available(cat, Some(busy), None),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn assigned_cat_cannot_be_deleted() {
        assert!(ensure_cat_deletable(None).is_ok());
        assert_matches!(
            ensure_cat_deletable(Some(Uuid::new_v4())),
            Err(CoreError::Conflict(_))
        );
    }
}
