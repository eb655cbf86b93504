use spycat_core::error::CoreError;
use spycat_core::types::DbId;

/// Name of the partial unique index allowing one incomplete mission per cat.
pub const ACTIVE_CAT_CONSTRAINT: &str = "uq_missions_active_cat";

/// Foreign key from `missions.assigned_cat_id` to `cats`.
pub const ASSIGNED_CAT_FK: &str = "missions_assigned_cat_id_fkey";

/// Failure raised by the rule layer.
///
/// Rule violations surface as [`CoreError`]; anything the store reports that
/// is not a rule violation stays a [`sqlx::Error`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// True when `err` is a unique violation raised by `constraint`.
pub(crate) fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error().is_some_and(|db| {
        db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint)
    })
}

/// True when `err` is a foreign key violation raised by `constraint`.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error, constraint: &str) -> bool {
    err.as_database_error().is_some_and(|db| {
        db.code().as_deref() == Some("23503") && db.constraint() == Some(constraint)
    })
}

/// Translate a lost race on a cat assignment into the rule it broke.
///
/// Another mission claiming the cat first is a conflict; the cat being
/// deleted in between is a not-found for `cat_id`.
pub(crate) fn assignment_error(err: sqlx::Error, cat_id: Option<DbId>) -> ServiceError {
    if is_unique_violation(&err, ACTIVE_CAT_CONSTRAINT) {
        return ServiceError::Core(CoreError::Conflict(
            "cat is already assigned to an active mission".to_string(),
        ));
    }
    match cat_id {
        Some(id) if is_foreign_key_violation(&err, ASSIGNED_CAT_FK) => {
            ServiceError::Core(CoreError::NotFound { entity: "SpyCat", id })
        }
        _ => ServiceError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use spycat_db::models::mission::CreateMission;
    use spycat_db::models::target::CreateTarget;
    use spycat_db::repositories::MissionRepo;
    use sqlx::PgPool;
    use uuid::Uuid;

    #[test]
    fn non_database_errors_pass_through() {
        let err = assignment_error(sqlx::Error::RowNotFound, Some(Uuid::new_v4()));
        assert_matches!(err, ServiceError::Database(sqlx::Error::RowNotFound));
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    async fn vanished_cat_maps_to_not_found(pool: PgPool) {
        let cat_id = Uuid::new_v4();
        let input = CreateMission {
            title: "Operation Mouse".to_string(),
            description: None,
            assigned_cat_id: Some(cat_id),
        };
        let targets = [CreateTarget {
            name: "Agent X".to_string(),
            country: "FR".to_string(),
            notes: None,
        }];
        let err = MissionRepo::create(&pool, &input, &targets).await.unwrap_err();
        assert!(is_foreign_key_violation(&err, ASSIGNED_CAT_FK));

        assert_matches!(
            assignment_error(err, Some(cat_id)),
            ServiceError::Core(CoreError::NotFound { entity: "SpyCat", id }) if id == cat_id
        );
    }

    #[test]
    fn core_errors_display_transparently() {
        let err = ServiceError::from(CoreError::Validation("salary must be >= 0".into()));
        assert_eq!(err.to_string(), "Validation failed: salary must be >= 0");
    }
}
