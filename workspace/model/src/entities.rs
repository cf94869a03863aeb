//! This file serves as the root for all SeaORM entity modules.
//! The account backend persists a single table of user records; every
//! other component operates on it through this entity.

pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
        QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn sample_user(mobile: &str, email: &str) -> user::ActiveModel {
        user::ActiveModel {
            name: Set("Sample".to_string()),
            mobile_number: Set(mobile.to_string()),
            email_address: Set(email.to_string()),
            password: Set("$argon2id$stub".to_string()),
            active: Set(0),
            status: Set(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let created = sample_user("5550001", "one@example.com").insert(&db).await?;
        assert!(created.id > 0);
        assert_eq!(created.active, 0);
        assert_eq!(created.status, 1);
        assert!(created.otp.is_none());
        assert!(created.password_reset_code.is_none());

        let found = User::find()
            .filter(user::Column::EmailAddress.eq("one@example.com"))
            .one(&db)
            .await?
            .expect("user should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.mobile_number, "5550001");

        Ok(())
    }

    #[tokio::test]
    async fn test_unique_columns_rejected() -> Result<(), DbErr> {
        let db = setup_db().await?;

        sample_user("5550002", "two@example.com").insert(&db).await?;

        let dup_mobile = sample_user("5550002", "other@example.com").insert(&db).await;
        assert!(dup_mobile.is_err());

        let dup_email = sample_user("5550003", "two@example.com").insert(&db).await;
        assert!(dup_email.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_timestamps_maintained() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let created = sample_user("5550004", "four@example.com").insert(&db).await?;
        let created_at = created.created_at;

        let mut active: user::ActiveModel = created.into();
        active.otp = Set(Some("123456".to_string()));
        let updated = active.update(&db).await?;

        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= created_at);

        Ok(())
    }
}
