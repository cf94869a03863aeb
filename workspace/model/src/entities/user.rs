use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};

/// A registered account holder.
///
/// `password` holds an Argon2 PHC string, never the raw password. `otp` and
/// `password_reset_code` are either `None` or a live single-use code; the
/// matching verify operation clears them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ac_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub mobile_number: String,
    #[sea_orm(unique)]
    pub email_address: String,
    pub password: String,
    pub active: i32,
    pub otp: Option<String>,
    pub password_reset_code: Option<String>,
    pub status: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Keep the audit timestamps current on every save.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = chrono::Utc::now();
        if insert {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}
