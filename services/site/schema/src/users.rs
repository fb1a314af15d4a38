use sea_orm::entity::prelude::*;

/// Account record. `password_hash` is set only for credentials-provider
/// accounts; `reset_token` and `reset_token_expires_at` are always written
/// and cleared together.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub provider: String,
    pub role: i16,
    pub is_active: bool,
    pub email_verified: bool,
    pub phone: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
