//! User entity for database

use sea_orm::entity::prelude::*;

/// User model
///
/// `password` holds the plaintext value as submitted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub tenant_url: String,
    pub organization: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
