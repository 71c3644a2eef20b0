use sea_orm::entity::prelude::*;

/// Scannable code with a scan budget and an absolute expiry.
///
/// `status` is `"active"` or `"inactive"`; `inactive_reason` (`"expired"` or
/// `"exhausted"`) is written together with the flip to `"inactive"` and is
/// never cleared. `scan_count <= max_scans` is enforced by a CHECK constraint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "scan_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub max_scans: i32,
    pub scan_count: i32,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub inactive_reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
