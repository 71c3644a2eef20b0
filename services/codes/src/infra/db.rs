use anyhow::{Context as _, anyhow};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, UpdateMany, sea_query::Expr,
};
use uuid::Uuid;

use scanpass_codes_schema::scan_codes;

use crate::domain::repository::CodeRepository;
use crate::domain::types::{CodeRecord, CodeStatus, InactiveReason, ScanState};
use crate::error::CodeServiceError;

// ── Code repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeRepository {
    pub db: DatabaseConnection,
}

impl CodeRepository for DbCodeRepository {
    async fn insert(&self, record: &CodeRecord) -> Result<(), CodeServiceError> {
        scan_codes::ActiveModel {
            id: Set(record.id),
            payload: Set(record.payload.clone()),
            max_scans: Set(to_column(record.max_scans)?),
            scan_count: Set(to_column(record.scan_count)?),
            expires_at: Set(record.expires_at),
            status: Set(record.status.as_str().to_owned()),
            inactive_reason: Set(record.inactive_reason.map(|r| r.as_str().to_owned())),
            created_at: Set(record.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert scan code")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CodeRecord>, CodeServiceError> {
        let model = scan_codes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find scan code by id")?;
        let record = model.map(code_from_model).transpose()?;
        Ok(record)
    }

    async fn compare_and_set(
        &self,
        id: Uuid,
        expected: ScanState,
        next: ScanState,
    ) -> Result<bool, CodeServiceError> {
        let result = cas_update(id, expected, next)?
            .exec(&self.db)
            .await
            .context("compare-and-set scan state")?;
        Ok(swapped(result.rows_affected))
    }
}

/// Single conditional UPDATE: the row lock taken by Postgres serializes
/// concurrent writers, and the WHERE clause rejects stale expectations.
fn cas_update(
    id: Uuid,
    expected: ScanState,
    next: ScanState,
) -> anyhow::Result<UpdateMany<scan_codes::Entity>> {
    Ok(scan_codes::Entity::update_many()
        .col_expr(
            scan_codes::Column::ScanCount,
            Expr::value(to_column(next.scan_count)?),
        )
        .col_expr(
            scan_codes::Column::Status,
            Expr::value(next.status.as_str().to_owned()),
        )
        .col_expr(
            scan_codes::Column::InactiveReason,
            Expr::value(next.inactive_reason.map(|r| r.as_str().to_owned())),
        )
        .filter(scan_codes::Column::Id.eq(id))
        .filter(scan_codes::Column::ScanCount.eq(to_column(expected.scan_count)?))
        .filter(scan_codes::Column::Status.eq(expected.status.as_str())))
}

/// The id is the primary key, so a winning swap touches exactly one row.
fn swapped(rows_affected: u64) -> bool {
    rows_affected == 1
}

fn to_column(n: u32) -> anyhow::Result<i32> {
    i32::try_from(n).with_context(|| format!("counter {n} does not fit an integer column"))
}

fn from_column(column: &'static str, n: i32) -> anyhow::Result<u32> {
    u32::try_from(n).with_context(|| format!("negative {column} {n} in scan_codes"))
}

fn code_from_model(model: scan_codes::Model) -> anyhow::Result<CodeRecord> {
    let status = CodeStatus::parse(&model.status)
        .ok_or_else(|| anyhow!("unknown status {:?} for code {}", model.status, model.id))?;
    let inactive_reason = model
        .inactive_reason
        .as_deref()
        .map(|r| {
            InactiveReason::parse(r)
                .ok_or_else(|| anyhow!("unknown inactive_reason {r:?} for code {}", model.id))
        })
        .transpose()?;
    Ok(CodeRecord {
        id: model.id,
        payload: model.payload,
        max_scans: from_column("max_scans", model.max_scans)?,
        scan_count: from_column("scan_count", model.scan_count)?,
        expires_at: model.expires_at,
        status,
        inactive_reason,
        created_at: model.created_at,
    })
}
