//! Canonical default columns and the provisioner that installs them.
//!
//! Every project ships with eight protected standard columns at ranks 1..8.
//! `DefaultSchemaProvisioner::on_project_created` installs them (plus any
//! pending custom drafts) when a project is created;
//! `restore_missing_defaults` backfills slots that have gone missing on an
//! existing project and is safe to call repeatedly.

use tracing::debug;

use taskfields_model::{Column, ColumnDraft, ProjectId, StandardField};

use crate::draft::DraftSet;
use crate::error::Result;
use crate::registry::SchemaRegistry;

/// The canonical eight standard columns for a project, ranks 1..8.
pub fn standard_columns(project: &ProjectId) -> Vec<ColumnDraft> {
    StandardField::all()
        .into_iter()
        .enumerate()
        .map(|(idx, field)| {
            ColumnDraft::standard(project.clone(), field).with_order(idx as i64 + 1)
        })
        .collect()
}

/// Report of a `restore_missing_defaults` run.
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Columns created by this run, in canonical slot order.
    pub created: Vec<Column>,
}

impl RestoreReport {
    /// Whether the project already had every standard slot.
    pub fn nothing_to_restore(&self) -> bool {
        self.created.is_empty()
    }
}

/// Installs and repairs the default schema of a project.
#[derive(Clone)]
pub struct DefaultSchemaProvisioner {
    registry: SchemaRegistry,
}

impl DefaultSchemaProvisioner {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Provision a freshly created project: the eight canonical columns at
    /// ranks 1..8, then any pending custom drafts appended from rank 9.
    pub async fn on_project_created(
        &self,
        project: &ProjectId,
        pending: DraftSet,
    ) -> Result<Vec<Column>> {
        let mut created = Vec::with_capacity(8 + pending.len());

        for draft in standard_columns(project) {
            created.push(self.registry.create(draft).await?);
        }
        debug!(project = %project, "default schema provisioned");

        created.extend(pending.commit(&self.registry, project).await?);
        Ok(created)
    }

    /// Recreate whichever standard slots have no active column, appended
    /// after the current maximum rank. Idempotent: when nothing is missing
    /// this performs zero writes and reports an empty restore.
    pub async fn restore_missing_defaults(&self, project: &ProjectId) -> Result<RestoreReport> {
        let active = self.registry.list_active(project).await?;

        let mut report = RestoreReport::default();
        for field in StandardField::all() {
            let present = active
                .iter()
                .any(|c| c.standard_field == Some(field));
            if present {
                continue;
            }
            let column = self
                .registry
                .create(ColumnDraft::standard(project.clone(), field))
                .await?;
            report.created.push(column);
        }

        if report.nothing_to_restore() {
            debug!(project = %project, "nothing to restore");
        } else {
            debug!(project = %project, restored = report.created.len(), "standard columns restored");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use taskfields_model::ColumnType;

    fn provisioner() -> (SchemaRegistry, DefaultSchemaProvisioner) {
        let registry = SchemaRegistry::new(Arc::new(MemoryStore::new()));
        (registry.clone(), DefaultSchemaProvisioner::new(registry))
    }

    fn project() -> ProjectId {
        ProjectId::from_string("p1")
    }

    #[test]
    fn canonical_columns_cover_all_slots_in_order() {
        let drafts = standard_columns(&project());
        assert_eq!(drafts.len(), 8);
        assert_eq!(drafts[0].standard_field, Some(StandardField::Name));
        assert_eq!(drafts[7].standard_field, Some(StandardField::Progress));
        for (idx, draft) in drafts.iter().enumerate() {
            assert_eq!(draft.order, Some(idx as i64 + 1));
        }
    }

    #[tokio::test]
    async fn new_project_gets_eight_defaults() {
        let (registry, provisioner) = provisioner();

        let created = provisioner
            .on_project_created(&project(), DraftSet::new())
            .await
            .unwrap();
        assert_eq!(created.len(), 8);

        let listed = registry.list_active(&project()).await.unwrap();
        assert_eq!(listed.len(), 8);
        for (idx, (column, field)) in listed.iter().zip(StandardField::all()).enumerate() {
            assert_eq!(column.order, idx as i64 + 1);
            assert_eq!(column.standard_field, Some(field));
            assert_eq!(column.type_, field.default_type());
        }
    }

    #[tokio::test]
    async fn pending_drafts_append_after_defaults() {
        let (registry, provisioner) = provisioner();

        let mut pending = DraftSet::new();
        pending.add("Budget", ColumnType::Number);
        pending.add("Phase", ColumnType::List { options: vec!["Design".into()] });

        provisioner
            .on_project_created(&project(), pending)
            .await
            .unwrap();

        let listed = registry.list_active(&project()).await.unwrap();
        assert_eq!(listed.len(), 10);
        assert_eq!(listed[8].name, "Budget");
        assert_eq!(listed[8].order, 9);
        assert_eq!(listed[9].name, "Phase");
        assert_eq!(listed[9].order, 10);
        assert!(listed[8].standard_field.is_none());
    }

    #[tokio::test]
    async fn restore_is_idempotent() {
        let (registry, provisioner) = provisioner();
        provisioner
            .on_project_created(&project(), DraftSet::new())
            .await
            .unwrap();

        let report = provisioner.restore_missing_defaults(&project()).await.unwrap();
        assert!(report.nothing_to_restore());

        let again = provisioner.restore_missing_defaults(&project()).await.unwrap();
        assert!(again.nothing_to_restore());
        assert_eq!(registry.list_active(&project()).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn restore_recreates_missing_slots_after_max_order() {
        let (registry, provisioner) = provisioner();
        let created = provisioner
            .on_project_created(&project(), DraftSet::new())
            .await
            .unwrap();

        // A standard column can go missing through direct store edits; the
        // registry itself refuses to delete them
        registry
            .store()
            .update_column(
                &created[3].id, // status
                crate::store::ColumnPatch::new().active(false),
            )
            .await
            .unwrap();

        let report = provisioner.restore_missing_defaults(&project()).await.unwrap();
        assert_eq!(report.created.len(), 1);
        assert_eq!(report.created[0].standard_field, Some(StandardField::Status));
        // Appended after the current maximum rank, not slotted back at 4
        assert_eq!(report.created[0].order, 9);

        let listed = registry.list_active(&project()).await.unwrap();
        assert_eq!(listed.len(), 8);
    }
}
