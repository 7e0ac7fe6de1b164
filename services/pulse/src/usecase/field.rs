use chrono::Utc;
use uuid::Uuid;

use leadtrack_domain::field::FieldInput;

use crate::domain::repository::FieldRepository;
use crate::domain::schema::FieldSchema;
use crate::domain::types::FieldDefinition;
use crate::error::PulseServiceError;

// ── AddField ─────────────────────────────────────────────────────────────────

pub struct AddFieldUseCase<R: FieldRepository> {
    pub repo: R,
}

impl<R: FieldRepository> AddFieldUseCase<R> {
    pub async fn execute(
        &self,
        label: &str,
        placeholder: &str,
    ) -> Result<FieldDefinition, PulseServiceError> {
        let input = FieldInput::parse(label, placeholder)
            .map_err(|e| PulseServiceError::InvalidField(e.to_string()))?;

        // The unique index backs this up under concurrent adds.
        let existing = self.repo.list().await?;
        if existing.iter().any(|f| f.name == input.name) {
            return Err(PulseServiceError::FieldNameTaken(input.name));
        }

        let field = FieldDefinition {
            id: Uuid::now_v7(),
            name: input.name,
            label: input.label,
            placeholder: input.placeholder,
            created_at: Utc::now(),
        };
        self.repo.create(&field).await?;
        tracing::info!(field = %field.name, "field added");
        Ok(field)
    }
}

// ── RemoveField ──────────────────────────────────────────────────────────────

/// Removes a definition only; logs keep values stored under its name.
pub struct RemoveFieldUseCase<R: FieldRepository> {
    pub repo: R,
}

impl<R: FieldRepository> RemoveFieldUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), PulseServiceError> {
        if !self.repo.delete(id).await? {
            return Err(PulseServiceError::FieldNotFound);
        }
        tracing::info!(field_id = %id, "field removed");
        Ok(())
    }
}

// ── ListFields ───────────────────────────────────────────────────────────────

pub struct ListFieldsUseCase<R: FieldRepository> {
    pub repo: R,
}

impl<R: FieldRepository> ListFieldsUseCase<R> {
    pub async fn execute(&self) -> Result<FieldSchema, PulseServiceError> {
        Ok(FieldSchema::new(self.repo.list().await?))
    }
}
