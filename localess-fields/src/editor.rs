//! Schema edit sessions.
//!
//! A [`SchemaEditor`] materializes a [`Schema`] into an editable sequence of
//! [`FieldForm`]s. The attribute set of each form is selected by its kind,
//! names are tracked in a [`NameRegistry`] so duplicates are reported while
//! editing, and a selection pointer marks the field whose attributes are
//! being edited.
//!
//! Validation is advisory: every edit is accepted locally and
//! [`SchemaEditor::validate`] reports what is wrong. Only
//! [`SchemaEditor::submit`] refuses to produce a [`SchemaUpdate`] while issues
//! remain.

use tracing::{debug, trace};

use crate::error::{FieldsError, Result};
use crate::kind::FieldKind;
use crate::names::NameRegistry;
use crate::types::{FieldBase, FieldType, Schema, SchemaField, SchemaUpdate};
use crate::validation::{
    check_display_name, check_field_attributes, check_field_name, check_preview_field,
    check_schema_name, ValidationIssue,
};

/// One field of an edit session.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldForm {
    field: SchemaField,
    /// The name claimed in the session registry when the form was built.
    registered_name: String,
}

impl FieldForm {
    /// Build a form for `element`, or for a brand-new TEXT field named
    /// `pending_name` when `element` is `None`.
    ///
    /// The field's name is reserved in `registry` before anything else, and
    /// the updated registry is handed back to the caller.
    pub fn build(
        element: Option<SchemaField>,
        pending_name: &str,
        registry: NameRegistry,
    ) -> (FieldForm, NameRegistry) {
        let mut field =
            element.unwrap_or_else(|| SchemaField::new(String::new(), FieldType::new(FieldKind::Text)));
        if field.name.is_empty() {
            field.name = pending_name.to_string();
        }
        let registry = registry.with(field.name.clone());
        let form = FieldForm {
            registered_name: field.name.clone(),
            field,
        };
        (form, registry)
    }

    pub fn field(&self) -> &SchemaField {
        &self.field
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn kind(&self) -> FieldKind {
        self.field.kind()
    }

    pub fn registered_name(&self) -> &str {
        &self.registered_name
    }

    /// Names of the kind-specific controls this form carries.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        self.kind().attributes().iter().map(|a| a.name).collect()
    }

    pub fn into_field(self) -> SchemaField {
        self.field
    }
}

/// An edit session over one schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaEditor {
    schema_id: String,
    persisted_name: Option<String>,
    name: String,
    display_name: Option<String>,
    preview_field: Option<String>,
    preview_image: Option<String>,
    schema_names: NameRegistry,
    field_names: NameRegistry,
    fields: Vec<FieldForm>,
    selected: Option<usize>,
    new_field_name: String,
}

impl SchemaEditor {
    /// An empty session with no fields and no reserved names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `schema`. `all_schemas` are the schemas of the same
    /// space; their names are reserved for the schema-name check.
    pub fn load(schema: &Schema, all_schemas: &[Schema]) -> Self {
        let mut editor = SchemaEditor {
            schema_id: schema.id.clone(),
            persisted_name: Some(schema.name.clone()),
            name: schema.name.clone(),
            display_name: schema.display_name.clone(),
            preview_field: schema.preview_field.clone(),
            preview_image: schema.preview_image.clone(),
            schema_names: all_schemas.iter().map(|s| s.name.clone()).collect(),
            ..Self::default()
        };
        for field in &schema.fields {
            editor.push_form(Some(field.clone()));
        }
        if editor.selected.is_none() && !editor.fields.is_empty() {
            editor.activate(editor.fields.len() - 1);
        }
        debug!(
            schema = %editor.schema_id,
            fields = editor.fields.len(),
            "schema edit session loaded"
        );
        editor
    }

    // --- Schema-level controls ---

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_display_name(&mut self, display_name: Option<String>) {
        self.display_name = display_name;
    }

    pub fn set_preview_field(&mut self, preview_field: Option<String>) {
        self.preview_field = preview_field;
    }

    pub fn set_preview_image(&mut self, preview_image: Option<String>) {
        self.preview_image = preview_image;
    }

    // --- Field sequence ---

    pub fn fields(&self) -> &[FieldForm] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldForm> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_field(&self) -> Option<&FieldForm> {
        self.selected.and_then(|i| self.fields.get(i))
    }

    pub fn field_names(&self) -> &NameRegistry {
        &self.field_names
    }

    pub fn new_field_name(&self) -> &str {
        &self.new_field_name
    }

    pub fn set_new_field_name(&mut self, name: impl Into<String>) {
        self.new_field_name = name.into();
    }

    /// Issues with the pending new-field name: format, and any existing claim.
    pub fn check_new_field_name(&self) -> Vec<ValidationIssue> {
        let mut issues = check_field_name("newFieldName", &self.new_field_name);
        if self.field_names.is_reserved(&self.new_field_name, None) {
            issues.push(ValidationIssue::new("newFieldName", "is already in use"));
        }
        issues
    }

    /// Append a field and return its index.
    ///
    /// With `existing` the persisted field is added as-is and the selection is
    /// left to the caller. Without it a new TEXT field named after the pending
    /// new-field name is created and selected; a taken or malformed pending
    /// name is refused.
    pub fn add_field(&mut self, existing: Option<SchemaField>) -> Result<usize> {
        let is_new = existing.is_none();
        if is_new {
            let name = self.new_field_name.clone();
            if self.field_names.is_reserved(&name, None) {
                return Err(FieldsError::DuplicateFieldName { name });
            }
            if let Some(issue) = check_field_name("newFieldName", &name).into_iter().next() {
                return Err(FieldsError::InvalidFieldName {
                    name,
                    message: issue.message,
                });
            }
        }
        let index = self.push_form(existing);
        self.new_field_name.clear();
        if is_new {
            self.select_field(index)?;
        }
        debug!(index, name = %self.fields[index].name(), kind = %self.fields[index].kind(), "field added");
        Ok(index)
    }

    fn push_form(&mut self, existing: Option<SchemaField>) -> usize {
        let registry = std::mem::take(&mut self.field_names);
        let (form, registry) = FieldForm::build(existing, &self.new_field_name, registry);
        self.field_names = registry;
        self.fields.push(form);
        self.fields.len() - 1
    }

    /// Remove the field at `index` and release its name.
    ///
    /// Selection afterwards: none when no fields remain; moved down by one
    /// (never below zero) when the removed index is at or before it;
    /// unchanged when the removed field came after it.
    pub fn remove_component(&mut self, index: usize) -> Result<SchemaField> {
        self.check_index(index)?;
        let form = self.fields.remove(index);
        self.field_names.release(form.registered_name());

        if self.fields.is_empty() {
            self.selected = None;
        } else if let Some(selected) = self.selected {
            if index <= selected {
                self.activate(selected.saturating_sub(1));
            }
        }
        debug!(index, name = %form.name(), selected = ?self.selected, "field removed");
        Ok(form.into_field())
    }

    /// Move the field at `from` to `to`, keeping the relative order of all
    /// other fields. The selection pointer stays on the same index.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let form = self.fields.remove(from);
        self.fields.insert(to, form);
        debug!(from, to, "field reordered");
        Ok(())
    }

    /// Make `index` the active field.
    ///
    /// The previous selection is torn down before the new one is set, so no
    /// observer ever sees the attribute controls of two kinds at once.
    pub fn select_field(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.activate(index);
        Ok(())
    }

    fn activate(&mut self, index: usize) {
        self.selected = None;
        trace!("field selection cleared");
        self.selected = Some(index);
        trace!(index, "field selected");
    }

    // --- Editing a field ---

    /// Change a field's name. Never refused; collisions show up in `validate`.
    pub fn rename_field(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.check_index(index)?;
        self.fields[index].field.name = name.into();
        Ok(())
    }

    /// Replace the kind-specific attributes of a field. The kind itself is
    /// fixed once the field exists; switching kinds means remove and re-add.
    pub fn update_field_type(&mut self, index: usize, field_type: FieldType) -> Result<()> {
        self.check_index(index)?;
        let form = &mut self.fields[index];
        if form.kind() != field_type.kind() {
            return Err(FieldsError::KindChange {
                name: form.name().to_string(),
                from: form.kind(),
                to: field_type.kind(),
            });
        }
        form.field.field_type = field_type;
        Ok(())
    }

    pub fn update_field_base(&mut self, index: usize, base: FieldBase) -> Result<()> {
        self.check_index(index)?;
        self.fields[index].field.apply_base(base);
        Ok(())
    }

    // --- Validation & submit ---

    /// Every issue in the session, schema-level controls first.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues =
            check_schema_name(&self.name, &self.schema_names, self.persisted_name.as_deref());
        issues.extend(check_display_name("displayName", self.display_name.as_deref()));
        let current: Vec<SchemaField> = self.fields.iter().map(|f| f.field.clone()).collect();
        issues.extend(check_preview_field(self.preview_field.as_deref(), &current));

        for (i, form) in self.fields.iter().enumerate() {
            let prefix = format!("fields[{i}]");
            let name_path = format!("{prefix}.name");
            let name = form.name();
            let name_issues = check_field_name(&name_path, name);
            let well_formed = name_issues.is_empty();
            issues.extend(name_issues);
            if well_formed && self.name_collides(i, name) {
                issues.push(ValidationIssue::new(name_path, "is already in use"));
            }
            issues.extend(check_field_attributes(&prefix, &form.field));
        }
        issues
    }

    fn name_collides(&self, index: usize, name: &str) -> bool {
        let sibling = self
            .fields
            .iter()
            .enumerate()
            .any(|(j, other)| j != index && other.name() == name);
        sibling
            || self
                .field_names
                .is_reserved(name, Some(self.fields[index].registered_name()))
    }

    /// Validate and produce the whole-document update to persist.
    pub fn submit(&self) -> Result<SchemaUpdate> {
        let issues = self.validate();
        if !issues.is_empty() {
            debug!(schema = %self.schema_id, issues = issues.len(), "schema submit blocked");
            return Err(FieldsError::ValidationFailed { issues });
        }
        Ok(SchemaUpdate {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            preview_field: self.preview_field.clone(),
            preview_image: self.preview_image.clone(),
            fields: self.fields.iter().map(|f| f.field.clone()).collect(),
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(FieldsError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            })
        }
    }
}
