use shared_types::{CreateTemplateRequest, EmailTemplate, UpdateTemplateRequest};

use super::{ConsoleContext, Outcome};
use crate::api::EmailApi;
use crate::helpers::format::truncate;

pub const CUSTOM_CATEGORY: &str = "custom";

#[derive(Debug, Clone, Default)]
pub struct TemplateForm {
    pub name: String,
    pub subject_line: String,
    pub body: String,
}

pub struct TemplatesPage {
    ctx: ConsoleContext,
    templates: Vec<EmailTemplate>,
}

impl TemplatesPage {
    pub fn new(ctx: ConsoleContext) -> Self {
        Self {
            ctx,
            templates: Vec::new(),
        }
    }

    pub fn templates(&self) -> &[EmailTemplate] {
        &self.templates
    }

    pub async fn load(&mut self) -> Outcome {
        match self.ctx.api.list_templates().await {
            Ok(templates) => {
                self.templates = templates;
                Outcome::Done(())
            }
            Err(e) => self.ctx.fail("Error loading templates", &e),
        }
    }

    fn find(&self, template_id: i64) -> Option<&EmailTemplate> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Form pre-filled from an existing custom template.
    pub fn edit_form(&self, template_id: i64) -> Outcome<TemplateForm> {
        match self.find(template_id) {
            Some(t) if t.is_default => self.ctx.reject("Default templates cannot be edited"),
            Some(t) => Outcome::Done(TemplateForm {
                name: t.name.clone(),
                subject_line: t.subject_line.clone(),
                body: t.body.clone(),
            }),
            None => self.ctx.reject("Template not found"),
        }
    }

    /// Creates a template, or updates `editing` when given.
    pub async fn save(&mut self, editing: Option<i64>, form: &TemplateForm) -> Outcome {
        let name = form.name.trim();
        let subject_line = form.subject_line.trim();
        let body = form.body.trim();
        if name.is_empty() || subject_line.is_empty() || body.is_empty() {
            return self.ctx.reject("Please fill in all fields");
        }

        let result = match editing {
            Some(id) => {
                if self.find(id).map(|t| t.is_default) == Some(true) {
                    return self.ctx.reject("Default templates cannot be edited");
                }
                let request = UpdateTemplateRequest {
                    name: name.to_string(),
                    subject_line: subject_line.to_string(),
                    body: body.to_string(),
                };
                self.ctx.api.update_template(id, &request).await
            }
            None => {
                let request = CreateTemplateRequest {
                    name: name.to_string(),
                    subject_line: subject_line.to_string(),
                    body: body.to_string(),
                    category: CUSTOM_CATEGORY.to_string(),
                };
                self.ctx.api.create_template(&request).await
            }
        };

        match result {
            Ok(()) => {
                self.ctx.success(if editing.is_some() {
                    "Template updated!"
                } else {
                    "Template created!"
                });
                self.load().await
            }
            Err(e) => self.ctx.fail("Error saving template", &e),
        }
    }

    pub async fn delete(&mut self, template_id: i64) -> Outcome {
        if self.find(template_id).map(|t| t.is_default) == Some(true) {
            return self.ctx.reject("Default templates cannot be deleted");
        }
        if !self.ctx.confirm(
            "Delete Template",
            "Are you sure you want to delete this template?",
        ) {
            return Outcome::Cancelled;
        }

        match self.ctx.api.delete_template(template_id).await {
            Ok(()) => {
                self.ctx.success("Template deleted");
                self.load().await
            }
            Err(e) => self.ctx.fail("Error deleting template", &e),
        }
    }

    pub fn render(&self) -> String {
        if self.templates.is_empty() {
            return "No templates yet\nCreate your first email template".to_string();
        }

        let mut lines = Vec::new();
        for template in &self.templates {
            let badge = if template.is_default { " (default)" } else { "" };
            lines.push(format!("#{} {}{}", template.id, template.name, badge));
            if let Some(category) = template.category.as_deref() {
                lines.push(format!("    Category: {}", category));
            }
            lines.push(format!("    Subject: {}", template.subject_line));
            lines.push(format!("    {}", truncate(&template.body.replace('\n', " "), 100)));
            lines.push(String::new());
        }
        lines.join("\n").trim_end().to_string()
    }
}
