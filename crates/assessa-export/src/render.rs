use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::ReportPayload;

/// Plain-text layout used when the caller brings no template of its own.
pub const DEFAULT_TEMPLATE: &str = "\
Assessment report
Generated: {{ generatedAt }}
Total assessments: {{ totalCount }}
{% for entry in entries %}
{{ entry.index }}. {{ entry.instrumentName }}
   Profile: {{ entry.profileName }}
   Date: {{ entry.date }}
   Score: {{ entry.score }} ({{ entry.severity }})
{%- if entry.contextNote %}
   Context: {{ entry.contextNote }}
{%- endif %}
{% endfor %}
This report is informational only. Consult a qualified professional for diagnosis.
";

/// Render a Tera template with a report payload.
///
/// The payload's fields become the template context variables
/// (`generatedAt`, `totalCount`, `entries`).
pub fn render_report(
    template_name: &str,
    template_content: &str,
    payload: &ReportPayload,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(payload)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render with [`DEFAULT_TEMPLATE`].
pub fn render_text(payload: &ReportPayload) -> Result<String, ExportError> {
    render_report("report.txt", DEFAULT_TEMPLATE, payload)
}
