//! Email template rendering with Handlebars
//!
//! There is a single built-in layout, `loan_decision`. Rendering is pure:
//! it never touches a provider, so the output can be checked on its own.

use crate::models::{NotificationRequest, StatusColor, LOAN_DECISION_SUBJECT};
use eyre::{eyre, Result};
use handlebars::Handlebars;
use serde_json::{json, Value};

const SUBJECT_TEMPLATE: &str = "loan_decision_subject";
const HTML_TEMPLATE: &str = "loan_decision_html";

/// Rendered template result
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub subject: String,
    pub body_html: String,
}

/// Handlebars-based template engine
///
/// Substituted values are HTML-escaped: `&`, `<`, `>`, `"`, `'`, `=` and
/// backticks become entities (`O'Brien` is written as `O&#x27;Brien`), so
/// the text a mail client displays is the payload value unchanged while
/// markup in a payload cannot alter the layout.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new TemplateEngine with the loan decision layout registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_template_string(SUBJECT_TEMPLATE, LOAN_DECISION_SUBJECT)
            .map_err(|e| eyre!("Failed to register subject template: {}", e))?;

        handlebars
            .register_template_string(HTML_TEMPLATE, LOAN_DECISION_HTML)
            .map_err(|e| eyre!("Failed to register HTML template: {}", e))?;

        Ok(Self { handlebars })
    }

    /// Render the loan decision email for one request
    pub fn render_loan_decision(
        &self,
        request: &NotificationRequest,
        status_color: StatusColor,
    ) -> Result<RenderedTemplate> {
        let data = loan_decision_data(request, status_color);

        let subject = self
            .handlebars
            .render(SUBJECT_TEMPLATE, &data)
            .map_err(|e| eyre!("Failed to render subject: {}", e))?;

        let body_html = self
            .handlebars
            .render(HTML_TEMPLATE, &data)
            .map_err(|e| eyre!("Failed to render HTML: {}", e))?;

        Ok(RenderedTemplate { subject, body_html })
    }
}

fn loan_decision_data(request: &NotificationRequest, status_color: StatusColor) -> Value {
    json!({
        "applicant_name": request.applicant_name,
        "application_id": request.application_id.as_deref().unwrap_or_default(),
        "application_status": request.application_status,
        "amount": request.amount,
        "term": request.term,
        "loan_type": request.loan_type,
        "status_color": status_color.as_str(),
    })
}

const LOAN_DECISION_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f5f5f5;
            margin: 0;
            padding: 0;
        }
        .container {
            max-width: 600px;
            margin: 20px auto;
            background-color: #ffffff;
            border-radius: 8px;
            overflow: hidden;
            box-shadow: 0 0 10px rgba(0,0,0,0.1);
        }
        .header {
            background-color: #0056d2;
            color: white;
            padding: 15px;
            text-align: center;
            font-size: 20px;
            font-weight: bold;
        }
        .content {
            padding: 20px;
            font-size: 16px;
            color: #333333;
        }
        .status-box {
            border-left: 6px solid {{status_color}};
            background-color: #f1f1f1;
            padding: 10px;
            margin: 20px 0;
            font-weight: bold;
            text-align: center;
        }
        .footer {
            font-size: 12px;
            color: #999999;
            text-align: center;
            padding: 10px;
        }
    </style>
</head>
<body>
    <div class="container">
        <div class="header">Loan Notification</div>
        <div class="content">
            <p>Hello {{applicant_name}},</p>
            <p>Your application with ID <b>{{application_id}}</b> has been processed.</p>

            <div class="status-box">
                Application status: {{application_status}}
            </div>

            <p><b>Requested amount:</b> {{amount}}</p>
            <p><b>Term in months:</b> {{term}}</p>
            <p><b>Loan type:</b> {{loan_type}}</p>
        </div>
        <div class="footer">
            &copy; CrediYa 2025.
        </div>
    </div>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationPayload;

    fn request(status: &str) -> NotificationRequest {
        NotificationRequest::from(NotificationPayload {
            email: Some("ana@example.com".into()),
            applicant_name: Some("Ana Torres".into()),
            application_id: Some("APP-77".into()),
            application_status: Some(status.into()),
            amount: Some("$15000".into()),
            deadline: Some("36".into()),
            loan_type: Some("Personal".into()),
        })
    }

    #[test]
    fn test_render_substitutes_every_field() {
        let engine = TemplateEngine::new().unwrap();
        let request = request("Approved");
        let rendered = engine
            .render_loan_decision(&request, request.status_color())
            .unwrap();

        assert_eq!(rendered.subject, "Loan Request Decision");
        let html = rendered.body_html;
        assert!(html.contains("Hello Ana Torres,"));
        assert!(html.contains("<b>APP-77</b>"));
        assert!(html.contains("Application status: Approved"));
        assert!(html.contains("<b>Requested amount:</b> $15000"));
        assert!(html.contains("<b>Term in months:</b> 36"));
        assert!(html.contains("<b>Loan type:</b> Personal"));
        assert!(html.contains("border-left: 6px solid green;"));
    }

    #[test]
    fn test_render_uses_red_for_other_statuses() {
        let engine = TemplateEngine::new().unwrap();
        let request = request("Rejected");
        let html = engine
            .render_loan_decision(&request, request.status_color())
            .unwrap()
            .body_html;

        assert!(html.contains("border-left: 6px solid red;"));
        assert!(!html.contains("solid green"));
    }

    #[test]
    fn test_render_defaults() {
        let engine = TemplateEngine::new().unwrap();
        let request = NotificationRequest::from(NotificationPayload::default());
        let html = engine
            .render_loan_decision(&request, request.status_color())
            .unwrap()
            .body_html;

        assert!(html.contains("Hello Client,"));
        assert!(html.contains("<b></b>"));
        assert!(html.contains("Application status: Pending"));
        assert!(html.contains("<b>Requested amount:</b> $0"));
        assert!(html.contains("<b>Term in months:</b> N/A"));
        assert!(html.contains("<b>Loan type:</b> N/A"));
        assert!(html.contains("solid red;"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let engine = TemplateEngine::new().unwrap();
        let mut request = request("Approved");
        request.applicant_name = "<script>alert(1)</script>".into();
        let html = engine
            .render_loan_decision(&request, request.status_color())
            .unwrap()
            .body_html;

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_writes_payload_text_as_entities() {
        let engine = TemplateEngine::new().unwrap();
        let mut request = request("Approved");
        request.applicant_name = "Seán O'Brien".into();
        request.amount = "$1=2".into();
        request.loan_type = "Car & Home".into();
        let html = engine
            .render_loan_decision(&request, request.status_color())
            .unwrap()
            .body_html;

        assert!(html.contains("Hello Seán O&#x27;Brien,"));
        assert!(html.contains("<b>Requested amount:</b> $1&#x3D;2"));
        assert!(html.contains("<b>Loan type:</b> Car &amp; Home"));
        assert!(!html.contains("O'Brien"));
    }
}
