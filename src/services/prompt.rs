//! Prompt construction for draft generation.

use crate::domain::models::DraftRequest;

/// Build the prompt sent to every model in the roster.
pub fn build_draft_prompt(request: &DraftRequest) -> String {
    let tools_text = if request.tools.is_empty() {
        "None specified".to_string()
    } else {
        request.tools.join(", ")
    };

    let studio_text = match (request.trigger.as_deref(), request.action.as_deref()) {
        (Some(trigger), Some(action)) => {
            format!("\n- Trigger: {trigger}\n- Action: {action}")
        }
        (Some(trigger), None) => format!("\n- Trigger: {trigger}"),
        (None, Some(action)) => format!("\n- Action: {action}"),
        (None, None) => String::new(),
    };

    format!(
        r#"You are an expert Automation Architect. Design a specific, actionable workflow for the user.

## Context
- Department: {department}
- Automation Level: {level} (HITL=Human in Loop, Triggered=Event Driven, Background=Fully Auto)
- Available Tools: {tools}
- Target Platform: {platform}{studio}

## User Request
"{intent}"

## Required Output Format (JSON)
Return a single JSON object with this structure:
```json
{{
  "title": "A short, catchy name for this flow",
  "description": "A 2-sentence summary of what it does and the value it provides.",
  "steps": ["Step 1", "Step 2", "Step 3", "Step 4"],
  "platform": "{platform}",
  "implementationPrompt": "Instructions a builder can paste into {platform} to create this flow"
}}
```

IMPORTANT: Output ONLY the JSON object, no other text."#,
        department = request.department,
        level = request.level.label(),
        tools = tools_text,
        platform = request.platform,
        studio = studio_text,
        intent = request.intent.trim(),
    )
}

/// Remove markdown code fences around a model reply.
///
/// Handles both tagged (```` ```json ````) and bare fences and leaves
/// unfenced text untouched apart from trimming.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest
        .strip_prefix("json")
        .or_else(|| rest.strip_prefix("JSON"))
        .unwrap_or(rest);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AutomationCategory;

    #[test]
    fn test_prompt_embeds_request_fields() {
        let request = DraftRequest::new("Chase unpaid invoices", "Finance")
            .with_level(AutomationCategory::Background)
            .with_tools(vec!["Gmail".to_string(), "Sheets".to_string()])
            .with_platform("Zapier");
        let prompt = build_draft_prompt(&request);

        assert!(prompt.contains("Department: Finance"));
        assert!(prompt.contains("Available Tools: Gmail, Sheets"));
        assert!(prompt.contains("Target Platform: Zapier"));
        assert!(prompt.contains("\"Chase unpaid invoices\""));
        assert!(prompt.contains("Fully Auto"));
        assert!(prompt.contains("implementationPrompt"));
        assert!(!prompt.contains("Trigger:"));
    }

    #[test]
    fn test_prompt_includes_studio_fields() {
        let request = DraftRequest::from_studio("New lead in CRM", "Send welcome email", "Sales");
        let prompt = build_draft_prompt(&request);
        assert!(prompt.contains("- Trigger: New lead in CRM"));
        assert!(prompt.contains("- Action: Send welcome email"));
    }

    #[test]
    fn test_strip_code_fences() {
        let bare = r#"{"title":"x"}"#;
        assert_eq!(strip_code_fences(bare), bare);
        assert_eq!(strip_code_fences("```json\n{\"title\":\"x\"}\n```"), bare);
        assert_eq!(strip_code_fences("```\n{\"title\":\"x\"}\n```\n"), bare);
        assert_eq!(strip_code_fences("  {\"title\":\"x\"}  "), bare);
    }
}
