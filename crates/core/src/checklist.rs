//! Markdown checklist parsing.
//!
//! Recognises task list entries such as `- [ ] item` and `* [x] item`
//! at any indentation. Lines inside fenced code blocks are ignored so that
//! examples embedded in a template are not counted.

use qg_protocol::checklist_models::{ChecklistItem, ChecklistSummary};

/// Parses every task list entry in `markdown`.
///
/// # Example
///
/// ```
/// use qg_core::checklist::parse_checklist;
///
/// let summary = parse_checklist("- [x] Threat model\n- [ ] Pen test\n");
/// assert_eq!(summary.total(), 2);
/// assert_eq!(summary.completed(), 1);
/// ```
pub fn parse_checklist(markdown: &str) -> ChecklistSummary {
    let mut items = Vec::new();
    let mut fence: Option<&str> = None;

    for (index, line) in markdown.lines().enumerate() {
        let trimmed = line.trim_start();

        if let Some(marker) = fence_marker(trimmed) {
            match fence {
                Some(open) if open == marker => fence = None,
                Some(_) => {}
                None => fence = Some(marker),
            }
            continue;
        }
        if fence.is_some() {
            continue;
        }

        if let Some((completed, text)) = parse_task(trimmed) {
            items.push(ChecklistItem {
                text: text.to_string(),
                completed,
                line: index + 1,
            });
        }
    }

    ChecklistSummary { items }
}

fn fence_marker(line: &str) -> Option<&'static str> {
    if line.starts_with("```") {
        Some("```")
    } else if line.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Splits `- [x] text` into its completion flag and text.
fn parse_task(line: &str) -> Option<(bool, &str)> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))?
        .trim_start();

    let (completed, text) = if let Some(text) = rest.strip_prefix("[ ]") {
        (false, text)
    } else if let Some(text) = rest
        .strip_prefix("[x]")
        .or_else(|| rest.strip_prefix("[X]"))
    {
        (true, text)
    } else {
        return None;
    };

    // `- [x]foo` is a link-like literal, not a task
    if !text.is_empty() && !text.starts_with(char::is_whitespace) {
        return None;
    }

    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some((completed, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checklist_acceptance() {
        let markdown = r#"# Security Review

## Mandatory Controls
- [x] Secrets loaded from environment
- [ ] Input validation on all endpoints
  * [X] Nested item with star bullet
+ [ ] Plus bullet

Some prose with [x] in the middle.
- Regular list item
"#;

        let summary = parse_checklist(markdown);

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.completed(), 2);
        assert_eq!(summary.items[0].text, "Secrets loaded from environment");
        assert_eq!(summary.items[0].line, 4);
        assert!(summary.items[2].completed);
        assert_eq!(summary.items[3].text, "Plus bullet");
    }

    #[test]
    fn test_fenced_code_is_ignored() {
        let markdown = "- [ ] real\n```markdown\n- [ ] example\n```\n~~~\n- [x] tilde example\n~~~\n- [x] after\n";

        let summary = parse_checklist(markdown);

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.items[1].text, "after");
        assert_eq!(summary.items[1].line, 8);
    }

    #[test]
    fn test_malformed_tasks_are_ignored() {
        let summary = parse_checklist("- [x]\n- [y] maybe\n- [x]glued\n-[ ] no space\n");
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_empty_document() {
        let summary = parse_checklist("");
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.completion_ratio(), 1.0);
    }
}
