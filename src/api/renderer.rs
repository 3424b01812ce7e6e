//! Pure prompt rendering: template structure + few-shot examples -> final text.

use regex::Regex;

use super::error::{RenderError, TemplateError, ValidationError};

/// The placeholder names a template structure may reference.
const RECOGNIZED_FIELDS: [&str; 4] = ["role", "audience", "tone", "intent"];

/// A named, reusable prompt skeleton with placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    /// Text pattern containing `{role}`, `{audience}`, `{tone}`, `{intent}`.
    pub structure: String,
}

impl Template {
    pub fn new(name: impl Into<String>, structure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            structure: structure.into(),
        }
    }
}

/// The four field values substituted into a template structure.
#[derive(Debug, Clone, Default)]
pub struct PromptFields {
    pub role: String,
    pub audience: String,
    pub tone: String,
    pub intent: String,
}

/// An input/output pair shown to the model before the real task.
///
/// Pairs with an empty input or output do not count as valid examples and
/// are skipped by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FewShotExample {
    pub input: String,
    pub output: String,
}

impl FewShotExample {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    fn is_valid(&self) -> bool {
        !self.input.is_empty() && !self.output.is_empty()
    }
}

/// The finished text sent to the model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    text: String,
}

impl RenderedPrompt {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for RenderedPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

fn placeholder_re() -> Regex {
    Regex::new(r"\{([^{}]*)\}").unwrap()
}

/// Checks that a template structure is a well-formed pattern over the
/// recognized field set. This is the single grammar check shared by the
/// renderer and the template-editing commands.
pub fn check_structure(structure: &str) -> Result<(), TemplateError> {
    let re = placeholder_re();
    for caps in re.captures_iter(structure) {
        let token = &caps[1];
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(TemplateError::Malformed(format!(
                "invalid placeholder '{{{}}}'",
                token
            )));
        }
        if !RECOGNIZED_FIELDS.contains(&token) {
            return Err(TemplateError::UnknownPlaceholder(token.to_string()));
        }
    }

    // Whatever is left after removing well-formed tokens must be brace-free.
    let stripped = re.replace_all(structure, "");
    if stripped.contains('{') || stripped.contains('}') {
        return Err(TemplateError::Malformed(
            "unbalanced '{' or '}'".to_string(),
        ));
    }
    Ok(())
}

/// Renders a template into the finished prompt text.
///
/// Pure function of its inputs: substitutes the four fields verbatim (no
/// escaping, no recursive expansion), prepends each valid few-shot example
/// in order, then the fixed `Now complete the task:` separator line.
pub fn render(
    template: &Template,
    fields: &PromptFields,
    examples: &[FewShotExample],
) -> Result<RenderedPrompt, RenderError> {
    if fields.role.is_empty() {
        return Err(ValidationError::EmptyField("role").into());
    }
    if fields.audience.is_empty() {
        return Err(ValidationError::EmptyField("audience").into());
    }
    if fields.intent.is_empty() {
        return Err(ValidationError::EmptyField("intent").into());
    }
    check_structure(&template.structure)?;

    let re = placeholder_re();
    let base = re
        .replace_all(&template.structure, |caps: &regex::Captures| {
            match &caps[1] {
                "role" => fields.role.clone(),
                "audience" => fields.audience.clone(),
                "tone" => fields.tone.clone(),
                "intent" => fields.intent.clone(),
                // check_structure rejected everything else already
                other => format!("{{{}}}", other),
            }
        })
        .into_owned();

    let mut text = String::new();
    for (idx, ex) in examples.iter().filter(|ex| ex.is_valid()).enumerate() {
        text.push_str(&format!(
            "Example {}:\nInput: {}\nOutput: {}\n\n",
            idx + 1,
            ex.input,
            ex.output
        ));
    }
    text.push_str("Now complete the task:\n");
    text.push_str(&base);

    Ok(RenderedPrompt { text })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PromptFields {
        PromptFields {
            role: "Lawyer".to_string(),
            audience: "Client".to_string(),
            tone: "Formal".to_string(),
            intent: "Draft a contract clause".to_string(),
        }
    }

    fn template() -> Template {
        Template::new(
            "legal",
            "You are a {role} writing for a {audience}. Tone: {tone}. Task: {intent}",
        )
    }

    #[test]
    fn substitutes_all_fields_verbatim() {
        let out = render(&template(), &fields(), &[]).unwrap();
        let text = out.as_str();
        assert!(text.contains("Lawyer"));
        assert!(text.contains("Client"));
        assert!(text.contains("Formal"));
        assert!(text.contains("Draft a contract clause"));
        for token in ["{role}", "{audience}", "{tone}", "{intent}"] {
            assert!(!text.contains(token), "leftover token {}", token);
        }
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let t = Template::new("echo", "{role} and again {role}: {intent}");
        let out = render(&t, &fields(), &[]).unwrap();
        assert_eq!(out.as_str().matches("Lawyer").count(), 2);
    }

    #[test]
    fn examples_render_in_order_before_the_task() {
        let examples = vec![
            FewShotExample::new("first in", "first out"),
            FewShotExample::new("second in", "second out"),
        ];
        let out = render(&template(), &fields(), &examples).unwrap();
        let text = out.as_str();

        let ex1 = text.find("Example 1:").unwrap();
        let ex2 = text.find("Example 2:").unwrap();
        let task = text.find("Now complete the task:").unwrap();
        assert!(ex1 < ex2 && ex2 < task);

        assert!(text.contains("Example 1:\nInput: first in\nOutput: first out\n\n"));
        assert!(text.contains("Example 2:\nInput: second in\nOutput: second out\n\n"));
    }

    #[test]
    fn pairs_with_an_empty_side_are_skipped() {
        let examples = vec![
            FewShotExample::new("", "only output"),
            FewShotExample::new("only input", ""),
        ];
        let out = render(&template(), &fields(), &examples).unwrap();
        assert!(!out.as_str().contains("Example"));
        assert!(out.as_str().starts_with("Now complete the task:\n"));
    }

    #[test]
    fn skipped_pairs_do_not_consume_example_numbers() {
        let examples = vec![
            FewShotExample::new("", ""),
            FewShotExample::new("in", "out"),
        ];
        let out = render(&template(), &fields(), &examples).unwrap();
        assert!(out.as_str().contains("Example 1:\nInput: in"));
        assert!(!out.as_str().contains("Example 2:"));
    }

    #[test]
    fn unknown_placeholder_is_a_template_error() {
        let t = Template::new("bad", "Hello {user}, do {intent}");
        let err = render(&t, &fields(), &[]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Template(TemplateError::UnknownPlaceholder("user".to_string()))
        );
    }

    #[test]
    fn stray_brace_is_malformed() {
        let t = Template::new("bad", "Unclosed {role");
        assert!(matches!(
            render(&t, &fields(), &[]),
            Err(RenderError::Template(TemplateError::Malformed(_)))
        ));
    }

    #[test]
    fn empty_token_is_malformed() {
        assert!(matches!(
            check_structure("{} nothing here"),
            Err(TemplateError::Malformed(_))
        ));
    }

    #[test]
    fn empty_required_field_is_a_validation_error() {
        let mut f = fields();
        f.audience.clear();
        let err = render(&template(), &f, &[]).unwrap_err();
        assert_eq!(
            err,
            RenderError::Validation(ValidationError::EmptyField("audience"))
        );
    }

    #[test]
    fn empty_tone_is_accepted() {
        let mut f = fields();
        f.tone.clear();
        assert!(render(&template(), &f, &[]).is_ok());
    }
}
