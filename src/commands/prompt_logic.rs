//! Shared logic for turning CLI prompt arguments into a rendered prompt.

use crate::api::{render, FewShotExample, PromptFields, RenderedPrompt, Template};
use crate::cli::PromptArgs;
use crate::core::history::PromptMeta;
use crate::core::storage::{load_template, AppCtx};

/// Parses repeated `--example 'input::output'` values. A pair with an
/// empty side is accepted here and dropped by the renderer.
pub fn parse_examples(raw: &[String]) -> Result<Vec<FewShotExample>, String> {
    raw.iter()
        .map(|pair| {
            let (input, output) = pair.split_once("::").ok_or_else(|| {
                format!("Invalid --example '{}': expected 'input::output'", pair)
            })?;
            Ok(FewShotExample::new(input, output))
        })
        .collect()
}

/// Loads the named template and renders it against the CLI arguments.
pub fn build_prompt(
    ctx: &AppCtx,
    args: &PromptArgs,
) -> Result<(RenderedPrompt, PromptMeta), String> {
    let td = load_template(ctx, &args.template)?;
    let template = Template::new(&td.name, &td.structure);
    let fields = PromptFields {
        role: args.role.clone(),
        audience: args.audience.clone(),
        tone: args.tone.clone(),
        intent: args.intent.clone(),
    };
    let examples = parse_examples(&args.examples)?;

    let rendered = render(&template, &fields, &examples).map_err(|e| e.to_string())?;
    let meta = PromptMeta {
        role: Some(args.role.clone()),
        audience: Some(args.audience.clone()),
        tone: Some(args.tone.clone()),
        intent: Some(args.intent.clone()),
    };
    Ok((rendered, meta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_pairs_split_on_the_first_separator() {
        let parsed = parse_examples(&["in::out".to_string(), "a::b::c".to_string()]).unwrap();
        assert_eq!(parsed[0], FewShotExample::new("in", "out"));
        assert_eq!(parsed[1], FewShotExample::new("a", "b::c"));
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(parse_examples(&["no separator".to_string()]).is_err());
    }
}
