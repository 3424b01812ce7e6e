//! The chain executor: threads a running input through an ordered list of
//! prompt-template steps, one model call per step.

use super::error::{ModelCallError, ValidationError};
use super::llm_bridge::ModelClient;
use super::GenerationParams;

/// The literal token a step template may use to splice in the running input.
pub const INPUT_TOKEN: &str = "{input}";

/// One stage of a multi-stage prompt pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStep {
    /// Step text; may contain `{input}`. If absent, the running input is
    /// appended (space-joined) instead of substituted.
    pub template: String,
}

impl ChainStep {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

/// The record of one executed step. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStepResult {
    /// Display label, `"Step N"` by default.
    pub label: String,
    /// The fully resolved prompt text sent to the model.
    pub prompt: String,
    /// The text the model returned (or an `Error: ...` placeholder).
    pub response: String,
}

/// The aggregate of a full chain execution, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRun {
    pub initial_input: String,
    pub steps: Vec<ChainStepResult>,
}

impl ChainRun {
    /// The last step's response, i.e. the chain's overall output.
    pub fn final_response(&self) -> Option<&str> {
        self.steps.last().map(|s| s.response.as_str())
    }
}

/// Checks the executor's preconditions.
///
/// The executor itself does not re-validate; callers must invoke this
/// before `run_chain` and surface the error without making any model call.
pub fn validate_chain(
    steps: &[ChainStep],
    initial_input: &str,
    params: &GenerationParams,
) -> Result<(), ValidationError> {
    if steps.is_empty() {
        return Err(ValidationError::NoSteps);
    }
    if initial_input.trim().is_empty() {
        return Err(ValidationError::EmptyField("initial input"));
    }
    for (i, step) in steps.iter().enumerate() {
        if step.template.trim().is_empty() {
            return Err(ValidationError::EmptyStepTemplate(i + 1));
        }
    }
    validate_params(params)
}

/// Checks sampling parameters alone; shared by the single-shot and chain
/// entry points.
pub fn validate_params(params: &GenerationParams) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&params.temperature) {
        return Err(ValidationError::TemperatureOutOfRange(params.temperature));
    }
    if params.max_tokens == 0 {
        return Err(ValidationError::ZeroMaxTokens);
    }
    Ok(())
}

/// Runs every step in order against `client` and returns the full trace.
pub async fn run_chain(
    client: &dyn ModelClient,
    steps: &[ChainStep],
    initial_input: &str,
    params: &GenerationParams,
) -> ChainRun {
    let mut runner = ChainRunner::new(client);
    for step in steps {
        runner = runner.step(&step.template);
    }
    runner.run(initial_input, params).await
}

/// Builder-style executor for a sequential prompt chain.
pub struct ChainRunner<'a> {
    client: &'a dyn ModelClient,
    steps: Vec<ChainStep>,
}

impl<'a> ChainRunner<'a> {
    pub fn new(client: &'a dyn ModelClient) -> Self {
        Self {
            client,
            steps: Vec::new(),
        }
    }

    /// Appends a step with the given template text.
    pub fn step(mut self, template: &str) -> Self {
        self.steps.push(ChainStep::new(template));
        self
    }

    /// Executes the chain: strictly sequential, one model call per step,
    /// each step consuming the previous step's response.
    ///
    /// Never fails. A model-call error becomes that step's response text
    /// and flows forward like legitimate output, so the caller always gets
    /// a complete trace with exactly one result per step.
    pub async fn run(self, initial_input: &str, params: &GenerationParams) -> ChainRun {
        let mut run = ChainRun {
            initial_input: initial_input.to_string(),
            steps: Vec::with_capacity(self.steps.len()),
        };

        let mut current_input = initial_input.to_string();
        for (i, step) in self.steps.iter().enumerate() {
            let prompt = resolve_step_prompt(&step.template, &current_input);
            let response = match self.client.generate(&prompt, params).await {
                Ok(text) => text,
                Err(e) => Self::response_text(&e),
            };
            run.steps.push(ChainStepResult {
                label: format!("Step {}", i + 1),
                prompt,
                response: response.clone(),
            });
            current_input = response;
        }

        run
    }

    /// The named error-to-text conversion at the executor boundary: a
    /// failed model call is demoted to an error-marker response string so
    /// the chain can proceed uniformly.
    fn response_text(err: &ModelCallError) -> String {
        format!("Error: {}", err)
    }
}

/// Resolves a step's prompt against the running input: substitution when
/// the `{input}` token is present (all occurrences), space-append otherwise.
/// Never both, never neither.
fn resolve_step_prompt(template: &str, current_input: &str) -> String {
    if template.contains(INPUT_TOKEN) {
        template.replace(INPUT_TOKEN, current_input)
    } else {
        format!("{} {}", template.trim(), current_input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a scripted list of results, one per call, recording prompts.
    struct ScriptedClient {
        script: Mutex<Vec<Result<String, ModelCallError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<String, ModelCallError>>) -> Self {
            let mut script = script;
            script.reverse();
            Self {
                script: Mutex::new(script),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(
            &self,
            prompt: &str,
            _params: &GenerationParams,
        ) -> Result<String, ModelCallError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    fn steps(templates: &[&str]) -> Vec<ChainStep> {
        templates.iter().map(|t| ChainStep::new(*t)).collect()
    }

    #[tokio::test]
    async fn substitution_threads_outputs_between_steps() {
        let client = ScriptedClient::new(vec![
            Ok("<SUMMARY>".to_string()),
            Ok("<TRANSLATION>".to_string()),
        ]);
        let chain = steps(&["Summarize: {input}", "Translate to French: {input}"]);

        let run = run_chain(
            &client,
            &chain,
            "The quick brown fox",
            &GenerationParams::default(),
        )
        .await;

        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0].label, "Step 1");
        assert_eq!(run.steps[0].prompt, "Summarize: The quick brown fox");
        assert_eq!(run.steps[0].response, "<SUMMARY>");
        assert_eq!(run.steps[1].label, "Step 2");
        assert_eq!(run.steps[1].prompt, "Translate to French: <SUMMARY>");
        assert_eq!(run.steps[1].response, "<TRANSLATION>");
        assert_eq!(run.final_response(), Some("<TRANSLATION>"));
    }

    #[tokio::test]
    async fn template_without_token_appends_the_running_input() {
        let client = ScriptedClient::new(vec![Ok("and so it went".to_string())]);
        let chain = steps(&["Continue this story.  "]);

        let run = run_chain(&client, &chain, "Once upon a time", &GenerationParams::default()).await;

        assert_eq!(run.steps[0].prompt, "Continue this story. Once upon a time");
    }

    #[tokio::test]
    async fn token_is_replaced_at_every_occurrence() {
        let client = ScriptedClient::new(vec![Ok("done".to_string())]);
        let chain = steps(&["Compare {input} with {input}."]);

        let run = run_chain(&client, &chain, "X", &GenerationParams::default()).await;

        assert_eq!(run.steps[0].prompt, "Compare X with X.");
        assert!(!run.steps[0].prompt.contains(INPUT_TOKEN));
    }

    #[tokio::test]
    async fn run_always_produces_one_result_per_step() {
        let client = ScriptedClient::new(vec![
            Ok("a".to_string()),
            Ok("b".to_string()),
            Ok("c".to_string()),
            Ok("d".to_string()),
        ]);
        let chain = steps(&["s1 {input}", "s2 {input}", "s3 {input}", "s4 {input}"]);

        let run = run_chain(&client, &chain, "seed", &GenerationParams::default()).await;

        assert_eq!(run.steps.len(), 4);
        for (i, step) in run.steps.iter().enumerate() {
            assert_eq!(step.label, format!("Step {}", i + 1));
            assert!(!step.prompt.is_empty());
        }
    }

    #[tokio::test]
    async fn model_failure_degrades_the_step_but_not_the_chain() {
        let client = ScriptedClient::new(vec![
            Err(ModelCallError::Backend("rate limited".to_string())),
            Ok("recovered".to_string()),
        ]);
        let chain = steps(&["First: {input}", "Second: {input}"]);

        let run = run_chain(&client, &chain, "seed", &GenerationParams::default()).await;

        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[0].response, "Error: rate limited");
        // The error text is threaded forward as if it were model output.
        assert_eq!(run.steps[1].prompt, "Second: Error: rate limited");
        assert_eq!(run.steps[1].response, "recovered");
        assert_eq!(
            client.seen_prompts(),
            vec!["First: seed", "Second: Error: rate limited"]
        );
    }

    #[tokio::test]
    async fn later_steps_never_see_the_initial_input_directly() {
        let client = ScriptedClient::new(vec![Ok("first out".to_string()), Ok("second out".to_string())]);
        let chain = steps(&["One: {input}", "Two: {input}"]);

        let run = run_chain(&client, &chain, "seed", &GenerationParams::default()).await;

        assert!(!run.steps[1].prompt.contains("seed"));
        assert!(run.steps[1].prompt.contains("first out"));
    }

    #[test]
    fn validate_rejects_bad_requests() {
        let params = GenerationParams::default();
        assert_eq!(
            validate_chain(&[], "seed", &params),
            Err(ValidationError::NoSteps)
        );
        assert_eq!(
            validate_chain(&steps(&["a"]), "   ", &params),
            Err(ValidationError::EmptyField("initial input"))
        );
        assert_eq!(
            validate_chain(&steps(&["a", " "]), "seed", &params),
            Err(ValidationError::EmptyStepTemplate(2))
        );
        assert_eq!(
            validate_chain(
                &steps(&["a"]),
                "seed",
                &GenerationParams {
                    temperature: 1.5,
                    max_tokens: 300
                }
            ),
            Err(ValidationError::TemperatureOutOfRange(1.5))
        );
        assert_eq!(
            validate_chain(
                &steps(&["a"]),
                "seed",
                &GenerationParams {
                    temperature: 0.7,
                    max_tokens: 0
                }
            ),
            Err(ValidationError::ZeroMaxTokens)
        );
        assert!(validate_chain(&steps(&["a"]), "seed", &params).is_ok());
    }

    #[test]
    fn error_conversion_uses_the_error_marker() {
        let err = ModelCallError::Backend("boom".to_string());
        assert_eq!(ChainRunner::response_text(&err), "Error: boom");
    }
}
