//! Renders a prompt from a template with few-shot examples, without
//! touching any model or store.

use autoprompt::{render, FewShotExample, PromptFields, Template};

fn main() {
    let template = Template::new(
        "support",
        "You are a {role} replying to a {audience}. Keep the tone {tone}.\nTask: {intent}",
    );
    let fields = PromptFields {
        role: "support engineer".to_string(),
        audience: "frustrated customer".to_string(),
        tone: "calm".to_string(),
        intent: "explain why the invoice was charged twice".to_string(),
    };
    let examples = vec![FewShotExample::new(
        "Why was my account locked?",
        "Your account was locked after three failed login attempts; here is how to unlock it...",
    )];

    match render(&template, &fields, &examples) {
        Ok(prompt) => println!("{}", prompt),
        Err(e) => eprintln!("render failed: {}", e),
    }
}
