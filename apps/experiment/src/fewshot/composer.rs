//! Prompt Composer — renders training examples and the held-out form into one prompt.
//!
//! Pure and deterministic: the same inputs always produce the same string, and
//! examples appear in exactly the order given.

use crate::fewshot::fixtures::TrainingExample;
use crate::fewshot::prompts::{
    FORM_LABEL, OUTPUT_INSTRUCTION, POLICY_LABEL, PROMPT_PREAMBLE, SEPARATOR_WIDTH,
    TEST_CASE_HEADER,
};

pub fn compose_prompt(training: &[TrainingExample], held_out_form: &str) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut prompt = String::from(PROMPT_PREAMBLE);

    for (position, example) in training.iter().enumerate() {
        prompt.push_str(&render_example(position + 1, example));
        prompt.push_str(&separator);
        prompt.push_str("\n\n");
    }

    prompt.push_str(TEST_CASE_HEADER);
    prompt.push_str(held_out_form);
    prompt.push_str(OUTPUT_INSTRUCTION);
    prompt
}

fn render_example(number: usize, example: &TrainingExample) -> String {
    format!(
        "=== EXAMPLE {number} ===\n\n{FORM_LABEL}\n{}\n\n{POLICY_LABEL}\n{}\n\n",
        example.form, example.record_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::flatten::Record;

    fn example(index: usize, form: &str, record_text: &str) -> TrainingExample {
        TrainingExample {
            index,
            form: form.to_string(),
            record_text: record_text.to_string(),
            record: Record::new(),
        }
    }

    fn training() -> Vec<TrainingExample> {
        (1..=5)
            .map(|i| {
                example(
                    i,
                    &format!("FORM-{i}"),
                    &format!("{{\"policy_number\": \"P-{i}\"}}"),
                )
            })
            .collect()
    }

    #[test]
    fn test_prompt_starts_with_preamble_and_ends_with_instruction() {
        let prompt = compose_prompt(&training(), "HELD-OUT");
        assert!(prompt.starts_with("You are an insurance underwriting expert."));
        assert!(prompt.ends_with("Return ONLY the JSON, no additional text."));
    }

    #[test]
    fn test_examples_appear_in_input_order() {
        let prompt = compose_prompt(&training(), "HELD-OUT");
        let positions: Vec<usize> = (1..=5)
            .map(|i| prompt.find(&format!("=== EXAMPLE {i} ===")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        let mut reversed = training();
        reversed.reverse();
        let prompt = compose_prompt(&reversed, "HELD-OUT");
        assert!(prompt.find("FORM-5").unwrap() < prompt.find("FORM-1").unwrap());
        assert!(prompt.contains("=== EXAMPLE 1 ===\n\nACORD FORM:\nFORM-5\n"));
    }

    #[test]
    fn test_example_block_layout() {
        let prompt = compose_prompt(&training()[..1], "HELD-OUT");
        let expected_block = format!(
            "=== EXAMPLE 1 ===\n\nACORD FORM:\nFORM-1\n\nCORRESPONDING POLICY JSON:\n{{\"policy_number\": \"P-1\"}}\n\n{}\n\n",
            "=".repeat(80)
        );
        assert!(prompt.contains(&expected_block));
    }

    #[test]
    fn test_held_out_form_follows_last_example() {
        let prompt = compose_prompt(&training(), "HELD-OUT FORM TEXT");
        let held_out_at = prompt.find("TEST ACORD FORM:\nHELD-OUT FORM TEXT\n\n").unwrap();
        assert!(prompt.find("=== EXAMPLE 5 ===").unwrap() < held_out_at);
        assert_eq!(prompt.matches("=== EXAMPLE").count(), 5);
    }

    #[test]
    fn test_record_text_is_inserted_verbatim() {
        let pretty = "{\n    \"premium\": 1000.00,\n    \"lines\": [ \"auto\" ]\n}";
        let prompt = compose_prompt(&[example(1, "F", pretty)], "H");
        assert!(prompt.contains(pretty));
    }

    #[test]
    fn test_braces_in_inputs_are_left_alone() {
        let record_text = "{\"k\": \"{form}\"}";
        let prompt = compose_prompt(&[example(1, "literal {n} in form", record_text)], "H");
        assert!(prompt.contains("literal {n} in form"));
        assert!(prompt.contains(record_text));
    }

    #[test]
    fn test_composition_is_deterministic() {
        assert_eq!(
            compose_prompt(&training(), "HELD-OUT"),
            compose_prompt(&training(), "HELD-OUT")
        );
    }
}
