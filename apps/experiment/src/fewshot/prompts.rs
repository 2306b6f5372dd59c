// All LLM prompt text for the few-shot policy experiment.
// No system prompt is sent; the whole instruction lives in the user turn.

/// Opening task description. Followed directly by the example blocks.
pub const PROMPT_PREAMBLE: &str = "You are an insurance underwriting expert. \
Your task is to generate a JSON policy representation based on an ACORD insurance application form.

I will show you 5 examples of ACORD forms and their corresponding policy JSON representations. \
Then, you will generate a policy JSON for a new ACORD form.

";

/// Label above the raw form text inside each example block.
pub const FORM_LABEL: &str = "ACORD FORM:";

/// Label above the raw policy JSON inside each example block.
pub const POLICY_LABEL: &str = "CORRESPONDING POLICY JSON:";

/// Width of the `=` rule that closes each example block.
pub const SEPARATOR_WIDTH: usize = 80;

/// Introduces the held-out form.
pub const TEST_CASE_HEADER: &str = "Now, based on the patterns you've observed in the examples above, \
generate a policy JSON for this new ACORD form:

TEST ACORD FORM:
";

/// Closing instruction asking for bare JSON.
pub const OUTPUT_INSTRUCTION: &str = "\n\nGenerate the policy JSON following the same structure \
and logic as the examples. Return ONLY the JSON, no additional text.";
