//! Prompt construction for the grading request.

/// Placeholder replaced by the file contents.
pub const CODE_PLACEHOLDER: &str = "{code}";

/// Default grading prompt. The model answers with a category keyword, or
/// `FULLSTOP` alone when the code is negligible.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "
Analyze the following code snippet and grade its performance impact as one of the following categories:
- Severe: Major performance issues, high computational cost.
- Important: Significant performance issues.
- Medium: Some performance inefficiencies but not critical.
- Minimal: Little to no performance concerns.
Please also consider the context of the code and its intended use case. If the code looks like it would rarely be run, it may be categorized as Minimal.
If the code is negligible, and you wish to cut the response short, you can respond with \"FULLSTOP\" and nothing else.

If the category is anything other than \"FULLSTOP\", please provide a brief explanation of the performance concerns.

Code:
{code}
";

/// Interpolate `code` into `template` at every [`CODE_PLACEHOLDER`].
///
/// The file text is inserted verbatim; braces inside it are not interpreted.
pub fn build_prompt(template: &str, code: &str) -> String {
    template.replace(CODE_PLACEHOLDER, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_has_placeholder() {
        assert!(DEFAULT_PROMPT_TEMPLATE.contains(CODE_PLACEHOLDER));
    }

    #[test]
    fn code_is_embedded_verbatim() {
        let code = "for (int i = 0; i < n; i++) { Work(); }";
        let prompt = build_prompt(DEFAULT_PROMPT_TEMPLATE, code);
        assert!(prompt.contains(code));
        assert!(!prompt.contains(CODE_PLACEHOLDER));
        assert!(prompt.contains("Severe: Major performance issues"));
    }

    #[test]
    fn placeholder_inside_code_is_left_alone() {
        let prompt = build_prompt("Code:\n{code}\nEnd", "var s = \"{code}\";");
        assert_eq!(prompt, "Code:\nvar s = \"{code}\";\nEnd");
    }

    #[test]
    fn empty_file_yields_template_without_placeholder() {
        assert_eq!(build_prompt("before {code} after", ""), "before  after");
    }
}
