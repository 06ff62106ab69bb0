//! Generation prompts and tolerant parsing of their output.

use std::collections::HashSet;

/// Prompt asking the model to rewrite a stored answer conversationally.
pub fn answer_rewrite_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"You are an intelligent assistant for a website FAQ. Rewrite formal or technical answers into clear, friendly and helpful responses that sound like they come from a knowledgeable human.

Rules:
1. Stick to the facts. Do not add guesses or unnecessary details.
2. Keep the response concise yet informative, in simple everyday language.
3. Preserve all key information from the original answer.
4. Format the response as markdown.
5. Output only the improved answer, with no introduction or commentary.

The user's question is:
{}

The original answer is:
{}
"#,
        question, answer
    )
}

/// Prompt asking the model for alternate phrasings of a question.
pub fn paraphrase_prompt(question: &str) -> String {
    format!(
        r#"Generate similar questions for the given question. Return only JSON in exactly this format, without code fences:
{{"questions": ["similar question 1?", "similar question 2?"]}}

Question:
{}
"#,
        question
    )
}

/// Extract paraphrases from model output.
///
/// Accepts `{"questions": [...]}`, the unquoted `questions: [...]` variant,
/// a bare array, code fences and trailing commas. Anything unparseable yields
/// an empty list. Blank entries, duplicates and echoes of `original` are dropped.
pub fn parse_paraphrases(raw: &str, original: &str) -> Vec<String> {
    let Some(array) = extract_array(raw) else {
        return Vec::new();
    };
    let parsed: Vec<serde_json::Value> = match serde_json::from_str(&array)
        .or_else(|_| serde_json::from_str(&strip_trailing_commas(&array)))
    {
        Ok(values) => values,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    seen.insert(normalize(original));
    parsed
        .into_iter()
        .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(normalize(s)))
        .collect()
}

/// The first `[...]` span after a `questions` key, or the first one at all.
fn extract_array(raw: &str) -> Option<String> {
    let anchored = raw
        .find("questions")
        .and_then(|key| raw[key..].find('[').map(|i| key + i));
    let open = anchored.or_else(|| raw.find('['))?;
    let close = open + raw[open..].rfind(']')?;
    Some(raw[open..=close].to_string())
}

fn strip_trailing_commas(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let chars: Vec<char> = s.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']')) {
                continue;
            }
        }
        out.push(*c);
    }
    out
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_object() {
        let raw = r#"{"questions": ["How can I reset my password?", "Forgot my password"]}"#;
        assert_eq!(
            parse_paraphrases(raw, "How do I reset my password?"),
            vec!["How can I reset my password?", "Forgot my password"]
        );
    }

    #[test]
    fn test_loose_format_with_fence_and_trailing_comma() {
        let raw = "```json\nquestions:[\n  \"Where do I change my password?\",\n]\n```";
        assert_eq!(
            parse_paraphrases(raw, "q"),
            vec!["Where do I change my password?"]
        );
    }

    #[test]
    fn test_bare_array_followed_by_prose() {
        let raw = "[\"How can I reset it?\", \"Password reset steps?\"]\nThese questions keep the meaning.";
        assert_eq!(
            parse_paraphrases(raw, "q"),
            vec!["How can I reset it?", "Password reset steps?"]
        );
    }

    #[test]
    fn test_drops_echo_blank_and_duplicates() {
        let raw = r#"["Reset password?", " ", "reset PASSWORD?", "Original?", 42]"#;
        assert_eq!(parse_paraphrases(raw, "original?"), vec!["Reset password?"]);
    }

    #[test]
    fn test_malformed_is_empty() {
        assert!(parse_paraphrases("I cannot help with that.", "q").is_empty());
        assert!(parse_paraphrases("questions: [\"unterminated", "q").is_empty());
        assert!(parse_paraphrases("questions: [not json]", "q").is_empty());
    }

    #[test]
    fn test_prompts_carry_inputs() {
        let p = answer_rewrite_prompt("Q?", "A.");
        assert!(p.contains("Q?") && p.contains("A."));
        assert!(paraphrase_prompt("Q?").contains("\"questions\""));
    }
}
