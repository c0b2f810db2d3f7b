//! Conversion between unified types and OpenAI wire types

use super::types::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use crate::types::CompletionRequest;

/// Borrow a unified request as an OpenAI request body
pub fn to_chat_request<'a>(model: &'a str, req: &'a CompletionRequest) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: &req.messages,
        temperature: req.options.temperature,
        n: req.options.candidates,
        max_tokens: req.options.max_tokens,
    }
}

/// Extract every choice's text, ordered by the service's `index`.
pub fn from_chat_response(resp: ChatResponse) -> Result<Vec<String>> {
    let mut choices = resp
        .choices
        .ok_or_else(|| Error::malformed("response has no 'choices' field"))?;

    if choices.is_empty() {
        return Err(Error::malformed("response has an empty 'choices' list"));
    }

    // Choices without an index keep their position
    let mut indexed: Vec<(u32, usize)> = choices
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.index.unwrap_or(pos as u32), pos))
        .collect();
    indexed.sort();

    let mut out = Vec::with_capacity(choices.len());
    for (index, pos) in indexed {
        let content = choices[pos]
            .message
            .take()
            .ok_or_else(|| Error::malformed(format!("choice {index} has no 'message'")))?
            .content
            .ok_or_else(|| {
                Error::malformed(format!("choice {index} has no 'message.content'"))
            })?;
        out.push(content);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Vec<String>> {
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        from_chat_response(resp)
    }

    #[test]
    fn test_orders_by_index() {
        let got = parse(
            r#"{"choices":[
                {"index":1,"message":{"role":"assistant","content":"second"}},
                {"index":0,"message":{"role":"assistant","content":"first"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(got, vec!["first", "second"]);
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let err = parse(r#"{"id":"x"}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedServiceResponse(_)));
    }

    #[test]
    fn test_empty_choices_is_malformed() {
        let err = parse(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedServiceResponse(_)));
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let err = parse(r#"{"choices":[{"index":0,"message":{"role":"assistant"}}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("message.content"));
    }
}
