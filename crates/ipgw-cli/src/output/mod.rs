//! Output formatting utilities for the CLI
//!
//! Replies are printed one `key : value` line per field, in the order the
//! gateway sent them.

use ipgw_protocol::Reply;
use serde_json::Value;

/// Format a reply as `key : value` lines
///
/// Every line, including the last, ends with a newline. An empty reply
/// formats as an empty string.
pub fn format_reply(reply: &Reply) -> String {
    let mut output = String::new();
    for (key, value) in reply.iter() {
        output.push_str(&format!("{} : {}\n", key, format_value(value)));
    }
    output
}

/// Render a single reply value
///
/// Strings print without quotes; everything else prints as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print an error message in red with an X prefix
///
/// Outputs to stderr with red coloring for error feedback to the user.
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_reply_keeps_order() {
        let reply = Reply::from_slice(br#"{"result":"success","code":0}"#).unwrap();
        assert_eq!(format_reply(&reply), "result : success\ncode : 0\n");
    }

    #[test]
    fn test_format_error_reply() {
        let reply = Reply::error("connection refused");
        assert_eq!(format_reply(&reply), "error : connection refused\n");
    }

    #[test]
    fn test_format_empty_reply() {
        assert_eq!(format_reply(&Reply::default()), "");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("text")), "text");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(null)), "null");
        assert_eq!(format_value(&json!(["a", 1])), r#"["a",1]"#);
    }
}
