//! printf-style message templates
//!
//! Supports `%s`, `%d`/`%i`, `%j` and `%%`. Placeholders without a
//! matching argument are left as written; arguments left over once the
//! template is exhausted are appended, separated by spaces.

use serde_json::Value;

/// Placeholder text for a value that could not be resolved
pub const UNDEFINED: &str = "undefined";

/// Format `template` with `args`
pub fn format_message(template: &str, args: &[Option<&Value>]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(spec @ ('s' | 'd' | 'i' | 'j')) => {
                chars.next();
                match remaining.next() {
                    Some(arg) => out.push_str(&render(spec, *arg)),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for arg in remaining {
        out.push(' ');
        out.push_str(&render('s', *arg));
    }

    out
}

fn render(spec: char, arg: Option<&Value>) -> String {
    let Some(value) = arg else {
        return match spec {
            'd' | 'i' => "NaN".to_string(),
            _ => UNDEFINED.to_string(),
        };
    };

    match spec {
        'd' => match value {
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => u8::from(*b).to_string(),
            Value::Null => "0".to_string(),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(|f| f.to_string())
                .unwrap_or_else(|_| "NaN".to_string()),
            _ => "NaN".to_string(),
        },
        'i' => match value {
            Value::Number(n) => n
                .as_i64()
                .map(|i| i.to_string())
                .or_else(|| n.as_f64().map(|f| (f.trunc() as i64).to_string()))
                .unwrap_or_else(|| "NaN".to_string()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(|f| (f.trunc() as i64).to_string())
                .unwrap_or_else(|_| "NaN".to_string()),
            _ => "NaN".to_string(),
        },
        'j' => value.to_string(),
        _ => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
