// src/api/templates.rs
//! 內嵌的 HTML 頁面，以 `{{ name }}` 佔位符替換內容

use crate::storage::Buzz;

pub const INDEX_HTML: &str = include_str!("../../templates/index.html");
pub const BUZZ_SIMPLE_HTML: &str = include_str!("../../templates/buzz_simple.html");
pub const TRANSFORM_HTML: &str = include_str!("../../templates/transform.html");

/// 跳脫 HTML 特殊字元
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// 以已跳脫的片段替換佔位符
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |page, (name, value)| {
        page.replace(&format!("{{{{ {} }}}}", name), value)
    })
}

pub fn render_buzz_simple(items: &[Buzz]) -> String {
    let list = items
        .iter()
        .map(|buzz| {
            let url = escape_html(&buzz.url);
            format!(
                "    <li><a href=\"{}\">{}</a> <small>{}</small></li>",
                url,
                url,
                buzz.pub_date.format("%Y-%m-%d %H:%M")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    render(BUZZ_SIMPLE_HTML, &[("items", list.as_str())])
}

pub fn render_transform(flash: Option<&str>) -> String {
    let flash = flash
        .map(|message| format!("  <p class=\"flash\">{}</p>", escape_html(message)))
        .unwrap_or_default();

    render(TRANSFORM_HTML, &[("flash", flash.as_str())])
}
