//! Request models and the login page served to the browser.

use serde::Deserialize;

/// Duo Web v2 widget script.
pub const DUO_WEB_SCRIPT: &str = "https://api.duosecurity.com/frame/hosted/Duo-Web-v2.min.js";

/// Query string of `GET /`.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub username: String,
}

/// Form posted back by the Duo widget.
#[derive(Debug, Deserialize)]
pub struct DuoResponseForm {
    #[serde(default)]
    pub sig_response: String,
}

/// Page hosting the Duo iframe for one signed request.
#[derive(Debug)]
pub struct LoginPage<'a> {
    pub host: &'a str,
    pub sig_request: &'a str,
    pub post_action: &'a str,
}

impl LoginPage<'_> {
    pub fn render(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
	<head>
		<style>
			#duo_iframe {{
				width: 100%;
				min-width: 304px;
				max-width: 620px;
				height: 330px;
				border: none;
			}}
		</style>
	</head>
	<body>
		<form method="post" id="duo_form"></form>
		<iframe id="duo_iframe"
				data-host="{host}"
				data-sig-request="{sig_request}"
				data-post-action="{post_action}">
		</iframe>
		<script src="{script}"></script>
	</body>
</html>
"#,
            host = escape_attr(self.host),
            sig_request = escape_attr(self.sig_request),
            post_action = escape_attr(self.post_action),
            script = DUO_WEB_SCRIPT,
        )
    }
}

/// Escape a value for a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
