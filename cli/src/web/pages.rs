use serde_json::Value;

use infoguard_common::scan::{ScanHandle, ScanKind, ScanReport};

use crate::terminal::format;

pub const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>InfoGuard Scanner</title>
</head>
<body>
  <h1>InfoGuard Scanner</h1>
  <form action="/scan" method="post" enctype="multipart/form-data">
    <p><label>File <input type="file" name="file"></label></p>
    <p>or</p>
    <p><label>URL <input type="text" name="url" placeholder="http://example.com"></label></p>
    <p><button type="submit">Scan</button></p>
  </form>
  <p>Reports of earlier submissions are available at <code>/results/&lt;resource&gt;</code>
  (add <code>?kind=url</code> for URL submissions).</p>
</body>
</html>
"#;

pub fn results(handle: &ScanHandle, kind: ScanKind, report: &ScanReport) -> String {
    let mut body = format!(
        "<h1>Scan report</h1>\n<p>Resource <code>{}</code> ({})</p>\n",
        escape_html(handle.as_str()),
        kind
    );

    let fields = format::scalar_fields(report);
    if !fields.is_empty() {
        body.push_str("<table>\n");
        for (key, value) in fields {
            body.push_str(&format!(
                "  <tr><th>{}</th><td>{}</td></tr>\n",
                escape_html(&key),
                escape_html(&value)
            ));
        }
        body.push_str("</table>\n");
    }

    let pretty = serde_json::to_string_pretty(report.as_json()).unwrap_or_else(|_| Value::Null.to_string());
    body.push_str(&format!("<pre>{}</pre>\n", escape_html(&pretty)));

    page("Scan report", &body)
}

pub fn error(handle: &ScanHandle, message: &str) -> String {
    let body = format!(
        "<h1>Scan report</h1>\n<p>Resource <code>{}</code></p>\n<p class=\"error\">{}</p>\n",
        escape_html(handle.as_str()),
        escape_html(message)
    );
    page("Scan report unavailable", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{}</title>\n</head>\n<body>\n{}<p><a href=\"/\">New scan</a></p>\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
