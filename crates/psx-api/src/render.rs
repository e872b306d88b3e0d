//! 리포트 HTML 렌더링.
//!
//! 모든 셀 텍스트와 헤더, 리포트 날짜는 출력 전에 이스케이프합니다.

use psx_core::Report;
use std::fmt::Write;

/// 페이지 제목.
pub const PAGE_TITLE: &str = "PSX Trends Monitor";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:1.5rem;color:#222}\
h1{font-size:1.4rem;margin-bottom:.25rem}\
.report-date{color:#555;margin-top:0}\
table{border-collapse:collapse;font-size:.85rem}\
th,td{border:1px solid #ccc;padding:.3rem .5rem;white-space:nowrap}\
th{background:#f2f2f2;position:sticky;top:0}\
tbody tr:nth-child(even){background:#fafafa}";

/// HTML 특수 문자를 엔티티로 바꿉니다.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 리포트 전체 페이지를 렌더링합니다.
pub fn render_report(report: &Report) -> String {
    let mut html = String::with_capacity(4096 + report.len() * 256);

    // String에 대한 write!는 실패하지 않음
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<link rel=\"icon\" href=\"/favicon.ico\">\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n\
         <p class=\"report-date\">{date}</p>\n",
        title = PAGE_TITLE,
        date = escape_html(&report.report_date),
    );

    html.push_str("<table>\n<thead>\n<tr>");
    for header in &report.headers {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &report.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

/// 파이프라인 실패 시 보여줄 페이지.
pub fn render_error(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{PAGE_TITLE}</title>\n</head>\n<body>\n<h1>{PAGE_TITLE}</h1>\n\
         <p>{}</p>\n</body>\n</html>\n",
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Oil & Gas's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Oil &amp; Gas&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain 12.5%"), "plain 12.5%");
    }

    #[test]
    fn test_render_report_structure() {
        let report = Report {
            report_date: "Report Date: 01-May-2024".to_string(),
            headers: vec!["Symbol".to_string(), "Company".to_string()],
            rows: vec![
                vec!["OGDC".to_string(), "Oil & Gas <Dev>".to_string()],
                vec!["LUCK".to_string(), String::new()],
            ],
        };

        let html = render_report(&report);

        assert!(html.contains("<p class=\"report-date\">Report Date: 01-May-2024</p>"));
        assert!(html.contains("<tr><th>Symbol</th><th>Company</th></tr>"));
        assert!(html.contains("<td>Oil &amp; Gas &lt;Dev&gt;</td>"));
        assert!(html.contains("<tr><td>LUCK</td><td></td></tr>"));
        assert!(!html.contains("<Dev>"));
    }

    #[test]
    fn test_render_empty_report() {
        let html = render_report(&Report::default());
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn test_render_error_escapes_message() {
        let html = render_error("<boom>");
        assert!(html.contains("&lt;boom&gt;"));
    }
}
