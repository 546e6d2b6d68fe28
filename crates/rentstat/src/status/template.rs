//! Standalone HTML rendering of the status page

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::{ChangelogStatus, StatusPage, VersionStatus};

const STYLES: &str = "\
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 960px; padding: 1.5rem; color: #1f2328; }
header { display: flex; align-items: center; gap: .75rem; border-bottom: 1px solid #d0d7de; padding-bottom: 1rem; }
header h1 { margin: 0; font-size: 1.5rem; }
.badge { border-radius: 1rem; padding: .15rem .6rem; font-size: .85rem; background: #ddf4ff; }
.badge.degraded { background: #fff1e5; }
dl.meta { display: grid; grid-template-columns: max-content auto; gap: .35rem 1rem; }
dl.meta dt { color: #656d76; }
.changelog-entry { border-top: 1px solid #d0d7de; }
.changelog-version time { color: #656d76; font-size: .8em; margin-left: .5rem; }
.changelog-yanked { color: #cf222e; font-size: .8em; margin-left: .5rem; }
.changelog-unavailable { color: #9a6700; }
footer { color: #656d76; font-size: .8rem; margin-top: 2rem; }
";

fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", attr(href), text(label))
}

fn row(output: &mut String, term: &str, value: &str) {
    output.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", term, value));
}

/// Render the page as a complete HTML document.
///
/// Every configured value is escaped; the changelog markup is embedded as
/// produced by the changelog formatter.
pub fn render_page(page: &StatusPage) -> String {
    let env = &page.environment;
    let title = env.app_label.as_deref().unwrap_or("rent-checker");

    let mut output = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>{} status</title>\n", text(title)));
    output.push_str(&format!("<style>\n{}</style>\n", STYLES));
    output.push_str("</head>\n<body>\n");

    let version_class = match page.version {
        VersionStatus::Known { .. } => "badge version",
        _ => "badge version degraded",
    };
    output.push_str("<header>\n");
    output.push_str(&format!("<h1>{}</h1>\n", text(title)));
    output.push_str(&format!(
        "<span class=\"badge environment\">{}</span>\n",
        text(&env.name)
    ));
    output.push_str(&format!(
        "<span class=\"{}\" title=\"{}\">{}</span>\n",
        version_class,
        attr(page.version.reason().unwrap_or("")),
        text(page.version.display())
    ));
    output.push_str("</header>\n<main>\n");

    output.push_str("<dl class=\"meta\">\n");
    row(&mut output, "Environment", &text(&env.name));
    row(&mut output, "Version", &text(page.version.display()));
    row(
        &mut output,
        "rentstat",
        &text(&page.runtime.tool_version),
    );
    row(
        &mut output,
        "Platform",
        &text(&format!("{}/{}", page.runtime.os, page.runtime.arch)),
    );
    if let Some(url) = &env.app_url {
        row(&mut output, "Application", &link(url, url));
    }
    match (&env.deploy.url, &env.deploy.app) {
        (Some(url), Some(app)) => row(&mut output, "Deployment", &link(url, app)),
        (Some(url), None) => row(&mut output, "Deployment", &link(url, url)),
        (None, Some(app)) => row(&mut output, "Deployment", &text(app)),
        (None, None) => {}
    }
    if let Some(docs) = &env.api_docs_url {
        let label = match (&env.api_title, &env.api_version) {
            (Some(title), Some(version)) => format!("{} {}", title, version),
            (Some(title), None) => title.clone(),
            (None, Some(version)) => format!("API {}", version),
            (None, None) => "API documentation".to_string(),
        };
        row(&mut output, "API", &link(docs, &label));
    }
    output.push_str("</dl>\n");

    output.push_str("<section class=\"history\">\n<h2>Changelog</h2>\n");
    match &page.changelog {
        ChangelogStatus::Rendered { html } => output.push_str(html),
        ChangelogStatus::Unavailable { reason } => output.push_str(&format!(
            "<p class=\"changelog-unavailable\">Changelog unavailable: {}</p>\n",
            text(reason)
        )),
    }
    output.push_str("</section>\n</main>\n");

    output.push_str(&format!(
        "<footer>Generated {}</footer>\n",
        page.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str("</body>\n</html>\n");
    output
}
