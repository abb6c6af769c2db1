use crate::github::Contributor;
use crate::stats::{RepoStats, RepoStatsSummary};

const TITLE: &str = "njord";
const TAGLINE: &str = "A lightweight ORM library for Rust";
const AVATAR_SIZE: u32 = 40;

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub muted: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                muted: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                muted: "#6a737d",
            },
        }
    }

    fn css_vars(self) -> String {
        let c = self.colors();
        format!(
            "--bg: {}; --text: {}; --key: {}; --value: {}; --muted: {};",
            c.bg, c.text, c.key, c.value, c.muted
        )
    }
}

// Utilities for building HTML content

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn stat_row(key: &str, value: &str, href: Option<&str>) -> String {
    let value = match href {
        Some(href) if !href.is_empty() => format!(
            r#"<a class="value" href="{}">{}</a>"#,
            escape_html(href),
            escape_html(value)
        ),
        _ => format!(r#"<span class="value">{}</span>"#, escape_html(value)),
    };
    format!(
        r#"<li><span class="key">{}</span> {value}</li>
"#,
        escape_html(key)
    )
}

fn contributor_item(c: &Contributor) -> String {
    format!(
        r#"<li><a href="{href}" title="{login} ({n} contributions)"><img src="{avatar}" alt="{login}" width="{AVATAR_SIZE}" height="{AVATAR_SIZE}"></a></li>
"#,
        href = escape_html(&c.html_url),
        login = escape_html(&c.login),
        n = c.contributions,
        avatar = escape_html(&c.avatar_url),
    )
}

// Builds the stats list and the contributor grid

fn build_stats(summary: Option<&RepoStatsSummary>) -> (String, String) {
    let Some(summary) = summary else {
        // Blank stats, same rows so the layout doesn't jump.
        let rows = ["Stars", "Latest version", "Latest commit"]
            .iter()
            .map(|k| stat_row(k, "", None))
            .collect();
        return (rows, String::new());
    };

    let mut rows = String::new();
    rows.push_str(&stat_row(
        "Stars",
        &summary.stargazers.stars.to_string(),
        Some(summary.stargazers.path.as_str()),
    ));
    rows.push_str(&stat_row(
        "Latest version",
        &summary.latest_version.version,
        Some(summary.latest_version.path.as_str()),
    ));
    match &summary.latest_commit {
        Some(commit) => rows.push_str(&stat_row(
            "Latest commit",
            &commit.date,
            Some(commit.path.as_str()),
        )),
        None => rows.push_str(&stat_row("Latest commit", "", None)),
    }

    let contributors = summary.contributors.iter().map(contributor_item).collect();
    (rows, contributors)
}

/// Main page rendering function. `None` and `Empty` stats both render the
/// page with blank values.
pub fn render_page(stats: Option<&RepoStats>) -> String {
    let (rows, contributors) = build_stats(stats.and_then(RepoStats::summary));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
:root {{ {light} }}
@media (prefers-color-scheme: dark) {{ :root {{ {dark} }} }}
body     {{ background: var(--bg); color: var(--text); font-family: ConsolasFallback, Consolas, monospace; }}
.key     {{ color: var(--key); }}
.value   {{ color: var(--value); }}
.muted   {{ color: var(--muted); }}
ul       {{ list-style: none; padding: 0; }}
.contributors li {{ display: inline-block; margin: 2px; }}
.contributors img {{ border-radius: 50%; }}
</style>
</head>
<body>
<header>
<h1>{title}</h1>
<p class="muted">{tagline}</p>
</header>

<!-- REPOSITORY STATS -->
<section class="stats">
<ul>
{rows}</ul>
</section>

<!-- CONTRIBUTORS -->
<section class="contributors">
<h2>Contributors</h2>
<ul>
{contributors}</ul>
</section>
</body>
</html>
"#,
        title = TITLE,
        tagline = TAGLINE,
        light = Theme::Light.css_vars(),
        dark = Theme::Dark.css_vars(),
        rows = rows,
        contributors = contributors,
    )
}
