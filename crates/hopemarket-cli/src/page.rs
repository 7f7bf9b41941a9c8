//! HTML rendering of a [`Dashboard`].
//!
//! The page is static narrative around the four dashboard sections. Charts
//! are embedded as Plotly figure JSON and drawn by `dashboard.js`.

use hopemarket::{ChartSpec, Dashboard, Dataset, FileStatus, LineMode, Section, SectionBody};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// How the page reaches its assets and downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// Behind the server: linked assets, live controls, download links.
    Served,
    /// Single file: inlined assets, no controls or downloads.
    Standalone,
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
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

/// Render `text` with backtick spans as `<code>`.
fn inline_code(text: &str) -> String {
    text.split('`')
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("<code>{}</code>", escape(part))
            } else {
                escape(part)
            }
        })
        .collect()
}

/// Figure JSON safe to place inside a `<script>` element.
fn script_json(figure: &ChartSpec) -> String {
    match figure.to_json() {
        Ok(json) => json.replace("</", "<\\/"),
        Err(e) => {
            tracing::warn!(error = %e, "could not serialize figure");
            "{\"data\":[],\"layout\":{}}".to_string()
        }
    }
}

pub fn render(dashboard: &Dashboard, mode: PageMode) -> String {
    let mut html = String::with_capacity(64 * 1024);
    let body_class = if dashboard.style.glow { "glow" } else { "" };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Poor People Tax: Lottery to Crypto</title>\n");
    html.push_str(&format!(
        "<script src=\"{}\" charset=\"utf-8\"></script>\n",
        PLOTLY_CDN
    ));
    match mode {
        PageMode::Served => html.push_str("<link rel=\"stylesheet\" href=\"/crt.css\">\n"),
        PageMode::Standalone => {
            html.push_str(&format!("<style>\n{}</style>\n", crate::web::asset_text("crt.css")));
        }
    }
    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body class=\"{}\">\n<div class=\"scanlines\"></div>\n",
        body_class
    ));

    let layout_class = match mode {
        PageMode::Served => "layout",
        PageMode::Standalone => "layout standalone",
    };
    html.push_str(&format!("<div class=\"{}\">\n", layout_class));

    if mode == PageMode::Served {
        sidebar(&mut html, dashboard);
    }

    html.push_str("<main>\n");
    if mode == PageMode::Standalone {
        load_failures(&mut html, dashboard);
    }
    header(&mut html);
    for section in &dashboard.sections {
        render_section(&mut html, section, mode);
        if section.dataset == Dataset::Lottery {
            transition_memo(&mut html);
        }
    }
    synthesis(&mut html);
    reflection(&mut html);
    footer(&mut html);
    html.push_str("</main>\n</div>\n");

    match mode {
        PageMode::Served => html.push_str("<script src=\"/dashboard.js\"></script>\n"),
        PageMode::Standalone => {
            html.push_str(&format!(
                "<script>\n{}</script>\n",
                crate::web::asset_text("dashboard.js")
            ));
        }
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn file_line(html: &mut String, file: &FileStatus) {
    let class = if file.ok { "status-ok" } else { "status-missing" };
    html.push_str(&format!(
        "<li><code>{}</code>: <span class=\"{}\">{}</span>",
        escape(&file.file),
        class,
        file.label()
    ));
    if let Some(diagnostic) = &file.diagnostic {
        html.push_str(&format!(
            "<div class=\"small-caption diagnostic\">{}</div>",
            inline_code(diagnostic)
        ));
    }
    html.push_str("</li>\n");
}

/// Failed loads as error notices, for pages without a sidebar.
fn load_failures(html: &mut String, dashboard: &Dashboard) {
    for diagnostic in dashboard.files.iter().filter_map(|f| f.diagnostic.as_deref()) {
        html.push_str(&format!(
            "<div class=\"notice error\">{}</div>\n",
            inline_code(diagnostic)
        ));
    }
}

fn sidebar(html: &mut String, dashboard: &Dashboard) {
    html.push_str("<aside class=\"sidebar\">\n<h2>Controls</h2>\n");
    html.push_str("<div class=\"small-caption\">Files detected in the data directory:</div>\n<ul>\n");
    for file in &dashboard.files {
        file_line(html, file);
    }
    html.push_str("</ul>\n<hr>\n");

    html.push_str("<form id=\"controls\" method=\"get\" action=\"/\">\n");
    html.push_str("<input type=\"hidden\" name=\"controls\" value=\"1\">\n");
    html.push_str(&format!(
        "<label><input type=\"checkbox\" name=\"glow\" value=\"on\"{}> Extra glow</label>\n",
        if dashboard.style.glow { " checked" } else { "" }
    ));

    html.push_str("<fieldset>\n<legend>Line style for time series</legend>\n");
    for mode in [LineMode::LinesMarkers, LineMode::Markers] {
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"line_style\" value=\"{}\"{}> {}</label>\n",
            mode.as_str(),
            if dashboard.style.line_mode == mode { " checked" } else { "" },
            mode.label()
        ));
    }
    html.push_str("</fieldset>\n");

    if let Some(control) = dashboard.year_control {
        html.push_str(&format!(
            "<label>Select a year: <span id=\"year-value\">{}</span>\n\
             <input type=\"range\" name=\"year\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\"></label>\n",
            control.selected, control.range.min, control.range.max, control.selected
        ));
    }

    html.push_str("<noscript><button type=\"submit\">Apply</button></noscript>\n</form>\n</aside>\n");
}

fn header(html: &mut String) {
    html.push_str(
        "<div class=\"crt-panel header\">\n\
         <h1>Poor People Tax: from tickets to tokens</h1>\n\
         <div class=\"tagline\">Lottery to Crypto (Under-30 focus, 2003-2024)</div>\n\
         <div class=\"small-caption\" style=\"margin-top:.35rem;\">\
         Retro glitchcore weather-channel look. Dark CRT background with cyan and pink accents.</div>\n\
         </div>\n",
    );
}

fn render_section(html: &mut String, section: &Section, mode: PageMode) {
    html.push_str(&format!(
        "<section class=\"section\" id=\"{}\">\n<h2>{}</h2>\n",
        section.dataset.slug(),
        escape(&section.title)
    ));

    if section.dataset == Dataset::Concentration {
        html.push_str(
            "<p class=\"small-caption\"><em>Explore how Bitcoin ownership concentration changed over time.</em></p>\n",
        );
    }

    match &section.body {
        SectionBody::Chart {
            figure,
            caption,
            download,
        } => {
            let chart_id = format!("chart-{}", section.dataset.slug());
            html.push_str(&format!(
                "<div class=\"chart\" id=\"{id}\"></div>\n\
                 <script type=\"application/json\" data-figure=\"{id}\">{}</script>\n\
                 <div class=\"small-caption\">{}</div>\n",
                script_json(figure),
                escape(caption),
                id = chart_id,
            ));
            if let (PageMode::Served, Some(download)) = (mode, download) {
                html.push_str(&format!(
                    "<a class=\"download\" href=\"/download/{}\" download=\"{}\">{}</a>\n",
                    download.dataset.slug(),
                    escape(&download.file_name),
                    escape(&download.label)
                ));
            }
        }
        SectionBody::Warning { message } => {
            html.push_str(&format!(
                "<div class=\"notice warning\">{}</div>\n",
                inline_code(message)
            ));
        }
        SectionBody::Error { message } => {
            html.push_str(&format!(
                "<div class=\"notice error\">{}</div>\n",
                inline_code(message)
            ));
        }
    }

    html.push_str("</section>\n");
}

fn transition_memo(html: &mut String) {
    html.push_str(
        "<div class=\"crt-panel memo\">\n\
         <h4>The Hope Market Goes Digital</h4>\n\
         Around 2016, the scratchers stopped scratching.<br>\n\
         The gas station tickets and quiet coins gave way to swipes and passwords.<br>\n\
         Hope didn't vanish. It migrated.<br>\n\
         Crypto arrived like a digital lottery: instant, global, endlessly refreshing.<br>\n\
         For a generation raised online, speculation became participation.<br>\n\
         The promise stayed the same (turn luck into freedom),<br>\n\
         only now the dream runs on code, and the house wears a new logo.\n\
         </div>\n",
    );
}

const SYNTHESIS_ROWS: [(&str, &str, &str); 4] = [
    ("Speculative form", "Lottery tickets", "Crypto assets"),
    ("Medium", "Paper", "Apps &amp; exchanges"),
    ("Tone", "Luck &amp; chance", "Innovation &amp; hustle"),
    ("Outcome", "House wins", "...still the house wins"),
];

fn synthesis(html: &mut String) {
    html.push_str(
        "<section class=\"section\">\n<h2>Crossing Lines: From Tickets to Tokens</h2>\n\
         <div class=\"crt-panel synthesis\">\n<table>\n<thead><tr>\
         <th style=\"width:32%\">&nbsp;</th><th style=\"width:34%\">2003-2016</th>\
         <th style=\"width:34%\">2015-2024</th></tr></thead>\n<tbody>\n",
    );
    for (label, lottery, crypto) in SYNTHESIS_ROWS {
        html.push_str(&format!(
            "<tr><td class=\"row-label\">{}</td><td>{}</td><td>{}</td></tr>\n",
            label, lottery, crypto
        ));
    }
    html.push_str(
        "</tbody>\n</table>\n\
         <div class=\"small-caption motto\"><em>\"Different syntax, same dream.\"</em></div>\n\
         </div>\n</section>\n",
    );
}

fn reflection(html: &mut String) {
    html.push_str(
        "<div class=\"crt-panel reflection\">\n\
         <h3>A New Interface for an Old Game</h3>\n\
         <p>The currency changed, but the dream stayed the same.<br>\n\
         Whether <span class=\"accent\">scratched</span>, <span class=\"accent\">swiped</span> \
         or <span class=\"accent\">staked</span>, the promise never really leaves us:<br>\n\
         that hope can be bought, and luck might one day pay off.<br>\n\
         <span style=\"opacity:0.85;\">The difference is in the syntax, not the story.</span></p>\n\
         <div class=\"small-caption credit\">Project by Sarina Parrish, 2025<br>\n\
         Data sources: Gallup, Pew, CNBC, Gemini, BLS</div>\n\
         </div>\n",
    );
}

fn footer(html: &mut String) {
    html.push_str(
        "<footer class=\"small-caption\">\
         Sources: BLS CES 2017-2018 (BLS TED 2019); Gallup (2003, 2007, 2016 lottery participation); \
         Pew, Finder, CNBC/Credit Karma, Gemini (2015-2024 crypto ownership).\
         </footer>\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopemarket::{DashboardConfig, PageParams, Pipeline};

    fn empty_dashboard() -> Dashboard {
        let pipeline = Pipeline::new(DashboardConfig::default().with_data_dir("/nonexistent"));
        let mut cache = pipeline.new_cache();
        pipeline.dashboard(&mut cache, &PageParams::default())
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            inline_code("`a.csv` missing <x>"),
            "<code>a.csv</code> missing &lt;x&gt;"
        );
    }

    #[test]
    fn test_warnings_render_without_charts() {
        let html = render(&empty_dashboard(), PageMode::Served);
        assert!(html.contains("notice warning"));
        assert!(html.contains("<code>lottery_under30.csv</code>"));
        assert!(html.contains("Missing/Empty"));
        assert!(!html.contains("data-figure"));
        assert!(html.contains("The Hope Market Goes Digital"));
    }

    #[test]
    fn test_standalone_inlines_assets() {
        let html = render(&empty_dashboard(), PageMode::Standalone);
        assert!(html.contains("<style>"));
        assert!(!html.contains("href=\"/crt.css\""));
        assert!(!html.contains("id=\"controls\""));
    }

    #[test]
    fn test_load_failures_reach_the_page() {
        let dashboard = empty_dashboard();

        let served = render(&dashboard, PageMode::Served);
        assert!(served.contains("Failed to load"));
        assert!(served.contains("class=\"small-caption diagnostic\""));

        let standalone = render(&dashboard, PageMode::Standalone);
        assert!(standalone.contains("Failed to load"));
        let main = standalone.find("<main>").unwrap();
        let first_error = standalone[main..].find("notice error").unwrap();
        let header = standalone[main..].find("crt-panel header").unwrap();
        assert!(first_error < header);
    }

    #[test]
    fn test_loaded_files_have_no_diagnostic() {
        let mut dashboard = empty_dashboard();
        for file in &mut dashboard.files {
            file.ok = true;
            file.diagnostic = None;
        }
        let html = render(&dashboard, PageMode::Standalone);
        assert!(!html.contains("Failed to load"));
        assert!(!html.contains("notice error"));
    }
}
