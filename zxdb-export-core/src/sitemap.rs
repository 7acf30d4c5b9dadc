//! `sitemap.xml` in the sitemaps.org 0.9 protocol: the games collection page
//! plus one detail page per indexed entry.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::contract::IndexEntry;

const COLLECTION_CHANGEFREQ: &str = "weekly";
const COLLECTION_PRIORITY: &str = "0.8";
const ENTRY_CHANGEFREQ: &str = "monthly";
const ENTRY_PRIORITY: &str = "0.6";

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    // Writing into a String cannot fail.
    let _ = write!(
        xml,
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{lastmod}</lastmod>\n    <changefreq>{changefreq}</changefreq>\n    <priority>{priority}</priority>\n  </url>\n",
        escape_xml(loc)
    );
}

/// Renders the sitemap for `index` under `base_url`, stamped with `lastmod`.
pub fn render_sitemap(base_url: &str, index: &[IndexEntry], lastmod: NaiveDate) -> String {
    let base = base_url.trim_end_matches('/');
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let mut xml = String::with_capacity(128 + index.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    push_url(
        &mut xml,
        &format!("{base}/games"),
        &lastmod,
        COLLECTION_CHANGEFREQ,
        COLLECTION_PRIORITY,
    );
    for entry in index {
        push_url(
            &mut xml,
            &format!("{base}/games/{}", entry.id),
            &lastmod,
            ENTRY_CHANGEFREQ,
            ENTRY_PRIORITY,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}
