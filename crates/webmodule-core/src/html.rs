//! Textual HTML splicing.
//!
//! Pages are static string templates written by different module authors,
//! so nothing here parses HTML. Fragments are spliced in at well-known
//! landmarks found by substring search, with an ordered fallback chain that
//! always produces a document.

/// Preferred navigation placeholder.
pub const NAV_PLACEHOLDER: &str = "<!-- Navigation menu will be auto-injected here -->";
/// Alternate spelling accepted for older templates.
pub const NAV_PLACEHOLDER_ALT: &str = "<!-- Navigation will be automatically injected here -->";

const CONTAINER_ATTR: &str = r#"class="container""#;

/// Where a fragment gets spliced into a template.
///
/// Offsets are byte positions into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    /// A placeholder comment spanning `start..end`, replaced by the fragment.
    Placeholder { start: usize, end: usize },
    /// Right after the opening tag of the first `class="container"` element.
    Container { after: usize },
    /// Right after the `<body>` opening tag.
    Body { after: usize },
    /// Nothing recognizable: prepend to the document.
    Document,
}

/// Find the highest-priority landmark in `template`.
pub fn find_landmark(template: &str) -> Landmark {
    for placeholder in [NAV_PLACEHOLDER, NAV_PLACEHOLDER_ALT] {
        if let Some(start) = template.find(placeholder) {
            return Landmark::Placeholder {
                start,
                end: start + placeholder.len(),
            };
        }
    }
    if let Some(after) = find_container(template) {
        return Landmark::Container { after };
    }
    if let Some(after) = find_open_tag(template, "body") {
        return Landmark::Body { after };
    }
    Landmark::Document
}

/// Splice `fragment` into `template` at its first landmark.
///
/// An empty fragment leaves the template untouched.
pub fn render_into(template: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return template.to_string();
    }
    match find_landmark(template) {
        Landmark::Placeholder { start, end } => {
            let mut out = String::with_capacity(template.len() + fragment.len());
            out.push_str(&template[..start]);
            out.push_str(fragment);
            out.push_str(&template[end..]);
            out
        }
        Landmark::Container { after } | Landmark::Body { after } => {
            let mut out = String::with_capacity(template.len() + fragment.len() + 1);
            out.push_str(&template[..after]);
            out.push('\n');
            out.push_str(fragment);
            out.push_str(&template[after..]);
            out
        }
        Landmark::Document => format!("{}{}", fragment, template),
    }
}

/// Add a stylesheet `<link>` for `href` to a document.
///
/// The link goes before `</head>`. Without a head, one is synthesized right
/// after the `<html>` opening tag, or prepended when there is no `<html>`
/// either. Documents that already link `href` are returned unchanged.
pub fn inject_stylesheet_link(html: &str, href: &str) -> String {
    if links_stylesheet(html, href) {
        return html.to_string();
    }
    let link = format!(r#"<link rel="stylesheet" href="{}">"#, href);

    if let Some(pos) = html.find("</head>") {
        return format!("{}\n{}\n{}", &html[..pos], link, &html[pos..]);
    }
    if let Some(after) = find_open_tag(html, "html") {
        return format!(
            "{}\n<head>\n{}\n</head>\n{}",
            &html[..after],
            link,
            &html[after..]
        );
    }
    format!("<head>\n{}\n</head>\n{}", link, html)
}

/// Whether a `<link>` tag in `html` already points at `href`.
fn links_stylesheet(html: &str, href: &str) -> bool {
    let attr = format!(r#"href="{}""#, href);
    html.match_indices("<link").any(|(pos, _)| {
        let tag = &html[pos..];
        let end = tag.find('>').unwrap_or(tag.len());
        tag[..end].contains(&attr)
    })
}

/// Position just past the `>` of the first element carrying
/// `class="container"`.
fn find_container(template: &str) -> Option<usize> {
    for (attr, _) in template.match_indices(CONTAINER_ATTR) {
        // `data-class="container"` and friends are other attributes
        let separated = attr > 0 && template.as_bytes()[attr - 1].is_ascii_whitespace();
        if !separated {
            continue;
        }
        let Some(tag_start) = template[..attr].rfind('<') else {
            continue;
        };
        // The attribute must sit inside the tag that opened at `tag_start`
        if template[tag_start..attr].contains('>') {
            continue;
        }
        let close = template[attr..].find('>')?;
        return Some(attr + close + 1);
    }
    None
}

/// Position just past the `>` of the first `<name>` or `<name ...>` tag.
fn find_open_tag(html: &str, name: &str) -> Option<usize> {
    let needle = format!("<{}", name);
    for (pos, _) in html.match_indices(&needle) {
        let name_end = pos + needle.len();
        let rest = &html[name_end..];
        match rest.chars().next() {
            Some('>') => return Some(name_end + 1),
            Some(c) if c.is_ascii_whitespace() => {
                let close = rest.find('>')?;
                return Some(name_end + close + 1);
            }
            _ => continue,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAV: &str = "<nav/>";

    #[test]
    fn test_placeholder_replaced_exactly() {
        let template = format!("<body><div class=\"container\">{}<h1>Hi</h1></div></body>", NAV_PLACEHOLDER);
        assert_eq!(
            render_into(&template, NAV),
            "<body><div class=\"container\"><nav/><h1>Hi</h1></div></body>"
        );
    }

    #[test]
    fn test_alternate_placeholder() {
        let template = format!("<p>a</p>{}<p>b</p>", NAV_PLACEHOLDER_ALT);
        assert_eq!(render_into(&template, NAV), "<p>a</p><nav/><p>b</p>");
    }

    #[test]
    fn test_preferred_placeholder_wins() {
        let template = format!("{}|{}", NAV_PLACEHOLDER_ALT, NAV_PLACEHOLDER);
        assert_eq!(
            find_landmark(&template),
            Landmark::Placeholder {
                start: NAV_PLACEHOLDER_ALT.len() + 1,
                end: template.len(),
            }
        );
    }

    #[test]
    fn test_container_fallback() {
        let template = "<body><div class=\"container\"><h1>Hi</h1></div></body>";
        assert_eq!(
            render_into(template, NAV),
            "<body><div class=\"container\">\n<nav/><h1>Hi</h1></div></body>"
        );
    }

    #[test]
    fn test_container_on_other_element_with_attributes() {
        let template = "<body><main id=\"m\" class=\"container\" data-x=\"1\"><p>x</p></main></body>";
        assert_eq!(
            render_into(template, NAV),
            "<body><main id=\"m\" class=\"container\" data-x=\"1\">\n<nav/><p>x</p></main></body>"
        );
    }

    #[test]
    fn test_container_text_outside_tag_ignored() {
        let template = "<body><p>use class=\"container\" here</p></body>";
        assert_eq!(
            render_into(template, NAV),
            "<body>\n<nav/><p>use class=\"container\" here</p></body>"
        );
    }

    #[test]
    fn test_container_attribute_requires_whitespace() {
        let template = "<body><div data-class=\"container\"><p>x</p></div></body>";
        assert_eq!(
            render_into(template, NAV),
            "<body>\n<nav/><div data-class=\"container\"><p>x</p></div></body>"
        );

        let template = "<body><div data-class=\"container\"></div><main\tclass=\"container\"></main></body>";
        assert_eq!(
            render_into(template, NAV),
            "<body><div data-class=\"container\"></div><main\tclass=\"container\">\n<nav/></main></body>"
        );
    }

    #[test]
    fn test_body_fallback() {
        assert_eq!(
            render_into("<html><body><p>x</p></body></html>", NAV),
            "<html><body>\n<nav/><p>x</p></body></html>"
        );
        assert_eq!(
            render_into("<body class=\"dark\"><p>x</p></body>", NAV),
            "<body class=\"dark\">\n<nav/><p>x</p></body>"
        );
    }

    #[test]
    fn test_prepend_without_landmarks() {
        assert_eq!(render_into("<p>bare</p>", NAV), "<nav/><p>bare</p>");
        assert_eq!(find_landmark("<bodyguard>"), Landmark::Document);
    }

    #[test]
    fn test_empty_fragment_is_noop() {
        let template = format!("<body>{}</body>", NAV_PLACEHOLDER);
        assert_eq!(render_into(&template, ""), template);
    }

    #[test]
    fn test_stylesheet_before_head_close() {
        assert_eq!(
            inject_stylesheet_link("<html><head><title>t</title></head><body></body></html>", "/assets/style.css"),
            "<html><head><title>t</title>\n<link rel=\"stylesheet\" href=\"/assets/style.css\">\n</head><body></body></html>"
        );
    }

    #[test]
    fn test_stylesheet_synthesizes_head_after_html() {
        assert_eq!(
            inject_stylesheet_link("<html lang=\"en\"><body></body></html>", "/assets/style.css"),
            "<html lang=\"en\">\n<head>\n<link rel=\"stylesheet\" href=\"/assets/style.css\">\n</head>\n<body></body></html>"
        );
    }

    #[test]
    fn test_stylesheet_prepends_head() {
        assert_eq!(
            inject_stylesheet_link("<p>fragment</p>", "/assets/style.css"),
            "<head>\n<link rel=\"stylesheet\" href=\"/assets/style.css\">\n</head>\n<p>fragment</p>"
        );
    }

    #[test]
    fn test_stylesheet_not_duplicated() {
        let html = "<head><link rel=\"stylesheet\" href=\"/assets/style.css\"></head>";
        assert_eq!(inject_stylesheet_link(html, "/assets/style.css"), html);
    }

    #[test]
    fn test_stylesheet_anchor_is_not_a_link() {
        let html = "<head></head><body><a href=\"/assets/style.css\">css</a></body>";
        assert_eq!(
            inject_stylesheet_link(html, "/assets/style.css"),
            "<head>\n<link rel=\"stylesheet\" href=\"/assets/style.css\">\n</head><body><a href=\"/assets/style.css\">css</a></body>"
        );
    }
}
