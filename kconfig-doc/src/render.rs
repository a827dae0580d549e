//! HTML rendering.
//!
//! The walk produces two streams at once: table-of-contents lines and body
//! sections. Both are collected in memory in traversal order and joined only
//! by [`HtmlDocument::write_to`], after the whole tree has been visited, so
//! the table of contents precedes the body. Nothing reaches the output if the
//! walk fails.

use std::{
    borrow::Cow,
    io::{self, Write},
};

use crate::entry::ConfigEntry;

/// Sentence appended to options that cannot be set by the user.
pub const HIDDEN_NOTE: &str =
    "This is a hidden, internal configuration variable that cannot be explicitly set by the user.";

/// Fixed texts of the page header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Page title, also used for the banner.
    pub title: String,
    /// Date shown as "Last Updated".
    pub last_updated: String,
}

impl Banner {
    pub fn new(title: impl Into<String>, last_updated: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            last_updated: last_updated.into(),
        }
    }
}

/// Table of contents and body of the document being generated.
#[derive(Debug, Default, Clone)]
pub struct HtmlDocument {
    toc: String,
    body: String,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table-of-contents lines produced so far.
    pub fn toc(&self) -> &str {
        &self.toc
    }

    /// Body sections produced so far.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Heading for the whole tree, emitted before the walk starts.
    pub fn root(&mut self, anchor: usize, paranum: &str, title: &str) {
        let title = escape_html(title);
        self.toc.push_str(&format!(
            "<li><a href=\"#menu_{anchor}\">{paranum} {title}</a></li>\n"
        ));
        self.body.push_str(&format!(
            "<h1><a name=\"menu_{anchor}\">{paranum} {title}</a></h1>\n"
        ));
    }

    /// Opens a menu: heading in both streams, nested list in the TOC.
    pub fn open_menu(&mut self, anchor: usize, paranum: &str, title: Option<&str>) {
        let heading = match title {
            Some(title) => format!("{paranum} Menu: {}", escape_html(title)),
            None => format!("{paranum} Menu"),
        };
        self.toc.push_str(&format!(
            "<li><a href=\"#menu_{anchor}\">{heading}</a></li>\n<ul>\n"
        ));
        self.body.push_str(&format!(
            "\n<h1><a name=\"menu_{anchor}\">{heading}</a></h1>\n"
        ));
    }

    pub fn close_menu(&mut self) {
        self.toc.push_str("</ul>\n");
    }

    /// Opens a choice: heading in both streams, indented list in the body.
    pub fn open_choice(&mut self, anchor: usize, paranum: &str) {
        self.toc.push_str(&format!(
            "<li><a href=\"#choice_{anchor}\">{paranum} Choice</a></li>\n"
        ));
        self.body.push_str(&format!(
            "\n<h3><a name=\"choice_{anchor}\">{paranum} Choice</a></h3>\n<ul>\n"
        ));
    }

    pub fn close_choice(&mut self) {
        self.body.push_str("</ul>\n");
    }

    /// Renders one option.
    ///
    /// With a paragraph number the option also gets a TOC line; without one
    /// (inside a choice) it only appears in the body.
    pub fn entry(&mut self, entry: &ConfigEntry, paranum: Option<&str>) {
        let name = escape_html(&entry.name);
        let mut heading = match paranum {
            Some(paranum) => format!("{paranum} <code>CONFIG_{name}</code>"),
            None => format!("<code>CONFIG_{name}</code>"),
        };
        if let Some(desc) = &entry.description {
            heading.push_str(": ");
            heading.push_str(&escape_html(desc));
        }

        if paranum.is_some() {
            self.toc
                .push_str(&format!("<li><a href=\"#{name}\">{heading}</a></li>\n"));
        }
        self.body
            .push_str(&format!("<h3><a name=\"{name}\">{heading}</a></h3>\n<ul>\n"));

        if let Some(label) = entry.value_type.label() {
            self.body
                .push_str(&format!("  <li><i>Type</i>: {label}</li>\n"));
        }
        if let Some(default) = &entry.default {
            self.body.push_str(&format!(
                "  <li><i>Default</i>: {}</li>\n",
                escape_html(default)
            ));
        }
        if !entry.dependencies.is_empty() {
            self.body.push_str(&format!(
                "  <li><i>Dependencies</i>: {}</li>\n",
                escape_html(&entry.dependencies.join(", "))
            ));
        }
        self.body.push_str(&format!(
            "  <li><i>Kconfig file</i>: <code>{}</code></li>\n",
            escape_html(&entry.kconfig_file.to_string_lossy())
        ));
        if entry.is_hidden() {
            self.body.push_str(&format!("<p>{HIDDEN_NOTE}</p>\n"));
        }
        self.body.push_str("</ul>\n");
    }

    /// Writes the page header and the table of contents.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_head<W: Write>(&self, out: &mut W, banner: &Banner) -> io::Result<()> {
        let title = escape_html(&banner.title);
        write!(
            out,
            "<html>\n\
             <head>\n\
             <title>{title}</title>\n\
             </head>\n\
             <body background=\"backgd.gif\">\n\
             <hr><hr>\n\
             <table width =\"100%\">\n\
             <tr align=\"center\" bgcolor=\"#e4e4e4\">\n\
             <td>\n\
             <h1><big><font color=\"#3c34ec\"><i>{title}</i></font></big></h1>\n\
             <p>Last Updated: {}</p>\n\
             </td>\n\
             </tr>\n\
             </table>\n\
             <center><h1>Table of contents</h1></center>\n\
             <ul>\n",
            escape_html(&banner.last_updated)
        )?;
        out.write_all(self.toc.as_bytes())?;
        out.write_all(b"</ul>\n")
    }

    /// Copies the staged body and writes the page trailer.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_body<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.body.as_bytes())?;
        out.write_all(b"</body>\n</html>\n")?;
        out.flush()
    }

    /// Writes the complete document.
    ///
    /// # Errors
    ///
    /// Returns any error from `out`.
    pub fn write_to<W: Write>(&self, out: &mut W, banner: &Banner) -> io::Result<()> {
        self.write_head(out, banner)?;
        self.write_body(out)
    }
}

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ValueType;

    fn entry(description: Option<&str>) -> ConfigEntry {
        let mut entry = ConfigEntry::new("FOO", &[], "./Kconfig");
        entry.value_type = ValueType::Bool;
        entry.description = description.map(str::to_string);
        entry.default = Some("y".to_string());
        entry
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html("a < b && \"c\" > d"),
            "a &lt; b &amp;&amp; &quot;c&quot; &gt; d"
        );
    }

    #[test]
    fn test_entry_with_number() {
        let mut doc = HtmlDocument::new();
        doc.entry(&entry(Some("Enable Foo")), Some("1.2"));
        assert_eq!(
            doc.toc(),
            "<li><a href=\"#FOO\">1.2 <code>CONFIG_FOO</code>: Enable Foo</a></li>\n"
        );
        assert_eq!(
            doc.body(),
            "<h3><a name=\"FOO\">1.2 <code>CONFIG_FOO</code>: Enable Foo</a></h3>\n\
             <ul>\n  \
             <li><i>Type</i>: Boolean</li>\n  \
             <li><i>Default</i>: y</li>\n  \
             <li><i>Kconfig file</i>: <code>./Kconfig</code></li>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_entry_inside_choice_skips_toc() {
        let mut doc = HtmlDocument::new();
        doc.entry(&entry(Some("Enable Foo")), None);
        assert!(doc.toc().is_empty());
        assert!(
            doc.body()
                .starts_with("<h3><a name=\"FOO\"><code>CONFIG_FOO</code>: Enable Foo</a></h3>")
        );
    }

    #[test]
    fn test_hidden_entry_note_and_dependencies() {
        let mut doc = HtmlDocument::new();
        let mut e = entry(None);
        e.dependencies = vec!["ARCH_ARM".to_string(), "NET".to_string()];
        doc.entry(&e, Some("3"));
        assert!(doc.body().contains("<li><i>Dependencies</i>: ARCH_ARM, NET</li>"));
        assert!(doc.body().contains(HIDDEN_NOTE));
        assert!(doc.toc().contains("3 <code>CONFIG_FOO</code></a>"));
    }

    #[test]
    fn test_menu_and_choice_markup() {
        let mut doc = HtmlDocument::new();
        doc.open_menu(1, "2", Some("Drivers"));
        doc.open_choice(0, "2.1");
        doc.close_choice();
        doc.close_menu();
        doc.open_menu(2, "3", None);
        doc.close_menu();
        assert_eq!(
            doc.toc(),
            "<li><a href=\"#menu_1\">2 Menu: Drivers</a></li>\n<ul>\n\
             <li><a href=\"#choice_0\">2.1 Choice</a></li>\n\
             </ul>\n\
             <li><a href=\"#menu_2\">3 Menu</a></li>\n<ul>\n\
             </ul>\n"
        );
        assert_eq!(
            doc.body(),
            "\n<h1><a name=\"menu_1\">2 Menu: Drivers</a></h1>\n\
             \n<h3><a name=\"choice_0\">2.1 Choice</a></h3>\n<ul>\n\
             </ul>\n\
             \n<h1><a name=\"menu_2\">3 Menu</a></h1>\n"
        );
    }

    #[test]
    fn test_write_orders_toc_before_body() {
        let mut doc = HtmlDocument::new();
        doc.root(0, "1", "NuttX Configuration Variables");
        doc.entry(&entry(Some("Enable Foo")), Some("1"));

        let mut out = Vec::new();
        doc.write_to(&mut out, &Banner::new("NuttX Configuration Variables", "March 01, 2024"))
            .unwrap();
        let html = String::from_utf8(out).unwrap();

        assert!(html.starts_with("<html>\n<head>\n<title>NuttX Configuration Variables</title>"));
        assert!(html.contains("<p>Last Updated: March 01, 2024</p>"));
        let toc = html.find("<li><a href=\"#FOO\">").unwrap();
        let body = html.find("<h3><a name=\"FOO\">").unwrap();
        assert!(toc < body);
        assert!(html.ends_with("</ul>\n</body>\n</html>\n"));
    }
}
