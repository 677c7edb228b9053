//! Self-contained HTML report with inline CSS and JavaScript.
//!
//! The tree is a nest of `<details>` elements, largest children first. The
//! inline script applies the same name/level visibility rule as
//! `NodeFilter`: a node shows when it matches, or when any descendant does.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use dirscope_core::{Node, ScanReport, human_size, percent_of};

use crate::rows::extension_rows;

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the full report document.
pub fn render(report: &ScanReport, max_depth: Option<u32>, generated_at: &DateTime<Local>) -> String {
    let root = report.root();
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    let _ = writeln!(html, "<title>dirscope - {}</title>", escape_html(&root.name));
    html.push_str("<style>\n");
    html.push_str(INLINE_CSS);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<header>\n<h1>Directory size report</h1>\n<div class=\"subtitle\">\n");
    let _ = writeln!(
        html,
        "Root: {}<br>\nTotal size: {}",
        escape_html(&root.path.to_string_lossy()),
        escape_html(&human_size(root.size))
    );
    html.push_str("</div>\n</header>\n<main>\n");

    // Tree
    html.push_str("<section class=\"tree\">\n<h2>Tree</h2>\n");
    html.push_str(FILTER_CONTROLS);
    html.push_str("<div id=\"tree\">\n");
    render_node(&mut html, root, root.size, max_depth);
    html.push_str("</div>\n</section>\n");

    // Extensions
    html.push_str("<section class=\"ext\">\n<h2>Size by extension</h2>\n<table>\n");
    html.push_str(
        "<thead><tr><th>Extension</th><th>Size</th><th>Bytes</th><th>% of total</th></tr></thead>\n<tbody>\n",
    );
    for row in extension_rows(report.extensions()) {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td></tr>",
            escape_html(&row.extension),
            escape_html(&row.size_human),
            row.size_bytes,
            row.percent_total
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");

    // Largest files
    let _ = writeln!(
        html,
        "<section class=\"top\">\n<h2>{} largest files</h2>\n<table>",
        report.top_files.len()
    );
    html.push_str(
        "<thead><tr><th>Name</th><th>Size</th><th>Bytes</th><th>% of total</th><th>Path</th></tr></thead>\n<tbody>\n",
    );
    for row in &report.top_files {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td class=\"path\">{}</td></tr>",
            escape_html(&row.name),
            escape_html(&row.size_human),
            row.size_bytes,
            row.percent_total,
            escape_html(&row.path)
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n</main>\n");

    let _ = writeln!(
        html,
        "<footer>Generated by dirscope {} on {}.</footer>",
        env!("CARGO_PKG_VERSION"),
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );
    html.push_str("<script>\n");
    html.push_str(INLINE_JS);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

fn render_node(html: &mut String, node: &Node, total: u64, max_depth: Option<u32>) {
    let name = escape_html(&node.name);
    let name_lc = escape_html(&node.name.to_lowercase());
    let info = format!(
        "{}, level {}, {}, {:.2} %{}",
        node.kind.label(),
        node.level,
        human_size(node.size),
        percent_of(node.size, total),
        if node.access_denied { ", ACCESS DENIED" } else { "" }
    );
    let line = format!(
        "<span class=\"name\">{name}</span> <span class=\"meta\">({})</span><br><span class=\"path\">{}</span>",
        escape_html(&info),
        escape_html(&node.path.to_string_lossy())
    );
    let denied = if node.access_denied { " denied" } else { "" };

    if node.is_file() {
        let _ = writeln!(
            html,
            "<div class=\"node file{denied}\" data-name=\"{name_lc}\" data-level=\"{}\">{line}</div>",
            node.level
        );
        return;
    }

    let open = if node.level <= 1 { " open" } else { "" };
    let _ = write!(
        html,
        "<details class=\"node dir{denied}\" data-name=\"{name_lc}\" data-level=\"{}\"{open}><summary>{line}</summary>",
        node.level
    );

    let children: Vec<&Node> = node
        .children_by_size()
        .into_iter()
        .filter(|child| max_depth.is_none_or(|max| child.level <= max))
        .collect();
    if !children.is_empty() {
        html.push_str("\n<ul>\n");
        for child in children {
            html.push_str("<li>");
            render_node(html, child, total, max_depth);
            html.push_str("</li>\n");
        }
        html.push_str("</ul>");
    }
    html.push_str("</details>\n");
}

const FILTER_CONTROLS: &str = r#"<div id="filters">
  <label>Name contains <input type="text" id="filter-name" placeholder="text to search"></label>
  <label>Max level <input type="number" id="filter-level" min="0" placeholder="e.g. 3"></label>
  <button type="button" id="filter-reset">Reset</button>
</div>
"#;

const INLINE_CSS: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #1f3a5f; color: #fff; padding: 16px 24px; }
header h1 { margin: 0 0 6px 0; font-size: 22px; }
header .subtitle { font-size: 13px; opacity: 0.9; }
main { padding: 16px 24px; }
section { background: #fff; border-radius: 6px; padding: 12px 16px; margin-bottom: 16px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
h2 { font-size: 17px; margin: 4px 0 12px 0; }
#filters { display: flex; gap: 12px; align-items: center; margin-bottom: 10px; font-size: 13px; }
ul { list-style: none; margin: 0; padding-left: 20px; }
summary { cursor: pointer; }
.node { padding: 2px 0; }
.name { font-weight: 600; }
.meta { color: #555; font-size: 12px; }
.path { color: #888; font-size: 11px; font-family: monospace; }
.denied > summary .name, .file.denied .name { color: #b3261e; }
table { border-collapse: collapse; width: 100%; font-size: 13px; }
th, td { border-bottom: 1px solid #e2e4e8; padding: 4px 8px; text-align: left; }
th { background: #eef0f3; }
footer { font-size: 11px; color: #666; padding: 8px 24px 12px 24px; }
"#;

const INLINE_JS: &str = r#"
(function () {
  const nameInput = document.getElementById('filter-name');
  const levelInput = document.getElementById('filter-level');
  const resetBtn = document.getElementById('filter-reset');

  function matches(node, needle, maxLevel) {
    const level = parseInt(node.dataset.level || '0', 10);
    if (maxLevel !== null && level > maxLevel) return false;
    return !needle || (node.dataset.name || '').indexOf(needle) !== -1;
  }

  function apply(node, needle, maxLevel) {
    let visible = matches(node, needle, maxLevel);
    const list = node.tagName === 'DETAILS' ? node.querySelector(':scope > ul') : null;
    if (list) {
      for (const item of list.children) {
        const child = item.firstElementChild;
        const shown = child ? apply(child, needle, maxLevel) : false;
        item.style.display = shown ? '' : 'none';
        visible = shown || visible;
      }
    }
    return visible;
  }

  function refresh() {
    const needle = (nameInput.value || '').trim().toLowerCase();
    const level = parseInt(levelInput.value, 10);
    const maxLevel = isNaN(level) ? null : level;
    const root = document.querySelector('#tree > .node');
    if (root) root.style.display = apply(root, needle, maxLevel) ? '' : 'none';
  }

  nameInput.addEventListener('input', refresh);
  levelInput.addEventListener('input', refresh);
  resetBtn.addEventListener('click', function () {
    nameInput.value = '';
    levelInput.value = '';
    refresh();
  });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dirscope_core::{ExtensionTable, ScanTree, TopFile, TreeStats};
    use std::time::Duration;

    fn report() -> ScanReport {
        let mut root = Node::new_directory("/srv", 0);
        let mut small = Node::new_directory("/srv/small", 1);
        let mut nested = Node::new_directory("/srv/small/nested", 2);
        nested.push_child(Node::new_file("/srv/small/nested/x.bin", 5, 3));
        small.push_child(nested);
        root.push_child(small);
        root.push_child(Node::new_file("/srv/<big>.iso", 500, 1));
        root.push_child(Node::new_denied("/srv/locked", 1));

        let mut extensions = ExtensionTable::new();
        extensions.record("x.bin", 5);
        extensions.record("<big>.iso", 500);

        let top = vec![TopFile {
            path: "/srv/<big>.iso".to_string(),
            name: "<big>.iso".to_string(),
            size_bytes: 500,
            size_human: human_size(500),
            percent_total: 99.0,
            level: 1,
        }];
        let tree = ScanTree::new(root, extensions, TreeStats::new(), Vec::new(), Duration::ZERO);
        ScanReport::new(tree, top)
    }

    fn generated() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_document_sections() {
        let html = render(&report(), None, &generated());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Root: /srv<br>"));
        assert!(html.contains("Total size: 505.0 o"));
        assert!(html.contains("<h2>Size by extension</h2>"));
        assert!(html.contains("<h2>1 largest files</h2>"));
        assert!(html.contains("on 2024-03-09 14:05:00."));
        assert!(html.contains("id=\"filter-reset\""));
        assert!(!html.contains("<big>"));
        assert!(html.contains("&lt;big&gt;.iso"));
    }

    #[test]
    fn test_tree_order_and_open_state() {
        let html = render(&report(), None, &generated());
        // Largest child first.
        let big = html.find("data-name=\"&lt;big&gt;.iso\"").unwrap();
        let small = html.find("data-name=\"small\"").unwrap();
        assert!(big < small);

        assert!(html.contains("data-name=\"small\" data-level=\"1\" open>"));
        assert!(html.contains("data-name=\"nested\" data-level=\"2\"><summary>"));
        assert!(html.contains("class=\"node dir denied\" data-name=\"locked\""));
    }

    #[test]
    fn test_depth_limit_prunes_tree() {
        let html = render(&report(), Some(1), &generated());
        assert!(html.contains("data-name=\"small\""));
        assert!(!html.contains("data-name=\"nested\""));
    }
}
