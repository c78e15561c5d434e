//! Built-in Markdown rules, one per element kind in the grammar.

use super::{Filter, Rule};
use crate::options::OrderedListStyle;
use crate::tree::NodeRef;
use crate::utilities::PASSTHROUGH_ELEMENTS;

/// Create all built-in Markdown rules
pub fn markdown_rules() -> Vec<Rule> {
    vec![
        heading_rule(),
        paragraph_rule(),
        line_break_rule(),
        horizontal_rule(),
        blockquote_rule(),
        list_rule(),
        list_item_rule(),
        fenced_code_block_rule(),
        code_rule(),
        strong_rule(),
        emphasis_rule(),
        inline_link_rule(),
        image_rule(),
        table_rule(),
        table_section_rule(),
        table_row_rule(),
        table_cell_rule(),
        container_rule(),
    ]
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::tags(&["h1", "h2", "h3", "h4", "h5", "h6"]),
        |_, node, content| {
            let level: usize = node
                .kind()
                .and_then(|kind| kind[1..].parse().ok())
                .unwrap_or(1);
            format!("{} {content}\n\n", "#".repeat(level))
        },
    )
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |_, _, content| format!("{content}\n\n"))
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, _| "\n".to_string())
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |_, _, _| "---\n\n".to_string())
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |_, _, content| {
        format!("> {}\n\n", content.replace('\n', "\n> "))
    })
}

fn list_rule() -> Rule {
    Rule::for_tags(&["ul", "ol"], |_, _, content| format!("{content}\n"))
}

fn list_item_rule() -> Rule {
    Rule::for_tag("li", |renderer, node, content| {
        // Ordered vs. unordered is decided by the immediate parent only; an
        // intermediate wrapper between ol and li makes the item unordered.
        let marker = if node.parent_kind() == Some("ol") {
            match renderer.options().ordered_list_style {
                OrderedListStyle::Literal => "1. ".to_string(),
                OrderedListStyle::Numbered => format!("{}. ", item_ordinal(node)),
            }
        } else {
            format!("{} ", renderer.options().bullet_list_marker)
        };
        format!("{marker}{content}\n")
    })
}

/// 1-based position of a list item among its parent's `li` children.
fn item_ordinal(node: &NodeRef) -> usize {
    let Some(parent) = node.parent() else {
        return 1;
    };
    let mut ordinal = 0;
    for sibling in parent.element_children() {
        if sibling.kind() == Some("li") {
            ordinal += 1;
        }
        if sibling.id() == node.id() {
            break;
        }
    }
    ordinal.max(1)
}

fn fenced_code_block_rule() -> Rule {
    Rule::for_tag("pre", |renderer, node, content| {
        let fence = &renderer.options().fence;
        let language = node
            .prop_str("lang")
            .or_else(|| node.prop_str("language"))
            .unwrap_or("");
        format!("{fence}{language}\n{content}\n{fence}\n\n")
    })
}

fn code_rule() -> Rule {
    Rule::for_tag("code", |_, _, content| format!("`{content}`"))
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |_, _, content| format!("**{content}**"))
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |_, _, content| format!("*{content}*"))
}

fn inline_link_rule() -> Rule {
    Rule::for_tag("a", |_, node, content| {
        format!("[{content}]({})", node.prop_str("href").unwrap_or("#"))
    })
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |_, node, _| {
        format!(
            "![{}]({})",
            node.prop_str("alt").unwrap_or(""),
            node.prop_str("src").unwrap_or("")
        )
    })
}

fn table_rule() -> Rule {
    Rule::for_tag("table", |_, _, content| format!("{content}\n"))
}

fn table_section_rule() -> Rule {
    Rule::for_tags(&["thead", "tbody"], |_, _, content| content.to_string())
}

fn table_row_rule() -> Rule {
    Rule::for_tag("tr", |renderer, node, _| {
        let cells: Vec<String> = node
            .element_children()
            .map(|cell| renderer.render_node(&cell).trim().to_string())
            .collect();
        let row = format!("| {} |\n", cells.join(" | "));

        // Header rows get a separator line with one cell per column. Only a
        // row whose immediate parent is thead counts as a header row.
        if node.parent_kind() == Some("thead") {
            let dashes: Vec<&str> = cells.iter().map(|_| " --- ").collect();
            format!("{row}|{}|\n", dashes.join("|"))
        } else {
            row
        }
    })
}

fn table_cell_rule() -> Rule {
    Rule::for_tags(&["th", "td"], |_, _, content| content.to_string())
}

fn container_rule() -> Rule {
    Rule::new(Filter::tags(PASSTHROUGH_ELEMENTS), |_, _, content| {
        content.to_string()
    })
}
