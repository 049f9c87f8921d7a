use crate::collector::SourceFragment;
use crate::trie::{LineCounts, Trie, TrieNode};
use tracing::{debug, info};

/// Logs a tree of the bundled files with the lines kept and dropped in each.
pub fn print_stats(fragments: &[SourceFragment]) {
    debug!("Printing statistics for {} fragments", fragments.len());
    let mut trie = Trie::new();

    for fragment in fragments {
        trie.insert(
            &fragment.label,
            LineCounts {
                kept: fragment.report.kept,
                dropped: fragment.report.dropped(),
            },
        );
    }

    let total = trie.get_root().calculate_total();
    info!("Overall ({} lines kept, {} dropped)", total.kept, total.dropped);
    for line in render_tree(trie.get_root(), "") {
        info!("{}", line);
    }
}

fn render_tree(node: &TrieNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut children: Vec<_> = node.children.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));

    for (i, (name, child)) in children.iter().enumerate() {
        let is_last_child = i == children.len() - 1;
        let connector = if is_last_child { "┗━━" } else { "┣━━" };

        match child.counts {
            Some(counts) if child.children.is_empty() => {
                lines.push(format!(
                    "{}{} 📄 {} ({} kept, {} dropped)",
                    prefix, connector, name, counts.kept, counts.dropped
                ));
            }
            _ => {
                let total = child.calculate_total();
                lines.push(format!(
                    "{}{} 📂 {} ({} kept, {} dropped)",
                    prefix, connector, name, total.kept, total.dropped
                ));
                let new_prefix = format!("{}{}    ", prefix, if is_last_child { " " } else { "┃" });
                lines.extend(render_tree(child, &new_prefix));
            }
        }
    }
    lines
}
