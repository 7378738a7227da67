//! Simple Output and Reporting
//!
//! Renders a [`SchemaView`] for the terminal or as JSON.

use crate::arguments::ArgumentDefinition;
use crate::cli::{OutputFormat, VerbosityLevel};
use crate::tree::NamespaceNode;
use crate::view::SchemaView;

/// Simple output formatter for human-readable documentation
pub struct Output {
    verbosity: VerbosityLevel,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Formatter that never emits color codes
    pub fn plain(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            show_colors: false,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn render(&self, view: &SchemaView, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(view),
            OutputFormat::Human => Ok(self.format_view(view)),
        }
    }

    pub fn format_view(&self, view: &SchemaView) -> String {
        if view.is_file {
            self.format_component(view)
        } else {
            self.format_index(view)
        }
    }

    fn format_header(&self, view: &SchemaView) -> String {
        let mut output = format!(
            "{} {}\n",
            self.colorize(&view.extension_name, "1"),
            self.colorize(&format!("({} @ {})", view.component_set, view.version), "2")
        );
        if !view.namespace_url.is_empty() {
            output.push_str(&format!(
                "xmlns:{}=\"{}\"\n",
                view.namespace_alias, view.namespace_url
            ));
        }
        output
    }

    fn format_component(&self, view: &SchemaView) -> String {
        let name = view.name.as_deref().unwrap_or_default();

        if self.verbosity == VerbosityLevel::Quiet {
            let mut output = format!("{}\n", name);
            for argument in view.arguments.values() {
                output.push_str(&format!("  {}\n", self.format_argument_line(argument)));
            }
            return output;
        }

        let mut output = self.format_header(view);
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            self.colorize(name, "1;36"),
            self.colorize(&format!("<{}:{} />", view.namespace_name, view.element_name), "2")
        ));

        if !view.doc_comment.trim().is_empty() {
            output.push('\n');
            output.push_str(view.doc_comment.trim());
            output.push('\n');
        }

        if !view.arguments.is_empty() {
            output.push_str("\nArguments:\n");
            for argument in view.arguments.values() {
                output.push_str(&format!("  {}\n", self.format_argument_line(argument)));
                let description = argument.description.trim();
                if !description.is_empty() {
                    for line in description.lines() {
                        output.push_str(&format!("      {}\n", line));
                    }
                }
            }
        }

        if self.verbosity == VerbosityLevel::Verbose {
            output.push_str("\nNamespace tree:\n");
            output.push_str(&format_tree(&view.tree));
        }

        output
    }

    fn format_index(&self, view: &SchemaView) -> String {
        let subtree = view.tree.find(view.segments.as_slice());

        if self.verbosity == VerbosityLevel::Quiet {
            return subtree.map(format_tree).unwrap_or_default();
        }

        let mut output = self.format_header(view);

        if let Some(readme) = view.readme.as_deref().filter(|_| !view.markdown_blacklisted) {
            output.push('\n');
            output.push_str(readme.trim());
            output.push('\n');
        }

        output.push('\n');
        match subtree {
            Some(node) => output.push_str(&format_tree(node)),
            None => output.push_str(&format!(
                "{} {}\n",
                self.colorize("Nothing found at", "33"),
                view.class_name
            )),
        }

        if self.verbosity == VerbosityLevel::Verbose && !view.component_sets.is_empty() {
            output.push_str(&format!(
                "\nComponent sets: {}\n",
                view.component_sets.join(", ")
            ));
            output.push_str(&format!("Schema file: {}\n", view.schema_file));
        }

        output
    }

    fn format_argument_line(&self, argument: &ArgumentDefinition) -> String {
        let mut line = format!("{}: {}", argument.name, argument.type_name);
        if argument.required {
            line.push_str(&format!(" {}", self.colorize("(required)", "31")));
        }
        if let Some(default) = &argument.default {
            line.push_str(&format!(" = {}", default));
        }
        line
    }
}

/// Indented outline of a tree, folders with a trailing `/`
pub fn format_tree(node: &NamespaceNode) -> String {
    let mut output = String::new();
    if let Some(children) = node.children() {
        for child in children.values() {
            write_node(child, 1, &mut output);
        }
    }
    output
}

fn write_node(node: &NamespaceNode, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        NamespaceNode::Folder { name, children } => {
            output.push_str(&format!("{}{}/\n", indent, name));
            for child in children.values() {
                write_node(child, depth + 1, output);
            }
        }
        NamespaceNode::Leaf { name } => {
            output.push_str(&format!("{}{}\n", indent, name));
        }
    }
}
