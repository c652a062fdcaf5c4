//! Usage rendering.
//!
//! Lists every concrete shape a command can be typed in, e.g.
//! `!give <item:text> [amount:number=1]` or `!warp set <name:text>`.

use chatcmd_foundation::ArgumentValue;

use crate::grammar::{ArgumentSpec, CommandGrammar, CommandSpec, MAIN_WINDOW, SubCommandSpec};

/// Usage lines for one command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandUsage {
    /// Command name.
    pub name: String,
    /// Command description.
    pub description: String,
    /// One line per invocation shape.
    pub lines: Vec<String>,
}

/// Renders usage for every command in the grammar.
///
/// Subcommand trees are followed at most `max_depth` levels deep.
#[must_use]
pub fn command_usages(grammar: &CommandGrammar, max_depth: usize) -> Vec<CommandUsage> {
    grammar
        .commands
        .iter()
        .map(|(name, spec)| CommandUsage {
            name: name.clone(),
            description: spec.description.clone(),
            lines: command_lines(&grammar.prefix, name, spec, max_depth),
        })
        .collect()
}

fn command_lines(prefix: &str, name: &str, spec: &CommandSpec, max_depth: usize) -> Vec<String> {
    let head = format!("{prefix}{name}");
    let main_args = spec
        .allowed_arguments
        .as_ref()
        .and_then(|w| w.get(MAIN_WINDOW))
        .map(|names| render_window(spec, names));

    let mut lines = Vec::new();
    if let Some(args) = &main_args {
        lines.push(join(&[head.as_str(), args.as_str()]));
    }
    if let Some(root) = &spec.sub_commands {
        let args = main_args.as_deref().unwrap_or_default();
        walk(&head, args, spec, root, &mut Vec::new(), max_depth, &mut lines);
    }
    if lines.is_empty() {
        lines.push(head);
    }
    lines
}

/// Emits one line per subcommand path; nested paths come before their
/// parent.
fn walk(
    head: &str,
    main_args: &str,
    spec: &CommandSpec,
    level: &SubCommandSpec,
    path: &mut Vec<String>,
    depth_left: usize,
    out: &mut Vec<String>,
) {
    if depth_left == 0 {
        return;
    }
    for (name, entry) in &level.commands {
        path.push(name.clone());
        if let Some(nested) = &entry.sub_commands {
            walk(head, main_args, spec, nested, path, depth_left - 1, out);
        }
        let own_args = render_window(spec, spec.window(name));
        let mut parts = vec![head];
        parts.extend(path.iter().map(String::as_str));
        parts.push(main_args);
        parts.push(&own_args);
        out.push(join(&parts));
        path.pop();
    }
}

fn render_window(spec: &CommandSpec, names: &[String]) -> String {
    let rendered: Vec<String> = names
        .iter()
        .filter_map(|name| spec.arguments.get(name).map(|arg| render_argument(name, arg)))
        .collect();
    rendered.join(" ")
}

fn render_argument(name: &str, arg: &ArgumentSpec) -> String {
    let placeholder = arg.kind.placeholder();
    if arg.required {
        format!("<{name}:{placeholder}>")
    } else {
        let default = arg
            .default
            .as_ref()
            .map(|v: &ArgumentValue| format!("={v}"))
            .unwrap_or_default();
        format!("[{name}:{placeholder}{default}]")
    }
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
