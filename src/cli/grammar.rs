//! The command grammar: which words lead where, and what each leaf does.

use crate::model::Config;
use crate::tree::{NodeKind, ROOT, Tree};

/// Text settings reachable from `config ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    DataPath,
    GitUsername,
    GitMail,
    GitToken,
}

/// On/off settings reachable from `config ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKey {
    Debug,
}

/// A configuration field a value node writes to, addressed by key rather
/// than by reference so the grammar can be built before config is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Text(TextKey),
    Flag(FlagKey),
}

impl TextKey {
    pub fn slot(self, config: &mut Config) -> &mut String {
        match self {
            TextKey::DataPath => &mut config.data_path,
            TextKey::GitUsername => &mut config.git.username,
            TextKey::GitMail => &mut config.git.mail,
            TextKey::GitToken => &mut config.git.token,
        }
    }
}

impl FlagKey {
    pub fn slot(self, config: &mut Config) -> &mut bool {
        match self {
            FlagKey::Debug => &mut config.debug,
        }
    }
}

impl Binding {
    /// Dotted config key, used in log lines
    pub fn key(self) -> &'static str {
        match self {
            Binding::Text(TextKey::DataPath) => "data_path",
            Binding::Text(TextKey::GitUsername) => "git.username",
            Binding::Text(TextKey::GitMail) => "git.mail",
            Binding::Text(TextKey::GitToken) => "git.token",
            Binding::Flag(FlagKey::Debug) => "debug",
        }
    }
}

/// Record-level operations a leaf can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TaskNew,
    TaskRemove,
    GoalNew,
    GoalChecklist,
    GoalRemove,
    TallyMax,
    TallyProgress,
    ElementAdd,
    ElementToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Parent,
    Value(Binding),
    Action(Action),
}

/// One word of the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    /// Dispatch fails with `MissingArgument` when nothing follows this word.
    pub requires_argument: bool,
    /// The argument *before* this word is captured and handed down to the
    /// leaf as the carried value (e.g. the goal index in `tally 0 max`).
    pub captures_value: bool,
    pub kind: CommandKind,
}

impl NodeKind for Command {
    fn is_leaf(&self) -> bool {
        !matches!(self.kind, CommandKind::Parent)
    }
}

impl Command {
    pub fn parent(name: &'static str) -> Self {
        Command {
            name,
            requires_argument: true,
            captures_value: false,
            kind: CommandKind::Parent,
        }
    }

    pub fn value(name: &'static str, binding: Binding) -> Self {
        Command {
            name,
            requires_argument: true,
            captures_value: false,
            kind: CommandKind::Value(binding),
        }
    }

    pub fn action(name: &'static str, action: Action, requires_argument: bool) -> Self {
        Command {
            name,
            requires_argument,
            captures_value: false,
            kind: CommandKind::Action(action),
        }
    }

    pub fn capturing(mut self) -> Self {
        self.captures_value = true;
        self
    }
}

/// Build the full command grammar. The root word stands for the program
/// itself and is never matched against an argument.
pub fn build_grammar() -> Tree<Command> {
    let mut tree = Tree::new(Command::parent("tally"));

    let config = tree.add_child(ROOT, Command::parent("config"));
    tree.add_child(
        config,
        Command::value("data_path", Binding::Text(TextKey::DataPath)),
    );
    tree.add_child(config, Command::value("debug", Binding::Flag(FlagKey::Debug)));
    let git = tree.add_child(config, Command::parent("git"));
    tree.add_child(
        git,
        Command::value("username", Binding::Text(TextKey::GitUsername)),
    );
    tree.add_child(git, Command::value("mail", Binding::Text(TextKey::GitMail)));
    tree.add_child(git, Command::value("token", Binding::Text(TextKey::GitToken)));

    let task = tree.add_child(ROOT, Command::parent("task"));
    tree.add_child(task, Command::action("new", Action::TaskNew, true));
    tree.add_child(task, Command::action("remove", Action::TaskRemove, true));

    let goal = tree.add_child(ROOT, Command::parent("goal"));
    tree.add_child(goal, Command::action("new", Action::GoalNew, false));
    tree.add_child(
        goal,
        Command::action("checklist", Action::GoalChecklist, true),
    );
    tree.add_child(goal, Command::action("remove", Action::GoalRemove, true));

    let tally = tree.add_child(goal, Command::parent("tally"));
    tree.add_child(
        tally,
        Command::action("max", Action::TallyMax, false).capturing(),
    );
    tree.add_child(
        tally,
        Command::action("progress", Action::TallyProgress, false).capturing(),
    );

    let elements = tree.add_child(goal, Command::parent("elements"));
    tree.add_child(
        elements,
        Command::action("add", Action::ElementAdd, true).capturing(),
    );
    tree.add_child(
        elements,
        Command::action("toggle", Action::ElementToggle, true).capturing(),
    );

    tree
}
