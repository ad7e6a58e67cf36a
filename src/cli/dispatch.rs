use tracing::debug;

use crate::model::{Config, Records};
use crate::ops::{RecordError, goal_ops, task_ops};
use crate::tree::{NodeId, ROOT, Tree};

use super::grammar::{Action, Binding, Command, CommandKind};

/// Error type for command dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("missing argument after `{0}`")]
    MissingArgument(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("expected `on` or `off`, got `{0}`")]
    InvalidBoolToken(String),
    #[error("invalid index `{0}`")]
    InvalidIndex(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("{value} is above the maximum of {max}")]
    OutOfRange { value: u32, max: u32 },
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// The mutable state a dispatch may touch
pub struct Context<'a> {
    pub config: &'a mut Config,
    pub records: &'a mut Records,
}

/// What a successful dispatch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A configuration field was overwritten.
    Bound { binding: Binding, value: String },
    /// An action ran. `changed` is set when the record set was mutated.
    Acted {
        action: Action,
        message: Option<String>,
        changed: bool,
    },
}

impl Outcome {
    pub fn records_changed(&self) -> bool {
        matches!(self, Outcome::Acted { changed: true, .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Acted { message, .. } => message.as_deref(),
            Outcome::Bound { .. } => None,
        }
    }
}

/// Run a full argument list against the grammar.
pub fn run_command(
    tree: &Tree<Command>,
    args: &[String],
    ctx: &mut Context,
) -> Result<Outcome, DispatchError> {
    dispatch(tree, ROOT, args, "", ctx)
}

/// Match `args` against `node`, recursing into the first child whose name
/// matches. Only the resolved leaf mutates anything.
pub fn dispatch(
    tree: &Tree<Command>,
    node: NodeId,
    args: &[String],
    carried: &str,
    ctx: &mut Context,
) -> Result<Outcome, DispatchError> {
    let command = tree.kind(node);
    if command.requires_argument && args.is_empty() {
        return Err(DispatchError::MissingArgument(command.name.to_string()));
    }

    match command.kind {
        CommandKind::Parent => {
            let mut offending: Option<&str> = None;
            for (child_id, child) in tree.children(node) {
                let (carried, rest) = if child.captures_value {
                    match args.split_first() {
                        Some((value, rest)) => (value.as_str(), rest),
                        None => continue,
                    }
                } else {
                    (carried, args)
                };
                match rest.split_first() {
                    Some((token, remaining)) if token == child.name => {
                        debug!(word = child.name, carried, "matched command");
                        return dispatch(tree, child_id, remaining, carried, ctx);
                    }
                    Some((token, _)) => {
                        offending.get_or_insert(token.as_str());
                    }
                    None => {}
                }
            }
            match offending {
                Some(token) => Err(DispatchError::UnknownCommand(token.to_string())),
                None => Err(DispatchError::MissingArgument(command.name.to_string())),
            }
        }
        CommandKind::Value(binding) => {
            let token = args.first().map(String::as_str).unwrap_or_default();
            bind_value(binding, token, ctx.config)?;
            debug!(key = binding.key(), "config value bound");
            Ok(Outcome::Bound {
                binding,
                value: token.to_string(),
            })
        }
        CommandKind::Action(action) => {
            let arg = args.first().map(String::as_str).unwrap_or_default();
            let (message, changed) = run_action(action, arg, carried, ctx.records)?;
            debug!(?action, arg, carried, changed, "action ran");
            Ok(Outcome::Acted {
                action,
                message,
                changed,
            })
        }
    }
}

fn bind_value(binding: Binding, token: &str, config: &mut Config) -> Result<(), DispatchError> {
    match binding {
        Binding::Text(key) => *key.slot(config) = token.to_string(),
        Binding::Flag(key) => {
            *key.slot(config) = match token {
                "on" => true,
                "off" => false,
                other => return Err(DispatchError::InvalidBoolToken(other.to_string())),
            }
        }
    }
    Ok(())
}

fn parse_index(token: &str) -> Result<usize, DispatchError> {
    token
        .parse()
        .map_err(|_| DispatchError::InvalidIndex(token.to_string()))
}

fn parse_number(token: &str) -> Result<u32, DispatchError> {
    token
        .parse()
        .map_err(|_| DispatchError::InvalidNumber(token.to_string()))
}

/// Invoke one action. Returns an optional line to print and whether the
/// record set changed.
fn run_action(
    action: Action,
    arg: &str,
    carried: &str,
    records: &mut Records,
) -> Result<(Option<String>, bool), DispatchError> {
    match action {
        Action::TaskNew => {
            let index = task_ops::add_task(records, arg);
            Ok((Some(index.to_string()), true))
        }
        Action::TaskRemove => {
            task_ops::remove_task(records, parse_index(arg)?)?;
            Ok((None, true))
        }
        Action::GoalNew => {
            let name = goal_ops::name_or_default(records, arg);
            let index = goal_ops::add_tally_goal(records, &name, 0);
            Ok((Some(index.to_string()), true))
        }
        Action::GoalChecklist => {
            let index = goal_ops::add_checklist_goal(records, arg);
            Ok((Some(index.to_string()), true))
        }
        Action::GoalRemove => {
            goal_ops::remove_goal(records, parse_index(arg)?)?;
            Ok((None, true))
        }
        Action::TallyMax => {
            let goal = goal_ops::find_goal_mut(records, parse_index(carried)?)?;
            if arg.is_empty() {
                let tally = goal_ops::tally_of(goal)?;
                return Ok((Some(tally.max.to_string()), false));
            }
            goal_ops::set_max(goal, parse_number(arg)?)?;
            Ok((None, true))
        }
        Action::TallyProgress => {
            let goal = goal_ops::find_goal_mut(records, parse_index(carried)?)?;
            let tally = goal_ops::tally_of(goal)?;
            if arg.is_empty() {
                return Ok((Some(tally.progress.to_string()), false));
            }
            let value = parse_number(arg)?;
            if value > tally.max {
                return Err(DispatchError::OutOfRange {
                    value,
                    max: tally.max,
                });
            }
            goal_ops::set_progress(goal, value)?;
            Ok((None, true))
        }
        Action::ElementAdd => {
            let goal = goal_ops::find_goal_mut(records, parse_index(carried)?)?;
            goal_ops::add_element(goal, arg)?;
            Ok((None, true))
        }
        Action::ElementToggle => {
            let goal = goal_ops::find_goal_mut(records, parse_index(carried)?)?;
            let position = parse_index(arg)?;
            let done = goal_ops::toggle_element(goal, position)?;
            let name = &goal.elements[position].name;
            let state = if done { "done" } else { "open" };
            Ok((Some(format!("{name}: {state}")), true))
        }
    }
}
