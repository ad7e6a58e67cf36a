//! Modal keystroke navigation.
//!
//! The motion tree is a static map of pages. Each accepted keystroke pushes
//! one [`Crumb`] onto the [`Breadcrumb`]; "back" pops one. Numeric crumbs keep
//! only the digit that was typed, so the record they point at is looked up
//! by position in the live collection every time it is needed.

use tracing::debug;

use crate::model::{Element, Goal, Records, Task};
use crate::tree::{NodeId, NodeKind, ROOT, Tree};

/// Largest maximum a new tally goal may be given from the UI
pub const NEW_GOAL_MAX: u32 = 9999;

/// What the screen shows for a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Goals,
    NewGoal,
    Goal,
    Progress,
    NewElement,
    Element,
    Tasks,
    NewTask,
    Task,
    Config,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Goals => "goals",
            Page::NewGoal => "new goal",
            Page::Goal => "goal",
            Page::Progress => "progress",
            Page::NewElement => "new element",
            Page::Element => "element",
            Page::Tasks => "tasks",
            Page::NewTask => "new task",
            Page::Task => "task",
            Page::Config => "config",
        }
    }
}

/// Record collections a numeric motion can index into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Goals,
    /// Elements of the goal selected further up the breadcrumb
    Elements,
    Tasks,
}

/// How a motion node is reached from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Root,
    Mnemonic(char),
    Numeric(Collection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub trigger: Trigger,
    pub page: Page,
}

impl NodeKind for Motion {}

impl Motion {
    fn mnemonic(key: char, page: Page) -> Self {
        Motion {
            trigger: Trigger::Mnemonic(key),
            page,
        }
    }

    fn numeric(collection: Collection, page: Page) -> Self {
        Motion {
            trigger: Trigger::Numeric(collection),
            page,
        }
    }
}

/// Build the motion tree.
pub fn build_motions() -> Tree<Motion> {
    let mut tree = Tree::new(Motion {
        trigger: Trigger::Root,
        page: Page::Home,
    });

    let goals = tree.add_child(ROOT, Motion::mnemonic('g', Page::Goals));
    tree.add_child(goals, Motion::mnemonic('+', Page::NewGoal));
    let goal = tree.add_child(goals, Motion::numeric(Collection::Goals, Page::Goal));
    tree.add_child(goal, Motion::mnemonic('p', Page::Progress));
    tree.add_child(goal, Motion::mnemonic('+', Page::NewElement));
    tree.add_child(goal, Motion::numeric(Collection::Elements, Page::Element));

    let tasks = tree.add_child(ROOT, Motion::mnemonic('t', Page::Tasks));
    tree.add_child(tasks, Motion::mnemonic('+', Page::NewTask));
    tree.add_child(tasks, Motion::numeric(Collection::Tasks, Page::Task));

    tree.add_child(ROOT, Motion::mnemonic('c', Page::Config));

    tree
}

/// One step of the motion log. `value` holds the digit of a numeric motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crumb {
    pub node: NodeId,
    pub value: Option<usize>,
}

/// The motion log. Never empty: the root crumb cannot be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    crumbs: Vec<Crumb>,
}

impl Default for Breadcrumb {
    fn default() -> Self {
        Breadcrumb {
            crumbs: vec![Crumb {
                node: ROOT,
                value: None,
            }],
        }
    }
}

impl Breadcrumb {
    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    pub fn depth(&self) -> usize {
        self.crumbs.len()
    }

    pub fn last(&self) -> Crumb {
        self.crumbs[self.crumbs.len() - 1]
    }

    fn push(&mut self, crumb: Crumb) {
        self.crumbs.push(crumb);
    }

    fn pop(&mut self) -> bool {
        if self.crumbs.len() > 1 {
            self.crumbs.pop();
            true
        } else {
            false
        }
    }
}

/// Positions captured by numeric crumbs along the breadcrumb
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub goal: Option<usize>,
    pub element: Option<usize>,
    pub task: Option<usize>,
}

impl Selection {
    pub fn goal<'a>(&self, records: &'a Records) -> Option<&'a Goal> {
        records.goals.get(self.goal?)
    }

    pub fn element<'a>(&self, records: &'a Records) -> Option<&'a Element> {
        self.goal(records)?.elements.get(self.element?)
    }

    pub fn task<'a>(&self, records: &'a Records) -> Option<&'a Task> {
        records.tasks.get(self.task?)
    }

    /// Live size of `collection` under this selection
    pub fn collection_len(&self, collection: Collection, records: &Records) -> usize {
        match collection {
            Collection::Goals => records.goals.len(),
            Collection::Elements => self.goal(records).map_or(0, |g| g.elements.len()),
            Collection::Tasks => records.tasks.len(),
        }
    }
}

/// Motion tree plus the breadcrumb walked through it
#[derive(Debug, Clone)]
pub struct MotionEngine {
    tree: Tree<Motion>,
    breadcrumb: Breadcrumb,
}

impl Default for MotionEngine {
    fn default() -> Self {
        MotionEngine {
            tree: build_motions(),
            breadcrumb: Breadcrumb::default(),
        }
    }
}

impl MotionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn breadcrumb(&self) -> &Breadcrumb {
        &self.breadcrumb
    }

    pub fn motion(&self, crumb: Crumb) -> &Motion {
        self.tree.kind(crumb.node)
    }

    /// Page of the most recent crumb
    pub fn page(&self) -> Page {
        self.motion(self.breadcrumb.last()).page
    }

    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        for crumb in self.breadcrumb.crumbs() {
            if let Trigger::Numeric(collection) = self.motion(*crumb).trigger {
                match collection {
                    Collection::Goals => selection.goal = crumb.value,
                    Collection::Elements => selection.element = crumb.value,
                    Collection::Tasks => selection.task = crumb.value,
                }
            }
        }
        selection
    }

    /// Pop one crumb. No-op at the root.
    pub fn back(&mut self) -> bool {
        let popped = self.breadcrumb.pop();
        if popped {
            debug!(page = self.page().title(), "motion back");
        }
        popped
    }

    /// Apply one navigation keystroke. Digits select from the current
    /// numeric collection; other characters match mnemonics. Returns false
    /// when nothing matched, which is never an error.
    pub fn press(&mut self, key: char, records: &Records) -> bool {
        let current = self.breadcrumb.last().node;

        if let Some(digit) = key.to_digit(10) {
            let digit = digit as usize;
            let numeric = self.tree.children(current).find_map(|(id, m)| match m.trigger {
                Trigger::Numeric(collection) => Some((id, collection)),
                _ => None,
            });
            let Some((node, collection)) = numeric else {
                return false;
            };
            let size = self.selection().collection_len(collection, records);
            if digit >= size {
                debug!(digit, size, "numeric motion out of range");
                return false;
            }
            self.breadcrumb.push(Crumb {
                node,
                value: Some(digit),
            });
        } else {
            let Some(node) = self
                .tree
                .find_child(current, |m| m.trigger == Trigger::Mnemonic(key))
            else {
                return false;
            };
            self.breadcrumb.push(Crumb { node, value: None });
        }

        debug!(page = self.page().title(), depth = self.breadcrumb.depth(), "motion");
        true
    }

    /// Display labels for each crumb, resolving numeric crumbs to record names.
    pub fn labels(&self, records: &Records) -> Vec<String> {
        let mut selection = Selection::default();
        self.breadcrumb
            .crumbs()
            .iter()
            .map(|crumb| {
                let motion = self.motion(*crumb);
                let Trigger::Numeric(collection) = motion.trigger else {
                    return motion.page.title().to_string();
                };
                let name = match collection {
                    Collection::Goals => {
                        selection.goal = crumb.value;
                        selection.goal(records).map(|g| g.name.clone())
                    }
                    Collection::Elements => {
                        selection.element = crumb.value;
                        selection.element(records).map(|e| e.name.clone())
                    }
                    Collection::Tasks => {
                        selection.task = crumb.value;
                        selection.task(records).map(|t| t.name.clone())
                    }
                };
                name.unwrap_or_else(|| format!("#{}", crumb.value.unwrap_or_default()))
            })
            .collect()
    }
}
