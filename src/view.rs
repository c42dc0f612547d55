//! View Model and Rendering
//!
//! Builds view models from an [`Activities`] map and renders them into a
//! list of [`DomPatch`] instructions. Nothing here touches a document, so
//! the browser front end, the terminal front end and the tests all consume
//! the same output.

use crate::model::Activities;

// ============ Page Contract ============

/// Container that receives the activity cards
pub const ACTIVITIES_LIST_ID: &str = "activities-list";
/// Activity `<select>` of the signup form
pub const ACTIVITY_SELECT_ID: &str = "activity";
pub const SIGNUP_FORM_ID: &str = "signup-form";
pub const MESSAGE_ID: &str = "message";

pub const CARD_CLASS: &str = "activity-card";
pub const PARTICIPANTS_LIST_CLASS: &str = "participants-list";
pub const DELETE_ICON_CLASS: &str = "delete-icon";
pub const HIDDEN_CLASS: &str = "hidden";

pub const NO_PARTICIPANTS_TEXT: &str = "No participants yet";
pub const SELECT_PLACEHOLDER_TEXT: &str = "-- Select an activity --";
pub const LOAD_FAILED_TEXT: &str = "Failed to load activities. Please try again later.";

// ============ View Models ============

/// Everything one load renders
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub cards: Vec<ActivityCard>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    /// `current/max`
    pub capacity: String,
    pub spots_left: usize,
    pub participants: Vec<ParticipantRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantRow {
    Entry {
        email: String,
        /// Present only when removal is enabled
        removal: Option<RemovalTarget>,
    },
    /// Stands in for an empty roster
    Placeholder,
}

/// The (activity, email) pair a removal affordance points at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovalTarget {
    pub activity: String,
    pub email: String,
}

impl RemovalTarget {
    pub fn new(activity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            email: email.into(),
        }
    }

    /// Question asked before the removal request is sent
    pub fn confirmation_prompt(&self) -> String {
        format!(
            "Are you sure you want to unregister {} from {}?",
            self.email, self.activity
        )
    }
}

impl BoardView {
    /// Build the view for one load. `allow_removal` selects the variant with
    /// removal affordances.
    pub fn build(activities: &Activities, allow_removal: bool) -> Self {
        let cards = activities
            .iter()
            .map(|(name, activity)| {
                let participants = if activity.participants.is_empty() {
                    vec![ParticipantRow::Placeholder]
                } else {
                    activity
                        .participants
                        .iter()
                        .map(|email| ParticipantRow::Entry {
                            email: email.clone(),
                            removal: allow_removal
                                .then(|| RemovalTarget::new(name, email.as_str())),
                        })
                        .collect()
                };

                ActivityCard {
                    name: name.to_string(),
                    description: activity.description.clone(),
                    schedule: activity.schedule.clone(),
                    capacity: activity.capacity(),
                    spots_left: activity.spots_left(),
                    participants,
                }
            })
            .collect();

        Self {
            cards,
            options: activities.names().map(str::to_string).collect(),
        }
    }

    pub fn removal_targets(&self) -> impl Iterator<Item = &RemovalTarget> {
        self.cards
            .iter()
            .flat_map(|card| card.participants.iter())
            .filter_map(|row| match row {
                ParticipantRow::Entry { removal, .. } => removal.as_ref(),
                ParticipantRow::Placeholder => None,
            })
    }
}

// ============ Nodes ============

/// A detached element tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn element(tag: &'static str) -> Self {
        Node::Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element { attrs, .. } = &mut self {
            attrs.push((name, value.into()));
        }
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        if let Node::Element { children, .. } = &mut self {
            children.extend(nodes);
        }
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Depth-first search for every element carrying `class`
    pub fn find_by_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Node>) {
        if let Node::Element { children, .. } = self {
            if self.has_class(class) {
                out.push(self);
            }
            for child in children {
                child.find_by_class(class, out);
            }
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }
}

// ============ Patches ============

/// Styling of the message area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// One mutation of the page
#[derive(Debug, Clone, PartialEq)]
pub enum DomPatch {
    /// Replace all children of the element with this id
    ReplaceChildren {
        target: &'static str,
        nodes: Vec<Node>,
    },
    /// Set the message text, apply the kind's class and unhide it
    ShowMessage { text: String, kind: MessageKind },
    /// Add the `hidden` class to the message area
    HideMessage,
    /// Clear the fields of a form
    ResetForm { target: &'static str },
}

/// Render a loaded view. The list and the select are always patched together
/// so they cannot disagree.
pub fn render(view: &BoardView) -> Vec<DomPatch> {
    vec![
        DomPatch::ReplaceChildren {
            target: ACTIVITIES_LIST_ID,
            nodes: view.cards.iter().map(render_card).collect(),
        },
        DomPatch::ReplaceChildren {
            target: ACTIVITY_SELECT_ID,
            nodes: render_options(&view.options),
        },
    ]
}

/// Patch shown when a load fails. The select is left alone.
pub fn render_load_failure() -> DomPatch {
    DomPatch::ReplaceChildren {
        target: ACTIVITIES_LIST_ID,
        nodes: vec![Node::element("p").child(Node::text(LOAD_FAILED_TEXT))],
    }
}

fn render_card(card: &ActivityCard) -> Node {
    let rows = card.participants.iter().map(|row| match row {
        ParticipantRow::Placeholder => {
            Node::element("li").child(Node::element("em").child(Node::text(NO_PARTICIPANTS_TEXT)))
        }
        ParticipantRow::Entry { email, removal } => {
            let li = Node::element("li").child(
                Node::element("span")
                    .class("participant-email")
                    .child(Node::text(email.as_str())),
            );
            match removal {
                Some(target) => li.child(
                    Node::element("button")
                        .class(DELETE_ICON_CLASS)
                        .attr("data-activity", target.activity.as_str())
                        .attr("data-email", target.email.as_str())
                        .attr("title", "Unregister")
                        .child(Node::text("\u{1F5D1}")),
                ),
                None => li,
            }
        }
    });

    Node::element("div")
        .class(CARD_CLASS)
        .child(Node::element("h4").child(Node::text(card.name.as_str())))
        .child(Node::element("p").child(Node::text(card.description.as_str())))
        .child(labelled("Schedule:", &card.schedule))
        .child(labelled("Capacity:", &card.capacity).class("capacity"))
        .child(labelled("Availability:", &format!("{} spots left", card.spots_left)))
        .child(
            Node::element("div")
                .class("participants-section")
                .child(Node::element("h5").child(Node::text("Participants:")))
                .child(
                    Node::element("ul")
                        .class(PARTICIPANTS_LIST_CLASS)
                        .children(rows),
                ),
        )
}

fn labelled(label: &str, value: &str) -> Node {
    Node::element("p")
        .child(Node::element("strong").child(Node::text(label)))
        .child(Node::text(format!(" {}", value)))
}

fn render_options(names: &[String]) -> Vec<Node> {
    std::iter::once(
        Node::element("option")
            .attr("value", "")
            .child(Node::text(SELECT_PLACEHOLDER_TEXT)),
    )
    .chain(names.iter().map(|name| {
        Node::element("option")
            .attr("value", name.as_str())
            .child(Node::text(name.as_str()))
    }))
    .collect()
}

/// Plain-text rendering of nodes for terminals: block elements start a new
/// line, list items get a bullet.
pub fn to_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_text(node, 0, &mut out);
    }
    out
}

fn write_text(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(t),
        Node::Element { tag, children, .. } => {
            // The trash glyph means nothing on a terminal
            if node.has_class(DELETE_ICON_CLASS) {
                return;
            }
            let block = matches!(*tag, "div" | "p" | "h4" | "h5" | "li" | "ul" | "option");
            if block && !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            if *tag == "li" || *tag == "option" {
                out.push_str(&"  ".repeat(depth));
                out.push_str("- ");
            }
            let depth = if *tag == "ul" { depth + 1 } else { depth };
            for child in children {
                write_text(child, depth, out);
            }
            if block && !out.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}
