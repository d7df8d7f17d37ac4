//! Ordered trail of previously active nodes, most recent last.

use crate::id::NodeId;
use crate::node::NavigationNode;

/// Back-navigation stack. Never contains the current node.
#[derive(Debug, Default, Clone)]
pub struct HistoryStack {
    entries: Vec<NavigationNode>,
}

impl HistoryStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NavigationNode) {
        self.entries.push(node);
    }

    pub fn pop(&mut self) -> Option<NavigationNode> {
        self.entries.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&NavigationNode> {
        self.entries.last()
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.iter().any(|n| n.id() == *id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[NavigationNode] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeIdGenerator;
    use crate::screen::{Screen, TabKind};

    #[test]
    fn lifo_order() {
        let mut ids = NodeIdGenerator::new();
        let mut stack = HistoryStack::new();
        let mut pushed = Vec::new();
        for screen in [Screen::profile("u1"), Screen::post("p1"), Screen::Settings] {
            let (id, ts) = ids.next_id();
            pushed.push(id);
            stack.push(NavigationNode::new(id, screen, None, TabKind::Home, ts));
        }

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek().map(NavigationNode::id), Some(pushed[2]));
        assert!(stack.contains(&pushed[0]));
        assert_eq!(stack.pop().map(|n| n.id()), Some(pushed[2]));
        assert_eq!(stack.pop().map(|n| n.id()), Some(pushed[1]));
        assert_eq!(stack.pop().map(|n| n.id()), Some(pushed[0]));
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }
}
